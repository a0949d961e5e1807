use keepsake_engine::{ChallengeConfig, ChallengeCopy, ChallengePage, Route};

const SECRET: &str = "Esther";

pub fn riddle_one() -> ChallengePage {
    let copy = ChallengeCopy {
        title: "Riddle #1".into(),
        prompt: Some("I was a queen in an old story, and my name means \"star\". Who am I?".into()),
        success_title: "You got it! ⭐".into(),
        success_body: vec!["One down. The next one is a bit more... universal.".into()],
        ..ChallengeCopy::default()
    };
    ChallengePage::new(ChallengeConfig::secret(SECRET, Route::RiddleTwo), copy)
}
