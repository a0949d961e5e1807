use keepsake_engine::{Answer, ChallengeConfig, ChallengeCopy, ChallengePage, Route};

/// Name entry: any non-blank name is accepted and greeted back.
pub fn greeting() -> ChallengePage {
    let config = ChallengeConfig::new(Answer::AnyNonEmpty, Route::RiddleOne);
    let copy = ChallengeCopy {
        title: "What is your name?".into(),
        placeholder: "Enter your name and press Enter".into(),
        success_title: "Hello, {answer}!".into(),
        success_body: vec!["I made you a little something. Ready?".into()],
        continue_label: "Let's go".into(),
        ..ChallengeCopy::default()
    };
    ChallengePage::new(config, copy)
}
