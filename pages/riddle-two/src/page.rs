use keepsake_engine::{ChallengeConfig, ChallengeCopy, ChallengePage, Route};

pub fn riddle_two() -> ChallengePage {
    let copy = ChallengeCopy {
        title: "Riddle #2".into(),
        prompt: Some("What's the answer to life, the universe, and everything?".into()),
        placeholder: "Type a number and press Enter".into(),
        success_title: "Don't panic! 🐬".into(),
        success_body: vec!["Now grab your headphones for the next one.".into()],
        ..ChallengeCopy::default()
    };
    ChallengePage::new(ChallengeConfig::secret("42", Route::Piano), copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_engine::bridge::protocol::{route_of, EVENT_NAVIGATE};
    use keepsake_engine::{InputEvent, InputQueue, Page, PageContext, Phase};

    fn frame(page: &mut ChallengePage, ctx: &mut PageContext, events: Vec<InputEvent>) {
        let input: InputQueue = events.into_iter().collect();
        page.update(ctx, &input);
    }

    #[test]
    fn forty_one_then_forty_two() {
        let mut page = riddle_two();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);

        frame(&mut page, &mut ctx, vec![InputEvent::TextChanged { value: "41".into() }, InputEvent::Submit]);
        assert_eq!(page.view().phase, Phase::Rejected);
        for _ in 0..40 {
            frame(&mut page, &mut ctx, Vec::new());
        }
        assert_eq!(page.view().phase, Phase::Idle);
        assert_eq!(page.view().input_value, "");

        frame(&mut page, &mut ctx, vec![InputEvent::TextChanged { value: "42".into() }, InputEvent::Submit]);
        assert_eq!(page.view().phase, Phase::Accepted);
    }

    #[test]
    fn continues_to_the_piano() {
        let mut page = riddle_two();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        frame(&mut page, &mut ctx, vec![InputEvent::TextChanged { value: "42".into() }, InputEvent::Submit]);
        for _ in 0..30 {
            frame(&mut page, &mut ctx, Vec::new());
        }
        ctx.clear_frame_data();
        frame(&mut page, &mut ctx, vec![InputEvent::Continue]);
        for _ in 0..30 {
            frame(&mut page, &mut ctx, Vec::new());
        }
        let route = ctx
            .events
            .iter()
            .find(|e| e.kind_code() == EVENT_NAVIGATE)
            .and_then(route_of);
        assert_eq!(route, Some(Route::Piano));
    }
}
