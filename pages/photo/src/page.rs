use serde::{Deserialize, Serialize};

use keepsake_engine::layout::polaroid_width;
use keepsake_engine::{
    ChallengeConfig, ChallengeCopy, ChallengePage, ChallengeView, Gallery, InputEvent, InputQueue,
    Page, PageContext, PhotoRow, Route,
};

const SECRET: &str = "1432";

fn copy() -> ChallengeCopy {
    ChallengeCopy {
        title: "Every picture tells a story, but together they tell a timeline".into(),
        subtitle: Some("Snap into focus 📷".into()),
        prompt: Some("What's the answer to this final photo riddle?".into()),
        hint: Some("💡 Hint: Read the numbers as time intended them to be read".into()),
        success_title: "Happy Birthday, Era!".into(),
        success_body: vec![
            "You did it!! Thank you for playing along and making it this far! \
             I hope this little puzzle was fun for you to solve as much as it was fun for me to make! \
             I literally spent sleepless nights on this so feedback would be highly appreciated HAHA!"
                .into(),
            "Anyway... I've already told you a lot of things from my scuffed grad speech and my \
             novel length telegram messages. So this time around, I thought that it would be nice \
             for everyone to say something as well cause they care about you too hehe! I know the \
             road ahead is tough but I hope the memories we share can give you a happiness boost \
             when you need it!"
                .into(),
        ],
        continue_label: "Play again".into(),
        ..ChallengeCopy::default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryOverrides {
    gallery: Option<Gallery>,
}

/// Challenge view plus the photos revealed inside the success card.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoView {
    #[serde(flatten)]
    pub challenge: ChallengeView,
    /// Empty until the success card is mounted.
    pub rows: Vec<PhotoRow>,
    pub polaroid_width: f32,
}

/// Final riddle. Solving it reveals the gallery; "play again" restarts at `/`.
pub struct PhotoPage {
    challenge: ChallengePage,
    gallery: Gallery,
    viewport_width: f32,
}

impl PhotoPage {
    pub fn new() -> Self {
        Self {
            challenge: ChallengePage::new(ChallengeConfig::secret(SECRET, Route::Greeting), copy()),
            gallery: Gallery::default(),
            viewport_width: 0.0,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }
}

impl Default for PhotoPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for PhotoPage {
    type View = PhotoView;

    fn init(&mut self, ctx: &mut PageContext) {
        self.viewport_width = ctx.viewport_width;
        self.challenge.init(ctx);
    }

    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue) {
        self.viewport_width = ctx.viewport_width;
        for event in input.iter() {
            if let InputEvent::Resize { width } = event {
                self.viewport_width = *width;
            }
        }
        self.challenge.update(ctx, input);
    }

    fn view(&self) -> PhotoView {
        let challenge = self.challenge.view();
        let rows = if challenge.success_card.is_some() {
            self.gallery.rows()
        } else {
            Vec::new()
        };
        PhotoView {
            challenge,
            rows,
            polaroid_width: polaroid_width(self.viewport_width),
        }
    }

    fn load_config(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let overrides: GalleryOverrides = serde_json::from_str(json)?;
        if let Some(gallery) = overrides.gallery {
            log::info!("photo: gallery replaced ({} photos)", gallery.len());
            self.gallery = gallery;
        }
        self.challenge.load_config(json)
    }

    fn teardown(&mut self, ctx: &mut PageContext) {
        self.challenge.teardown(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_engine::bridge::protocol::{route_of, EVENT_NAVIGATE};
    use keepsake_engine::Phase;

    fn frame(page: &mut PhotoPage, ctx: &mut PageContext, events: Vec<InputEvent>) {
        let input: InputQueue = events.into_iter().collect();
        page.update(ctx, &input);
    }

    fn idle(page: &mut PhotoPage, ctx: &mut PageContext, frames: u32) {
        for _ in 0..frames {
            frame(page, ctx, Vec::new());
        }
    }

    fn solve(page: &mut PhotoPage, ctx: &mut PageContext) {
        frame(page, ctx, vec![InputEvent::TextChanged { value: "1432".into() }, InputEvent::Submit]);
        idle(page, ctx, 30);
    }

    #[test]
    fn photos_hidden_until_solved() {
        let mut page = PhotoPage::new();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        idle(&mut page, &mut ctx, 10);
        assert!(page.view().rows.is_empty());

        solve(&mut page, &mut ctx);
        let view = page.view();
        assert_eq!(view.challenge.phase, Phase::Accepted);
        assert_eq!(view.rows.len(), page.gallery().len());
        assert!(view.rows[1].reversed);
    }

    #[test]
    fn celebration_keeps_the_whole_message() {
        let view = PhotoPage::new().view();
        let body = &view.challenge.success_body;
        assert_eq!(body.len(), 2);
        assert!(body[0].ends_with("I literally spent sleepless nights on this so feedback would be highly appreciated HAHA!"));
        assert!(body[1].starts_with("Anyway... I've already told you a lot of things"));
        assert!(body[1].contains("scuffed grad speech and my novel length telegram messages. So this time"));
        assert!(body[1].ends_with("happiness boost when you need it!"));
        assert_eq!(view.challenge.success_title, "Happy Birthday, Era!");
    }

    #[test]
    fn wrong_order_is_rejected() {
        let mut page = PhotoPage::new();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        frame(&mut page, &mut ctx, vec![InputEvent::TextChanged { value: "1234".into() }, InputEvent::Submit]);
        let view = page.view();
        assert_eq!(view.challenge.phase, Phase::Rejected);
        assert!(view.challenge.error_message.is_some());
        assert!(view.rows.is_empty());
    }

    #[test]
    fn play_again_returns_to_start() {
        let mut page = PhotoPage::new();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        solve(&mut page, &mut ctx);
        ctx.clear_frame_data();

        frame(&mut page, &mut ctx, vec![InputEvent::Continue]);
        idle(&mut page, &mut ctx, 30);
        let route = ctx
            .events
            .iter()
            .find(|e| e.kind_code() == EVENT_NAVIGATE)
            .and_then(route_of);
        assert_eq!(route, Some(Route::Greeting));
    }

    #[test]
    fn polaroids_follow_the_viewport() {
        let mut page = PhotoPage::new();
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        assert_eq!(page.view().polaroid_width, 176.0);

        ctx.viewport_width = 375.0;
        frame(&mut page, &mut ctx, Vec::new());
        assert_eq!(page.view().polaroid_width, 144.0);
    }

    #[test]
    fn config_replaces_gallery_and_copy() {
        let mut page = PhotoPage::new();
        let json = r#"{
            "gallery": { "photos": [ { "src": "/photos/one.jpg", "alt": "Beach day" } ] },
            "copy": { "title": "Timeline" }
        }"#;
        page.load_config(json).unwrap();
        assert_eq!(page.gallery().len(), 1);
        assert_eq!(page.view().challenge.title, "Timeline");

        assert!(page.load_config("not json").is_err());
        assert_eq!(page.gallery().len(), 1);
    }
}
