use serde::{Deserialize, Serialize};

/// Pages of the experience, in the order a visitor walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Greeting,
    RiddleOne,
    RiddleTwo,
    Piano,
    Photo,
}

impl Route {
    /// Every route, first to last.
    pub const ALL: [Route; 5] = [
        Route::Greeting,
        Route::RiddleOne,
        Route::RiddleTwo,
        Route::Piano,
        Route::Photo,
    ];

    /// URL path the host router navigates to.
    pub fn path(self) -> &'static str {
        match self {
            Route::Greeting => "/",
            Route::RiddleOne => "/riddle",
            Route::RiddleTwo => "/riddle-two",
            Route::Piano => "/piano",
            Route::Photo => "/photo",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    /// Position in the sequence (also the wire encoding).
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// The page that follows this one, or `None` for the last page.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_order() {
        assert_eq!(Route::Greeting.next(), Some(Route::RiddleOne));
        assert_eq!(Route::RiddleOne.next(), Some(Route::RiddleTwo));
        assert_eq!(Route::RiddleTwo.next(), Some(Route::Piano));
        assert_eq!(Route::Piano.next(), Some(Route::Photo));
        assert_eq!(Route::Photo.next(), None);
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/piano/"), Some(Route::Piano));
        assert_eq!(Route::from_path(""), Some(Route::Greeting));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn deserializes_kebab_case() {
        let route: Route = serde_json::from_str("\"riddle-two\"").unwrap();
        assert_eq!(route, Route::RiddleTwo);
    }
}
