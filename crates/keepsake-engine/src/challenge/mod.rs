// challenge/mod.rs
//
// Single-input "guess the secret" pages: the state machine, its
// configuration and a ready-made Page that renders it.

pub mod config;
pub mod machine;
pub mod page;

pub use config::{Answer, ChallengeConfig, TimingConfig};
pub use machine::{ChallengeEvent, ChallengeMachine, Phase, RevealStage, SubmitOutcome};
pub use page::{ChallengeCopy, ChallengePage, ChallengeView, ANSWER_PLACEHOLDER};
