use keepsake_engine::{NoteRange, PianoPage, SampleManifest};
use keepsake_web::JsSampler;

/// Samples the host sampler loads; it repitches them to cover the notes
/// in between.
pub fn manifest() -> SampleManifest {
    SampleManifest::default()
}

pub fn piano() -> PianoPage<JsSampler> {
    let audio = JsSampler::new(&manifest());
    log::debug!("piano: keyboard {:?}", NoteRange::DEFAULT);
    PianoPage::cabbage(audio)
}
