use wasm_bindgen::prelude::*;

mod page;

keepsake_web::export_page!(
    keepsake_engine::PianoPage<keepsake_web::JsSampler>,
    "piano",
    page::piano()
);
