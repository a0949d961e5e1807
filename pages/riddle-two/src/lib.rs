use wasm_bindgen::prelude::*;

mod page;

keepsake_web::export_page!(keepsake_engine::ChallengePage, "riddle-two", page::riddle_two());
