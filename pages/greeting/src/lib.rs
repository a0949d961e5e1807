use wasm_bindgen::prelude::*;

mod page;

keepsake_web::export_page!(keepsake_engine::ChallengePage, "greeting", page::greeting());
