use wasm_bindgen::prelude::*;

mod page;

keepsake_web::export_page!(page::PhotoPage, "photo", page::PhotoPage::new());
