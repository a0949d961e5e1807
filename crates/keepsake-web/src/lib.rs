pub mod runner;
pub mod sampler;

pub use runner::PageRunner;
pub use sampler::JsSampler;

// Re-exported so `export_page!` expands without extra imports in page crates.
pub use keepsake_engine;

/// Current `window.innerWidth`, if there is a window.
pub fn viewport_width() -> Option<f32> {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width as f32)
}

/// Generate all `#[wasm_bindgen]` exports for a page.
///
/// This macro generates:
/// - `thread_local!` storage for the PageRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (page_init, page_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod page;
///
/// keepsake_web::export_page!(page::RiddlePage, "riddle", page::riddle());
/// ```
///
/// # Arguments
///
/// - `$page_type`: The page struct type that implements `keepsake_engine::Page`
/// - `$page_name`: A string literal used in the initialization log message
/// - `$ctor`: Expression building the page, evaluated by `page_init`
#[macro_export]
macro_rules! export_page {
    ($page_type:ty, $page_name:literal, $ctor:expr) => {
        use std::cell::RefCell;
        use $crate::keepsake_engine::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::PageRunner<$page_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::PageRunner<$page_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Page not initialized. Call page_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn page_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let page: $page_type = $ctor;
            let mut runner = $crate::PageRunner::new(page);
            if let Some(width) = $crate::viewport_width() {
                runner.set_viewport_width(width);
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!(
                "{}: initialized (protocol v{})",
                $page_name,
                $crate::keepsake_engine::PROTOCOL_VERSION
            );
        }

        #[wasm_bindgen]
        pub fn page_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn page_text_changed(value: String) {
            with_runner(|r| r.push_input(InputEvent::TextChanged { value }));
        }

        #[wasm_bindgen]
        pub fn page_submit() {
            with_runner(|r| r.push_input(InputEvent::Submit));
        }

        #[wasm_bindgen]
        pub fn page_continue() {
            with_runner(|r| r.push_input(InputEvent::Continue));
        }

        #[wasm_bindgen]
        pub fn page_toggle_hint() {
            with_runner(|r| r.push_input(InputEvent::ToggleHint));
        }

        #[wasm_bindgen]
        pub fn page_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn page_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn page_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn page_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn page_note_down(midi: u8) {
            with_runner(|r| r.push_input(InputEvent::NoteDown { midi }));
        }

        #[wasm_bindgen]
        pub fn page_note_up(midi: u8) {
            with_runner(|r| r.push_input(InputEvent::NoteUp { midi }));
        }

        #[wasm_bindgen]
        pub fn page_resize(width: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width }));
        }

        #[wasm_bindgen]
        pub fn page_load_config(json: &str) {
            with_runner(|r| r.load_config(json));
        }

        #[wasm_bindgen]
        pub fn page_view_json() -> String {
            with_runner(|r| match r.view_json() {
                Ok(json) => json,
                Err(err) => {
                    log::warn!("{}: view not serializable: {}", $page_name, err);
                    String::from("{}")
                }
            })
        }

        #[wasm_bindgen]
        pub fn page_teardown() {
            with_runner(|r| r.teardown());
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_ui_events_ptr() -> *const f32 {
            with_runner(|r| r.ui_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_ui_events_len() -> u32 {
            with_runner(|r| r.ui_events_len())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
