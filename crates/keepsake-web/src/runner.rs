use keepsake_engine::{FixedTimestep, InputEvent, InputQueue, Page, PageConfig, PageContext, UiEvent};

/// Generic page runner that wires up the frame loop.
///
/// Each page crate creates a `thread_local!` PageRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_page!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct PageRunner<P: Page> {
    page: P,
    ctx: PageContext,
    input: InputQueue,
    idle_input: InputQueue,
    timestep: FixedTimestep,
    config: PageConfig,
    initialized: bool,
    /// UI events of the last frame, read by the host as a flat f32 buffer.
    frame_events: Vec<UiEvent>,
}

impl<P: Page> PageRunner<P> {
    pub fn new(page: P) -> Self {
        let config = page.config();
        Self {
            page,
            ctx: PageContext::new(&config),
            input: InputQueue::new(),
            idle_input: InputQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            frame_events: Vec::with_capacity(config.max_events),
            config,
            initialized: false,
        }
    }

    /// Initialize the page. Call once after construction.
    /// Events emitted here are delivered with the first frame.
    pub fn init(&mut self) {
        self.config = self.page.config();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx.dt = self.config.fixed_dt;
        self.page.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Report the viewport width before `init` (or at any time after).
    pub fn set_viewport_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.ctx.viewport_width = width;
        }
    }

    /// Push an input event into the queue. Dropped unless the page is live.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width } = event {
            self.set_viewport_width(width);
        }
        if !self.initialized {
            return;
        }
        self.input.push(event);
    }

    /// Run one frame: fixed-step updates, then publish the frame's UI events.
    ///
    /// Input goes to the first step only. A frame too short for a step keeps
    /// its input for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.idle_input };
            self.page.update(&mut self.ctx, input);
        }

        if steps > 0 {
            self.input.drain();
        }
        self.frame_events = self.ctx.take_events();
    }

    /// Apply runtime overrides. A bad document leaves the page untouched.
    pub fn load_config(&mut self, json: &str) {
        if let Err(err) = self.page.load_config(json) {
            log::warn!("ignoring page config: {}", err);
        }
    }

    /// Current view snapshot as JSON.
    pub fn view_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.page.view())
    }

    /// Page unmounted: cancel timers, release audio. Later ticks are no-ops.
    pub fn teardown(&mut self) {
        if !self.initialized {
            return;
        }
        self.page.teardown(&mut self.ctx);
        self.input.drain();
        self.ctx.clear_frame_data();
        self.frame_events.clear();
        self.initialized = false;
        log::info!("page torn down");
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- Pointer accessors for the host's buffer reads ----

    pub fn ui_events(&self) -> &[UiEvent] {
        &self.frame_events
    }

    pub fn ui_events_ptr(&self) -> *const f32 {
        self.frame_events.as_ptr() as *const f32
    }

    pub fn ui_events_len(&self) -> u32 {
        self.frame_events.len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
