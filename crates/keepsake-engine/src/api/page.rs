use serde::Serialize;

use crate::api::types::UiEvent;
use crate::bridge::protocol;
use crate::input::queue::InputQueue;
use crate::route::Route;

/// Runtime configuration, provided by the page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Viewport width assumed until the host reports the real one.
    pub viewport_width: f32,
    /// Maximum number of UI events per frame (default: 32).
    pub max_events: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1024.0,
            max_events: 32,
        }
    }
}

/// The contract every page must fulfill.
pub trait Page {
    /// Snapshot handed to the host renderer as JSON.
    type View: Serialize;

    /// Return runtime configuration. Called once before init.
    fn config(&self) -> PageConfig {
        PageConfig::default()
    }

    /// Page mounted: start entry animations, prefetch the next page.
    fn init(&mut self, ctx: &mut PageContext);

    /// One fixed step. Apply input, advance timers, emit events.
    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue);

    /// Current view snapshot.
    fn view(&self) -> Self::View;

    /// Apply runtime overrides (timings, copy) from JSON.
    fn load_config(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Page unmounted: cancel pending timers and release resources.
    fn teardown(&mut self, _ctx: &mut PageContext) {}
}

/// Mutable access to runtime state, passed to `Page::init` and `Page::update`.
pub struct PageContext {
    /// UI events emitted since the host last read them.
    pub events: Vec<UiEvent>,
    /// Duration of one update step, in seconds.
    pub dt: f32,
    /// Last observed viewport width in CSS pixels.
    pub viewport_width: f32,
    max_events: usize,
}

impl PageContext {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            events: Vec::with_capacity(config.max_events),
            dt: config.fixed_dt,
            viewport_width: config.viewport_width,
            max_events: config.max_events,
        }
    }

    /// Emit a UI event to be forwarded to TypeScript.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: UiEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("ui event dropped (kind {}): frame capacity reached", event.kind_code());
            return;
        }
        self.events.push(event);
    }

    /// Ask the host router to navigate.
    pub fn navigate(&mut self, route: Route) {
        log::info!("navigate -> {}", route.path());
        self.emit_event(protocol::navigate(route));
    }

    /// Ask the host router to prefetch a page. Failures stay on the host side.
    pub fn prefetch(&mut self, route: Route) {
        self.emit_event(protocol::prefetch(route));
    }

    /// Hand the buffered events to the caller and start a fresh frame.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::replace(&mut self.events, Vec::with_capacity(self.max_events))
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new(&PageConfig::default())
    }
}
