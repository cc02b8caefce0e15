//! Scroll animator driving the marquee offset
//!
//! The animator owns the horizontal offset of the rendered line and moves it
//! left by a fixed amount on every tick. Once the content has fully left the
//! leading edge it jumps back to just past the trailing edge, so playback
//! loops seamlessly.
//!
//! ## States
//!
//! - **Stopped** - no tick driver is scheduled; the offset is frozen
//! - **Running** - exactly one periodic driver is scheduled
//!
//! Host events map onto the policies below:
//!
//! | event         | behaviour                                              |
//! |---------------|--------------------------------------------------------|
//! | toggle        | measure if never measured, then flip Stopped/Running   |
//! | reset         | stop, then reposition; always ends Stopped             |
//! | focus lost    | stop if running and remember it                        |
//! | focus gained  | restart only if focus loss stopped it                  |
//! | resize        | reposition now if stopped, debounce it if running      |
//!
//! ## Example
//!
//! ```rust
//! use marquee_core::animator::{Animator, FixedMeasure, ManualTimers};
//! use marquee_core::config::MarqueeConfig;
//! use std::time::Duration;
//!
//! let mut animator = Animator::new(
//!     MarqueeConfig::default(),
//!     ManualTimers::new(),
//!     FixedMeasure::new(300.0, 500.0),
//! );
//! animator.reposition();
//! animator.start();
//! animator.advance(Duration::from_millis(100)); // five 20ms ticks
//! assert_eq!(animator.state().offset_x, 285.0);
//! ```

mod measure;
mod timers;

pub use measure::{FixedMeasure, Measure};
pub use timers::{ManualTimers, SystemTimers, TimerId, Timers, MIN_PERIOD};

use crate::config::MarqueeConfig;
use core::borrow::BorrowMut;
use std::time::{Duration, Instant};

/// Snapshot of the animation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Whether the tick driver is active
    pub running: bool,
    /// Current horizontal offset of the content's leading edge
    pub offset_x: f64,
    /// Offset the content restarts from (the viewport width)
    pub start_offset_x: f64,
    /// Measured content width; zero until first measured
    pub content_width: f64,
}

/// Input the host forwards to the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Space bar or click on the display surface
    Toggle,
    /// Reset key or reset control
    Reset,
    /// Viewport size changed
    Resize,
    /// Window lost focus
    FocusLost,
    /// Window regained focus
    FocusGained,
    /// A scheduled timer expired
    Timer(TimerId),
}

impl ControlEvent {
    /// Map a key name to its control, if bound
    ///
    /// Accepts both DOM `code` names (`Space`, `KeyR`) and the characters
    /// themselves.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "space" => Some(Self::Toggle),
            "r" | "R" | "KeyR" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Marquee scroll state machine
///
/// Owns its timers and measurement source. At most one periodic tick driver
/// and one resize debounce exist at any time, and both are cancelled on
/// [`Animator::stop`] and on drop.
pub struct Animator<T: Timers, M: Measure> {
    config: MarqueeConfig,
    timers: T,
    measure: M,
    state: AnimationState,
    tick_driver: Option<TimerId>,
    resize_debounce: Option<TimerId>,
    resume_on_focus: bool,
}

impl<T: Timers, M: Measure> Animator<T, M> {
    /// Create a stopped animator positioned off the trailing edge
    ///
    /// The content width stays unmeasured until the first
    /// [`reposition`](Self::reposition).
    pub fn new(config: MarqueeConfig, timers: T, measure: M) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("animating with invalid tuning: {err}");
        }
        let viewport = measure.viewport_width();
        Self {
            config,
            timers,
            measure,
            state: AnimationState {
                running: false,
                offset_x: viewport,
                start_offset_x: viewport,
                content_width: 0.0,
            },
            tick_driver: None,
            resize_debounce: None,
            resume_on_focus: false,
        }
    }

    /// Current state snapshot
    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Whether the tick driver is active
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Tuning this animator was built with
    pub const fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Timer backend
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    /// Timer backend, mutably
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Measurement source
    pub const fn measure(&self) -> &M {
        &self.measure
    }

    /// Measurement source, mutably
    pub fn measure_mut(&mut self) -> &mut M {
        &mut self.measure
    }

    /// Re-measure and park the content just off the trailing edge
    ///
    /// Legal in any state; does not change `running`.
    pub fn reposition(&mut self) {
        let viewport = self.measure.viewport_width();
        self.state.content_width = self.measure.content_width();
        self.state.start_offset_x = viewport;
        self.state.offset_x = viewport;
        log::debug!(
            "repositioned: viewport {viewport}, content {}",
            self.state.content_width
        );
    }

    /// Start scrolling
    ///
    /// Any existing driver is cancelled before the new one is installed, so
    /// calling this while running restarts the period without doubling speed.
    pub fn start(&mut self) {
        if let Some(old) = self.tick_driver.take() {
            self.timers.cancel(old);
        }
        self.tick_driver = Some(self.timers.schedule_periodic(self.config.tick_period));
        self.state.running = true;
        log::debug!("scrolling started at offset {}", self.state.offset_x);
    }

    /// Stop scrolling and release all timers; idempotent
    ///
    /// A debounced resize still pending is applied immediately, as a resize
    /// while stopped would be.
    pub fn stop(&mut self) {
        if self.cancel_timers() {
            self.reposition();
        }
        if self.state.running {
            log::debug!("scrolling stopped at offset {}", self.state.offset_x);
        }
        self.state.running = false;
    }

    /// Advance one step; no-op while stopped
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.offset_x -= self.config.speed_per_tick;
        if self.state.offset_x < -self.state.content_width {
            self.state.offset_x = self.state.start_offset_x;
            log::trace!("content left the viewport, wrapped");
        }
    }

    /// Flip between Stopped and Running
    ///
    /// Measures first if the content has never been measured.
    pub fn toggle(&mut self) {
        if self.state.content_width == 0.0 {
            self.reposition();
        }
        if self.state.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stop and reposition; always ends Stopped
    pub fn reset(&mut self) {
        self.stop();
        self.reposition();
        log::info!("script reset, ready to scroll again");
    }

    /// Pause for a background window, remembering whether to resume
    pub fn focus_lost(&mut self) {
        self.resume_on_focus = self.state.running;
        if self.resume_on_focus {
            self.stop();
        }
    }

    /// Resume if [`focus_lost`](Self::focus_lost) stopped a running marquee
    pub fn focus_gained(&mut self) {
        if std::mem::take(&mut self.resume_on_focus) {
            self.start();
        }
    }

    /// React to a viewport size change
    ///
    /// Stopped: reposition immediately. Running: (re)arm the debounce, and
    /// reposition when it expires without another resize.
    pub fn resize(&mut self) {
        if !self.state.running {
            self.reposition();
            return;
        }
        if let Some(pending) = self.resize_debounce.take() {
            self.timers.cancel(pending);
        }
        self.resize_debounce = Some(self.timers.schedule_once(self.config.resize_debounce));
        log::trace!("resize debounced");
    }

    /// Deliver a timer expiry; stale ids are ignored
    pub fn on_timer(&mut self, id: TimerId) {
        if self.tick_driver == Some(id) {
            self.tick();
        } else if self.resize_debounce == Some(id) {
            self.resize_debounce = None;
            self.reposition();
        } else {
            log::trace!("ignoring stale timer {}", id.get());
        }
    }

    /// Dispatch a host event
    pub fn handle(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Toggle => self.toggle(),
            ControlEvent::Reset => self.reset(),
            ControlEvent::Resize => self.resize(),
            ControlEvent::FocusLost => self.focus_lost(),
            ControlEvent::FocusGained => self.focus_gained(),
            ControlEvent::Timer(id) => self.on_timer(id),
        }
    }

    /// Whether a resize re-measure is pending
    pub const fn has_pending_resize(&self) -> bool {
        self.resize_debounce.is_some()
    }

    /// Cancel both timers; returns whether a resize was still pending
    fn cancel_timers(&mut self) -> bool {
        if let Some(driver) = self.tick_driver.take() {
            self.timers.cancel(driver);
        }
        match self.resize_debounce.take() {
            Some(pending) => {
                self.timers.cancel(pending);
                true
            }
            None => false,
        }
    }
}

impl<T: Timers + BorrowMut<ManualTimers>, M: Measure> Animator<T, M> {
    /// Move the virtual clock forward by `by`, delivering every expiry
    ///
    /// Expiries are delivered one at a time so timers scheduled or
    /// cancelled by earlier ones are honoured. Returns how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timers.borrow_mut().now() + by;
        let mut fired = 0;
        while let Some(id) = self.timers.borrow_mut().pop_due(until) {
            self.on_timer(id);
            fired += 1;
        }
        self.timers.borrow_mut().advance_to(until);
        fired
    }
}

impl<T: Timers + BorrowMut<SystemTimers>, M: Measure> Animator<T, M> {
    /// Deliver every expiry due at `now`; returns how many fired
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(id) = self.timers.borrow_mut().pop_due(now) {
            self.on_timer(id);
            fired += 1;
        }
        fired
    }
}

impl<T: Timers, M: Measure> Drop for Animator<T, M> {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

impl<T: Timers, M: Measure> core::fmt::Debug for Animator<T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Animator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("tick_driver", &self.tick_driver)
            .field("resize_debounce", &self.resize_debounce)
            .field("resume_on_focus", &self.resume_on_focus)
            .finish_non_exhaustive()
    }
}
