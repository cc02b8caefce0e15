//! # marquee-core
//!
//! Engine behind a teleprompter-style scrolling marquee. A script line
//! annotated with bracketed tags is picked from a catalog, rendered into
//! styled segments and scrolled across a viewport by a timer-driven
//! animator.
//!
//! ## Components
//!
//! - **Resolver** ([`catalog`]): character/language/subcategory → one line
//! - **Renderer** ([`render`], [`tags`]): line → ordered [`Segment`]s
//! - **Animator** ([`animator`]): offset loop with start/stop/reposition
//! - **Session** ([`session`]): the one-shot load tying them together
//!
//! ## Quick Start
//!
//! ```rust
//! use marquee_core::{
//!     animator::{Animator, FixedMeasure, ManualTimers},
//!     catalog::StaticSource,
//!     config::LaunchParams,
//!     session::Session,
//!     tags::TagRegistry,
//! };
//! use std::time::Duration;
//!
//! let params = LaunchParams::from_query("?character=hero&lang=en&n=2");
//! let source = StaticSource::new(r#"{"hero": {"en": {"intro": "[softly]Hello [pause] world"}}}"#);
//!
//! let session = Session::load(&source, &params.selection, TagRegistry::builtin());
//! assert!(session.is_playable());
//!
//! let mut animator = Animator::new(params.config, ManualTimers::new(), FixedMeasure::new(640.0, 900.0));
//! animator.toggle();
//! animator.advance(Duration::from_millis(200));
//! assert_eq!(animator.state().offset_x, 620.0);
//! ```

#![deny(unsafe_code)]

pub mod animator;
pub mod catalog;
pub mod config;
pub mod render;
pub mod session;
pub mod tags;
pub mod utils;

pub use animator::{AnimationState, Animator, ControlEvent};
pub use catalog::{resolve, ScriptCatalog, Selection};
pub use config::{LaunchParams, MarqueeConfig};
pub use render::{render, render_line, RenderedLine, Segment};
pub use session::{Display, Session};
pub use tags::{TagRegistry, TagSpec};
pub use utils::{CoreError, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
