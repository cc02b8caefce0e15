//! One-shot page load: fetch, resolve, render
//!
//! A session runs the load pipeline exactly once and settles on what the
//! display shows for the rest of the page's life: either a scrollable
//! marquee or a centered message. Load failures are terminal; the only
//! recovery is a new session.

use crate::{
    catalog::{resolve, CatalogSource, Selection},
    render::RenderedLine,
    tags::TagRegistry,
    utils::CoreError,
};

/// What the display surface shows after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    /// Rendered script ready to animate
    Marquee(RenderedLine),
    /// Centered static message; never animated
    Message(String),
}

/// Result of a page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    selection: Selection,
    display: Display,
    error: Option<CoreError>,
}

impl Session {
    /// Fetch the catalog, resolve `selection` and render the line
    ///
    /// Never fails: fetch and lookup errors become curated messages and are
    /// kept for diagnostics via [`Session::error`].
    pub fn load<S: CatalogSource + ?Sized>(
        source: &S,
        selection: &Selection,
        registry: &TagRegistry,
    ) -> Self {
        let outcome = source.fetch().and_then(|catalog| {
            resolve(&catalog, selection).map(|line| RenderedLine::new(line, registry))
        });

        match outcome {
            Ok(line) => {
                log::debug!(
                    "loaded {}/{}/{} ({} segments)",
                    selection.character,
                    selection.language,
                    selection.subcategory,
                    line.segments().len()
                );
                Self {
                    selection: selection.clone(),
                    display: Display::Marquee(line),
                    error: None,
                }
            }
            Err(err) => {
                log::error!("script load failed: {err}");
                Self {
                    selection: selection.clone(),
                    display: Display::Message(err.user_message()),
                    error: Some(err),
                }
            }
        }
    }

    /// Selection this session loaded
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// What to show
    #[must_use]
    pub const fn display(&self) -> &Display {
        &self.display
    }

    /// Rendered line, if loading succeeded
    #[must_use]
    pub const fn rendered(&self) -> Option<&RenderedLine> {
        match &self.display {
            Display::Marquee(line) => Some(line),
            Display::Message(_) => None,
        }
    }

    /// Failure behind a message display
    #[must_use]
    pub const fn error(&self) -> Option<&CoreError> {
        self.error.as_ref()
    }

    /// Whether the display may be animated
    #[must_use]
    pub const fn is_playable(&self) -> bool {
        matches!(self.display, Display::Marquee(_))
    }
}
