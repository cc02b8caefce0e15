//! Layout measurement capability

/// Reports the current viewport and content widths
///
/// Widths are in the host's layout units (pixels for a page, columns for a
/// terminal). They are read on every reposition, so implementations should
/// return live values.
pub trait Measure {
    /// Width of the visible window
    fn viewport_width(&self) -> f64;

    /// Width of the rendered marquee content
    fn content_width(&self) -> f64;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn viewport_width(&self) -> f64 {
        (**self).viewport_width()
    }

    fn content_width(&self) -> f64 {
        (**self).content_width()
    }
}

/// Measurements set by hand
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedMeasure {
    /// Viewport width
    pub viewport: f64,
    /// Content width
    pub content: f64,
}

impl FixedMeasure {
    /// Fixed viewport and content widths
    #[must_use]
    pub const fn new(viewport: f64, content: f64) -> Self {
        Self { viewport, content }
    }
}

impl Measure for FixedMeasure {
    fn viewport_width(&self) -> f64 {
        self.viewport
    }

    fn content_width(&self) -> f64 {
        self.content
    }
}
