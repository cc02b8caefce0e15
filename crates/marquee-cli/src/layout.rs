//! Column layout of a rendered line for terminal playback

use marquee_core::{animator::Measure, render::Segment, RenderedLine};

/// Pixels represented by one terminal column
pub const PX_PER_COLUMN: u32 = 10;

/// Rendered line flattened to terminal cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    cells: Vec<char>,
    viewport: usize,
}

impl ColumnLayout {
    /// Lay out `line` for a window `viewport` columns wide
    pub fn new(line: &RenderedLine, viewport: usize) -> Self {
        let mut cells = Vec::new();
        for segment in line.segments() {
            match segment {
                Segment::Spacer { width_px } => {
                    let columns = width_px.div_ceil(PX_PER_COLUMN) as usize;
                    cells.extend(std::iter::repeat(' ').take(columns));
                }
                Segment::Text { text, .. } | Segment::Label { text, .. } => {
                    cells.extend(text.chars().filter(|c| !c.is_control()));
                }
            }
        }
        Self { cells, viewport }
    }

    /// Visible window when the content's leading edge sits at `offset_x`
    #[allow(clippy::cast_possible_truncation)]
    pub fn frame(&self, offset_x: f64) -> String {
        let offset = offset_x.floor() as i64;
        (0..self.viewport as i64)
            .map(|col| {
                usize::try_from(col - offset)
                    .ok()
                    .and_then(|i| self.cells.get(i).copied())
                    .unwrap_or(' ')
            })
            .collect()
    }

    /// Text centered in the window, for static messages
    pub fn centered(message: &str, viewport: usize) -> String {
        let len = message.chars().count();
        let pad = viewport.saturating_sub(len) / 2;
        format!("{}{message}", " ".repeat(pad))
    }
}

#[allow(clippy::cast_precision_loss)]
impl Measure for ColumnLayout {
    fn viewport_width(&self) -> f64 {
        self.viewport as f64
    }

    fn content_width(&self) -> f64 {
        self.cells.len() as f64
    }
}
