//! Tag renderer: script line → ordered display segments
//!
//! Each line is tokenized on `[...]` tags and walked once, left to right.
//! Standalone tags emit their own segment, modifier tags set a pending style
//! that the next text segment consumes, and unknown tags are echoed back as
//! visible labels so typos show up during playback instead of vanishing.
//!
//! # Example
//!
//! ```rust
//! use marquee_core::render::{render_line, Segment};
//!
//! let segments = render_line("[whispering]hi [laugh] bye");
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::text("hi ", Some("whisper")),
//!         Segment::label("[laugh]", "laugh"),
//!         Segment::text(" bye", None),
//!     ]
//! );
//! ```

mod tokens;

pub use tokens::{tokenize, Token};

use crate::tags::{normalize_tag_name, TagRegistry, TagSpec, UNKNOWN_TAG_CLASS};
use serde::Serialize;

/// One displayable piece of a rendered line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Literal script text, optionally styled by a preceding modifier
    Text {
        /// Text content
        text: String,
        /// Style from the modifier that preceded it
        #[serde(skip_serializing_if = "Option::is_none")]
        style_class: Option<String>,
    },
    /// Fixed-width gap
    Spacer {
        /// Gap width in pixels
        width_px: u32,
    },
    /// Visible marker: registered label or unknown tag
    Label {
        /// Marker text
        text: String,
        /// Marker style
        style_class: String,
    },
}

impl Segment {
    /// Text segment
    pub fn text(text: impl Into<String>, style_class: Option<&str>) -> Self {
        Self::Text {
            text: text.into(),
            style_class: style_class.map(str::to_string),
        }
    }

    /// Spacer segment
    #[must_use]
    pub const fn spacer(width_px: u32) -> Self {
        Self::Spacer { width_px }
    }

    /// Label segment
    pub fn label(text: impl Into<String>, style_class: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            style_class: style_class.into(),
        }
    }

    /// Label echoing an unrecognised tag
    #[must_use]
    pub fn unknown_tag(normalized_name: &str) -> Self {
        Self::label(format!("[{normalized_name}]"), UNKNOWN_TAG_CLASS)
    }

    /// Text a viewer sees, `None` for spacers
    #[must_use]
    pub fn visible_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } | Self::Label { text, .. } => Some(text.as_str()),
            Self::Spacer { .. } => None,
        }
    }

    /// Class list a presentation layer applies to this segment
    ///
    /// Tags (spacers, labels, unknown tags) always carry the shared
    /// [`UNKNOWN_TAG_CLASS`] base class; text carries only its modifier.
    #[must_use]
    pub fn css_classes(&self) -> Vec<&str> {
        match self {
            Self::Text { style_class, .. } => style_class.as_deref().into_iter().collect(),
            Self::Spacer { .. } => vec![UNKNOWN_TAG_CLASS],
            Self::Label { style_class, .. } if style_class == UNKNOWN_TAG_CLASS => {
                vec![UNKNOWN_TAG_CLASS]
            }
            Self::Label { style_class, .. } => vec![style_class.as_str(), UNKNOWN_TAG_CLASS],
        }
    }
}

/// Render a line with the given registry
///
/// The pending modifier lives only for this call. It attaches to the next
/// text segment and is cleared; standalone tags neither consume nor clear
/// it. A modifier still pending at the end of the line is dropped.
#[must_use]
pub fn render(line: &str, registry: &TagRegistry) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pending_style: Option<&str> = None;

    for token in tokenize(line) {
        match token {
            Token::Text(text) => segments.push(Segment::text(text, pending_style.take())),
            Token::Tag(raw) => {
                let name = normalize_tag_name(raw);
                match registry.lookup(&name) {
                    Some(TagSpec::Spacer { width_px }) => {
                        segments.push(Segment::spacer(*width_px));
                    }
                    Some(TagSpec::Label { text, style_class }) => {
                        segments.push(Segment::label(text.as_str(), style_class.as_str()));
                    }
                    Some(TagSpec::Modifier { style_class }) => {
                        pending_style = Some(style_class.as_str());
                    }
                    None => {
                        log::warn!("unknown tag {raw} rendered as literal");
                        segments.push(Segment::unknown_tag(&name));
                    }
                }
            }
        }
    }

    if let Some(style) = pending_style {
        log::debug!("modifier '{style}' not followed by text, dropped");
    }

    segments
}

/// Render a line with the built-in vocabulary
#[must_use]
pub fn render_line(line: &str) -> Vec<Segment> {
    render(line, TagRegistry::builtin())
}

/// Rendered segments with presentation helpers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderedLine {
    segments: Vec<Segment>,
}

impl RenderedLine {
    /// Render `line` with `registry`
    #[must_use]
    pub fn new(line: &str, registry: &TagRegistry) -> Self {
        Self::from_segments(render(line, registry))
    }

    /// Wrap already rendered segments
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Segments in source order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consume into the segment list
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Concatenated visible text, spacers omitted
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(Segment::visible_text)
            .collect()
    }

    /// Total spacer width in pixels
    #[must_use]
    pub fn spacer_width_px(&self) -> u32 {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Spacer { width_px } => *width_px,
                _ => 0,
            })
            .sum()
    }

    /// Inline HTML spans, one per segment
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            let classes = segment.css_classes().join(" ");
            html.push_str("<span");
            if !classes.is_empty() {
                html.push_str(&format!(" class=\"{}\"", escape_html(&classes)));
            }
            match segment {
                Segment::Spacer { width_px } => {
                    html.push_str(&format!(
                        " style=\"display:inline-block;width:{width_px}px\">&nbsp;"
                    ));
                }
                Segment::Text { text, .. } | Segment::Label { text, .. } => {
                    html.push('>');
                    html.push_str(&escape_html(text));
                }
            }
            html.push_str("</span>");
        }
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn modifier_scopes_to_next_text_only() {
        assert_eq!(
            render_line("[whispering]hi [laugh] bye"),
            vec![
                Segment::text("hi ", Some("whisper")),
                Segment::label("[laugh]", "laugh"),
                Segment::text(" bye", None),
            ]
        );
    }

    #[test]
    fn modifier_survives_standalone_tags() {
        assert_eq!(
            render_line("[sadly][pause]goodbye"),
            vec![Segment::spacer(140), Segment::text("goodbye", Some("sad"))]
        );
    }

    #[test]
    fn later_modifier_overrides_earlier() {
        assert_eq!(
            render_line("[softly][angrily]no"),
            vec![Segment::text("no", Some("angry"))]
        );
    }

    #[test]
    fn trailing_modifier_is_dropped() {
        assert_eq!(
            render_line("done[excitedly]"),
            vec![Segment::text("done", None)]
        );
        assert!(render_line("[excitedly]").is_empty());
    }

    #[test]
    fn unknown_tag_echoes_normalized_name() {
        assert_eq!(
            render_line("a [ FOO ] b"),
            vec![
                Segment::text("a ", None),
                Segment::unknown_tag("foo"),
                Segment::text(" b", None),
            ]
        );
        assert_eq!(Segment::unknown_tag("foo"), Segment::label("[foo]", "tag"));
    }

    #[test]
    fn spacer_widths() {
        assert_eq!(
            render_line("[pause][pause_short][PAUSE_LONG]"),
            vec![Segment::spacer(140), Segment::spacer(70), Segment::spacer(260)]
        );
    }

    #[test]
    fn css_classes() {
        assert_eq!(Segment::label("[laugh]", "laugh").css_classes(), vec!["laugh", "tag"]);
        assert_eq!(Segment::unknown_tag("x").css_classes(), vec!["tag"]);
        assert_eq!(Segment::spacer(70).css_classes(), vec!["tag"]);
        assert!(Segment::text("t", None).css_classes().is_empty());
    }

    #[test]
    fn html_output() {
        let line = RenderedLine::new("[softly]<hi> [pause][breath]", TagRegistry::builtin());
        assert_eq!(
            line.to_html(),
            "<span class=\"soft\">&lt;hi&gt; </span>\
             <span class=\"tag\" style=\"display:inline-block;width:140px\">&nbsp;</span>\
             <span class=\"breath tag\">[breath]</span>"
        );
        assert_eq!(line.plain_text(), "<hi> [breath]");
        assert_eq!(line.spacer_width_px(), 140);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&render_line("[pause]hi")).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"spacer","width_px":140},{"kind":"text","text":"hi"}]"#
        );
    }
}
