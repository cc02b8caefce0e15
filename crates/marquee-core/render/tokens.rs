//! Bracket tokenizer for script lines
//!
//! Splits a line into literal text and `[...]` tag tokens without copying.
//! A tag closes at the first `]` after its `[` on the same line, so tags
//! never nest: `[a [b]` is one tag whose body is `a [b`. A `[` with no
//! closing bracket before the end of the line (or a line break) stays
//! literal text. Empty text between adjacent tags is not emitted.

/// One piece of a script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text between tags
    Text(&'a str),
    /// Tag including its brackets, e.g. `[pause]`
    Tag(&'a str),
}

impl<'a> Token<'a> {
    /// Source slice this token covers
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Text(s) | Self::Tag(s) => s,
        }
    }

    /// Tag body between the brackets, `None` for text
    #[must_use]
    pub fn tag_body(&self) -> Option<&'a str> {
        match self {
            Self::Tag(raw) => Some(&raw[1..raw.len() - 1]),
            Self::Text(_) => None,
        }
    }
}

/// Characters that end a line for tag matching
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Split `line` into text and tag tokens in source order
#[must_use]
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(rel) = line[cursor..].find('[') {
        let open = cursor + rel;
        let body_start = open + 1;
        let close = line[body_start..]
            .find(|c: char| c == ']' || LINE_TERMINATORS.contains(&c))
            .map(|i| body_start + i)
            .filter(|&i| line.as_bytes()[i] == b']');

        let Some(close) = close else {
            // No closing bracket on this line: the '[' is plain text
            cursor = body_start;
            continue;
        };

        if open > text_start {
            tokens.push(Token::Text(&line[text_start..open]));
        }
        tokens.push(Token::Tag(&line[open..=close]));
        text_start = close + 1;
        cursor = text_start;
    }

    if text_start < line.len() {
        tokens.push(Token::Text(&line[text_start..]));
    }

    tokens
}
