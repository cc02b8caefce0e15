//! Tag registry for bracketed script directives
//!
//! Script lines embed directives such as `[pause]` or `[whispering]`. Each
//! recognised name maps to one [`TagSpec`]:
//!
//! - [`TagSpec::Spacer`] - fixed-width gap emitted in place
//! - [`TagSpec::Label`] - visible styled marker emitted in place
//! - [`TagSpec::Modifier`] - style class applied to the next text only
//!
//! Names are matched after trimming and lowercasing. Anything not in the
//! registry is rendered back as a literal label with [`UNKNOWN_TAG_CLASS`].
//!
//! # Usage
//!
//! ```rust
//! use marquee_core::tags::{TagRegistry, TagSpec};
//!
//! let registry = TagRegistry::builder()
//!     .builtin()
//!     .register("cough", TagSpec::label("[cough]", "cough"))?
//!     .build();
//!
//! assert_eq!(registry.lookup("  PAUSE "), Some(&TagSpec::Spacer { width_px: 140 }));
//! assert!(registry.lookup("cough").is_some());
//! # Ok::<(), marquee_core::CoreError>(())
//! ```

use crate::utils::{CoreError, Result};
use std::{collections::HashMap, sync::OnceLock};

/// Style class for tags missing from the registry
pub const UNKNOWN_TAG_CLASS: &str = "tag";

/// What a registered tag does when encountered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagSpec {
    /// Fixed-width gap
    Spacer {
        /// Gap width in pixels
        width_px: u32,
    },
    /// Visible marker with its own style
    Label {
        /// Text shown for the marker
        text: String,
        /// Style class for the marker
        style_class: String,
    },
    /// Style for the next text segment
    Modifier {
        /// Style class applied to that segment
        style_class: String,
    },
}

impl TagSpec {
    /// Spacer of `width_px` pixels
    #[must_use]
    pub const fn spacer(width_px: u32) -> Self {
        Self::Spacer { width_px }
    }

    /// Label showing `text` styled with `style_class`
    pub fn label(text: impl Into<String>, style_class: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            style_class: style_class.into(),
        }
    }

    /// Modifier applying `style_class`
    pub fn modifier(style_class: impl Into<String>) -> Self {
        Self::Modifier {
            style_class: style_class.into(),
        }
    }

    /// Whether the tag emits a segment of its own
    #[must_use]
    pub const fn is_standalone(&self) -> bool {
        !matches!(self, Self::Modifier { .. })
    }
}

/// Normalize a raw tag body for lookup
///
/// Strips surrounding brackets if present, trims whitespace and lowercases.
#[must_use]
pub fn normalize_tag_name(raw: &str) -> String {
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);
    inner.trim().to_lowercase()
}

/// Immutable mapping from lowercase tag name to [`TagSpec`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    specs: HashMap<String, TagSpec>,
}

impl TagRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::default()
    }

    /// Shared registry holding the built-in vocabulary
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<TagRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::builder().builtin().build())
    }

    /// Look up a tag by raw or normalized name
    pub fn lookup(&self, name: &str) -> Option<&TagSpec> {
        let key = normalize_tag_name(name);
        self.specs.get(&key)
    }

    /// Number of registered tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no tags are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder collecting tag entries before the registry is frozen
#[derive(Debug, Default)]
pub struct TagRegistryBuilder {
    specs: HashMap<String, TagSpec>,
}

impl TagRegistryBuilder {
    /// Add the built-in vocabulary
    ///
    /// Built-in names never collide with each other, so this cannot fail.
    #[must_use]
    pub fn builtin(mut self) -> Self {
        for (name, spec) in builtin_specs() {
            self.specs.insert(name.to_string(), spec);
        }
        self
    }

    /// Register one tag
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateTag`] if the normalized name is taken,
    /// or [`CoreError::Config`] if it is empty.
    pub fn register(mut self, name: &str, spec: TagSpec) -> Result<Self> {
        let key = normalize_tag_name(name);
        if key.is_empty() {
            return Err(CoreError::config("tag name must not be empty"));
        }
        if self.specs.contains_key(&key) {
            return Err(CoreError::DuplicateTag(key));
        }
        self.specs.insert(key, spec);
        Ok(self)
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> TagRegistry {
        TagRegistry { specs: self.specs }
    }
}

fn builtin_specs() -> [(&'static str, TagSpec); 11] {
    [
        ("pause", TagSpec::spacer(140)),
        ("pause_short", TagSpec::spacer(70)),
        ("pause_long", TagSpec::spacer(260)),
        ("breath", TagSpec::label("[breath]", "breath")),
        ("laugh", TagSpec::label("[laugh]", "laugh")),
        ("giggles", TagSpec::label("[giggles]", "giggles")),
        ("whispering", TagSpec::modifier("whisper")),
        ("excitedly", TagSpec::modifier("excited")),
        ("angrily", TagSpec::modifier("angry")),
        ("sadly", TagSpec::modifier("sad")),
        ("softly", TagSpec::modifier("soft")),
    ]
}
