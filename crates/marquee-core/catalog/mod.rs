//! Script catalog and selection resolution
//!
//! The catalog is a read-only nested lookup of character → language →
//! subcategory → line, fetched once from an external source. Resolution
//! picks exactly one line for a [`Selection`] or reports
//! [`CoreError::SelectionNotFound`] carrying the requested keys.
//!
//! # Fallback policy
//!
//! When the requested subcategory is empty or absent, the first subcategory
//! in the catalog's declared order is used. Declared order survives
//! deserialization through [`OrderedMap`].
//!
//! # Example
//!
//! ```rust
//! use marquee_core::catalog::{resolve, ScriptCatalog, Selection};
//!
//! let catalog = ScriptCatalog::from_json_str(
//!     r#"{"hero": {"en": {"intro": "Hello [pause] world", "outro": "Bye"}}}"#,
//! )?;
//!
//! let selection = Selection::new("hero", "en", "");
//! assert_eq!(resolve(&catalog, &selection)?, "Hello [pause] world");
//! # Ok::<(), marquee_core::CoreError>(())
//! ```

mod ordered;

pub use ordered::OrderedMap;

use crate::utils::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::{io::Read, path::PathBuf};

/// Subcategory → line
pub type SubcategoryMap = OrderedMap<String>;
/// Language → subcategories
pub type LanguageMap = OrderedMap<SubcategoryMap>;

/// Nested script lookup keyed by character, language and subcategory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptCatalog {
    characters: OrderedMap<LanguageMap>,
}

impl ScriptCatalog {
    /// Decode a catalog from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CatalogUnavailable`] if the text is not a
    /// three-level object of strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a catalog from a reader
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CatalogUnavailable`] on read or decode failure.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build a catalog from an already ordered map
    #[must_use]
    pub const fn from_map(characters: OrderedMap<LanguageMap>) -> Self {
        Self { characters }
    }

    /// Languages declared for a character
    pub fn languages(&self, character: &str) -> Option<&LanguageMap> {
        self.characters.get(character)
    }

    /// Subcategories declared for a character/language pair
    pub fn subcategories(&self, character: &str, language: &str) -> Option<&SubcategoryMap> {
        self.languages(character)?.get(language)
    }

    /// Character ids in declared order
    pub fn characters(&self) -> impl Iterator<Item = (&str, &LanguageMap)> {
        self.characters.iter()
    }

    /// Whether the catalog holds no characters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Which script line to show
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Character id
    pub character: String,
    /// Language code
    pub language: String,
    /// Subcategory id, empty for "first declared"
    pub subcategory: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            character: "hero".to_string(),
            language: "en".to_string(),
            subcategory: String::new(),
        }
    }
}

impl Selection {
    /// Create a selection from its three keys
    pub fn new(
        character: impl Into<String>,
        language: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        Self {
            character: character.into(),
            language: language.into(),
            subcategory: subcategory.into(),
        }
    }

    fn not_found(&self) -> CoreError {
        CoreError::selection_not_found(&self.character, &self.language, &self.subcategory)
    }
}

/// Resolve a selection to exactly one line of script text
///
/// An empty line counts as absent: a requested subcategory holding an empty
/// string falls back to the first declared one, and an empty first line is
/// reported as not found.
///
/// # Errors
///
/// Returns [`CoreError::SelectionNotFound`] when the character/language pair
/// is missing or has no usable line.
pub fn resolve<'a>(catalog: &'a ScriptCatalog, selection: &Selection) -> Result<&'a str> {
    let subcategories = catalog
        .subcategories(&selection.character, &selection.language)
        .ok_or_else(|| selection.not_found())?;

    if !selection.subcategory.is_empty() {
        if let Some(line) = subcategories
            .get(&selection.subcategory)
            .filter(|line| !line.is_empty())
        {
            return Ok(line.as_str());
        }
    }

    match subcategories.first() {
        Some((key, line)) if !line.is_empty() => {
            if !selection.subcategory.is_empty() {
                log::debug!(
                    "subcategory '{}' missing for {}/{}, using '{key}'",
                    selection.subcategory,
                    selection.character,
                    selection.language
                );
            }
            Ok(line.as_str())
        }
        _ => Err(selection.not_found()),
    }
}

/// One-shot provider of the script catalog
///
/// Implementations perform the external fetch. Failure is terminal for the
/// session and must surface as [`CoreError::CatalogUnavailable`].
pub trait CatalogSource {
    /// Fetch and decode the catalog
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CatalogUnavailable`] if the catalog cannot be
    /// read or decoded.
    fn fetch(&self) -> Result<ScriptCatalog>;
}

/// Catalog stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn fetch(&self) -> Result<ScriptCatalog> {
        let file = std::fs::File::open(&self.path).map_err(|err| {
            CoreError::catalog_unavailable(format!("{}: {err}", self.path.display()))
        })?;
        ScriptCatalog::from_reader(std::io::BufReader::new(file))
    }
}

/// Catalog held in memory as JSON text
#[derive(Debug, Clone)]
pub struct StaticSource {
    json: String,
}

impl StaticSource {
    /// Create a source serving `json`
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl CatalogSource for StaticSource {
    fn fetch(&self) -> Result<ScriptCatalog> {
        ScriptCatalog::from_json_str(&self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "hero": {
            "en": {"intro": "Hi there", "battle": "[angrily]Stand down!", "blank": ""},
            "fr": {}
        },
        "villain": {"en": {"taunt": "[laugh] fool"}}
    }"#;

    fn catalog() -> ScriptCatalog {
        ScriptCatalog::from_json_str(CATALOG).unwrap()
    }

    #[test]
    fn exact_subcategory() {
        let c = catalog();
        let line = resolve(&c, &Selection::new("hero", "en", "battle")).unwrap();
        assert_eq!(line, "[angrily]Stand down!");
    }

    #[test]
    fn empty_subcategory_uses_first() {
        let c = catalog();
        assert_eq!(resolve(&c, &Selection::default()).unwrap(), "Hi there");
    }

    #[test]
    fn unknown_subcategory_uses_first() {
        let c = catalog();
        let line = resolve(&c, &Selection::new("hero", "en", "nope")).unwrap();
        assert_eq!(line, "Hi there");
    }

    #[test]
    fn blank_line_falls_back() {
        let c = catalog();
        let line = resolve(&c, &Selection::new("hero", "en", "blank")).unwrap();
        assert_eq!(line, "Hi there");
    }

    #[test]
    fn missing_pair_reports_selection() {
        let c = catalog();
        let err = resolve(&c, &Selection::new("hero", "de", "intro")).unwrap_err();
        assert_eq!(err, CoreError::selection_not_found("hero", "de", "intro"));

        let err = resolve(&c, &Selection::new("sidekick", "en", "")).unwrap_err();
        assert!(matches!(err, CoreError::SelectionNotFound { .. }));
    }

    #[test]
    fn empty_language_map_is_not_found() {
        let c = catalog();
        assert!(resolve(&c, &Selection::new("hero", "fr", "")).is_err());
    }

    #[test]
    fn malformed_json_is_unavailable() {
        let err = ScriptCatalog::from_json_str(r#"{"hero": {"en": {"a": 1}}}"#).unwrap_err();
        assert!(matches!(err, CoreError::CatalogUnavailable(_)));
        assert!(StaticSource::new("{").fetch().is_err());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = FileSource::new("/nonexistent/scripts.json")
            .fetch()
            .unwrap_err();
        assert!(matches!(err, CoreError::CatalogUnavailable(_)));
    }
}
