//! End-to-end load: query string → catalog → display

use marquee_core::{
    catalog::{CatalogSource, FileSource, ScriptCatalog, StaticSource},
    config::LaunchParams,
    render::Segment,
    session::{Display, Session},
    tags::TagRegistry,
    CoreError,
};

const SCRIPTS: &str = r#"{
    "hero": {
        "en": {
            "intro": "[excitedly]We made it![pause] Let's [whispering]go quietly [breath] now.",
            "outro": "[sadly]Farewell.[pause_long]"
        },
        "es": {"intro": "[softly]Hola [giggles]"}
    },
    "villain": {"en": {"taunt": "You [typo] fool"}}
}"#;

struct FailingSource;

impl CatalogSource for FailingSource {
    fn fetch(&self) -> marquee_core::Result<ScriptCatalog> {
        Err(CoreError::catalog_unavailable("HTTP 503"))
    }
}

fn load(query: &str) -> Session {
    let params = LaunchParams::from_query(query);
    Session::load(
        &StaticSource::new(SCRIPTS),
        &params.selection,
        TagRegistry::builtin(),
    )
}

#[test]
fn default_query_loads_first_hero_line() {
    let session = load("");
    let line = session.rendered().expect("should render");
    assert_eq!(
        line.segments(),
        &[
            Segment::text("We made it!", Some("excited")),
            Segment::spacer(140),
            Segment::text(" Let's ", None),
            Segment::text("go quietly ", Some("whisper")),
            Segment::label("[breath]", "breath"),
            Segment::text(" now.", None),
        ]
    );
}

#[test]
fn language_and_subcategory_from_query() {
    let session = load("?lang=es&subcat=intro");
    assert_eq!(
        session.rendered().unwrap().plain_text(),
        "Hola [giggles]"
    );

    let session = load("?subcat=outro");
    assert_eq!(
        session.rendered().unwrap().segments(),
        &[Segment::text("Farewell.", Some("sad")), Segment::spacer(260)]
    );
}

#[test]
fn typo_tag_still_plays() {
    let session = load("character=villain");
    assert!(session.is_playable());
    assert!(session
        .rendered()
        .unwrap()
        .segments()
        .contains(&Segment::label("[typo]", "tag")));
}

#[test]
fn not_found_message() {
    let session = load("character=hero&lang=de&subcat=intro");
    assert_eq!(
        session.display(),
        &Display::Message("No script found for hero (de) [intro].".to_string())
    );
}

#[test]
fn fetch_failure_message_hides_details() {
    let session = Session::load(
        &FailingSource,
        &LaunchParams::default().selection,
        TagRegistry::builtin(),
    );
    match session.display() {
        Display::Message(text) => {
            assert_eq!(text, "Error loading script data.");
            assert!(!text.contains("503"));
        }
        Display::Marquee(_) => panic!("failed fetch must not render a marquee"),
    }
    assert!(!session.is_playable());
}

#[test]
fn missing_file_is_a_catalog_error() {
    let session = Session::load(
        &FileSource::new("/definitely/not/here/scripts.json"),
        &LaunchParams::default().selection,
        TagRegistry::builtin(),
    );
    assert_eq!(
        session.display(),
        &Display::Message("Error loading script data.".to_string())
    );
}
