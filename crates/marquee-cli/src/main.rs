//! `marquee` - render and play tag-annotated teleprompter scripts

mod layout;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use layout::ColumnLayout;
use marquee_core::{
    animator::{Animator, SystemTimers},
    catalog::{CatalogSource, FileSource},
    config::LaunchParams,
    session::{Display, Session},
    tags::TagRegistry,
    ControlEvent,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Render and play tag-annotated teleprompter scripts
#[derive(Parser, Debug)]
#[command(name = "marquee", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one script line and print its rendered segments
    Render {
        #[command(flatten)]
        load: LoadArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List characters, languages and subcategories in declared order
    List {
        /// Path to the scripts JSON catalog
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
    },
    /// Scroll the resolved line across the terminal
    Play {
        #[command(flatten)]
        load: LoadArgs,

        /// Window width in columns
        #[arg(long, env = "COLUMNS", default_value_t = 80)]
        width: usize,

        /// Stop after this many seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
    },
}

#[derive(clap::Args, Debug)]
struct LoadArgs {
    /// Path to the scripts JSON catalog
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,

    /// Launch parameters, e.g. "?character=hero&lang=en&subcat=intro&n=3&t=20"
    #[arg(long, value_name = "QUERY", default_value = "")]
    query: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Visible text only
    Text,
    /// Inline HTML spans
    Html,
    /// Segment list as JSON
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::Render { load, format } => render(&load, format),
        Command::List { catalog } => list(&catalog),
        Command::Play {
            load,
            width,
            seconds,
        } => play(&load, width, seconds),
    }
}

fn load_session(args: &LoadArgs) -> (LaunchParams, Session) {
    let params = LaunchParams::from_query(&args.query);
    let session = Session::load(
        &FileSource::new(&args.catalog),
        &params.selection,
        TagRegistry::builtin(),
    );
    (params, session)
}

fn render(args: &LoadArgs, format: Format) -> Result<()> {
    let (_, session) = load_session(args);
    let output = match (session.display(), format) {
        (Display::Message(message), Format::Json) => {
            serde_json::json!({ "message": message }).to_string()
        }
        (Display::Message(message), _) => message.clone(),
        (Display::Marquee(line), Format::Text) => line.plain_text(),
        (Display::Marquee(line), Format::Html) => line.to_html(),
        (Display::Marquee(line), Format::Json) => {
            serde_json::to_string_pretty(line).context("Failed to encode segments")?
        }
    };
    println!("{output}");
    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let catalog = FileSource::new(path)
        .fetch()
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    for (character, languages) in catalog.characters() {
        println!("{character}");
        for (language, subcategories) in languages.iter() {
            let keys: Vec<&str> = subcategories.keys().collect();
            println!("  {language}: {}", keys.join(", "));
        }
    }
    Ok(())
}

fn play(args: &LoadArgs, width: usize, seconds: f64) -> Result<()> {
    anyhow::ensure!(width > 0, "Width must be positive");
    anyhow::ensure!(
        seconds.is_finite() && seconds > 0.0,
        "Seconds must be a positive number, got {seconds}"
    );

    let (params, session) = load_session(args);
    params
        .config
        .validate()
        .context("Invalid launch parameters")?;

    let line = match session.display() {
        Display::Marquee(line) => line,
        Display::Message(message) => {
            println!("{}", ColumnLayout::centered(message, width));
            return Ok(());
        }
    };

    let layout = ColumnLayout::new(line, width);
    log::info!(
        "playing {:?} for {seconds}s in {width} columns",
        session.selection()
    );
    let mut animator = Animator::new(params.config, SystemTimers::new(), layout);
    animator.reposition();
    animator.handle(ControlEvent::Toggle);

    let mut stdout = std::io::stdout().lock();
    let end = Instant::now() + Duration::from_secs_f64(seconds);
    draw(&mut stdout, &animator)?;

    loop {
        let now = Instant::now();
        if now >= end {
            break;
        }
        if animator.fire_due(now) > 0 {
            draw(&mut stdout, &animator)?;
        }
        let wake = animator
            .timers()
            .next_deadline()
            .map_or(end, |deadline| deadline.min(end));
        std::thread::sleep(wake.saturating_duration_since(Instant::now()));
    }

    animator.stop();
    writeln!(stdout).context("Failed to write to terminal")?;
    Ok(())
}

fn draw<W: Write>(out: &mut W, animator: &Animator<SystemTimers, ColumnLayout>) -> Result<()> {
    let frame = animator.measure().frame(animator.state().offset_x);
    write!(out, "\r{frame}").context("Failed to write to terminal")?;
    out.flush().context("Failed to flush terminal")?;
    Ok(())
}
