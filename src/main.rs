//! tabgen - render guitar tablature from a transcribed note document

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{info, LevelFilter, Log, Metadata, Record};

use tabgen::{event_table, parse_document, render, synthesize, TabError, TabOptions};

/// Synthesize ASCII guitar tab from a note list (YAML or JSON)
#[derive(Parser)]
#[command(name = "tabgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Note document to read ("-" for stdin)
    input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shift every note by this many semitones
    #[arg(long, allow_negative_numbers = true)]
    transpose: Option<i32>,

    /// Capo fret (raises every open string)
    #[arg(long, allow_negative_numbers = true)]
    capo: Option<i32>,

    /// Put the low E string on the top row
    #[arg(long)]
    reverse: bool,

    /// Characters of tab per line before wrapping
    #[arg(long)]
    width: Option<usize>,

    /// Highest fret the assigner may use
    #[arg(long)]
    max_fret: Option<i32>,

    /// Append the per-event detail table
    #[arg(long)]
    events: bool,

    /// Print the event list as JSON instead of the tab grid
    #[arg(long, conflicts_with = "events")]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Command-line flags override the document's own settings.
    fn apply_overrides(&self, options: &mut TabOptions) {
        if let Some(transpose) = self.transpose {
            options.transpose = transpose;
        }
        if let Some(capo) = self.capo {
            options.capo = capo;
        }
        if self.reverse {
            options.reverse_display = true;
        }
        if let Some(width) = self.width {
            options.width_limit = width;
        }
        if let Some(max_fret) = self.max_fret {
            options.max_fret = max_fret;
        }
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn read_input(path: &Path) -> Result<String, TabError> {
    let io_error = |source| TabError::Io {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map_err(io_error)?;
        Ok(source)
    } else {
        fs::read_to_string(path).map_err(io_error)
    }
}

fn run(cli: &Cli) -> Result<(), TabError> {
    let source = read_input(&cli.input)?;
    let document = parse_document(&source)?;

    let mut options = document.options;
    cli.apply_overrides(&mut options);

    let notes = document.notes();
    let synthesis = synthesize(&notes, &options)?;
    info!(
        "{} notes in, {} events, {} dropped, {} overwritten",
        notes.len(),
        synthesis.store.len(),
        synthesis.dropped_count(),
        synthesis.overwritten_count()
    );

    let mut text = if cli.json {
        let mut json = serde_json::to_string_pretty(&synthesis.store)
            .map_err(|e| TabError::Export(e.to_string()))?;
        json.push('\n');
        json
    } else {
        render(synthesis.store.events(), &options.render_options())?
    };
    if cli.events && !synthesis.store.is_empty() {
        text.push_str(&event_table(&synthesis.store));
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| TabError::Io {
                path: path.clone(),
                source,
            })?;
            info!("Wrote tab to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
