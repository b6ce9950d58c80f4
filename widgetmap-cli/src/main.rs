use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use widgetmap::{
    report, FormDocument, PageSelection, ParsedFormDocument, SkipStats, ROW_CLUSTER_THRESHOLD,
    ROW_TOLERANCE,
};

#[derive(Parser)]
#[command(
    name = "widgetmap",
    about = "Match PDF form widgets to their fields and list them by position",
    version
)]
struct Cli {
    /// Log matching details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List checkboxes bottom-up, then left-to-right
    Checkboxes {
        /// Input PDF file
        input: PathBuf,

        /// Page to inspect: first, last, all or a 1-based number
        #[arg(short, long, default_value = "last")]
        page: PageSelection,

        /// Vertical distance under which two checkboxes share a row
        #[arg(long, default_value_t = ROW_TOLERANCE)]
        row_tolerance: f64,
    },

    /// List text fields and their values row by row, top first
    TextFields {
        /// Input PDF file
        input: PathBuf,

        /// Page to inspect: first, last, all or a 1-based number
        #[arg(short, long, default_value = "first")]
        page: PageSelection,

        /// Vertical distance from a row's first widget under which widgets join it
        #[arg(long, default_value_t = ROW_CLUSTER_THRESHOLD)]
        row_threshold: f64,
    },

    /// List every checkbox widget with its rectangle
    Widgets {
        /// Input PDF file
        input: PathBuf,
    },

    /// Report the page holding each named field
    Locate {
        /// Input PDF file
        input: PathBuf,

        /// Fully qualified field names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show field counts and page sizes
    Info {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "widgetmap=debug"
    } else {
        "widgetmap=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open(input: &Path) -> Result<ParsedFormDocument> {
    FormDocument::open(input).with_context(|| format!("Failed to load {}", input.display()))
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Checkboxes {
            input,
            page,
            row_tolerance,
        } => {
            let doc = open(&input)?;
            report::write_document_summary(&mut out, doc.fields(), doc.page_count()?)?;

            let mut skipped = SkipStats::default();
            for scan in doc.scan(page)? {
                let candidates = doc.checkbox_candidates(&scan, row_tolerance);
                debug!(
                    "page {}: {} checkbox candidates",
                    scan.page.number(),
                    candidates.len()
                );
                report::write_page_size(&mut out, &scan.page)?;
                report::write_checkbox_candidates(&mut out, &scan.page, &candidates)?;
                skipped.merge(&scan.skipped);
            }
            report::write_skip_summary(&mut out, &skipped)?;
        }

        Commands::TextFields {
            input,
            page,
            row_threshold,
        } => {
            let doc = open(&input)?;

            let mut skipped = SkipStats::default();
            for scan in doc.scan(page)? {
                let rows = doc.text_rows(&scan, row_threshold);
                report::write_text_rows(&mut out, &scan.page, &rows)?;
                skipped.merge(&scan.skipped);
            }
            report::write_skip_summary(&mut out, &skipped)?;
        }

        Commands::Widgets { input } => {
            let doc = open(&input)?;
            report::write_widget_listing(&mut out, doc.fields())?;
        }

        Commands::Locate { input, names } => {
            let doc = open(&input)?;
            let located = doc.locate(names.as_slice())?;
            report::write_locations(&mut out, &located)?;
        }

        Commands::Info { input } => {
            let doc = open(&input)?;
            let page_count = doc.page_count()?;
            report::write_document_summary(&mut out, doc.fields(), page_count)?;
            for index in 0..page_count {
                report::write_page_size(&mut out, &doc.page(index)?)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
