//! CLI binary for doc-converter.
//!
//! Translates command-line flags into the same UI events a browser page
//! would emit, feeds them to the orchestrator, and saves the download.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use doc_converter::output::save_to_dir;
use doc_converter::ui::render::ViewRenderer;
use doc_converter::{
    ClientConfig, ConverterClient, EventSource, InputFormat, InputTab, Orchestrator,
    OutputFormat, ScriptedEvents, UiEvent, UploadFile, View,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Terminal renderer ────────────────────────────────────────────────────────

/// Renders orchestrator views to stderr: a spinner while converting,
/// a green tick on success. Errors are reported by `main`.
struct CliRenderer {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl CliRenderer {
    fn new(quiet: bool) -> Arc<Self> {
        Arc::new(Self {
            spinner: Mutex::new(None),
            quiet,
        })
    }

    fn start_spinner(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(bar);
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl ViewRenderer for CliRenderer {
    fn on_view_change(&self, view: &View) {
        match view {
            View::InProgress { message } if !self.quiet => self.start_spinner(message),
            View::Success { message, .. } => {
                self.stop_spinner();
                if !self.quiet {
                    eprintln!("{} {}", green("✔"), bold(message));
                }
            }
            _ => self.stop_spinner(),
        }
    }

    fn on_file_selected(&self, name: &str, size_label: &str) {
        if !self.quiet {
            eprintln!("{} {}", dim("file:"), dim(&format!("{name} ({size_label})")));
        }
    }
}

// ── CLI definition ───────────────────────────────────────────────────────────

const AFTER_HELP: &str = r#"EXAMPLES:
  # Uploaded Markdown file to PDF
  docconv convert report.md

  # HTML file to PNG pages, custom size, into ./out
  docconv convert page.html --to png --width 1024 --height 768 -o out

  # Typed Markdown to JPG
  docconv convert --text '# Hello' --to jpg

  # Markdown from stdin
  cat notes.md | docconv convert --stdin --to pdf

  # Is the API up?
  docconv health

ENVIRONMENT VARIABLES:
  DOCCONV_API_BASE_URL   Conversion API root (default: http://localhost:8000)
  RUST_LOG               Log filter, e.g. doc_converter=debug
"#;

/// Convert Markdown and HTML to PDF or images through a conversion API.
#[derive(Parser, Debug)]
#[command(
    name = "docconv",
    version,
    about = "Convert Markdown and HTML to PDF or images through a conversion API",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Base URL of the conversion API.
    #[arg(long, global = true, env = "DOCCONV_API_BASE_URL")]
    api_url: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DOCCONV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the saved path.
    #[arg(short, long, global = true, env = "DOCCONV_QUIET")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a file or typed text.
    Convert(ConvertArgs),
    /// Check that the API is reachable.
    Health {
        /// Print the raw JSON status.
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// .html, .md or .markdown file to upload.
    #[arg(conflicts_with_all = ["text", "stdin"])]
    file: Option<PathBuf>,

    /// Content to convert instead of a file.
    #[arg(long, conflicts_with = "stdin")]
    text: Option<String>,

    /// Read content to convert from stdin.
    #[arg(long)]
    stdin: bool,

    /// Markup of --text / --stdin content.
    #[arg(long = "from", value_enum, default_value = "markdown")]
    input_format: InputArg,

    /// Output format.
    #[arg(long = "to", env = "DOCCONV_FORMAT", value_enum, default_value = "pdf")]
    output_format: OutputArg,

    /// Image width in pixels (png/jpg only).
    #[arg(long, env = "DOCCONV_WIDTH")]
    width: Option<String>,

    /// Image height in pixels (png/jpg only).
    #[arg(long, env = "DOCCONV_HEIGHT")]
    height: Option<String>,

    /// Directory to save the result into.
    #[arg(short, long, env = "DOCCONV_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Skip the startup health check.
    #[arg(long)]
    skip_health_check: bool,

    /// Print a JSON summary of the saved file.
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum InputArg {
    Markdown,
    Html,
}

impl From<InputArg> for InputFormat {
    fn from(v: InputArg) -> Self {
        match v {
            InputArg::Markdown => InputFormat::Markdown,
            InputArg::Html => InputFormat::Html,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputArg {
    Pdf,
    Png,
    Jpg,
}

impl From<OutputArg> for OutputFormat {
    fn from(v: OutputArg) -> Self {
        match v {
            OutputArg::Pdf => OutputFormat::Pdf,
            OutputArg::Png => OutputFormat::Png,
            OutputArg::Jpg => OutputFormat::Jpg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner gives all the feedback that matters; keep library logs
    // at warn unless asked.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = ClientConfig::builder();
    if let Some(ref url) = cli.api_url {
        builder = builder.base_url(url);
    }
    let config = builder.build().context("Invalid configuration")?;
    let client = ConverterClient::new(config).context("Failed to create HTTP client")?;

    match cli.command {
        Command::Health { json } => health(&client, json).await,
        Command::Convert(ref args) => convert(client, args, cli.quiet).await,
    }
}

async fn health(client: &ConverterClient, json: bool) -> Result<()> {
    let status = client
        .check_health()
        .await
        .with_context(|| format!("API at {} is not reachable", client.config().base_url))?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).context("Failed to serialise status")?
        );
    } else {
        println!(
            "{} {}",
            client.config().base_url,
            status.status.as_deref().unwrap_or("ok")
        );
    }
    Ok(())
}

async fn convert(client: ConverterClient, args: &ConvertArgs, quiet: bool) -> Result<()> {
    let mut events = build_events(args).await?;

    let renderer = CliRenderer::new(quiet);
    let mut ui = Orchestrator::new(client).with_renderer(renderer);

    if !args.skip_health_check && !ui.init().await {
        bail!("{}", view_message(ui.view()));
    }

    let mut saved = Vec::new();
    while let Some(event) = events.next_event() {
        if let Some(file) = ui.dispatch(event).await {
            let path = save_to_dir(&file, &args.out_dir)
                .await
                .context("Failed to save converted file")?;
            saved.push((file, path));
        }
        if ui.view().is_error() {
            bail!("{}", view_message(ui.view()));
        }
    }

    for (file, path) in &saved {
        if args.json {
            let summary = serde_json::json!({
                "file_name": file.file_name,
                "path": path,
                "bytes": file.bytes().len(),
                "content_type": file.result.content_type,
                "archive": file.is_archive(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
            );
        } else {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Map CLI args to the event sequence a user would produce on the page.
async fn build_events(args: &ConvertArgs) -> Result<ScriptedEvents> {
    let mut events = ScriptedEvents::default();

    if let Some(ref path) = args.file {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        events.push(UiEvent::switch_tab(InputTab::File));
        events.push(UiEvent::choose_file(file));
    } else {
        let text = match (&args.text, args.stdin) {
            (Some(t), _) => t.clone(),
            (None, true) => read_stdin()?,
            (None, false) => bail!("Provide a FILE, --text, or --stdin"),
        };
        events.push(UiEvent::switch_tab(InputTab::Text));
        events.push(UiEvent::input_format(args.input_format.into()));
        events.push(UiEvent::type_text(text));
    }

    events.push(UiEvent::output_format(args.output_format.into()));
    if let Some(ref w) = args.width {
        events.push(UiEvent::width(w.clone()));
    }
    if let Some(ref h) = args.height {
        events.push(UiEvent::height(h.clone()));
    }
    events.push(UiEvent::convert());
    events.push(UiEvent::download());
    Ok(events)
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("--stdin given but stdin is a terminal");
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn view_message(view: &View) -> &str {
    view.message().unwrap_or("Conversion failed")
}
