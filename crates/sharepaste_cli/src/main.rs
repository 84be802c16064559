//! Command-line client for a SharePaste server.

use anyhow::{anyhow, bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sharepaste_cli::{open_draft_store, HttpTransport};
use sharepaste_core::keymap::SHORTCUTS;
use sharepaste_core::language::canonical::KNOWN_LANGUAGES;
use sharepaste_core::location::split_extension;
use sharepaste_core::{
    BufferEditor, Config, DraftStore, HistoryNavigator, MemoryDraftStore, PageLocation, Session,
};
use std::io::{self, IsTerminal, Read};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sharepaste", about = "SharePaste CLI", version)]
struct Cli {
    /// Server URL (can also be set via SHAREPASTE_SERVER env var)
    #[arg(short, long, env = "SHAREPASTE_SERVER", global = true)]
    server: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    /// Write drafts synchronously instead of on the background writer
    #[arg(long, global = true)]
    sync_drafts: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the draft (or a file / piped stdin) as a new paste
    New {
        #[arg(short, long)]
        file: Option<String>,
        /// Highlighting language, e.g. `rust`
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Print a stored paste
    View {
        /// Paste path (`/abc.rs`) or full URL
        path: String,
        /// Language hint used when the path has no extension
        #[arg(long)]
        language_hint: Option<String>,
    },
    /// Copy a stored paste into the draft
    Fork {
        /// Paste path (`/abc.rs`) or full URL
        path: String,
    },
    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// List the editor keyboard shortcuts
    Shortcuts,
    /// List the languages accepted by `--language`
    Languages,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    Show {
        #[arg(short, long)]
        json: bool,
    },
    Clear,
}

fn explicit_server_override(server: Option<String>) -> Option<String> {
    server.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply global flags on top of the environment configuration.
fn resolve_config(
    mut config: Config,
    server: Option<String>,
    timeout: Option<u64>,
    sync: bool,
) -> Config {
    if let Some(server) = explicit_server_override(server) {
        config.server_url = server;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    config.sync_drafts |= sync;
    config
}

/// Reduce a `path` argument to a URL path; full URLs keep only their path.
fn target_path(arg: &str) -> String {
    let arg = arg.trim();
    match reqwest::Url::parse(arg) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => PageLocation::new(arg).path().to_string(),
    }
}

fn read_input(file: Option<&str>) -> anyhow::Result<Option<String>> {
    if let Some(path) = file {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        return Ok(Some(text));
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(Some(buffer))
}

/// Covers `sharepaste_core` and `sharepaste_cli` too: targets match by prefix.
const DEFAULT_LOG_FILTER: &str = "sharepaste=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run_new(
    transport: &HttpTransport,
    drafts: Box<dyn DraftStore>,
    input: Option<String>,
    language: Option<String>,
) -> anyhow::Result<()> {
    let mut session = Session::open(&PageLocation::root(), BufferEditor::default(), drafts);
    if let Some(text) = input {
        session.replace_content(&text);
    }
    if let Some(answer) = language {
        if !session.set_language_override(&answer) {
            warn!("ignoring unknown language '{}'", answer.trim());
        }
    }
    if session.content().trim().is_empty() {
        bail!("Nothing to submit: the draft is empty");
    }

    let mut navigator = HistoryNavigator::new(transport.server(), "/");
    match session.submit(transport, &mut navigator).await {
        Ok(Some(created)) => {
            debug!(id = %created.id, language = %session.language(), "session frozen");
            println!("{}", navigator.href());
            Ok(())
        }
        Ok(None) => bail!("Session is not accepting submissions"),
        Err(err) => Err(anyhow!(err.display_message(transport.server()))),
    }
}

async fn open_viewing(
    transport: &HttpTransport,
    path: &str,
    language_hint: Option<String>,
    drafts: Box<dyn DraftStore>,
) -> anyhow::Result<Session<BufferEditor, Box<dyn DraftStore>>> {
    let (_, extension) = split_extension(path);
    let hint = match language_hint {
        Some(hint) => Some(hint),
        None if extension.is_some() => None,
        None => match transport.page_language_hint(path).await {
            Ok(hint) => hint,
            Err(err) => {
                debug!("page hint for {} unavailable: {}", path, err);
                None
            }
        },
    };
    let location = PageLocation::new(path).with_language_hint(hint);
    let mut session = Session::open(&location, BufferEditor::default(), drafts);
    session
        .load_remote(transport)
        .await
        .with_context(|| format!("failed to load {}", path))?;
    info!(
        path = %session.path(),
        language = %session.language(),
        source = ?session.resolution().source,
        "paste loaded"
    );
    Ok(session)
}

async fn run_view(
    transport: &HttpTransport,
    path: &str,
    language_hint: Option<String>,
) -> anyhow::Result<()> {
    let drafts: Box<dyn DraftStore> = Box::new(MemoryDraftStore::new());
    let session = open_viewing(transport, path, language_hint, drafts).await?;
    println!("{}", session.content());
    Ok(())
}

async fn run_fork(
    transport: &HttpTransport,
    path: &str,
    drafts: Box<dyn DraftStore>,
) -> anyhow::Result<()> {
    let mut session = open_viewing(transport, path, None, drafts).await?;
    let mut navigator = HistoryNavigator::new(transport.server(), path);
    session.fork(&mut navigator);
    session.on_content_changed();
    info!(from = %path, language = %session.language(), "forked into draft");
    println!("Forked {} into the draft; run `sharepaste new` to submit it", path);
    Ok(())
}

fn run_draft(action: DraftAction, mut drafts: Box<dyn DraftStore>) -> anyhow::Result<()> {
    match action {
        DraftAction::Show { json } => {
            let Some(draft) = drafts.load() else {
                if json {
                    println!("null");
                } else {
                    eprintln!("No draft saved");
                }
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&draft)?);
            } else {
                println!("{}", draft.content);
            }
        }
        DraftAction::Clear => {
            drafts.clear();
            println!("Draft cleared");
        }
    }
    Ok(())
}

fn print_shortcuts() {
    for (chord, description) in SHORTCUTS {
        println!("{:<18} {}", chord, description);
    }
}

fn print_languages() {
    for option in KNOWN_LANGUAGES {
        println!("{:<14} {}", option.id, option.label);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let Cli {
        server,
        timeout,
        sync_drafts,
        command,
    } = Cli::parse();

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Shortcuts => {
            print_shortcuts();
            return Ok(());
        }
        Commands::Languages => {
            print_languages();
            return Ok(());
        }
        _ => {}
    }

    let config = resolve_config(Config::from_env(), server, timeout, sync_drafts);
    debug!(server = %config.server_url, drafts = %config.draft_path, "configuration loaded");
    let transport = HttpTransport::new(
        &config.server_url,
        &config.create_path,
        Duration::from_secs(config.timeout_secs),
    )?;

    match command {
        Commands::New { file, language } => {
            let input = read_input(file.as_deref())?;
            run_new(&transport, open_draft_store(&config), input, language).await
        }
        Commands::View {
            path,
            language_hint,
        } => run_view(&transport, &target_path(&path), language_hint).await,
        Commands::Fork { path } => {
            run_fork(&transport, &target_path(&path), open_draft_store(&config)).await
        }
        Commands::Draft { action } => run_draft(action, open_draft_store(&config)),
        Commands::Shortcuts | Commands::Languages | Commands::Completions { .. } => Ok(()),
    }
}
