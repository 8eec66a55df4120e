use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use timetable_core::keys::TIMETABLE_DATA_KEY;
use timetable_core::models::Bundle;
use timetable_export::pdf::PdfClient;
use timetable_storage::state::save_json;
use timetable_storage::DirStore;
use timetable_viewer::config::{self, ViewerConfig};
use timetable_viewer::presenter::Presenter;
use timetable_viewer::sinks::{DirectoryDownloads, TerminalNotifier};

#[derive(Parser)]
#[command(name = "timetable-viewer")]
#[command(about = "Show a generated timetable and download it as PDF", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[arg(long, global = true)]
    server_url: Option<String>,

    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Put a generated bundle into session storage.
    Stash { file: PathBuf },

    /// Open the results page.
    Show {
        /// Write the full HTML page here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download the timetable as PDF.
    Download,

    /// Clear the session and go back to the entry page.
    Back,

    /// Print the effective configuration.
    Config {
        /// Also write it to the config file.
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(cli: &Cli) -> Result<ViewerConfig> {
    let mut config = config::load_config()?;
    config.apply_env();

    if let Some(url) = &cli.server_url {
        config.server_url = url.clone();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.download_dir {
        config.download_dir = Some(dir.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = resolve_config(&cli)?;
    let store = Arc::new(DirStore::new(config.storage_dir()));

    let presenter = Presenter::new(
        store.clone(),
        PdfClient::new(&config.server_url),
        Arc::new(TerminalNotifier),
        Arc::new(DirectoryDownloads::new(config.download_dir())),
    )
    .with_styles(config.styles.clone());

    match cli.command {
        Command::Stash { file } => {
            let contents = std::fs::read_to_string(&file)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", file.display()))?;
            let bundle = Bundle::from_json(&contents)?;
            save_json(&*store, TIMETABLE_DATA_KEY, &bundle)?;
            tracing::info!(
                divisions = bundle.division_count(),
                path = %store.root().display(),
                "timetable data stored"
            );
        }
        Command::Show { out } => {
            let view = presenter.open();
            let html = view.to_html(presenter.styles())?;
            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    tracing::info!(path = %path.display(), "results page written");
                }
                None => println!("{html}"),
            }
            if let Some(status) = view.status.filter(|_| view.phase.is_terminal_failure()) {
                return Err(eyre::eyre!(status));
            }
        }
        Command::Download => {
            let view = presenter.open();
            let Some(state) = view.state else {
                return Err(eyre::eyre!(view.status.unwrap_or_default()));
            };
            let path = presenter.download_pdf(&state).await?;
            println!("{}", path.display());
        }
        Command::Back => {
            let redirect = presenter.go_back()?;
            println!("{}", redirect.location);
        }
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                config::save_config(&config)?;
            }
        }
    }

    Ok(())
}
