use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use snapview::config::Settings;
use snapview::friends::{FriendsApp, FriendsEvent};
use snapview::songs::{load_remote_list, HttpTransport, SongsApp};
use snapview::{Runtime, TextRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snapview", version, about = "Snapshot-driven view examples")]
struct Cli {
    /// TOML settings file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = "snapview.toml")]
    config: PathBuf,

    /// Mount target id, overrides the settings file.
    #[arg(long, global = true)]
    mount: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type friend names on stdin, one per line.
    Friends,
    /// Fetch the song list once and render it.
    Songs {
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)?;
    if let Some(mount) = cli.mount {
        settings.mount = mount;
    }

    match cli.command {
        Command::Friends => run_friends(&settings),
        Command::Songs { endpoint } => {
            if let Some(endpoint) = endpoint {
                settings.endpoint = endpoint;
            }
            run_songs(&settings)
        }
    }
}

fn run_friends(settings: &Settings) -> anyhow::Result<()> {
    let app = FriendsApp::new(settings.owner_name.as_str(), settings.friends.iter().cloned());
    let runtime = Runtime::mount(
        app,
        settings.mount_target(),
        TextRenderer::new(io::stdout()),
    );
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        runtime.dispatch(FriendsEvent::UpdateText(line));
        runtime.dispatch(FriendsEvent::CommitNewFriend);
    }
    info!(
        friends = runtime.snapshot().list.friends.len(),
        "input closed"
    );
    Ok(())
}

fn run_songs(settings: &Settings) -> anyhow::Result<()> {
    let transport = HttpTransport::new(settings.endpoint_url()?);
    let runtime = Runtime::mount(
        SongsApp,
        settings.mount_target(),
        TextRenderer::new(io::stdout()),
    );
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    // A failed load leaves the empty view mounted; the loader already logged it.
    if let Ok(count) = rt.block_on(load_remote_list(&transport, runtime.emitter())) {
        info!(count, "song list rendered");
    }
    Ok(())
}
