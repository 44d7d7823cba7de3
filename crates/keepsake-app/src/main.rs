//! Keepsake terminal host entry point.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use keepsake_app::audio::SimulatedAudioBackend;
use keepsake_app::command::parse_command;
use keepsake_app::config::AppConfig;
use keepsake_app::host::{Host, Step};
use keepsake_content::application::loader::load_manifest;
use keepsake_core::clock::SystemClock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Initialize tracing subscriber. Logs go to stderr; stdout is the screen.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    info!(?config, "Starting Keepsake presentation");

    let manifest = load_manifest(config.manifest_path.as_deref())?;
    let backend = Arc::new(SimulatedAudioBackend::new(
        config.media_root.clone(),
        &manifest.playlist,
    ));
    let (resolutions_tx, mut resolutions_rx) = mpsc::unbounded_channel();
    let mut host = Host::new(&manifest, backend, resolutions_tx, Arc::new(SystemClock))?;

    draw(&host)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(command)) => match host.execute(&command) {
                        Step::Continue { redraw: true } => draw(&host)?,
                        Step::Continue { redraw: false } => {}
                        Step::Help => println!("{}", Host::help()),
                        Step::Quit => break,
                    },
                    Ok(None) => {}
                    Err(error) => {
                        warn!(%error, "command rejected");
                        println!("{error}\n{}", Host::help());
                    }
                }
            }
            Some(resolution) = resolutions_rx.recv() => {
                host.resolve(resolution);
                draw(&host)?;
            }
            _ = ticker.tick() => {
                if host.tick(config.tick) {
                    draw(&host)?;
                }
            }
        }
    }

    host.shutdown();
    info!("Keepsake presentation closed");
    Ok(())
}

fn draw(host: &Host) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\n{}", host.render())?;
    write!(stdout, "> ")?;
    stdout.flush()
}
