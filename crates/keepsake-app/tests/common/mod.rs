//! Shared test helpers for host integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use keepsake_app::audio::SimulatedAudioBackend;
use keepsake_app::command::parse_command;
use keepsake_app::host::{Host, Step};
use keepsake_content::application::loader::{DEFAULT_MANIFEST, parse_manifest};
use keepsake_navigation::domain::transition::TRANSITION_DURATION_MS;
use keepsake_player::domain::ticket::PlayResolution;
use keepsake_test_support::ManualClock;
use tempfile::TempDir;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// A temporary media root, removed on drop.
pub struct MediaRoot(TempDir);

impl MediaRoot {
    /// Creates an empty media root.
    pub fn empty() -> Self {
        Self(TempDir::new().unwrap())
    }

    /// Creates a media root holding the given source files.
    pub fn with_sources(sources: &[&str]) -> Self {
        let root = Self::empty();
        for source in sources {
            let path = root.path().join(source);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"not really audio").unwrap();
        }
        root
    }

    pub fn path(&self) -> &Path {
        self.0.path()
    }
}

/// A host built from the bundled manifest, driven by a manual clock.
pub struct TestHost {
    pub host: Host,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<SimulatedAudioBackend>,
    pub resolutions: UnboundedReceiver<PlayResolution>,
}

impl TestHost {
    /// Parses and executes one command line.
    pub fn run(&mut self, line: &str) -> Step {
        let command = parse_command(line).unwrap().unwrap();
        self.host.execute(&command)
    }

    /// Lets the running transition finish.
    pub fn settle(&mut self) {
        self.clock.advance_millis(TRANSITION_DURATION_MS);
        self.host.tick(std::time::Duration::ZERO);
    }

    /// Settles, then moves forward with the chrome control.
    pub fn next(&mut self) -> Step {
        self.settle();
        self.run("next")
    }

    /// Navigates from the cover to the playlist scene.
    pub fn go_to_playlist(&mut self) {
        self.next();
        self.run("click 4");
        self.clock.advance_millis(2_500);
        self.host.tick(std::time::Duration::ZERO);
        self.next();
        self.next();
        assert_eq!(self.host.current_key(), "playlist");
    }

    /// Waits for the next play resolution and routes it to the host.
    pub async fn resolve_next(&mut self) {
        let resolution = self.resolutions.recv().await.unwrap();
        self.host.resolve(resolution);
    }
}

/// Builds a host over the bundled manifest with audio sources resolved under
/// `media_root`.
pub fn build_test_host(media_root: &MediaRoot) -> TestHost {
    let manifest = parse_manifest(DEFAULT_MANIFEST).unwrap();
    let clock = Arc::new(ManualClock::at_epoch());
    let backend = Arc::new(SimulatedAudioBackend::new(
        media_root.path().to_path_buf(),
        &manifest.playlist,
    ));
    let (tx, resolutions) = mpsc::unbounded_channel();
    let host = Host::new(&manifest, Arc::clone(&backend), tx, clock.clone()).unwrap();
    TestHost {
        host,
        clock,
        backend,
        resolutions,
    }
}
