//! Test audio backends — mock `AudioBackend` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use keepsake_core::audio::{AudioBackend, PlaybackError};
use tokio::sync::Notify;

/// A single call observed by [`RecordingAudioBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    /// `load(source)`.
    Load(String),
    /// `play()`.
    Play,
    /// `pause()`.
    Pause,
    /// `set_position(seconds)`.
    SetPosition(f64),
    /// `stop()`.
    Stop,
}

/// An audio backend that records every call. `play` resolves with queued
/// results in order and succeeds once the queue is empty.
#[derive(Debug, Default)]
pub struct RecordingAudioBackend {
    calls: Mutex<Vec<AudioCall>>,
    play_results: Mutex<VecDeque<Result<(), PlaybackError>>>,
}

impl RecordingAudioBackend {
    /// Create a backend whose `play` always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend whose next `play` calls resolve with `results`.
    #[must_use]
    pub fn with_play_results(results: Vec<Result<(), PlaybackError>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            play_results: Mutex::new(results.into()),
        }
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded `stop` calls.
    pub fn stop_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == AudioCall::Stop)
            .count()
    }

    /// The most recently loaded source, if any.
    pub fn last_loaded(&self) -> Option<String> {
        self.calls().iter().rev().find_map(|call| match call {
            AudioCall::Load(source) => Some(source.clone()),
            _ => None,
        })
    }

    fn record(&self, call: AudioCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AudioBackend for RecordingAudioBackend {
    fn load(&self, source: &str) {
        self.record(AudioCall::Load(source.to_owned()));
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        self.record(AudioCall::Play);
        self.play_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn pause(&self) {
        self.record(AudioCall::Pause);
    }

    fn set_position(&self, seconds: f64) {
        self.record(AudioCall::SetPosition(seconds));
    }

    fn stop(&self) {
        self.record(AudioCall::Stop);
    }
}

/// An audio backend whose `play` is always rejected. Useful for testing the
/// error path of the player.
#[derive(Debug)]
pub struct FailingAudioBackend;

#[async_trait]
impl AudioBackend for FailingAudioBackend {
    fn load(&self, _source: &str) {}

    async fn play(&self) -> Result<(), PlaybackError> {
        Err(PlaybackError::PlaybackRejected("autoplay blocked".into()))
    }

    fn pause(&self) {}

    fn set_position(&self, _seconds: f64) {}

    fn stop(&self) {}
}

/// An audio backend whose `play` waits until the test opens the gate, then
/// starts output. Lets tests act while a play request is still pending.
#[derive(Debug, Default)]
pub struct GatedAudioBackend {
    gate: Notify,
    playing: AtomicBool,
    stops: Mutex<usize>,
}

impl GatedAudioBackend {
    /// Create a backend with the gate closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one pending (or the next) `play` call finish.
    pub fn open_gate(&self) {
        self.gate.notify_one();
    }

    /// Whether output is currently running.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Number of `stop` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

#[async_trait]
impl AudioBackend for GatedAudioBackend {
    fn load(&self, _source: &str) {}

    async fn play(&self) -> Result<(), PlaybackError> {
        self.gate.notified().await;
        self.playing.store(true, Ordering::Release);
        Ok(())
    }

    fn pause(&self) {
        self.playing.store(false, Ordering::Release);
    }

    fn set_position(&self, _seconds: f64) {}

    fn stop(&self) {
        self.playing.store(false, Ordering::Release);
        *self.stops.lock().unwrap() += 1;
    }
}
