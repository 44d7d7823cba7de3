//! The scene controller: owner of the scene cursor.

use chrono::{DateTime, Utc};
use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::machine::StateMachine;
use tracing::debug;
use uuid::Uuid;

use super::events::{
    NavigationEvent, NavigationEventKind, SceneEntered, SceneExited, TransitionCompleted,
    TransitionStarted,
};
use super::scene::{NavigationControls, NavigationRequest, Scene, SceneContext};
use super::transition::{TransitionFrame, transition_duration};

/// A transition that has started but not yet played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ActiveTransition {
    pub from: Option<usize>,
    pub to: usize,
    pub started_at: DateTime<Utc>,
}

/// Owns the scene cursor and the mounted scene.
///
/// Exactly one scene is mounted while the controller is live. Navigation
/// requests that arrive while a transition is in flight are dropped.
pub struct SceneController<I> {
    /// Machine identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The scene sequence, fixed for the controller's lifetime.
    scenes: Vec<Box<dyn Scene<I>>>,
    /// Cursor into `scenes`.
    pub(crate) current: usize,
    /// Whether `scenes[current]` is mounted.
    pub(crate) mounted: bool,
    /// The transition in flight, if any.
    pub(crate) transition: Option<ActiveTransition>,
    /// Events recorded since the last drain.
    uncommitted_events: Vec<NavigationEvent>,
}

impl<I> SceneController<I> {
    /// Creates a controller and mounts the first scene.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if `scenes` is empty.
    pub fn new(scenes: Vec<Box<dyn Scene<I>>>, clock: &dyn Clock) -> Result<Self, DomainError> {
        if scenes.is_empty() {
            return Err(DomainError::Content(
                "presentation has no scenes".to_owned(),
            ));
        }

        let mut controller = Self {
            id: Uuid::new_v4(),
            version: 0,
            scenes,
            current: 0,
            mounted: false,
            transition: None,
            uncommitted_events: Vec::new(),
        };
        controller.mount(None, 0, clock);
        Ok(controller)
    }

    /// Cursor of the current scene.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of scenes in the sequence.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Key of the current scene.
    #[must_use]
    pub fn current_key(&self) -> &'static str {
        self.scenes[self.current].key()
    }

    /// Whether the current scene is mounted (false only after `shutdown`).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Controls the host should offer for the current scene.
    #[must_use]
    pub fn controls(&self) -> NavigationControls {
        let last = self.scenes.len() - 1;
        NavigationControls {
            back: self.current > 0,
            next: self.current < last && self.scenes[self.current].manual_forward(),
        }
    }

    /// The transition in flight at `clock.now()`, if any.
    #[must_use]
    pub fn transition_frame(&self, clock: &dyn Clock) -> Option<TransitionFrame> {
        let active = self.transition?;
        let frame = TransitionFrame::sample(active.from, active.to, active.started_at, clock.now());
        (!frame.is_complete()).then_some(frame)
    }

    /// Whether a transition is still playing at `clock.now()`.
    #[must_use]
    pub fn is_transitioning(&self, clock: &dyn Clock) -> bool {
        self.transition_frame(clock).is_some()
    }

    /// Moves to the next scene. Returns `false` when already on the last
    /// scene, while a transition is in flight, or after shutdown.
    pub fn advance(&mut self, clock: &dyn Clock) -> bool {
        let target = self.current + 1;
        if target >= self.scenes.len() {
            debug!(cursor = self.current, "advance ignored: already on the last scene");
            return false;
        }
        self.navigate(target, "advance", clock)
    }

    /// Moves to the previous scene. Returns `false` when already on the first
    /// scene, while a transition is in flight, or after shutdown.
    pub fn retreat(&mut self, clock: &dyn Clock) -> bool {
        let Some(target) = self.current.checked_sub(1) else {
            debug!(cursor = self.current, "retreat ignored: already on the first scene");
            return false;
        };
        self.navigate(target, "retreat", clock)
    }

    /// Routes host input to the current scene and applies any navigation it
    /// requests. Returns whether the cursor moved.
    pub fn dispatch(&mut self, input: &I, clock: &dyn Clock) -> bool {
        if !self.mounted {
            return false;
        }
        self.settle(clock);
        let request = self.scenes[self.current].handle(input, clock);
        self.apply_request(request, clock)
    }

    /// Completes finished transitions and lets the current scene observe the
    /// passage of time. Returns whether the cursor moved.
    pub fn tick(&mut self, clock: &dyn Clock) -> bool {
        if !self.mounted {
            return false;
        }
        self.settle(clock);
        let request = self.scenes[self.current].tick(clock);
        self.apply_request(request, clock)
    }

    /// Builds the render context for the current scene.
    #[must_use]
    pub fn context(&self, clock: &dyn Clock) -> SceneContext {
        SceneContext {
            index: self.current,
            scene_count: self.scenes.len(),
            controls: self.controls(),
            transition: self.transition_frame(clock),
        }
    }

    /// Renders the current scene.
    #[must_use]
    pub fn render(&self, clock: &dyn Clock) -> String {
        self.scenes[self.current].render(&self.context(clock))
    }

    /// Unmounts the current scene. Safe to call more than once.
    pub fn shutdown(&mut self, clock: &dyn Clock) {
        if !self.mounted {
            return;
        }
        self.unmount(clock);
    }

    fn apply_request(&mut self, request: Option<NavigationRequest>, clock: &dyn Clock) -> bool {
        match request {
            Some(NavigationRequest::Advance) => self.advance(clock),
            Some(NavigationRequest::Retreat) => self.retreat(clock),
            None => false,
        }
    }

    fn navigate(&mut self, target: usize, direction: &'static str, clock: &dyn Clock) -> bool {
        if !self.mounted {
            debug!(direction, "navigation ignored: controller is shut down");
            return false;
        }
        self.settle(clock);
        if self.transition.is_some() {
            debug!(
                direction,
                cursor = self.current,
                "navigation ignored: transition in flight"
            );
            return false;
        }

        let from = self.current;
        self.unmount(clock);
        self.mount(Some(from), target, clock);
        true
    }

    fn settle(&mut self, clock: &dyn Clock) {
        if let Some(active) = self.transition {
            if clock.now() - active.started_at >= transition_duration() {
                self.record(
                    NavigationEventKind::TransitionCompleted(TransitionCompleted {
                        index: active.to,
                    }),
                    clock,
                );
            }
        }
    }

    fn unmount(&mut self, clock: &dyn Clock) {
        let index = self.current;
        self.scenes[index].exit(clock);
        let key = self.scenes[index].key().to_owned();
        self.record(
            NavigationEventKind::SceneExited(SceneExited { index, key }),
            clock,
        );
    }

    fn mount(&mut self, from: Option<usize>, to: usize, clock: &dyn Clock) {
        self.record(
            NavigationEventKind::TransitionStarted(TransitionStarted { from, to }),
            clock,
        );
        let key = self.scenes[to].key().to_owned();
        self.record(
            NavigationEventKind::SceneEntered(SceneEntered { index: to, key }),
            clock,
        );
        self.scenes[to].enter(clock);
    }

    fn record(&mut self, kind: NavigationEventKind, clock: &dyn Clock) {
        let event = NavigationEvent::new(kind, self.id, self.version + 1, clock.now());
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl<I> std::fmt::Debug for SceneController<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&'static str> = self.scenes.iter().map(|scene| scene.key()).collect();
        f.debug_struct("SceneController")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("scenes", &keys)
            .field("current", &self.current)
            .field("mounted", &self.mounted)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl<I> StateMachine for SceneController<I> {
    type Event = NavigationEvent;

    fn machine_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            NavigationEventKind::SceneEntered(payload) => {
                self.current = payload.index;
                self.mounted = true;
            }
            NavigationEventKind::SceneExited(_) => {
                self.mounted = false;
            }
            NavigationEventKind::TransitionStarted(payload) => {
                self.transition = Some(ActiveTransition {
                    from: payload.from,
                    to: payload.to,
                    started_at: event.metadata.occurred_at,
                });
            }
            NavigationEventKind::TransitionCompleted(_) => {
                self.transition = None;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
