//! Render session versioning.
//!
//! Every debounced compile becomes a [`RenderSession`] with a monotonically
//! increasing id, kept in an append-only log. The log's single mutable
//! index is the latest issued id: a session whose result arrives after a
//! newer session was issued is superseded and its result is discarded, even
//! if it would have succeeded. Commit ordering therefore depends only on id
//! comparison, never on which compile resolved first.
//!
//! The log is also the sole writer of the live scene: a commit replaces it,
//! a failure clears it, a superseded result cannot touch it.

use log::{debug, info, warn};

use zoetrope_core::scene::Scene;

use crate::engine::CompileError;

/// Monotonic identity of one compile attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a render session. `Pending` is the only non-terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Compile in flight.
    Pending,
    /// Resolved as the newest session; its scene is live.
    Committed,
    /// Resolved as the newest session with a compile failure.
    Failed,
    /// Lost the race to a newer session; result discarded.
    Superseded,
}

/// One versioned compile attempt.
#[derive(Debug)]
pub struct RenderSession {
    id: SessionId,
    source: String,
    status: SessionStatus,
}

impl RenderSession {
    /// Returns the session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the source snapshot this session compiled.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

/// How a resolution was applied to display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The live scene was replaced.
    Committed,
    /// The live scene was cleared and a diagnostic surfaced.
    Failed,
    /// The result was discarded; display state untouched.
    Superseded,
}

/// Append-only log of render sessions plus the live display state they
/// guard.
#[derive(Debug, Default)]
pub struct SessionLog {
    sessions: Vec<RenderSession>,
    live: Option<Scene>,
    last_error: Option<String>,
}

impl SessionLog {
    /// Creates an empty log with no live scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new pending session for `source` and returns its id, which
    /// becomes the latest issued id.
    pub fn begin(&mut self, source: &str) -> SessionId {
        let id = SessionId(self.sessions.len() as u64 + 1);
        self.sessions.push(RenderSession {
            id,
            source: source.to_string(),
            status: SessionStatus::Pending,
        });
        debug!(session = id.to_string(); "Render session opened");
        id
    }

    /// Applies a compile resolution.
    ///
    /// If `id` is no longer the latest issued id the result is discarded
    /// unconditionally. Otherwise a success replaces the live scene and a
    /// failure clears it, surfacing the diagnostic message.
    pub fn resolve(&mut self, id: SessionId, outcome: Result<Scene, CompileError>) -> Resolution {
        let latest = self.latest_id();
        if latest != Some(id) {
            self.set_status(id, SessionStatus::Superseded);
            debug!(session = id.to_string(); "Stale compile result discarded");
            return Resolution::Superseded;
        }

        match outcome {
            Ok(scene) => {
                self.set_status(id, SessionStatus::Committed);
                info!(
                    session = id.to_string(),
                    nodes = scene.node_count(),
                    edges = scene.edge_count();
                    "Scene committed"
                );
                self.live = Some(scene);
                self.last_error = None;
                Resolution::Committed
            }
            Err(err) => {
                self.set_status(id, SessionStatus::Failed);
                let message = err.to_string();
                warn!(session = id.to_string(), error = message.as_str(); "Compile failed");
                self.live = None;
                self.last_error = Some(message);
                Resolution::Failed
            }
        }
    }

    /// Clears live display state and cancels interest in pending sessions
    /// by issuing no further commitments to them.
    pub fn clear(&mut self) {
        // Pending sessions keep running; bumping nothing here is fine
        // because their ids are compared against the latest issued id at
        // resolve time. Clearing only resets what is displayed.
        self.live = None;
        self.last_error = None;
    }

    /// Returns the live scene, if any.
    pub fn live(&self) -> Option<&Scene> {
        self.live.as_ref()
    }

    /// Returns the surfaced compile diagnostic, if the latest resolution
    /// failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the most recently issued session id.
    pub fn latest_id(&self) -> Option<SessionId> {
        self.sessions.last().map(RenderSession::id)
    }

    /// Returns the recorded session for `id`.
    pub fn session(&self, id: SessionId) -> Option<&RenderSession> {
        self.sessions.get(id.0 as usize - 1)
    }

    fn set_status(&mut self, id: SessionId, status: SessionStatus) {
        if let Some(session) = self.sessions.get_mut(id.0 as usize - 1) {
            session.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoetrope_parser::error::ParseError;

    fn scene(nodes: usize) -> Scene {
        use zoetrope_core::{
            geometry::{Point, Size},
            scene::{Palette, SceneNode},
        };

        let palette = Palette::default();
        let nodes = (0..nodes)
            .map(|i| {
                SceneNode::new(
                    format!("n{i}"),
                    format!("n{i}"),
                    Point::new(0.0, i as f32 * 100.0),
                    Size::new(60.0, 40.0),
                    &palette,
                )
            })
            .collect();
        Scene::new(Size::new(200.0, 200.0), nodes, Vec::new())
    }

    fn failure(message: &str) -> CompileError {
        CompileError::new(ParseError::message(message), "graph:")
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut log = SessionLog::new();
        let a = log.begin("graph:\nA->B");
        let b = log.begin("graph:\nA->B->C");

        assert!(b > a);
        assert_eq!(log.latest_id(), Some(b));
    }

    #[test]
    fn test_commit_replaces_live_scene() {
        let mut log = SessionLog::new();
        let id = log.begin("graph:\nA->B");

        assert_eq!(log.resolve(id, Ok(scene(2))), Resolution::Committed);
        assert_eq!(log.live().unwrap().node_count(), 2);
        assert_eq!(log.session(id).unwrap().status(), SessionStatus::Committed);
    }

    #[test]
    fn test_last_writer_wins_regardless_of_resolution_order() {
        let mut log = SessionLog::new();
        let first = log.begin("graph:\nA->B");
        let second = log.begin("graph:\nA->B->C");

        // The newer session resolves first and commits.
        assert_eq!(log.resolve(second, Ok(scene(3))), Resolution::Committed);
        // The older result arrives late and is discarded, success or not.
        assert_eq!(log.resolve(first, Ok(scene(2))), Resolution::Superseded);

        assert_eq!(log.live().unwrap().node_count(), 3);
        assert_eq!(
            log.session(first).unwrap().status(),
            SessionStatus::Superseded
        );
    }

    #[test]
    fn test_stale_failure_cannot_clear_newer_commit() {
        let mut log = SessionLog::new();
        let first = log.begin("graph:\nbroken[");
        let second = log.begin("graph:\nA->B");

        assert_eq!(log.resolve(second, Ok(scene(2))), Resolution::Committed);
        assert_eq!(
            log.resolve(first, Err(failure("unclosed label"))),
            Resolution::Superseded
        );

        assert!(log.live().is_some());
        assert!(log.last_error().is_none());
    }

    #[test]
    fn test_failure_clears_live_scene_and_surfaces_message() {
        let mut log = SessionLog::new();
        let ok = log.begin("graph:\nA->B");
        log.resolve(ok, Ok(scene(2)));

        let bad = log.begin("graph:\nbroken[");
        assert_eq!(
            log.resolve(bad, Err(failure("node label is never closed"))),
            Resolution::Failed
        );

        assert!(log.live().is_none());
        assert!(log.last_error().unwrap().contains("never closed"));
    }

    #[test]
    fn test_commit_after_failure_clears_the_error() {
        let mut log = SessionLog::new();
        let bad = log.begin("graph:\nbroken[");
        log.resolve(bad, Err(failure("unclosed label")));

        let ok = log.begin("graph:\nA->B");
        log.resolve(ok, Ok(scene(2)));

        assert!(log.last_error().is_none());
        assert!(log.live().is_some());
    }

    #[test]
    fn test_clear_resets_display_state_only() {
        let mut log = SessionLog::new();
        let id = log.begin("graph:\nA->B");
        log.resolve(id, Ok(scene(2)));

        log.clear();

        assert!(log.live().is_none());
        assert!(log.last_error().is_none());
        assert_eq!(log.latest_id(), Some(id));
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        /// Resolving any permutation of open sessions leaves the live scene
        /// matching the newest session, no matter the resolution order.
        fn check_newest_session_wins(order: Vec<usize>) -> Result<(), TestCaseError> {
            let count = order.len();
            let mut log = SessionLog::new();
            let ids: Vec<_> = (0..count)
                .map(|i| log.begin(&format!("graph:\nchain{i}")))
                .collect();

            for &slot in &order {
                let nodes = slot + 1;
                log.resolve(ids[slot], Ok(scene(nodes)));
            }

            // The newest session's scene is live once it has resolved.
            prop_assert_eq!(log.live().map(Scene::node_count), Some(count));
            Ok(())
        }

        proptest! {
            #[test]
            fn newest_session_wins(order in (1usize..8).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())) {
                check_newest_session_wins(order)?;
            }
        }
    }
}
