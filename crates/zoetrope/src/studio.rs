//! The studio event loop.
//!
//! A [`Studio`] owns all mutable pipeline state and runs it single-writer
//! on one task: edits flow through the debouncer, debounced snapshots open
//! render sessions whose compiles run as spawned tasks, and resolutions
//! come back over a channel to be committed or discarded by session id.
//! Display state is published over a watch channel; exports read the
//! committed, themed scene on demand.
//!
//! No locks anywhere: mutations are sequenced by the event loop and the
//! session-id comparison is the only guard against out-of-order compiles.

use std::{io, sync::Arc};

use log::{debug, info, warn};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use zoetrope_core::{scene::Scene, theme::Theme};

use crate::{
    compiler::CompilerAdapter,
    config::AppConfig,
    debounce::{DebounceSignal, Debouncer},
    dispatch::ArtifactSink,
    engine::{CompileError, DiagramEngine},
    error::ZoetropeError,
    export::{ExportEncoder, ExportFormat, ImageEncoder},
    session::{Resolution, SessionId, SessionLog},
};

/// Capacity of the studio input queue.
const EVENT_QUEUE: usize = 32;

/// Capacity of the compile resolution queue.
const RESULT_QUEUE: usize = 16;

/// Commands accepted by a running studio.
#[derive(Debug, Clone)]
pub enum StudioEvent {
    /// A new source snapshot from the edit surface.
    Edit(String),
    /// Drop source, live scene, and error state.
    Clear,
    /// Switch the display theme; never recompiles.
    SetTheme(Theme),
    /// Export the live themed scene in the given format.
    Export(ExportFormat),
}

/// What the display surface shows right now.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    scene: Option<Scene>,
    error: Option<String>,
    notice: Option<String>,
    theme: Theme,
    revision: u64,
}

impl DisplayState {
    /// The live themed scene, if the latest compile committed.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The surfaced compile diagnostic, if the latest compile failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A one-shot export notice (export aborted, save failed).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The current display theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Monotonic publish counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// The live diagram studio pipeline.
pub struct Studio<E, I, S> {
    debounce: Debouncer,
    state: StudioState<E, I, S>,
}

impl<E, I, S> Studio<E, I, S>
where
    E: DiagramEngine,
    I: ImageEncoder,
    S: ArtifactSink,
{
    /// Builds a studio from configuration and its three collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured export background color cannot
    /// be parsed.
    pub fn new(config: &AppConfig, engine: E, encoder: I, sink: S) -> Result<Self, ZoetropeError> {
        let dark_background = config
            .style()
            .export_background()
            .map_err(|err| ZoetropeError::Io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
        let theme = config.style().theme();

        let (display, _) = watch::channel(DisplayState {
            theme,
            ..DisplayState::default()
        });

        Ok(Self {
            debounce: Debouncer::new(config.render().debounce()),
            state: StudioState {
                compiler: Arc::new(CompilerAdapter::new(engine)),
                sessions: SessionLog::new(),
                theme,
                exporter: ExportEncoder::new(encoder, dark_background),
                sink,
                notice: None,
                display,
                revision: 0,
            },
        })
    }

    /// Subscribes to display state updates.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.display.subscribe()
    }

    /// Runs the event loop until the event channel closes.
    pub async fn run(self, mut events: mpsc::Receiver<StudioEvent>) {
        let Self {
            mut debounce,
            mut state,
        } = self;
        let (results_tx, mut results) = mpsc::channel(RESULT_QUEUE);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(StudioEvent::Edit(source)) => {
                        if debounce.update(&source) == DebounceSignal::Clear {
                            state.clear();
                        }
                    }
                    Some(StudioEvent::Clear) => {
                        debounce.cancel();
                        state.clear();
                    }
                    Some(StudioEvent::SetTheme(theme)) => state.set_theme(theme),
                    Some(StudioEvent::Export(format)) => state.export(format),
                    None => break,
                },
                source = debounce.fire() => state.begin_compile(source, &results_tx),
                Some((id, outcome)) = results.recv() => state.resolve(id, outcome),
            }
        }

        debug!("Studio event loop stopped");
    }
}

impl<E, I, S> Studio<E, I, S>
where
    E: DiagramEngine,
    I: ImageEncoder + Send + 'static,
    S: ArtifactSink + Send + 'static,
{
    /// Spawns the event loop onto the current runtime and returns a handle
    /// for driving it.
    pub fn spawn(self) -> StudioHandle {
        let (events, events_rx) = mpsc::channel(EVENT_QUEUE);
        let display = self.subscribe();
        let task = tokio::spawn(self.run(events_rx));
        StudioHandle {
            events,
            display,
            task,
        }
    }
}

/// Everything the event loop mutates, apart from the debouncer.
struct StudioState<E, I, S> {
    compiler: Arc<CompilerAdapter<E>>,
    sessions: SessionLog,
    theme: Theme,
    exporter: ExportEncoder<I>,
    sink: S,
    notice: Option<String>,
    display: watch::Sender<DisplayState>,
    revision: u64,
}

impl<E, I, S> StudioState<E, I, S>
where
    E: DiagramEngine,
    I: ImageEncoder,
    S: ArtifactSink,
{
    /// Opens a render session for the debounced snapshot and spawns its
    /// compile. The session id travels with the task; the resolution comes
    /// back over `results_tx`.
    fn begin_compile(
        &mut self,
        source: String,
        results_tx: &mpsc::Sender<(SessionId, Result<Scene, CompileError>)>,
    ) {
        let id = self.sessions.begin(&source);
        let compiler = Arc::clone(&self.compiler);
        let results_tx = results_tx.clone();

        tokio::spawn(async move {
            let outcome = compiler.compile(&source).await;
            // A closed channel means the studio stopped; the result has
            // nowhere to go.
            let _ = results_tx.send((id, outcome)).await;
        });
    }

    /// Applies a compile resolution through the session log.
    fn resolve(&mut self, id: SessionId, outcome: Result<Scene, CompileError>) {
        match self.sessions.resolve(id, outcome) {
            Resolution::Superseded => {}
            Resolution::Committed | Resolution::Failed => self.publish(),
        }
    }

    /// Clears live display state.
    fn clear(&mut self) {
        self.sessions.clear();
        self.publish();
    }

    /// Switches the display theme, re-applying the theme transform to the
    /// same live scene. No recompile.
    fn set_theme(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        info!(theme = theme.to_string(); "Theme switched");
        self.theme = theme;
        self.publish();
    }

    /// Exports the live themed scene and hands the artifact to the sink.
    /// Failures surface as a display notice; the live scene is untouched.
    fn export(&mut self, format: ExportFormat) {
        let themed = self.themed_scene();
        let dispatched = self
            .exporter
            .export(themed.as_ref(), self.theme, format)
            .and_then(|artifact| {
                self.sink.save(&artifact).map_err(ZoetropeError::Io)?;
                Ok(artifact)
            });

        match dispatched {
            Ok(artifact) => {
                info!(filename = artifact.filename(); "Artifact dispatched");
            }
            Err(err) => {
                warn!(error = err.to_string().as_str(); "Export aborted");
                self.notice = Some(err.to_string());
                self.publish();
            }
        }
    }

    /// The live scene with the current theme applied. The stored scene
    /// keeps its authored styling; the transform runs on a display copy.
    fn themed_scene(&self) -> Option<Scene> {
        self.sessions.live().cloned().map(|mut scene| {
            self.theme.apply(&mut scene);
            scene
        })
    }

    fn publish(&mut self) {
        self.revision += 1;
        let state = DisplayState {
            scene: self.themed_scene(),
            error: self.sessions.last_error().map(str::to_string),
            notice: self.notice.take(),
            theme: self.theme,
            revision: self.revision,
        };
        self.display.send_replace(state);
    }
}

/// Handle to a spawned studio: an event sender and a display subscription.
#[derive(Debug)]
pub struct StudioHandle {
    events: mpsc::Sender<StudioEvent>,
    display: watch::Receiver<DisplayState>,
    task: JoinHandle<()>,
}

impl StudioHandle {
    /// Sends an event to the studio.
    ///
    /// # Errors
    ///
    /// Returns the event back if the studio has stopped.
    pub async fn send(
        &self,
        event: StudioEvent,
    ) -> Result<(), mpsc::error::SendError<StudioEvent>> {
        self.events.send(event).await
    }

    /// Returns a display state subscription.
    pub fn display(&self) -> watch::Receiver<DisplayState> {
        self.display.clone()
    }

    /// Closes the event channel and waits for the loop to drain.
    pub async fn shutdown(self) {
        drop(self.events);
        let _ = self.task.await;
    }
}
