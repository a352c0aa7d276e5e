//! Live watch mode: file edits feed the studio pipeline.
//!
//! A filesystem watcher turns saves of the input file into edit events;
//! the studio's own debouncer coalesces editor save bursts. Every commit
//! rewrites the preview SVG; every failure renders its diagnostic text.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{info, warn};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use zoetrope::{DisplayState, StudioEvent, StudioHandle, ZoetropeError, export::svg};

/// Watches one source file and coalesces its change notifications.
pub(crate) struct SourceWatcher {
    /// The file system watcher (kept alive to maintain watching).
    _watcher: Box<dyn Watcher + Send>,
    ticks: mpsc::Receiver<()>,
}

impl SourceWatcher {
    /// Starts watching `path`'s parent directory for changes to the file.
    ///
    /// Tries the platform-native watcher first and falls back to a 500 ms
    /// poll watcher when the native backend is unavailable (containers,
    /// network filesystems).
    pub(crate) fn new(path: &Path) -> Result<Self, ZoetropeError> {
        let canonical: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let filename = canonical
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path has no filename"))?
            .to_os_string();
        let parent = canonical
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path has no parent"))?
            .to_path_buf();

        let (ticks_tx, ticks) = mpsc::channel(1);
        let mut watcher = create_watcher(filename, ticks_tx)?;
        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|err| io::Error::other(format!("cannot watch {}: {err}", parent.display())))?;

        info!(path = canonical.display().to_string(); "Watching diagram source");
        Ok(Self {
            _watcher: watcher,
            ticks,
        })
    }

    /// Waits for the next change notification.
    pub(crate) async fn changed(&mut self) -> Option<()> {
        self.ticks.recv().await
    }
}

/// Builds the change handler shared by both watcher backends.
fn make_handler(
    filename: OsString,
    ticks: mpsc::Sender<()>,
) -> impl Fn(Result<Event, notify::Error>) + Send + 'static {
    move |result| {
        if let Ok(event) = result {
            // Modify and create cover in-place saves and atomic renames.
            if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                return;
            }
            let matches_input = event
                .paths
                .iter()
                .any(|p| p.file_name().is_some_and(|f| f == filename));
            if matches_input {
                // A full channel already carries a pending tick.
                let _ = ticks.try_send(());
            }
        }
    }
}

fn create_watcher(
    filename: OsString,
    ticks: mpsc::Sender<()>,
) -> Result<Box<dyn Watcher + Send>, ZoetropeError> {
    let fallback_filename = filename.clone();
    let fallback_ticks = ticks.clone();

    match notify::recommended_watcher(make_handler(filename, ticks)) {
        Ok(watcher) => {
            log::debug!("Source watcher: using native backend");
            Ok(Box::new(watcher))
        }
        Err(err) => {
            warn!(error = err.to_string().as_str(); "Native watcher unavailable, polling instead");
            let poll_watcher = PollWatcher::new(
                make_handler(fallback_filename, fallback_ticks),
                NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
            )
            .map_err(|err| io::Error::other(format!("cannot start poll watcher: {err}")))?;
            Ok(Box::new(poll_watcher))
        }
    }
}

/// Drives the watch loop: studio display updates rewrite the preview,
/// watcher ticks feed fresh source into the pipeline.
pub(crate) async fn run_loop(
    handle: &StudioHandle,
    input: &Path,
    preview: &Path,
) -> Result<(), ZoetropeError> {
    let mut watcher = SourceWatcher::new(input)?;
    let mut display = handle.display();

    loop {
        tokio::select! {
            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = display.borrow_and_update().clone();
                render_display(&state, preview)?;
            }
            tick = watcher.changed() => match tick {
                Some(()) => {
                    let source = fs::read_to_string(input).unwrap_or_default();
                    if handle.send(StudioEvent::Edit(source)).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Watch mode stopped");
                break;
            }
        }
    }

    Ok(())
}

/// Reflects one published display state onto disk and the terminal.
fn render_display(state: &DisplayState, preview: &Path) -> Result<(), ZoetropeError> {
    if let Some(notice) = state.notice() {
        warn!(notice; "Export notice");
    }

    match (state.scene(), state.error()) {
        (Some(scene), _) => {
            fs::write(preview, svg::render_markup(scene))?;
            info!(
                preview = preview.display().to_string(),
                nodes = scene.node_count(),
                theme = state.theme().to_string();
                "Preview updated"
            );
        }
        (None, Some(error)) => {
            // The diagnostic text is the display state now; the stale
            // preview must not pretend the compile succeeded.
            fs::write(preview, error_markup(error))?;
            warn!(error; "Compile failed");
        }
        (None, None) => {
            fs::write(preview, error_markup("no diagram compiled"))?;
        }
    }
    Ok(())
}

/// A minimal placeholder document carrying the diagnostic text.
fn error_markup(message: &str) -> String {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"480\" height=\"60\">\n\
         <text x=\"12\" y=\"34\" font-family=\"ui-monospace, monospace\" font-size=\"13\" fill=\"#e06464\">{escaped}</text>\n\
         </svg>\n"
    )
}
