//! Zoetrope - a live diagram studio pipeline.
//!
//! Source text becomes a displayable vector scene through a debounced,
//! session-versioned async compile cycle; the committed scene can be
//! restyled between two themes without recompiling and exported as
//! PNG/JPEG/SVG at a fixed oversampling factor.
//!
//! The pipeline is built around three seams: a [`engine::DiagramEngine`]
//! compiles source into scenes, an [`export::ImageEncoder`] turns rendered
//! markup into artifacts, and an [`dispatch::ArtifactSink`] delivers them.
//! Bundled implementations of all three make the crate usable end to end.
//!
//! # Examples
//!
//! One-shot compile and export:
//!
//! ```rust,no_run
//! use zoetrope::{
//!     ZoetropeError,
//!     compiler::CompilerAdapter,
//!     config::AppConfig,
//!     dispatch::{ArtifactSink, DirectorySink},
//!     engine::GraphEngine,
//!     export::{ExportEncoder, ExportFormat},
//!     export::raster::SkiaEncoder,
//! };
//!
//! # async fn demo() -> Result<(), ZoetropeError> {
//! let config = AppConfig::default();
//! let compiler = CompilerAdapter::new(GraphEngine::new());
//!
//! let mut scene = compiler.compile("graph:\nclient -> server").await?;
//! config.style().theme().apply(&mut scene);
//!
//! let background = config.style().export_background().expect("valid config");
//! let exporter = ExportEncoder::new(SkiaEncoder::new(), background);
//! let artifact = exporter.export(Some(&scene), config.style().theme(), ExportFormat::Png)?;
//!
//! DirectorySink::new("exports").save(&artifact)?;
//! # Ok(())
//! # }
//! ```
//!
//! Live pipeline driven by events:
//!
//! ```rust,no_run
//! use zoetrope::{
//!     Studio, StudioEvent,
//!     config::AppConfig,
//!     dispatch::DirectorySink,
//!     engine::GraphEngine,
//!     export::raster::SkiaEncoder,
//! };
//!
//! # async fn demo() -> Result<(), zoetrope::ZoetropeError> {
//! let studio = Studio::new(
//!     &AppConfig::default(),
//!     GraphEngine::new(),
//!     SkiaEncoder::new(),
//!     DirectorySink::new("exports"),
//! )?;
//!
//! let handle = studio.spawn();
//! let mut display = handle.display();
//!
//! handle.send(StudioEvent::Edit("graph:\nA->B".into())).await.ok();
//! display.changed().await.ok();
//! assert!(display.borrow().scene().is_some());
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod engine;
pub mod export;
pub mod session;
pub mod studio;

mod error;
mod layout;

pub use zoetrope_core::{color, geometry, scene, semantic, theme};

pub use error::ZoetropeError;
pub use studio::{DisplayState, Studio, StudioEvent, StudioHandle};

/// A ready-made sample diagram, the pipeline's equivalent of a "load
/// sample" button.
pub const SAMPLE_SOURCE: &str = "graph: TD
client[Web Client] -> gateway[API Gateway]
gateway -> users[User Service]
gateway -> jobs[Job Service]
users -> db[Postgres]
jobs -> db
users -> cache[Cache]
jobs -> cache
";
