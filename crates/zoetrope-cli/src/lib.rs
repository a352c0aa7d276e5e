//! CLI logic for the Zoetrope diagram studio.
//!
//! Two modes share the same pipeline: one-shot (compile the input file once
//! and export an artifact) and watch (feed file saves through the debounced
//! studio loop and keep a preview SVG current).

pub mod error_adapter;

mod args;
mod config;
mod watch;

pub use args::{Args, FormatArg, ThemeArg};

use std::{fs, io, path::Path};

use log::info;

use zoetrope::{
    Studio, StudioEvent, ZoetropeError,
    compiler::CompilerAdapter,
    config::AppConfig,
    dispatch::{ArtifactSink, DirectorySink},
    engine::GraphEngine,
    export::{ExportEncoder, raster::SkiaEncoder},
    theme::Theme,
};

/// Run the Zoetrope CLI application
///
/// One-shot mode reads the input file, compiles it, applies the theme, and
/// exports a single artifact into the output directory. Watch mode keeps a
/// studio running against the file until interrupted.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ZoetropeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Compile errors
/// - Export encoding errors
pub async fn run(args: &Args) -> Result<(), ZoetropeError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let theme = args
        .theme
        .map(Theme::from)
        .unwrap_or_else(|| app_config.style().theme());

    if args.watch {
        run_watch(args, &app_config, theme).await
    } else {
        run_once(args, &app_config, theme).await
    }
}

/// Compile the input once and export it.
async fn run_once(args: &Args, app_config: &AppConfig, theme: Theme) -> Result<(), ZoetropeError> {
    let format = zoetrope::export::ExportFormat::from(args.format);
    info!(
        input_path = args.input,
        format = format.to_string(),
        theme = theme.to_string();
        "Processing diagram"
    );

    let source = fs::read_to_string(&args.input)?;

    let compiler = CompilerAdapter::new(GraphEngine::new());
    let mut scene = compiler.compile(&source).await?;
    theme.apply(&mut scene);

    let background = app_config
        .style()
        .export_background()
        .map_err(|err| ZoetropeError::Io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
    let exporter = ExportEncoder::new(SkiaEncoder::new(), background);
    let artifact = exporter.export(Some(&scene), theme, format)?;

    let sink = DirectorySink::new(&args.out_dir);
    sink.save(&artifact)?;

    info!(
        filename = artifact.filename(),
        out_dir = args.out_dir;
        "Artifact exported successfully"
    );
    Ok(())
}

/// Run the live studio against the input file.
async fn run_watch(args: &Args, app_config: &AppConfig, theme: Theme) -> Result<(), ZoetropeError> {
    let studio = Studio::new(
        app_config,
        GraphEngine::new(),
        SkiaEncoder::new(),
        DirectorySink::new(&args.out_dir),
    )?;
    let handle = studio.spawn();

    // The CLI theme flag overrides the configured default.
    let _ = handle.send(StudioEvent::SetTheme(theme)).await;

    // Seed the pipeline with the current file contents.
    let input = Path::new(&args.input);
    let source = fs::read_to_string(input)?;
    let _ = handle.send(StudioEvent::Edit(source)).await;

    watch::run_loop(&handle, input, Path::new(&args.preview)).await?;

    handle.shutdown().await;
    Ok(())
}
