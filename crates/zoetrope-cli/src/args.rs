//! Command-line argument definitions for the Zoetrope CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input file, export format and theme,
//! watch mode, configuration file, and logging verbosity.

use clap::{Parser, ValueEnum};

use zoetrope::{export::ExportFormat, theme::Theme};

/// Command-line arguments for the Zoetrope diagram studio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Directory where export artifacts are written
    #[arg(short, long, default_value = ".")]
    pub out_dir: String,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Svg)]
    pub format: FormatArg,

    /// Display theme, overriding the configured default
    #[arg(short, long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Watch the input file and recompile on every change
    #[arg(short, long)]
    pub watch: bool,

    /// Path of the live preview SVG written in watch mode
    #[arg(short, long, default_value = "preview.svg")]
    pub preview: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Export format choices.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Lossless raster export.
    Png,
    /// Lossy raster export.
    Jpeg,
    /// Vector export.
    Svg,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Jpeg => ExportFormat::Jpeg,
            FormatArg::Svg => ExportFormat::Svg,
        }
    }
}

/// Display theme choices.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    /// Colors render as authored.
    Dark,
    /// Derived from the dark palette by inversion.
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}
