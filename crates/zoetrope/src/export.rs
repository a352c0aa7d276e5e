//! Still-image export of the live scene.
//!
//! The [`ExportEncoder`] reads the committed, themed scene and produces an
//! [`ExportArtifact`] in one of three formats. All raster exports use a
//! fixed 4× oversampling factor so sharpness never depends on on-screen
//! size. Background compositing follows the theme: dark exports composite
//! against the opaque dark base, light exports rely on the scene's own
//! black-background-plus-invert composition.

pub mod raster;
pub mod svg;

use log::info;

use zoetrope_core::{color::Color, scene::Scene, theme::Theme};

use crate::error::ZoetropeError;

/// Raster oversampling factor applied uniformly to PNG and JPEG exports.
pub const OVERSAMPLE: f32 = 4.0;

/// Fixed JPEG quality factor.
const JPEG_QUALITY: f32 = 0.95;

/// The three export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless raster.
    Png,
    /// Lossy raster at a fixed quality factor.
    Jpeg,
    /// Vector serialization.
    Svg,
}

impl ExportFormat {
    /// Returns the artifact filename extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    /// Returns the artifact media type.
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Png => write!(f, "png"),
            ExportFormat::Jpeg => write!(f, "jpeg"),
            ExportFormat::Svg => write!(f, "svg"),
        }
    }
}

/// The raster subset of [`ExportFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// Lossless raster.
    Png,
    /// Lossy raster.
    Jpeg,
}

/// Options for rasterizing scene markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Multiplier on the scene's natural pixel size.
    pub pixel_ratio: f32,
    /// Lossy quality factor in `0.0..=1.0`, if the format takes one.
    pub quality: Option<f32>,
    /// Background to composite against before drawing the scene.
    pub background: Option<Color>,
}

/// Options for vector serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorOptions {
    /// Explicit background color, or none for a transparent artifact.
    pub background: Option<Color>,
}

/// An image encoder failure.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct EncodeError(String);

impl EncodeError {
    /// Creates an encode error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The image encoding seam.
///
/// Implementations turn rendered SVG markup into data URIs; they never see
/// pipeline state. The bundled implementation is
/// [`SkiaEncoder`](raster::SkiaEncoder).
pub trait ImageEncoder {
    /// Rasterizes markup into a PNG or JPEG data URI.
    fn rasterize(
        &self,
        markup: &str,
        format: RasterFormat,
        options: &RasterOptions,
    ) -> Result<String, EncodeError>;

    /// Serializes markup into an SVG data URI.
    fn serialize_vector(
        &self,
        markup: &str,
        options: &VectorOptions,
    ) -> Result<String, EncodeError>;
}

/// One exported still image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    format: ExportFormat,
    data_uri: String,
    filename: String,
}

impl ExportArtifact {
    /// Returns the export format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Returns the encoded artifact as a data URI.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Returns the generated filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decodes the data URI payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if the URI is not base64-shaped.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        use base64::{Engine as _, engine::general_purpose::STANDARD};

        let payload = self
            .data_uri
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| EncodeError::new("artifact data URI has no payload"))?;
        STANDARD
            .decode(payload)
            .map_err(|err| EncodeError::new(format!("artifact payload is not base64: {err}")))
    }
}

/// Serializes the live themed scene into export artifacts.
#[derive(Debug)]
pub struct ExportEncoder<I> {
    encoder: I,
    dark_background: Color,
}

impl<I: ImageEncoder> ExportEncoder<I> {
    /// Creates an export encoder compositing dark exports against
    /// `dark_background`.
    pub fn new(encoder: I, dark_background: Color) -> Self {
        Self {
            encoder,
            dark_background,
        }
    }

    /// Exports the live scene in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`ZoetropeError::NoDiagram`] when `scene` is `None` (nothing
    /// compiled, or the last compile failed or was cleared), and
    /// [`ZoetropeError::Encode`] when the image encoder fails. The live
    /// scene is never affected by an export failure.
    pub fn export(
        &self,
        scene: Option<&Scene>,
        theme: Theme,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ZoetropeError> {
        let scene = scene.ok_or(ZoetropeError::NoDiagram)?;
        let markup = svg::render_markup(scene);

        // Dark scenes carry no background of their own, so exports
        // composite one in. Light scenes already composite through the
        // theme transform's black base and invert filter.
        let background = match theme {
            Theme::Dark => Some(self.dark_background),
            Theme::Light => None,
        };

        let data_uri = match format {
            ExportFormat::Png => self.encoder.rasterize(
                &markup,
                RasterFormat::Png,
                &RasterOptions {
                    pixel_ratio: OVERSAMPLE,
                    quality: None,
                    background,
                },
            )?,
            ExportFormat::Jpeg => self.encoder.rasterize(
                &markup,
                RasterFormat::Jpeg,
                &RasterOptions {
                    pixel_ratio: OVERSAMPLE,
                    quality: Some(JPEG_QUALITY),
                    background,
                },
            )?,
            ExportFormat::Svg => self
                .encoder
                .serialize_vector(&markup, &VectorOptions { background })?,
        };

        let filename = artifact_filename(format, theme, chrono::Utc::now().timestamp_millis());
        info!(
            format = format.to_string(),
            theme = theme.to_string(),
            filename = filename.as_str();
            "Export artifact encoded"
        );

        Ok(ExportArtifact {
            format,
            data_uri,
            filename,
        })
    }
}

/// Deterministic artifact filename: format, theme, and a capture-time
/// uniqueness token, so repeated exports never silently overwrite.
fn artifact_filename(format: ExportFormat, theme: Theme, captured_ms: i64) -> String {
    format!(
        "zoetrope-diagram-{theme}-{captured_ms}.{}",
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encoder double that records the options it was called with.
    #[derive(Default)]
    struct ProbeEncoder;

    impl ImageEncoder for ProbeEncoder {
        fn rasterize(
            &self,
            _markup: &str,
            format: RasterFormat,
            options: &RasterOptions,
        ) -> Result<String, EncodeError> {
            Ok(format!(
                "data:probe,{format:?}|ratio={}|quality={:?}|bg={:?}",
                options.pixel_ratio,
                options.quality,
                options.background.map(|b| b.to_string()),
            ))
        }

        fn serialize_vector(
            &self,
            _markup: &str,
            options: &VectorOptions,
        ) -> Result<String, EncodeError> {
            Ok(format!(
                "data:probe,Svg|bg={:?}",
                options.background.map(|b| b.to_string())
            ))
        }
    }

    fn encoder() -> ExportEncoder<ProbeEncoder> {
        ExportEncoder::new(ProbeEncoder, Color::new("#1a1a1a").unwrap())
    }

    fn scene() -> Scene {
        let graph = zoetrope_parser::parse("graph:\nA->B").unwrap();
        crate::layout::layered(&graph, &Default::default())
    }

    #[test]
    fn test_export_without_scene_is_no_diagram() {
        let err = encoder()
            .export(None, Theme::Dark, ExportFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ZoetropeError::NoDiagram));
    }

    #[test]
    fn test_png_dark_composites_dark_base_at_4x() {
        let artifact = encoder()
            .export(Some(&scene()), Theme::Dark, ExportFormat::Png)
            .unwrap();

        assert!(artifact.data_uri().contains("Png|ratio=4"));
        assert!(artifact.data_uri().contains("bg=Some"));
    }

    #[test]
    fn test_png_light_relies_on_scene_composition() {
        let artifact = encoder()
            .export(Some(&scene()), Theme::Light, ExportFormat::Png)
            .unwrap();

        assert!(artifact.data_uri().contains("bg=None"));
    }

    #[test]
    fn test_jpeg_uses_fixed_quality() {
        let artifact = encoder()
            .export(Some(&scene()), Theme::Dark, ExportFormat::Jpeg)
            .unwrap();

        assert!(artifact.data_uri().contains("quality=Some(0.95)"));
        assert!(artifact.data_uri().contains("ratio=4"));
    }

    #[test]
    fn test_svg_light_omits_background() {
        let artifact = encoder()
            .export(Some(&scene()), Theme::Light, ExportFormat::Svg)
            .unwrap();

        assert_eq!(artifact.data_uri(), "data:probe,Svg|bg=None");
    }

    #[test]
    fn test_svg_dark_sets_background() {
        let artifact = encoder()
            .export(Some(&scene()), Theme::Dark, ExportFormat::Svg)
            .unwrap();

        assert!(artifact.data_uri().contains("bg=Some"));
    }

    #[test]
    fn test_filenames_encode_format_theme_and_capture_time() {
        let name = artifact_filename(ExportFormat::Jpeg, Theme::Light, 1_700_000_000_000);
        assert_eq!(name, "zoetrope-diagram-light-1700000000000.jpg");

        let later = artifact_filename(ExportFormat::Jpeg, Theme::Light, 1_700_000_000_001);
        assert_ne!(name, later);
    }
}
