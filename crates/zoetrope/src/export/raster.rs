//! The bundled image encoder, backed by resvg and tiny-skia.
//!
//! Rasterizes scene markup into PNG/JPEG data URIs and serializes vector
//! artifacts. Backgrounds are composited by filling the pixmap before the
//! scene draws (raster) or by injecting a full-size rectangle behind the
//! markup (vector).

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::trace;
use resvg::{tiny_skia, usvg};

use zoetrope_core::color::Color;

use crate::export::{EncodeError, ImageEncoder, RasterFormat, RasterOptions, VectorOptions};

/// Image encoder built on resvg's tiny-skia backend.
pub struct SkiaEncoder {
    options: usvg::Options<'static>,
}

impl SkiaEncoder {
    /// Creates an encoder with system fonts loaded for label rendering.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        Arc::make_mut(&mut options.fontdb).load_system_fonts();
        Self { options }
    }

    fn parse_tree(&self, markup: &str) -> Result<usvg::Tree, EncodeError> {
        usvg::Tree::from_str(markup, &self.options)
            .map_err(|err| EncodeError::new(format!("scene markup rejected: {err}")))
    }
}

impl Default for SkiaEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SkiaEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkiaEncoder").finish_non_exhaustive()
    }
}

impl ImageEncoder for SkiaEncoder {
    fn rasterize(
        &self,
        markup: &str,
        format: RasterFormat,
        options: &RasterOptions,
    ) -> Result<String, EncodeError> {
        let tree = self.parse_tree(markup)?;
        let size = tree.size();

        let ratio = options.pixel_ratio.max(0.1);
        let width = (size.width() * ratio).ceil().max(1.0) as u32;
        let height = (size.height() * ratio).ceil().max(1.0) as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| EncodeError::new("could not allocate export pixmap"))?;

        if let Some(background) = &options.background {
            pixmap.fill(to_skia_color(background));
        }

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(ratio, ratio),
            &mut pixmap.as_mut(),
        );
        trace!(width, height; "Scene rasterized");

        match format {
            RasterFormat::Png => {
                let png = pixmap
                    .encode_png()
                    .map_err(|err| EncodeError::new(format!("PNG encoding failed: {err}")))?;
                Ok(data_uri("image/png", &png))
            }
            RasterFormat::Jpeg => {
                let jpeg = encode_jpeg(&pixmap, options.quality.unwrap_or(1.0))?;
                Ok(data_uri("image/jpeg", &jpeg))
            }
        }
    }

    fn serialize_vector(
        &self,
        markup: &str,
        options: &VectorOptions,
    ) -> Result<String, EncodeError> {
        let markup = match &options.background {
            Some(background) => inject_background(markup, background)?,
            None => markup.to_string(),
        };
        Ok(data_uri("image/svg+xml", markup.as_bytes()))
    }
}

/// JPEG has no alpha channel: demultiply the pixmap into straight RGB and
/// encode at the requested quality.
fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let mut rgb = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgb.extend_from_slice(&[color.red(), color.green(), color.blue()]);
    }

    let image = image::RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
        .ok_or_else(|| EncodeError::new("pixmap dimensions do not match pixel data"))?;

    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|err| EncodeError::new(format!("JPEG encoding failed: {err}")))?;
    Ok(jpeg)
}

/// Inserts a full-size background rectangle right after the opening
/// `<svg>` tag, mirroring what the raster path does with a pixmap fill.
fn inject_background(markup: &str, background: &Color) -> Result<String, EncodeError> {
    let open_tag_end = markup
        .find('>')
        .ok_or_else(|| EncodeError::new("scene markup has no opening tag"))?;

    let mut with_background = String::with_capacity(markup.len() + 64);
    with_background.push_str(&markup[..=open_tag_end]);
    with_background.push_str(&format!(
        "\n<rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>"
    ));
    with_background.push_str(&markup[open_tag_end + 1..]);
    Ok(with_background)
}

fn to_skia_color(color: &Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect x="2" y="2" width="6" height="6" fill="#2d3748"/></svg>"##;

    fn decode(data_uri: &str) -> Vec<u8> {
        let (_, payload) = data_uri.split_once(',').unwrap();
        STANDARD.decode(payload).unwrap()
    }

    #[test]
    fn test_png_rasterization_oversamples() {
        let encoder = SkiaEncoder::new();
        let uri = encoder
            .rasterize(
                MARKUP,
                RasterFormat::Png,
                &RasterOptions {
                    pixel_ratio: 4.0,
                    quality: None,
                    background: None,
                },
            )
            .unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        let decoded = image::load_from_memory(&decode(&uri)).unwrap();
        assert_eq!(decoded.width(), 40);
        assert_eq!(decoded.height(), 40);
    }

    #[test]
    fn test_background_fills_the_pixmap() {
        let encoder = SkiaEncoder::new();
        let uri = encoder
            .rasterize(
                MARKUP,
                RasterFormat::Png,
                &RasterOptions {
                    pixel_ratio: 1.0,
                    quality: None,
                    background: Some(Color::new("#1a1a1a").unwrap()),
                },
            )
            .unwrap();

        let decoded = image::load_from_memory(&decode(&uri)).unwrap().to_rgba8();
        // A corner pixel outside the drawn rect shows the composited base.
        assert_eq!(decoded.get_pixel(0, 0).0, [26, 26, 26, 255]);
    }

    #[test]
    fn test_jpeg_rasterization() {
        let encoder = SkiaEncoder::new();
        let uri = encoder
            .rasterize(
                MARKUP,
                RasterFormat::Jpeg,
                &RasterOptions {
                    pixel_ratio: 2.0,
                    quality: Some(0.95),
                    background: Some(Color::new("#1a1a1a").unwrap()),
                },
            )
            .unwrap();

        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let decoded = image::load_from_memory(&decode(&uri)).unwrap();
        assert_eq!(decoded.width(), 20);
    }

    #[test]
    fn test_vector_with_background_injects_rect() {
        let encoder = SkiaEncoder::new();
        let uri = encoder
            .serialize_vector(
                MARKUP,
                &VectorOptions {
                    background: Some(Color::new("#1a1a1a").unwrap()),
                },
            )
            .unwrap();

        assert!(uri.starts_with("data:image/svg+xml;base64,"));
        let markup = String::from_utf8(decode(&uri)).unwrap();
        assert!(markup.contains("width=\"100%\" height=\"100%\""));
        // The injected background precedes the scene content.
        assert!(markup.find("100%").unwrap() < markup.find("#2d3748").unwrap());
    }

    #[test]
    fn test_vector_without_background_is_untouched() {
        let encoder = SkiaEncoder::new();
        let uri = encoder
            .serialize_vector(MARKUP, &VectorOptions { background: None })
            .unwrap();

        assert_eq!(String::from_utf8(decode(&uri)).unwrap(), MARKUP);
    }

    #[test]
    fn test_invalid_markup_is_an_encode_error() {
        let encoder = SkiaEncoder::new();
        let err = encoder
            .rasterize(
                "this is not svg",
                RasterFormat::Png,
                &RasterOptions {
                    pixel_ratio: 1.0,
                    quality: None,
                    background: None,
                },
            )
            .unwrap_err();

        assert!(err.to_string().contains("rejected"));
    }
}
