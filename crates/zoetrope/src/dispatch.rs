//! Artifact delivery to the host environment.
//!
//! The pipeline hands finished [`ExportArtifact`]s to an [`ArtifactSink`];
//! the bundled [`DirectorySink`] decodes the artifact payload and writes it
//! into a directory under the artifact's generated filename.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::info;

use crate::export::ExportArtifact;

/// The file-save seam: one save interaction per call.
pub trait ArtifactSink {
    /// Persist the artifact.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the artifact cannot be written; the caller
    /// surfaces it as a notice and the live scene is unaffected.
    fn save(&self, artifact: &ExportArtifact) -> io::Result<()>;
}

/// Saves artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: &ExportArtifact) -> io::Result<()> {
        let bytes = artifact
            .decode_bytes()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(artifact.filename());
        fs::write(&path, bytes)?;

        info!(path = path.display().to_string(); "Artifact saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoetrope_core::{color::Color, theme::Theme};

    use crate::export::{
        EncodeError, ExportEncoder, ExportFormat, ImageEncoder, RasterFormat, RasterOptions,
        VectorOptions,
    };

    struct StubEncoder;

    impl ImageEncoder for StubEncoder {
        fn rasterize(
            &self,
            _markup: &str,
            _format: RasterFormat,
            _options: &RasterOptions,
        ) -> Result<String, EncodeError> {
            Ok("data:image/png;base64,AAEC".to_string())
        }

        fn serialize_vector(
            &self,
            _markup: &str,
            _options: &VectorOptions,
        ) -> Result<String, EncodeError> {
            Ok("data:image/svg+xml;base64,AAEC".to_string())
        }
    }

    fn artifact() -> crate::export::ExportArtifact {
        let graph = zoetrope_parser::parse("graph:\nA->B").unwrap();
        let scene = crate::layout::layered(&graph, &Default::default());
        ExportEncoder::new(StubEncoder, Color::new("#1a1a1a").unwrap())
            .export(Some(&scene), Theme::Dark, ExportFormat::Png)
            .unwrap()
    }

    #[test]
    fn test_saves_decoded_bytes_under_generated_filename() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));

        let artifact = artifact();
        sink.save(&artifact).unwrap();

        let path = dir.path().join("exports").join(artifact.filename());
        assert_eq!(fs::read(path).unwrap(), vec![0x00, 0x01, 0x02]);
    }
}
