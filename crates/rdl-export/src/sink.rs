//! Writes artifacts into an export directory.

use std::path::{Path, PathBuf};

use crate::artifact::{Artifact, ArtifactSink};
use crate::error::ExportError;

pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ArtifactSink for FileSink {
    /// Creates the output directory on first use. An existing file with the
    /// same name is overwritten.
    fn save(&self, artifact: &Artifact) -> Result<PathBuf, ExportError> {
        let name = Path::new(&artifact.file_name);
        if name.file_name().map(Path::new) != Some(name) {
            return Err(ExportError::InvalidFileName(artifact.file_name.clone()));
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(name);
        std::fs::write(&path, &artifact.bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "wrote export");
        Ok(path)
    }
}
