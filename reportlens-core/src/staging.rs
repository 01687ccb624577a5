use crate::error::ReportResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Writes uploads to temporary files so extractors can read them from disk.
///
/// Staged files are deleted when the returned `StagedUpload` is dropped.
#[derive(Debug, Clone)]
pub struct UploadStaging {
    staging_dir: Option<PathBuf>,
}

impl UploadStaging {
    /// Stage into `staging_dir`, or the system temp dir when `None`
    pub fn new(staging_dir: Option<PathBuf>) -> ReportResult<Self> {
        if let Some(dir) = &staging_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self { staging_dir })
    }

    pub fn stage(&self, extension: &str, bytes: &[u8]) -> ReportResult<StagedUpload> {
        let suffix = format!(".{extension}");
        let mut builder = Builder::new();
        builder.prefix("reportlens-").suffix(&suffix);

        let mut file = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), size = bytes.len(), "Staged upload");
        Ok(StagedUpload { file })
    }
}

/// A staged upload on disk
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_file_holds_bytes_and_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let staging = UploadStaging::new(Some(dir.path().join("uploads"))).unwrap();

        let staged = staging.stage("txt", b"hello").unwrap();
        let path = staged.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));
        assert!(path.starts_with(dir.path().join("uploads")));

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn system_temp_dir_by_default() {
        let staging = UploadStaging::new(None).unwrap();
        let staged = staging.stage("pdf", b"%PDF").unwrap();
        assert!(staged.path().starts_with(std::env::temp_dir()));
    }
}
