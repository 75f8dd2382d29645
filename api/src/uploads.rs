//! On-disk persistence for submitted document payloads.
//!
//! Stored names are `<unix-secs>-<random hex><ext>`, so concurrent uploads
//! of the same original name never collide. The rest of the system treats
//! the returned `payload_ref` as opaque.

use rand::RngCore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use verdict_types::Timestamp;

/// A persisted upload.
#[derive(Debug)]
pub struct StoredUpload {
    /// Stored filename within the upload directory.
    pub filename: String,
    /// Opaque payload reference handed to the workflow (the full path).
    pub payload_ref: String,
}

/// Writes document payloads into one flat directory.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open the upload directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<StoredUpload> {
        let ext = Path::new(original_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut suffix = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut suffix);
        let filename = format!(
            "{}-{}{}",
            Timestamp::now().as_secs(),
            hex::encode(suffix),
            ext
        );

        let path = self.dir.join(&filename);
        fs::write(&path, bytes)?;

        Ok(StoredUpload {
            filename,
            payload_ref: path.to_string_lossy().into_owned(),
        })
    }
}
