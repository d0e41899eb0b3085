use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;
use uuid::Uuid;

use billdesk_core::{storage::ImageStore, CoreError};

use crate::{tmp_path, write_atomic};

const MAX_STEM_LEN: usize = 64;

/// Keeps uploaded product images as files under one directory.
///
/// The returned reference is the stored file's path.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for LocalImageStore {
    fn store_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::Validation("image file is empty".into()));
        }
        let prefix = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}-{}", &prefix[..8], sanitize_file_name(file_name));
        let path = self.root.join(stored_name);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        info!(path = %path.display(), size = bytes.len(), "image stored");
        Ok(path.display().to_string())
    }
}

/// Keeps ASCII alphanumerics, dots, dashes and underscores; everything else
/// becomes `_`. Directory components are dropped.
pub(crate) fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_STEM_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "image".into()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "image");
    }
}
