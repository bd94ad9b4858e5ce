use crate::utils::AppError;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reduces a client-supplied filename to its last path component.
pub fn safe_file_name(filename: &str) -> Result<String, AppError> {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::Upload(format!("Invalid filename: {:?}", filename)));
    }
    Ok(name.to_string())
}

/// Copies `content` into `public_dir`, replacing any file with the same name.
pub async fn save_upload<R>(public_dir: &Path, filename: &str, mut content: R) -> Result<PathBuf, AppError>
where
    R: Read + Send + 'static,
{
    let target = public_dir.join(safe_file_name(filename)?);
    let dir = public_dir.to_path_buf();
    let path = target.clone();

    let written = tokio::task::spawn_blocking(move || -> io::Result<u64> {
        fs::create_dir_all(&dir)?;
        let mut file = File::create(&path)?;
        io::copy(&mut content, &mut file)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Upload task failed: {}", e)))??;

    log::info!("📁 Stored upload {} ({} bytes)", target.display(), written);
    Ok(target)
}
