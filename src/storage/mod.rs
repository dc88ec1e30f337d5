//! Flat-directory image storage for uploaded cover art and photos.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

/// Write an uploaded image under a timestamp-prefixed name and return the
/// stored filename. The prefix keeps repeated uploads of the same file from
/// clobbering each other.
pub async fn save_image(
    image_dir: &str,
    original_name: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    let seed = Utc::now().format("%Y-%m-%d-%H-%M-%S-%3f");
    let filename = format!("{}-{}", seed, sanitize(original_name));
    let path = PathBuf::from(image_dir).join(&filename);

    tokio::fs::create_dir_all(image_dir).await?;
    tokio::fs::write(&path, bytes).await?;

    Ok(filename)
}

/// Remove a stored image unless it is the shared default placeholder. A
/// missing file is not an error; the row is already gone or never had one.
pub async fn delete_image(image_dir: &str, filename: &str, default_image: &str) {
    if filename.is_empty() || filename == default_image {
        return;
    }

    let path = PathBuf::from(image_dir).join(filename);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove image {}: {}", path.display(), e);
        }
    }
}

/// Strip any path components from a client-supplied filename
fn sanitize(original_name: &str) -> String {
    Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> String {
        std::env::temp_dir()
            .join(format!("sonidox-storage-{}-{}", tag, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn save_stores_bytes_under_timestamped_name() {
        let dir = temp_dir("save");
        let stored = save_image(&dir, "cover.png", b"png-bytes").await.unwrap();

        assert!(stored.ends_with("-cover.png"));
        assert_ne!(stored, "cover.png");
        let on_disk = tokio::fs::read(PathBuf::from(&dir).join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn save_strips_path_components() {
        let dir = temp_dir("strip");
        let stored = save_image(&dir, "../../etc/passwd", b"x").await.unwrap();
        assert!(!stored.contains(".."));
        assert!(!stored.contains('/'));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn delete_skips_default_and_tolerates_missing() {
        let dir = temp_dir("delete");
        let stored = save_image(&dir, "photo.jpg", b"jpg").await.unwrap();

        delete_image(&dir, &stored, "default.png").await;
        assert!(!PathBuf::from(&dir).join(&stored).exists());

        // No-ops, must not panic
        delete_image(&dir, "default.png", "default.png").await;
        delete_image(&dir, "never-existed.jpg", "default.png").await;
        delete_image(&dir, "", "default.png").await;

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
