//! `launchkit preview`: render one image description to a file.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::io::Write;
use std::path::Path;

use launchkit_gateway::PreviewRenderer;
use launchkit_utils::atomic_write::write_bytes_atomic;
use launchkit_utils::error::LaunchKitError;
use tracing::info;

/// Execute the preview command
pub async fn execute_preview_command(
    description: &str,
    out_path: &Path,
    renderer: &dyn PreviewRenderer,
    out: &mut impl Write,
) -> Result<()> {
    let target = Utf8PathBuf::from_path_buf(out_path.to_path_buf())
        .map_err(|path| anyhow::anyhow!("output path {} is not valid UTF-8", path.display()))?;

    let image = renderer
        .generate_preview(description)
        .await
        .map_err(LaunchKitError::from)?;

    write_bytes_atomic(&target, &image.bytes)
        .with_context(|| format!("Failed to write preview to {target}"))?;
    info!(url = %image.url, bytes = image.bytes.len(), "Preview written");

    writeln!(
        out,
        "✓ Wrote {} bytes ({}) to {target}",
        image.bytes.len(),
        image.content_type.as_deref().unwrap_or("unknown type")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use launchkit_gateway::PreviewImage;
    use launchkit_utils::error::PreviewError;
    use tempfile::TempDir;

    struct EchoRenderer;

    #[async_trait]
    impl PreviewRenderer for EchoRenderer {
        async fn generate_preview(&self, description: &str) -> Result<PreviewImage, PreviewError> {
            if description.trim().is_empty() {
                return Err(PreviewError::BlankDescription);
            }
            Ok(PreviewImage {
                url: format!("mem://{description}"),
                content_type: Some("image/png".to_string()),
                bytes: description.as_bytes().to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn test_preview_written_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preview.png");
        let mut buf = Vec::new();

        execute_preview_command("Bottle at dusk", &path, &EchoRenderer, &mut buf)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"Bottle at dusk");
        assert!(String::from_utf8(buf).unwrap().contains("14 bytes (image/png)"));
    }

    #[tokio::test]
    async fn test_blank_description_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preview.png");
        let mut buf = Vec::new();

        let err = execute_preview_command("  ", &path, &EchoRenderer, &mut buf)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LaunchKitError>(),
            Some(LaunchKitError::Preview(PreviewError::BlankDescription))
        ));
        assert!(!path.exists());
    }
}
