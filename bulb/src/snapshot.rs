//! PNG output for headless runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use compute::Framebuffer;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// `frames-YYYYMMDD-HHMMSS` under `base`.
#[must_use]
pub fn timestamped_dir(base: &Path, now: DateTime<Local>) -> PathBuf {
    base.join(format!("frames-{}", now.format("%Y%m%d-%H%M%S")))
}

#[must_use]
pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

/// Writes `frame` as an RGBA PNG.
///
/// # Errors
///
/// Fails if the image cannot be encoded or written.
pub fn save_png(frame: &Framebuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .context("framebuffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "frame written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_path(Path::new("out"), 7), Path::new("out/frame_00007.png"));
        assert_eq!(frame_path(Path::new("out"), 123_456), Path::new("out/frame_123456.png"));
    }

    #[test]
    fn timestamped_directory_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            timestamped_dir(Path::new("renders"), now),
            Path::new("renders/frames-20240309-140507")
        );
    }
}
