use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use tracing::{debug, info, warn};

use crate::asset::types::{MediaAsset, MediaTrack, PixelSize};
use crate::error::{AssetError, Result};

/// Probed source metadata (decode-free)
#[derive(Debug, Clone)]
struct SourceMetadata {
    duration: f64,
    width: f64,
    height: f64,
    codec: String,
    has_audio: bool,
}

/// Resolves named assets inside a bundle directory
///
/// Stands in for the platform bundle: an asset is addressed by
/// `(name, extension)` and resolved to a file inside the bundle directory.
/// Metadata comes from a decode-free probe — real dimensions for image
/// files, estimated values for video containers — and is cached per path.
pub struct AssetLibrary {
    bundle_dir: PathBuf,
    metadata_cache: HashMap<PathBuf, SourceMetadata>,
}

impl AssetLibrary {
    pub fn new<P: Into<PathBuf>>(bundle_dir: P) -> Self {
        let bundle_dir = bundle_dir.into();
        info!("Asset library over bundle directory {:?}", bundle_dir);
        Self {
            bundle_dir,
            metadata_cache: HashMap::new(),
        }
    }

    /// Resolve `name.ext` inside the bundle directory and open it as an asset
    ///
    /// Fails with [`AssetError::NotFound`] when the file does not exist —
    /// the caller is expected to abort the current playback attempt and
    /// leave any existing playback untouched.
    pub fn resolve(&mut self, name: &str, ext: &str) -> Result<MediaAsset> {
        let path = self.bundle_dir.join(format!("{}.{}", name, ext));

        if !path.is_file() {
            return Err(AssetError::NotFound {
                name: name.to_string(),
                ext: ext.to_string(),
                dir: self.bundle_dir.display().to_string(),
            }
            .into());
        }

        if !Self::is_supported(&path) {
            return Err(AssetError::UnsupportedFormat {
                format: ext.to_string(),
            }
            .into());
        }

        let metadata = self.probe(&path)?;
        debug!(
            "Probed {:?}: {:.1}s, {}x{}, codec {}",
            path, metadata.duration, metadata.width, metadata.height, metadata.codec
        );

        let mut tracks = vec![MediaTrack::video(
            1,
            metadata.codec.clone(),
            PixelSize::new(metadata.width, metadata.height),
        )];
        if metadata.has_audio {
            tracks.push(MediaTrack::audio(2, "aac"));
        }

        Ok(MediaAsset::new(path, metadata.duration, tracks))
    }

    fn probe(&mut self, path: &Path) -> Result<SourceMetadata> {
        if let Some(metadata) = self.metadata_cache.get(path) {
            return Ok(metadata.clone());
        }

        let metadata = if Self::is_image_file(path) {
            self.probe_image(path)?
        } else {
            self.estimate_container(path)?
        };

        self.metadata_cache.insert(path.to_path_buf(), metadata.clone());
        Ok(metadata)
    }

    fn probe_image(&self, path: &Path) -> Result<SourceMetadata> {
        let image = image::open(path).map_err(|_| AssetError::ProbeFailed {
            path: path.display().to_string(),
        })?;

        let (width, height) = image.dimensions();

        Ok(SourceMetadata {
            duration: 1.0 / 30.0,
            width: width as f64,
            height: height as f64,
            codec: "image".to_string(),
            has_audio: false,
        })
    }

    fn estimate_container(&self, path: &Path) -> Result<SourceMetadata> {
        let file_size = std::fs::metadata(path)
            .map_err(|_| AssetError::ProbeFailed {
                path: path.display().to_string(),
            })?
            .len();

        // ~1 MB per second of footage, clamped to something plausible
        let estimated_duration = (file_size as f64 / 1_000_000.0).clamp(1.0, 300.0);

        warn!("Using estimated metadata for: {:?}", path);

        Ok(SourceMetadata {
            duration: estimated_duration,
            width: 1920.0,
            height: 1080.0,
            codec: "h264".to_string(),
            has_audio: true,
        })
    }

    fn is_image_file(path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => matches!(
                ext.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "bmp"
            ),
            None => false,
        }
    }

    /// Check whether the file extension names a media format we can open
    pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        Self::is_image_file(path)
            || matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some(ext) if matches!(
                    ext.to_lowercase().as_str(),
                    "mp4" | "avi" | "mov" | "mkv" | "webm"
                )
            )
    }

    pub fn clear_cache(&mut self) {
        self.metadata_cache.clear();
    }
}
