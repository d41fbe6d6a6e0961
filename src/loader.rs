//! Image loading primitive.
//!
//! The session never loads images itself. It issues a ticketed request
//! (see [`Session::refresh`](crate::session::Session)) and the host hands
//! the URI to an [`ImageLoader`], then reports the [`LoadOutcome`] back.
//!
//! A failed load is not an error the visitor sees: the outcome is
//! [`LoadOutcome::Fallback`] carrying the original URI, and the presentation
//! layer points the image at it directly.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// How an image request completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(String),
    Fallback(String),
}

/// Anything that can try to fetch an image by URI.
///
/// `Sync` so warm-ups can fan out across rayon's pool.
pub trait ImageLoader: Sync {
    fn load(&self, uri: &str) -> LoadOutcome;

    /// Fire-and-forget warm-up. Outcomes are only logged.
    fn preload(&self, uris: &[String]) {
        uris.par_iter().for_each(|uri| {
            if let LoadOutcome::Fallback(_) = self.load(uri) {
                log::debug!("preload failed for {uri}");
            }
        });
    }
}

/// Loads gallery images from the local filesystem.
///
/// A URI counts as loaded when it names a readable file whose header decodes
/// as a supported image format.
#[derive(Debug, Clone)]
pub struct FsImageLoader {
    base: PathBuf,
}

impl FsImageLoader {
    /// Relative URIs resolve against `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, uri: &str) -> PathBuf {
        let path = Path::new(uri);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

/// Header-only decode: format detection plus dimensions.
pub fn probe_image(path: &Path) -> Result<(u32, u32), String> {
    image::ImageReader::open(path)
        .map_err(|e| e.to_string())?
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .into_dimensions()
        .map_err(|e| e.to_string())
}

impl ImageLoader for FsImageLoader {
    fn load(&self, uri: &str) -> LoadOutcome {
        let path = self.resolve(uri);
        match probe_image(&path) {
            Ok((w, h)) => {
                log::debug!("loaded {uri} ({w}x{h})");
                LoadOutcome::Loaded(uri.to_string())
            }
            Err(e) => {
                log::debug!("falling back for {uri}: {e}");
                LoadOutcome::Fallback(uri.to_string())
            }
        }
    }
}
