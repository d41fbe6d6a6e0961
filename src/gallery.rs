//! Gallery addressing: index → image URI, plus startup preload planning.
//!
//! Images are addressed by position only:
//!
//! ```text
//! Moss Images/0.jpg
//! Moss Images/1.jpg
//! ...
//! Moss Images/200.jpg
//! ```

use crate::config::GalleryConfig;
use crate::day::{DayResolver, GalleryIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    root: String,
    size: u32,
    extension: String,
}

impl Gallery {
    pub fn new(root: impl Into<String>, size: u32, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            size: size.max(1),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(&config.root, config.size, &config.extension)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<root>/<index>.<extension>`
    pub fn uri(&self, index: GalleryIndex) -> String {
        let root = self.root.trim_end_matches('/');
        if root.is_empty() {
            format!("{}.{}", index, self.extension)
        } else {
            format!("{}/{}.{}", root, index, self.extension)
        }
    }

    /// File name of the image at `index`, without the root.
    pub fn file_name(&self, index: u32) -> String {
        format!("{}.{}", index, self.extension)
    }

    /// URIs to warm at startup for the given offsets around today.
    ///
    /// Offsets that land before day 0 are skipped and each image is listed
    /// once, in first-seen order.
    pub fn preload_uris(
        &self,
        resolver: &DayResolver,
        epoch_day_today: i64,
        offsets: &[i64],
    ) -> Vec<String> {
        let mut seen = Vec::new();
        for &offset in offsets {
            let day = resolver.resolve_from(epoch_day_today, offset);
            if day.viewed_day < 0 || seen.contains(&day.gallery_index) {
                continue;
            }
            seen.push(day.gallery_index);
        }
        seen.into_iter().map(|index| self.uri(index)).collect()
    }
}
