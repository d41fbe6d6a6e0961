//! Gallery validation for the `check` command.
//!
//! Looks at the top level of the gallery directory and reports three kinds
//! of problem:
//!
//! - **missing**: an index in `[0, N)` with no `<index>.<extension>` file
//! - **unexpected**: a file with the gallery extension that no index maps to
//!   (a stem that isn't a number, or a number `>= N`)
//! - **undecodable**: an expected file whose header doesn't decode
//!
//! Files with other extensions are ignored. Decoding is probed in parallel.

use crate::gallery::Gallery;
use crate::loader::probe_image;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] walkdir::Error),
    #[error("Gallery directory not found: {0}")]
    MissingRoot(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undecodable {
    pub index: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub expected: u32,
    pub found: u32,
    pub missing: Vec<u32>,
    pub unexpected: Vec<String>,
    pub undecodable: Vec<Undecodable>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.undecodable.is_empty()
    }
}

/// Check the gallery stored in `dir`.
pub fn check_gallery(gallery: &Gallery, dir: &Path) -> Result<CheckReport, CheckError> {
    if !dir.is_dir() {
        return Err(CheckError::MissingRoot(dir.to_path_buf()));
    }

    let mut indexed: BTreeMap<u32, PathBuf> = BTreeMap::new();
    let mut unexpected = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let has_gallery_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(gallery.extension()));
        if !has_gallery_ext {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let index = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|i| *i < gallery.size() && name == gallery.file_name(*i));
        match index {
            Some(i) => {
                indexed.insert(i, path.to_path_buf());
            }
            None => unexpected.push(name),
        }
    }
    unexpected.sort();

    let missing = (0..gallery.size())
        .filter(|i| !indexed.contains_key(i))
        .collect();

    let mut undecodable: Vec<Undecodable> = indexed
        .par_iter()
        .filter_map(|(index, path)| {
            probe_image(path).err().map(|reason| Undecodable {
                index: *index,
                reason,
            })
        })
        .collect();
    undecodable.sort_by_key(|u| u.index);

    log::debug!(
        "checked {}: {} of {} images present",
        dir.display(),
        indexed.len(),
        gallery.size()
    );

    Ok(CheckReport {
        expected: gallery.size(),
        found: indexed.len() as u32,
        missing,
        unexpected,
        undecodable,
    })
}
