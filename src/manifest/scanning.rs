//! Directory scanning utilities for harvesting icon assets.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::asset_paths::ExtensionFilter;
use crate::error::{ManifestError, ManifestResult};
use crate::models::AssetEntry;

/// What counts as a usable scan result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Any asset from any root will do.
    #[default]
    AnyAsset,
    /// At least one asset must come from this directory.
    RequireCategory(PathBuf),
}

/// Walk `roots` in order, returning every file with an allowed extension.
///
/// Missing roots are skipped. Within a root, siblings are visited sorted by file name, so the
/// returned order is stable across runs and platforms. That order decides which file wins a
/// name collision further down the pipeline.
pub fn scan_assets(
    roots: &[PathBuf],
    filter: &ExtensionFilter,
    policy: &ScanPolicy,
) -> ManifestResult<Vec<AssetEntry>> {
    let mut entries = Vec::new();

    for root in roots {
        if !root.exists() {
            debug!(root = %root.display(), "skipping missing icon directory");
            continue;
        }
        collect_root(root, filter, &mut entries)?;
    }

    match policy {
        ScanPolicy::RequireCategory(category) => {
            if !entries
                .iter()
                .any(|entry| entry.source_path.starts_with(category))
            {
                return Err(ManifestError::MissingRequiredCategory {
                    category: category.clone(),
                });
            }
        }
        ScanPolicy::AnyAsset => {
            if entries.is_empty() {
                return Err(ManifestError::EmptyAssetSet {
                    roots: roots.to_vec(),
                });
            }
        }
    }

    Ok(entries)
}

fn collect_root(
    root: &Path,
    filter: &ExtensionFilter,
    entries: &mut Vec<AssetEntry>,
) -> ManifestResult<()> {
    let before = entries.len();

    for item in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let item = item.map_err(|source| ManifestError::ScanFailed {
            root: root.to_path_buf(),
            source,
        })?;

        let path = item.path();
        if !path.is_file() {
            continue;
        }
        let Some(extension) = filter.matching_extension(path) else {
            continue;
        };

        entries.push(AssetEntry {
            key: item.file_name().to_string_lossy().into_owned(),
            source_path: path.to_path_buf(),
            extension,
        });
    }

    debug!(
        root = %root.display(),
        found = entries.len() - before,
        "scanned icon directory"
    );
    Ok(())
}
