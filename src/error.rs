//! Error taxonomy shared by every stage of a generation run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::models::TableKind;

/// Result alias used across the crate.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A logo that was listed in the logo table but could not be found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLogo {
    /// Label the logo is published under.
    pub label: String,
    /// Path where the logo was expected.
    pub path: PathBuf,
}

impl fmt::Display for MissingLogo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  - {}: {}", self.label, self.path.display())
    }
}

/// Every way a generation run can fail. All variants are fatal.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// None of the configured roots produced a usable asset.
    #[error("no icon assets found under {}; check the configured icon directories", join_paths(.roots))]
    EmptyAssetSet {
        /// Roots that were scanned.
        roots: Vec<PathBuf>,
    },

    /// The required category directory produced no assets.
    #[error("no assets found in required directory {}", .category.display())]
    MissingRequiredCategory {
        /// Directory that had to contribute at least one asset.
        category: PathBuf,
    },

    /// An asset was discovered or listed but could not be read.
    #[error("failed to read asset {}: {source}", .path.display())]
    AssetUnreadable {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// An asset path does not live under the root URLs are made relative to.
    #[error("asset {} is not inside {}", .path.display(), .root.display())]
    OutsideRoot {
        /// Offending file.
        path: PathBuf,
        /// Root the URL was to be relative to.
        root: PathBuf,
    },

    /// Directory traversal failed inside an existing root.
    #[error("failed to scan {}: {source}", .root.display())]
    ScanFailed {
        /// Root being walked.
        root: PathBuf,
        /// Underlying traversal failure.
        source: walkdir::Error,
    },

    /// One or more logos are missing. Lists all of them.
    #[error("Missing logo assets:\n{}", join_lines(.missing))]
    MissingLogoAssets {
        /// Every missing logo, in table order.
        missing: Vec<MissingLogo>,
    },

    /// Patch mode found zero or several candidate blocks.
    #[error("expected exactly one `{global}` block in {}, found {found}", .path.display())]
    BlockNotFound {
        /// Global the block assigns to.
        global: String,
        /// File that was searched.
        path: PathBuf,
        /// Number of matches.
        found: usize,
    },

    /// A patch target refers to a table the run did not build.
    #[error("table `{0}` was not built in this run")]
    TableNotBuilt(TableKind),

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration in {}: {source}", .path.display())]
    InvalidConfig {
        /// Configuration file.
        path: PathBuf,
        /// Parse failure.
        source: serde_json::Error,
    },

    /// A table could not be serialised.
    #[error("failed to serialise manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading or writing the target file failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl ManifestError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::AssetUnreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_lines(missing: &[MissingLogo]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
