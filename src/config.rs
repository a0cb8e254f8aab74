//! Project configuration describing where assets live and how the lookup script is written.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::asset_paths::{Encoding, ExtensionFilter};
use crate::error::{ManifestError, ManifestResult};
use crate::manifest::{LogoSource, LogoSpec, ScanPolicy};
use crate::models::TableKind;

const DEFAULT_CONFIG_FILE: &str = "asset-manifest.json";

const DEFAULT_ICON_DIRS: &[&str] = &["Pictograms", "assets/images"];

const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg"];

const DEFAULT_LOGOS: &[(&str, &str)] = &[
    (
        "Primary (Blue/Coral)",
        "assets/logos/primary-logo/Telstra-Primary-logo.png",
    ),
    (
        "Primary (Mono White)",
        "assets/logos/primary-logo/Telstra-Primary-logo-Mono-White.png",
    ),
    (
        "Primary (Mono Black)",
        "assets/logos/primary-logo/Telstra-Primary-logo-Mono-Black-RGB.png",
    ),
    (
        "Primary on Blue (White T)",
        "assets/logos/primary-logo/Telstra-Primary-logo-A.png",
    ),
    (
        "Primary on Coral (White T)",
        "assets/logos/primary-logo/Telstra-Primary-logo-B.png",
    ),
];

/// How the target file is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// Render a whole replacement script.
    #[default]
    Full,
    /// Replace named blocks inside the existing script.
    Patch,
}

/// A block rewritten in patch mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchBlock {
    /// Global the block assigns to, e.g. `__ICON_DATA__`.
    pub global: String,
    /// Table rendered into the block.
    pub table: TableKind,
}

/// Discoverable project configuration. Every path is relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directories scanned for icons, in priority order.
    pub icon_dirs: Vec<PathBuf>,
    /// File extensions accepted by the scanner.
    pub allowed_extensions: Vec<String>,
    /// Directory that must contribute at least one icon, when set.
    pub required_category: Option<PathBuf>,
    /// Named logos that must all exist.
    pub logos: Vec<LogoSource>,
    /// Encoding applied to logos.
    pub logo_encoding: Encoding,
    /// Whether to build the inline data URI icon table next to the URL table.
    pub inline_icons: bool,
    /// Script written by the run.
    pub target: PathBuf,
    /// Whole-file or in-place rendering.
    pub mode: EmitMode,
    /// Blocks rewritten in patch mode.
    pub patch_blocks: Vec<PatchBlock>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            icon_dirs: DEFAULT_ICON_DIRS.iter().map(PathBuf::from).collect(),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            required_category: None,
            logos: DEFAULT_LOGOS
                .iter()
                .map(|(label, path)| LogoSource {
                    label: label.to_string(),
                    path: PathBuf::from(path),
                })
                .collect(),
            logo_encoding: Encoding::Inline,
            inline_icons: true,
            target: PathBuf::from("js/assets.js"),
            mode: EmitMode::Full,
            patch_blocks: vec![PatchBlock {
                global: TableKind::Icons.global_name().into(),
                table: TableKind::IconsInline,
            }],
        }
    }
}

impl ProjectConfig {
    /// Load `asset-manifest.json` from `root`, falling back to defaults when it does not exist.
    pub fn discover(root: &Path) -> ManifestResult<Self> {
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        match Self::from_path(&candidate) {
            Err(ManifestError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| ManifestError::io("failed to read config", path, err))?;
        serde_json::from_str(&content).map_err(|source| ManifestError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ProjectConfig {
    /// Absolute icon roots in scan order.
    pub fn icon_roots(&self, root: &Path) -> Vec<PathBuf> {
        self.icon_dirs.iter().map(|dir| root.join(dir)).collect()
    }

    /// Extension filter built from the configured list.
    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.allowed_extensions)
    }

    /// Scanner policy for empty results.
    pub fn scan_policy(&self, root: &Path) -> ScanPolicy {
        match &self.required_category {
            Some(category) => ScanPolicy::RequireCategory(root.join(category)),
            None => ScanPolicy::AnyAsset,
        }
    }

    /// Logo table with paths resolved against `root`.
    pub fn logo_spec(&self, root: &Path) -> LogoSpec {
        LogoSpec::new(self.logos.iter().map(|logo| LogoSource {
            label: logo.label.clone(),
            path: root.join(&logo.path),
        }))
    }

    /// Path of the generated script.
    pub fn target_path(&self, root: &Path) -> PathBuf {
        root.join(&self.target)
    }

    /// Whether the run has to build the inline icon table.
    pub fn needs_inline_icons(&self) -> bool {
        self.inline_icons
            || (self.mode == EmitMode::Patch
                && self
                    .patch_blocks
                    .iter()
                    .any(|block| block.table == TableKind::IconsInline))
    }
}
