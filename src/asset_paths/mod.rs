//! Helpers for turning asset files into references the generated script can use.
//!
//! The module splits responsibilities into focused submodules so that extension filtering,
//! URL building and data URI encoding can be tested independently. [`ReferenceResolver`]
//! ties them together and is shared by the icon table builder and the logo resolver.

mod data_uri;
mod filters;
mod url;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestResult;
use crate::models::AssetEntry;

pub use data_uri::{encode_data_uri, inline_data_uri, mime_for_extension};
pub use filters::ExtensionFilter;
pub use url::relative_asset_url;

/// How a file is turned into a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Percent-encoded path relative to the project root.
    Url,
    /// Base64 `data:` URI carrying the file contents.
    #[default]
    Inline,
}

/// Resolves asset paths against a fixed project root.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    root: PathBuf,
}

impl ReferenceResolver {
    /// Create a resolver producing URLs relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `path` using the requested encoding, typing data URIs by its extension.
    pub fn resolve(&self, path: &Path, encoding: Encoding) -> ManifestResult<String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        self.resolve_as(path, extension, encoding)
    }

    /// Resolve a scanned entry, reusing the extension the scanner recorded.
    pub fn resolve_entry(&self, entry: &AssetEntry, encoding: Encoding) -> ManifestResult<String> {
        self.resolve_as(&entry.source_path, &entry.extension, encoding)
    }

    fn resolve_as(
        &self,
        path: &Path,
        extension: &str,
        encoding: Encoding,
    ) -> ManifestResult<String> {
        match encoding {
            Encoding::Url => relative_asset_url(path, &self.root),
            Encoding::Inline => inline_data_uri(path, extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_the_same_file_both_ways() {
        let dir = tempdir().unwrap();
        let icon = dir.path().join("Pictograms").join("star.svg");
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, "<svg/>").unwrap();

        let resolver = ReferenceResolver::new(dir.path());
        assert_eq!(
            resolver.resolve(&icon, Encoding::Url).unwrap(),
            "Pictograms/star.svg"
        );
        assert_eq!(
            resolver.resolve(&icon, Encoding::Inline).unwrap(),
            "data:image/svg+xml;base64,PHN2Zy8+"
        );
    }

    #[test]
    fn entries_are_typed_by_their_recorded_extension() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("mark");
        fs::write(&file, "<svg/>").unwrap();
        let entry = AssetEntry {
            key: "mark".into(),
            source_path: file.clone(),
            extension: "svg".into(),
        };

        let resolver = ReferenceResolver::new(dir.path());
        assert_eq!(
            resolver.resolve_entry(&entry, Encoding::Inline).unwrap(),
            "data:image/svg+xml;base64,PHN2Zy8+"
        );
        assert_eq!(
            resolver.resolve(&file, Encoding::Inline).unwrap(),
            "data:application/octet-stream;base64,PHN2Zy8+"
        );
        assert_eq!(resolver.resolve_entry(&entry, Encoding::Url).unwrap(), "mark");
    }

    #[test]
    fn encoding_parses_from_lowercase_names() {
        let url: Encoding = serde_json::from_str("\"url\"").unwrap();
        let inline: Encoding = serde_json::from_str("\"inline\"").unwrap();
        assert_eq!(url, Encoding::Url);
        assert_eq!(inline, Encoding::Inline);
    }
}
