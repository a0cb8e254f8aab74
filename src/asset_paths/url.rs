use std::fs;
use std::path::{Component, Path};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{ManifestError, ManifestResult};

/// Everything except the RFC 3986 unreserved characters gets escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Produce a browser friendly relative URL for `path`.
///
/// Every segment is encoded on its own and then joined with `/`, so an escaped character can
/// never turn into a separator and native separators never leak into the URL.
pub fn relative_asset_url(path: &Path, root: &Path) -> ManifestResult<String> {
    fs::metadata(path).map_err(|err| ManifestError::unreadable(path, err))?;

    let relative = path
        .strip_prefix(root)
        .map_err(|_| ManifestError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .map(|part| utf8_percent_encode(&part, SEGMENT).to_string())
        .collect();

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::relative_asset_url;
    use crate::error::ManifestError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn encodes_each_segment_separately() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Pictograms").join("Mobile & Tablet").join("5G icon #2.png");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "png").unwrap();

        let url = relative_asset_url(&file, dir.path()).unwrap();
        assert_eq!(url, "Pictograms/Mobile%20%26%20Tablet/5G%20icon%20%232.png");
    }

    #[test]
    fn leaves_unreserved_characters_alone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a-b_c.d~e.svg");
        fs::write(&file, "svg").unwrap();

        assert_eq!(relative_asset_url(&file, dir.path()).unwrap(), "a-b_c.d~e.svg");
    }

    #[test]
    fn escapes_non_ascii_as_utf8() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("café.png");
        fs::write(&file, "png").unwrap();

        assert_eq!(relative_asset_url(&file, dir.path()).unwrap(), "caf%C3%A9.png");
    }

    #[test]
    fn missing_files_are_unreadable() {
        let dir = tempdir().unwrap();
        let err = relative_asset_url(&dir.path().join("gone.png"), dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::AssetUnreadable { .. }));
        assert!(err.to_string().contains("gone.png"));
    }

    #[test]
    fn rejects_paths_outside_the_root() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("root");
        fs::create_dir_all(&root).unwrap();
        let file = outer.path().join("elsewhere.png");
        fs::write(&file, "png").unwrap();

        let err = relative_asset_url(&file, &root).unwrap_err();
        assert!(matches!(err, ManifestError::OutsideRoot { .. }));
    }
}
