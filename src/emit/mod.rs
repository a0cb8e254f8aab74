//! Serialise a [`Manifest`] into the JavaScript file consumed by the UI and its tests.
//!
//! Two strategies share the [`Emitter`] interface: [`FullFileEmitter`] renders a complete
//! replacement script, [`PatchEmitter`] rewrites named blocks of an existing one. Either way
//! the result is rendered entirely in memory and only then handed to [`write_output`].

mod full_file;
mod patch;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ManifestError, ManifestResult};
use crate::models::{Manifest, ReferenceMap};

pub use full_file::FullFileEmitter;
pub use patch::PatchEmitter;

/// Renders the complete contents of the target file.
pub trait Emitter {
    /// Produce the new file contents for `manifest`.
    fn render(&self, manifest: &Manifest) -> ManifestResult<String>;
}

/// Two-space indented JSON object literal in the map's own order.
pub fn render_table(table: &ReferenceMap) -> ManifestResult<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Write fully rendered `contents` to `path` in one call, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> ManifestResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| ManifestError::io("failed to create directory for", path, err))?;
    }
    fs::write(path, contents).map_err(|err| ManifestError::io("failed to write", path, err))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote asset lookup script");
    Ok(())
}
