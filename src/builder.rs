//! Generation orchestrator: scan, resolve, render, then write once.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::asset_paths::ReferenceResolver;
use crate::config::{EmitMode, ProjectConfig};
use crate::emit::{Emitter, FullFileEmitter, PatchEmitter, write_output};
use crate::error::ManifestResult;
use crate::manifest::{IconTables, build_icon_tables, resolve_logos, scan_assets};
use crate::models::{GenerationReport, Manifest};

/// High-level helper for producing the asset lookup script of one project.
pub struct ManifestGenerator<'a> {
    root: &'a Path,
    config: &'a ProjectConfig,
}

impl<'a> ManifestGenerator<'a> {
    /// Create a generator for the project rooted at `root`.
    pub fn new(root: &'a Path, config: &'a ProjectConfig) -> Self {
        Self { root, config }
    }

    /// Path of the script this generator writes.
    pub fn target(&self) -> PathBuf {
        self.config.target_path(self.root)
    }

    /// Scan the icon directories and resolve the logo table.
    pub fn build_manifest(&self) -> ManifestResult<Manifest> {
        let resolver = ReferenceResolver::new(self.root);

        let entries = scan_assets(
            &self.config.icon_roots(self.root),
            &self.config.extension_filter(),
            &self.config.scan_policy(self.root),
        )?;
        debug!(count = entries.len(), "discovered icon files");

        let IconTables { urls, inline } =
            build_icon_tables(&entries, &resolver, self.config.needs_inline_icons())?;

        let logos = resolve_logos(
            &self.config.logo_spec(self.root),
            &resolver,
            self.config.logo_encoding,
        )?;

        Ok(Manifest {
            icons: urls,
            icons_inline: inline,
            logos,
        })
    }

    /// Emitter selected by the configured mode.
    pub fn emitter(&self) -> ManifestResult<Box<dyn Emitter>> {
        match self.config.mode {
            EmitMode::Full => Ok(Box::new(FullFileEmitter)),
            EmitMode::Patch => Ok(Box::new(PatchEmitter::load(
                &self.target(),
                self.config.patch_blocks.clone(),
            )?)),
        }
    }

    /// Run the whole pipeline. The target is only touched after everything rendered.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn generate(&self) -> ManifestResult<GenerationReport> {
        let manifest = self.build_manifest()?;
        let contents = self.emitter()?.render(&manifest)?;

        let target = self.target();
        write_output(&target, &contents)?;

        let report = GenerationReport {
            target: target
                .strip_prefix(self.root)
                .map(Path::to_path_buf)
                .unwrap_or(target),
            icon_count: manifest.icons.len(),
            inline_icon_count: manifest.icons_inline.as_ref().map(|table| table.len()),
            logo_count: manifest.logos.len(),
        };
        info!(
            icons = report.icon_count,
            logos = report.logo_count,
            "generated asset manifest"
        );
        Ok(report)
    }
}
