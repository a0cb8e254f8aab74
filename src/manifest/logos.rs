//! Resolution of the fixed logo table.

use std::path::PathBuf;

use serde::Deserialize;

use crate::asset_paths::{Encoding, ReferenceResolver};
use crate::error::{ManifestError, ManifestResult, MissingLogo};
use crate::models::{ReferenceAccumulator, ReferenceMap};

/// One labelled logo and where it must live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogoSource {
    /// Label the logo is published under.
    pub label: String,
    /// Required file.
    pub path: PathBuf,
}

/// Ordered, read-only table of required logos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoSpec {
    sources: Vec<LogoSource>,
}

impl LogoSpec {
    /// Build the table from its sources.
    pub fn new(sources: impl IntoIterator<Item = LogoSource>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// Number of logos.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in table order.
    pub fn iter(&self) -> impl Iterator<Item = &LogoSource> {
        self.sources.iter()
    }
}

/// Resolve every logo, failing with the complete list of missing files if any are absent.
pub fn resolve_logos(
    spec: &LogoSpec,
    resolver: &ReferenceResolver,
    encoding: Encoding,
) -> ManifestResult<ReferenceMap> {
    let missing: Vec<MissingLogo> = spec
        .iter()
        .filter(|source| !source.path.is_file())
        .map(|source| MissingLogo {
            label: source.label.clone(),
            path: source.path.clone(),
        })
        .collect();

    if !missing.is_empty() {
        return Err(ManifestError::MissingLogoAssets { missing });
    }

    let mut logos = ReferenceAccumulator::new();
    for source in spec.iter() {
        let reference = resolver.resolve(&source.path, encoding)?;
        logos.insert_first(&source.label, reference);
    }

    Ok(logos.into_sorted())
}
