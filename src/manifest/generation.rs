//! Build the icon lookup tables from scanned assets.

use tracing::debug;

use crate::asset_paths::{Encoding, ReferenceResolver};
use crate::error::ManifestResult;
use crate::models::{AssetEntry, ReferenceAccumulator, ReferenceMap};

/// Icon tables produced by a single pass over the scanned entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTables {
    /// Icon name to relative URL.
    pub urls: ReferenceMap,
    /// Icon name to data URI, when requested.
    pub inline: Option<ReferenceMap>,
}

/// Resolve scanned entries into icon tables.
///
/// Entries are consumed in discovery order and the first file carrying a name wins; later
/// files with the same name are ignored and never read. Each table keeps its own record of
/// claimed names. Sorting happens only once every entry has been accumulated.
pub fn build_icon_tables(
    entries: &[AssetEntry],
    resolver: &ReferenceResolver,
    include_inline: bool,
) -> ManifestResult<IconTables> {
    let mut urls = ReferenceAccumulator::new();
    let mut inline = include_inline.then(ReferenceAccumulator::new);

    for entry in entries {
        if !urls.contains(&entry.key) {
            let reference = resolver.resolve_entry(entry, Encoding::Url)?;
            urls.insert_first(&entry.key, reference);
        } else {
            debug!(
                key = %entry.key,
                path = %entry.source_path.display(),
                "ignoring duplicate icon name"
            );
        }

        if let Some(inline) = inline.as_mut()
            && !inline.contains(&entry.key)
        {
            let reference = resolver.resolve_entry(entry, Encoding::Inline)?;
            inline.insert_first(&entry.key, reference);
        }
    }

    Ok(IconTables {
        urls: urls.into_sorted(),
        inline: inline.map(ReferenceAccumulator::into_sorted),
    })
}
