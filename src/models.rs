//! Data structures produced while building the asset manifest.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Bare file name used as the lookup key.
    pub key: String,
    /// Full path of the file on disk.
    pub source_path: PathBuf,
    /// Lowercase extension without the leading dot.
    pub extension: String,
}

/// Order-preserving accumulator applying first-occurrence-wins insertion.
///
/// Entries keep the order they were discovered in. The presentational ordering is only
/// derived later by [`ReferenceAccumulator::into_sorted`].
#[derive(Debug, Default)]
pub struct ReferenceAccumulator {
    entries: Map<String, Value>,
}

impl ReferenceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has already been claimed.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert `reference` under `key` unless the key was seen before. Returns whether it was kept.
    pub fn insert_first(&mut self, key: &str, reference: String) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), Value::String(reference));
        true
    }

    /// Produce the sorted view used for serialisation.
    pub fn into_sorted(self) -> ReferenceMap {
        ReferenceMap::sorted(self.entries.into_iter().collect())
    }
}

/// Mapping of lookup key to reference, ordered case-insensitively by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReferenceMap {
    entries: Map<String, Value>,
}

impl ReferenceMap {
    /// Sort entries with unique keys case-insensitively.
    pub fn from_unsorted(entries: Vec<(String, String)>) -> Self {
        Self::sorted(
            entries
                .into_iter()
                .map(|(key, reference)| (key, Value::String(reference)))
                .collect(),
        )
    }

    // Stable, so keys that only differ by case keep their incoming order.
    fn sorted(mut entries: Vec<(String, Value)>) -> Self {
        entries.sort_by_cached_key(|(key, _)| key.to_lowercase());
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the reference stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Keys in serialisation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The tables a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Icon name to relative URL.
    Icons,
    /// Icon name to data URI.
    IconsInline,
    /// Logo label to reference.
    Logos,
}

impl TableKind {
    /// Every table, in declaration order of the generated script.
    pub const ALL: [TableKind; 3] = [TableKind::Icons, TableKind::IconsInline, TableKind::Logos];

    /// Name of the script-local constant holding the table.
    pub fn const_name(self) -> &'static str {
        match self {
            TableKind::Icons => "ICON_DATA",
            TableKind::IconsInline => "ICON_DATA_URIS",
            TableKind::Logos => "LOGO_DATA",
        }
    }

    /// Name of the browser global the table is published under.
    pub fn global_name(self) -> &'static str {
        match self {
            TableKind::Icons => "__ICON_DATA__",
            TableKind::IconsInline => "__ICON_DATA_URIS__",
            TableKind::Logos => "__LOGO_DATA__",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Icons => "icons",
            TableKind::IconsInline => "icons_inline",
            TableKind::Logos => "logos",
        };
        f.write_str(name)
    }
}

/// Final aggregate handed to an emitter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Icon name to relative URL.
    pub icons: ReferenceMap,
    /// Icon name to data URI, when inline icons were requested.
    pub icons_inline: Option<ReferenceMap>,
    /// Logo label to reference.
    pub logos: ReferenceMap,
}

impl Manifest {
    /// Fetch a table by kind, `None` when it was not built.
    pub fn table(&self, kind: TableKind) -> Option<&ReferenceMap> {
        match kind {
            TableKind::Icons => Some(&self.icons),
            TableKind::IconsInline => self.icons_inline.as_ref(),
            TableKind::Logos => Some(&self.logos),
        }
    }

    /// Built tables paired with their kind, in script declaration order.
    pub fn tables(&self) -> impl Iterator<Item = (TableKind, &ReferenceMap)> {
        TableKind::ALL
            .into_iter()
            .filter_map(|kind| self.table(kind).map(|table| (kind, table)))
    }
}

/// Outcome of a successful run, used for the summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// File that was written.
    pub target: PathBuf,
    /// Number of icons in the URL table.
    pub icon_count: usize,
    /// Number of icons in the inline table, when built.
    pub inline_icon_count: Option<usize>,
    /// Number of logos.
    pub logo_count: usize,
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} with {} icons", self.target.display(), self.icon_count)?;
        if let Some(inline) = self.inline_icon_count {
            write!(f, ", {inline} inline icons")?;
        }
        write!(f, " and {} logos", self.logo_count)
    }
}
