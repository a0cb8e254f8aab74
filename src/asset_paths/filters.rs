use std::collections::BTreeSet;
use std::path::Path;

/// Case-insensitive allow-list of file extensions.
///
/// Extensions may be configured with or without the leading dot; they are stored lowercase
/// without it so that `.PNG`, `png` and `.png` all describe the same filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter from configured extension strings.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = extensions
            .into_iter()
            .map(|ext| normalise_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { allowed }
    }

    /// Lowercase extension of `path` when it passes the filter.
    pub fn matching_extension(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.allowed.contains(&ext).then_some(ext)
    }

}

fn normalise_extension(value: &str) -> String {
    value.trim().trim_start_matches('.').to_lowercase()
}
