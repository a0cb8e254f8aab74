use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::config::PatchBlock;
use crate::emit::{Emitter, render_table};
use crate::error::{ManifestError, ManifestResult};
use crate::models::Manifest;

/// Rewrites `window.<GLOBAL> = {...};` blocks inside an existing script.
///
/// Everything outside the matched blocks is preserved byte for byte. Each block has to match
/// exactly once; the counts are checked for every block before anything is substituted.
#[derive(Debug, Clone)]
pub struct PatchEmitter {
    path: PathBuf,
    original: String,
    blocks: Vec<PatchBlock>,
}

impl PatchEmitter {
    /// Wrap already loaded file contents.
    pub fn new(path: impl Into<PathBuf>, original: String, blocks: Vec<PatchBlock>) -> Self {
        Self {
            path: path.into(),
            original,
            blocks,
        }
    }

    /// Read the target file that will be patched.
    pub fn load(path: &Path, blocks: Vec<PatchBlock>) -> ManifestResult<Self> {
        let original = fs::read_to_string(path)
            .map_err(|err| ManifestError::io("failed to read patch target", path, err))?;
        Ok(Self::new(path, original, blocks))
    }

    fn locate(&self, global: &str) -> ManifestResult<(Range<usize>, String)> {
        let pattern = block_pattern(global);
        let matches: Vec<_> = pattern.captures_iter(&self.original).collect();

        let [captures] = matches.as_slice() else {
            return Err(self.not_found(global, matches.len()));
        };
        let (Some(whole), Some(head)) = (captures.get(0), captures.name("head")) else {
            return Err(self.not_found(global, 0));
        };

        Ok((whole.range(), head.as_str().to_string()))
    }

    fn not_found(&self, global: &str, found: usize) -> ManifestError {
        ManifestError::BlockNotFound {
            global: global.to_string(),
            path: self.path.clone(),
            found,
        }
    }
}

impl Emitter for PatchEmitter {
    fn render(&self, manifest: &Manifest) -> ManifestResult<String> {
        let mut replacements = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            let table = manifest
                .table(block.table)
                .ok_or(ManifestError::TableNotBuilt(block.table))?;
            let (span, head) = self.locate(&block.global)?;
            debug!(global = %block.global, start = span.start, end = span.end, "located block");
            replacements.push((span, format!("{head}{};", render_table(table)?), &block.global));
        }

        replacements.sort_by_key(|(span, _, _)| span.start);
        for pair in replacements.windows(2) {
            if pair[0].0.end > pair[1].0.start {
                return Err(self.not_found(pair[1].2, 2));
            }
        }

        let mut patched = String::with_capacity(self.original.len());
        let mut cursor = 0;
        for (span, text, _) in &replacements {
            patched.push_str(&self.original[cursor..span.start]);
            patched.push_str(text);
            cursor = span.end;
        }
        patched.push_str(&self.original[cursor..]);

        Ok(patched)
    }
}

/// The object either closes right away (`{}`) or on a line of its own, which is how
/// [`render_table`] ends every non-empty table. A `};` inside a quoted key never starts a line.
fn block_pattern(global: &str) -> Regex {
    Regex::new(&format!(
        r"(?sm)(?P<head>\b(?:window|globalThis)\.{}\s*=\s*)\{{(?:\}}|.*?^\}});",
        regex::escape(global)
    ))
    .expect("invalid block regex")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::extract_literal;
    use crate::models::{ReferenceMap, TableKind};
    use tempfile::tempdir;

    const HEADER: &str = "// Asset lookups\nconst helper = () => 1;\n";
    const FOOTER: &str = "\nfunction lookup(name) {\n  return window.__ICON_DATA__[name];\n}\n";

    fn icons_block() -> Vec<PatchBlock> {
        vec![PatchBlock {
            global: "__ICON_DATA__".into(),
            table: TableKind::Icons,
        }]
    }

    fn manifest() -> Manifest {
        Manifest {
            icons: ReferenceMap::from_unsorted(vec![
                ("b.png".into(), "Pictograms/b.png".into()),
                ("A.svg".into(), "Pictograms/A.svg".into()),
            ]),
            icons_inline: None,
            logos: ReferenceMap::default(),
        }
    }

    #[test]
    fn replaces_only_the_matched_block() {
        let original = format!(
            "{HEADER}window.__ICON_DATA__ = {{\n  \"old.png\": \"data:image/png;base64,AAAA\"\n}};{FOOTER}"
        );
        let emitter = PatchEmitter::new("assets.js", original.clone(), icons_block());

        let patched = emitter.render(&manifest()).unwrap();
        assert!(patched.starts_with(&format!("{HEADER}window.__ICON_DATA__ = {{\n")));
        assert!(patched.ends_with(&format!("}};{FOOTER}")));
        assert!(!patched.contains("old.png"));

        let parsed = extract_literal(&patched, "window.__ICON_DATA__ = ");
        assert_eq!(parsed, manifest().icons);
    }

    #[test]
    fn keeps_the_original_assignment_head() {
        let original = "globalThis.__ICON_DATA__={};\n".to_string();
        let emitter = PatchEmitter::new("assets.js", original, icons_block());
        let patched = emitter.render(&manifest()).unwrap();
        assert!(patched.starts_with("globalThis.__ICON_DATA__={\n  \"A.svg\""));
        assert!(patched.ends_with("};\n"));
    }

    #[test]
    fn does_not_confuse_similarly_named_globals() {
        let original =
            "window.__ICON_DATA_URIS__ = {};\nwindow.__ICON_DATA__ = {};\n".to_string();
        let emitter = PatchEmitter::new("assets.js", original, icons_block());
        let patched = emitter.render(&manifest()).unwrap();
        assert!(patched.starts_with("window.__ICON_DATA_URIS__ = {};\n"));
    }

    #[test]
    fn zero_or_two_blocks_are_rejected() {
        let none = PatchEmitter::new("assets.js", "const x = 1;\n".into(), icons_block());
        let err = none.render(&manifest()).unwrap_err();
        assert!(matches!(err, ManifestError::BlockNotFound { found: 0, .. }));

        let twice = PatchEmitter::new(
            "assets.js",
            "window.__ICON_DATA__ = {};\nwindow.__ICON_DATA__ = {};\n".into(),
            icons_block(),
        );
        let err = twice.render(&manifest()).unwrap_err();
        assert!(matches!(err, ManifestError::BlockNotFound { found: 2, .. }));
    }

    #[test]
    fn requires_the_referenced_table() {
        let emitter = PatchEmitter::new(
            "assets.js",
            "window.__ICON_DATA_URIS__ = {};\n".into(),
            vec![PatchBlock {
                global: "__ICON_DATA_URIS__".into(),
                table: TableKind::IconsInline,
            }],
        );
        let err = emitter.render(&manifest()).unwrap_err();
        assert!(matches!(err, ManifestError::TableNotBuilt(TableKind::IconsInline)));
    }

    #[test]
    fn patches_several_blocks_in_one_pass() {
        let original = "window.__LOGO_DATA__ = {};\n// keep\nwindow.__ICON_DATA__ = {};\n";
        let mut blocks = icons_block();
        blocks.push(PatchBlock {
            global: "__LOGO_DATA__".into(),
            table: TableKind::Logos,
        });
        let emitter = PatchEmitter::new("assets.js", original.into(), blocks);

        let patched = emitter.render(&manifest()).unwrap();
        assert!(patched.starts_with("window.__LOGO_DATA__ = {};\n// keep\nwindow.__ICON_DATA__ = {\n"));
    }

    #[test]
    fn brace_in_a_key_does_not_end_the_block() {
        let manifest = Manifest {
            icons: ReferenceMap::from_unsorted(vec![
                ("x};.svg".into(), "Pictograms/x%7D%3B.svg".into()),
                ("z.png".into(), "Pictograms/z.png".into()),
            ]),
            icons_inline: None,
            logos: ReferenceMap::default(),
        };

        let original = format!("{HEADER}window.__ICON_DATA__ = {{}};{FOOTER}");
        let first = PatchEmitter::new("assets.js", original, icons_block())
            .render(&manifest)
            .unwrap();
        let second = PatchEmitter::new("assets.js", first.clone(), icons_block())
            .render(&manifest)
            .unwrap();

        assert_eq!(second, first);
        assert!(second.ends_with(&format!("\n}};{FOOTER}")));
        assert_eq!(
            extract_literal(&second, "window.__ICON_DATA__ = "),
            manifest.icons
        );
    }

    #[test]
    fn load_reads_the_target_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.js");
        fs::write(&path, "window.__ICON_DATA__ = {};\n").unwrap();

        let emitter = PatchEmitter::load(&path, icons_block()).unwrap();
        assert!(emitter.render(&manifest()).unwrap().contains("\"b.png\""));

        let err = PatchEmitter::load(&dir.path().join("missing.js"), icons_block()).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }
}
