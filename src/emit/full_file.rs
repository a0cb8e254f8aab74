use crate::emit::{Emitter, render_table};
use crate::error::ManifestResult;
use crate::models::{Manifest, TableKind};

/// Renders a self-contained script declaring every built table.
///
/// The tables are attached to `window` when running in a browser and exported through
/// `module.exports` when loaded by Node, so the same file serves the page and the tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFileEmitter;

impl Emitter for FullFileEmitter {
    fn render(&self, manifest: &Manifest) -> ManifestResult<String> {
        let tables = manifest
            .tables()
            .map(|(kind, table)| -> ManifestResult<(TableKind, String)> {
                Ok((kind, render_table(table)?))
            })
            .collect::<ManifestResult<Vec<_>>>()?;

        let declarations: Vec<String> = tables
            .iter()
            .map(|(kind, json)| format!("  const {} = {};", kind.const_name(), json))
            .collect();
        let globals: Vec<String> = tables
            .iter()
            .map(|(kind, _)| format!("    window.{} = {};", kind.global_name(), kind.const_name()))
            .collect();
        let exports: Vec<&str> = tables.iter().map(|(kind, _)| kind.const_name()).collect();

        Ok(format!(
            r#"(function initialiseAssetLookups() {{
{}

  if (typeof window !== 'undefined') {{
{}
  }}

  if (typeof module !== 'undefined' && module.exports) {{
    module.exports = {{ {} }};
  }}
}})();
"#,
            declarations.join("\n"),
            globals.join("\n"),
            exports.join(", "),
        ))
    }
}
