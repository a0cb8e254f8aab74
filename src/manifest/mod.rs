//! Manifest building broken into focused submodules for easier testing.

mod generation;
mod logos;
mod scanning;

pub use generation::{IconTables, build_icon_tables};
pub use logos::{LogoSource, LogoSpec, resolve_logos};
pub use scanning::{ScanPolicy, scan_assets};
