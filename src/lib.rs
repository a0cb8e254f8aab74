#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod builder;
pub mod config;
pub mod emit;
pub mod error;
pub mod manifest;
pub mod models;

pub use builder::ManifestGenerator;
pub use config::{EmitMode, ProjectConfig};
pub use error::{ManifestError, ManifestResult};
pub use models::{GenerationReport, Manifest, ReferenceMap, TableKind};
