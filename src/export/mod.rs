//! Export module.
//!
//! Turns timeline state into one interchange document per call:
//!
//! - **Registry**: per-export symbolic ids for shared formats and assets,
//!   one id per distinct resource regardless of reference count
//! - **Serialization**: a version-stamped root with a single shared
//!   resource section and one project subtree per chapter range
//!
//! Structural validation against the external schema happens downstream;
//! this module guarantees referential consistency (every clip reference
//! resolves to a declared resource) and canonical rational time literals.

mod document;
mod registry;
mod types;

// Re-export types
pub use registry::ResourceRegistry;
pub use types::{AssetCatalog, AssetInfo, ExportOptions, FormatDescriptor, MediaCategory};

// Re-export functions
pub use document::{
    export_chaptered, export_chaptered_to_file, export_timeline, export_timeline_to_file,
};
