/// Open Packaging Conventions (OPC) reading support.
///
/// A .pptx file is an OPC package: a ZIP archive whose members are "parts"
/// tied together by `[Content_Types].xml` and per-part `.rels` relationship
/// files. This module reads such packages into an in-memory part graph.
///
/// Only the reading half of the convention is implemented; slidescope never
/// creates or mutates packages.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
