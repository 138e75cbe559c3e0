/// Objects that implement reading OPC packages.
///
/// This module provides the main OpcPackage type, which represents an Open
/// Packaging Convention package in memory. It manages parts and
/// relationships and provides high-level lookup operations.
use crate::opc::constants::relationship_type;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{PACKAGE_URI, PackURI};
use crate::opc::part::{Part, PartFactory};
use crate::opc::phys_pkg::PhysPkgReader;
use crate::opc::pkgreader::PackageReader;
use crate::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

/// Main API class for working with OPC packages.
///
/// OpcPackage represents an Open Packaging Convention package in memory,
/// providing access to parts, relationships, and package-level lookups.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: HashMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    ///
    /// # Arguments
    /// * `path` - Path to the package file (.pptx)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(phys_reader)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys_reader = PhysPkgReader::from_reader(reader)?;
        Self::from_phys_reader(phys_reader)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let pkg_reader = PackageReader::from_phys_reader(phys_reader)?;
        Self::unmarshal(pkg_reader)
    }

    /// Unmarshal a package from a package reader.
    ///
    /// Converts serialized parts and relationships into the in-memory object
    /// graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut rels = Relationships::new(PACKAGE_URI.to_string());
        for srel in pkg_reader.pkg_srels() {
            rels.add_relationship(
                srel.reltype.clone(),
                srel.target_ref.clone(),
                srel.r_id.clone(),
                srel.is_external(),
            );
        }

        let mut parts: HashMap<String, Box<dyn Part>> = HashMap::new();
        for spart in pkg_reader.take_sparts() {
            let mut part =
                PartFactory::load(spart.partname.clone(), spart.content_type, spart.blob)?;
            for srel in &spart.srels {
                part.rels_mut().add_relationship(
                    srel.reltype.clone(),
                    srel.target_ref.clone(),
                    srel.r_id.clone(),
                    srel.is_external(),
                );
            }
            parts.insert(spart.partname.to_string(), part);
        }

        Ok(Self { rels, parts })
    }

    /// Get a reference to the main document part.
    ///
    /// For PowerPoint packages this is the presentation.xml part.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get an iterator over all parts in the package.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }
}
