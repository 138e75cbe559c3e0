//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading of OPC packages from ZIP
//! archives. All members are decompressed up front into a name-indexed cache,
//! which the package reader then consumes while walking the relationship
//! graph; traversal never touches the archive a second time.

use crate::opc::error::{OpcError, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Physical package reader that provides access to the members of a
/// ZIP-based OPC package.
#[derive(Debug)]
pub struct PhysPkgReader {
    /// Decompressed archive members, keyed by membername
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_reader(Cursor::new(data))
    }

    /// Create a PhysPkgReader from a reader over ZIP data.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.insert(name, blob);
        }

        Ok(Self { members })
    }

    /// Get the number of files in the package (excluding directories).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the package is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, membername: &str) -> bool {
        self.members.contains_key(membername)
    }

    /// Consume self and return the member cache.
    pub fn into_members(self) -> HashMap<String, Vec<u8>> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn two_member_zip() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();
            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(b"<Types/>").unwrap();
            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer.write_all(b"<presentation/>").unwrap();
            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_reads_all_members() {
        let reader = PhysPkgReader::from_reader(Cursor::new(two_member_zip())).unwrap();
        assert_eq!(reader.len(), 2);
        assert!(reader.contains("ppt/presentation.xml"));
        assert!(!reader.contains("ppt/slides/slide1.xml"));

        let members = reader.into_members();
        assert_eq!(
            members.get("ppt/presentation.xml").map(Vec::as_slice),
            Some(&b"<presentation/>"[..])
        );
    }

    #[test]
    fn test_missing_file() {
        let err = PhysPkgReader::open("no-such-deck.pptx").unwrap_err();
        assert!(matches!(err, OpcError::PackageNotFound(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = PhysPkgReader::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, OpcError::ZipError(_)));
    }
}
