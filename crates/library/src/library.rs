//! The `cross_sections.xml` manifest of a processed library

// standard library
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

// internal modules
use crate::error::{Error, Result};

// external crates
use hdf5::types::VarLenUnicode;
use log::debug;
use regex::Regex;

/// One registered library file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Nuclides held by the file
    pub materials: Vec<String>,
    /// Location of the file
    pub path: PathBuf,
    /// Kind of data held, e.g. `neutron`
    pub kind: String,
}

impl LibraryEntry {
    /// Whether another entry provides the same data
    ///
    /// Two entries are equivalent when they have the same kind and the
    /// same material list, regardless of where the files live.
    pub fn is_equivalent(&self, other: &LibraryEntry) -> bool {
        self.kind == other.kind && self.materials == other.materials
    }
}

/// Ordered manifest of the files of a processed data library
///
/// Files register in production order and export as a single
/// `cross_sections.xml` document next to the data. The export is
/// deterministic: registering the same files in the same order always
/// produces an identical manifest.
///
/// ```rust, no_run
/// # use ndgen_library::DataLibrary;
/// let mut library = DataLibrary::new();
/// library.register_file("cendl-3.1-hdf5/U235.h5").unwrap();
/// library.export_to_xml("cendl-3.1-hdf5/cross_sections.xml").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DataLibrary {
    /// Registered entries in registration order
    pub libraries: Vec<LibraryEntry>,
}

impl DataLibrary {
    /// Start an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a produced HDF5 file, reading its content back
    ///
    /// The entry records the file's data kind from the `filetype`
    /// attribute and its material list from the top level group names.
    pub fn register_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = hdf5::File::open(path)?;

        let filetype: VarLenUnicode = file.attr("filetype")?.read_scalar()?;
        let kind = filetype
            .as_str()
            .strip_prefix("data_")
            .unwrap_or(filetype.as_str())
            .to_string();

        let materials = file.member_names()?;
        if materials.is_empty() {
            return Err(Error::EmptyLibrary {
                path: path.display().to_string(),
            });
        }

        debug!("registered {} ({})", path.display(), materials.join(" "));
        self.libraries.push(LibraryEntry {
            materials,
            path: path.to_path_buf(),
            kind,
        });
        Ok(())
    }

    /// Register an entry without touching the file
    pub fn register_entry(&mut self, entry: LibraryEntry) {
        self.libraries.push(entry);
    }

    /// Whether an equivalent entry is already registered
    pub fn contains_equivalent(&self, entry: &LibraryEntry) -> bool {
        self.libraries
            .iter()
            .any(|known| known.is_equivalent(entry))
    }

    /// Write the manifest document
    ///
    /// Paths are written relative to the manifest's directory where
    /// possible, so a library directory can be moved wholesale.
    pub fn export_to_xml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_xml(&mut writer, path.parent())
    }

    /// Serialise the manifest to any writer
    pub fn write_xml<W: Write>(&self, writer: &mut W, base: Option<&Path>) -> Result<()> {
        writeln!(writer, "<?xml version='1.0' encoding='utf-8'?>")?;
        writeln!(writer, "<cross_sections>")?;
        for entry in &self.libraries {
            let path = base
                .and_then(|base| entry.path.strip_prefix(base).ok())
                .unwrap_or(&entry.path);
            writeln!(
                writer,
                "  <library materials=\"{}\" path=\"{}\" type=\"{}\"/>",
                entry.materials.join(" "),
                path.display(),
                entry.kind,
            )?;
        }
        writeln!(writer, "</cross_sections>")?;
        Ok(())
    }

    /// Read a manifest written by this tool
    ///
    /// Relative paths resolve against the manifest's directory, so the
    /// returned entries point at the actual files.
    pub fn from_xml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        let base = path.parent().unwrap_or(Path::new(""));

        // The manifest is one self-closing element per library
        let attributes =
            Regex::new(r#"materials="([^"]*)" path="([^"]*)" type="([^"]*)""#)
                .expect("manifest attribute pattern is valid");

        let mut library = Self::new();
        for line in text.lines().map(str::trim) {
            if !line.starts_with("<library") {
                continue;
            }
            let captures = attributes
                .captures(line)
                .ok_or_else(|| Error::InvalidManifest {
                    line: line.to_string(),
                })?;

            library.register_entry(LibraryEntry {
                materials: captures[1].split_whitespace().map(String::from).collect(),
                path: base.join(&captures[2]),
                kind: captures[3].to_string(),
            });
        }
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(materials: &[&str], path: &str, kind: &str) -> LibraryEntry {
        LibraryEntry {
            materials: materials.iter().map(|name| name.to_string()).collect(),
            path: PathBuf::from(path),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn equivalence_ignores_location() {
        let first = entry(&["U235"], "a/U235.h5", "neutron");
        let second = entry(&["U235"], "b/U235.h5", "neutron");
        let other = entry(&["U238"], "a/U238.h5", "neutron");

        assert!(first.is_equivalent(&second));
        assert!(!first.is_equivalent(&other));

        let mut library = DataLibrary::new();
        library.register_entry(first);
        assert!(library.contains_equivalent(&second));
        assert!(!library.contains_equivalent(&other));
    }

    #[test]
    fn manifest_writes_relative_paths() {
        let mut library = DataLibrary::new();
        library.register_entry(entry(&["U235"], "lib/U235.h5", "neutron"));
        library.register_entry(entry(&["U238"], "/abs/elsewhere/U238.h5", "neutron"));

        let mut out = Vec::new();
        library.write_xml(&mut out, Some(Path::new("lib"))).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
<?xml version='1.0' encoding='utf-8'?>
<cross_sections>
  <library materials=\"U235\" path=\"U235.h5\" type=\"neutron\"/>
  <library materials=\"U238\" path=\"/abs/elsewhere/U238.h5\" type=\"neutron\"/>
</cross_sections>
";
        assert_eq!(text, expected);
    }

    #[test]
    fn manifest_round_trips() {
        let dir = std::env::temp_dir().join("ndgen-library-manifest-test");
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = dir.join("cross_sections.xml");

        let mut library = DataLibrary::new();
        library.register_entry(entry(
            &["U235"],
            dir.join("U235.h5").to_str().unwrap(),
            "neutron",
        ));
        library.export_to_xml(&manifest).unwrap();

        let read_back = DataLibrary::from_xml(&manifest).unwrap();
        assert_eq!(read_back.libraries.len(), 1);
        assert_eq!(read_back.libraries[0].materials, vec!["U235"]);
        assert_eq!(read_back.libraries[0].path, dir.join("U235.h5"));
        assert_eq!(read_back.libraries[0].kind, "neutron");
    }

    #[test]
    fn export_is_deterministic() {
        let mut library = DataLibrary::new();
        library.register_entry(entry(&["U235"], "lib/U235.h5", "neutron"));
        library.register_entry(entry(&["Pu239"], "lib/Pu239.h5", "neutron"));

        let mut first = Vec::new();
        let mut second = Vec::new();
        library.write_xml(&mut first, Some(Path::new("lib"))).unwrap();
        library.write_xml(&mut second, Some(Path::new("lib"))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_manifest_lines_fail() {
        let dir = std::env::temp_dir().join("ndgen-library-manifest-bad");
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = dir.join("cross_sections.xml");
        std::fs::write(&manifest, "<cross_sections>\n<library nope/>\n</cross_sections>\n")
            .unwrap();

        assert!(DataLibrary::from_xml(&manifest).is_err());
    }
}
