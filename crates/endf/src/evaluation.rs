//! Section index and common metadata for one ENDF evaluation

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// internal modules
use crate::error::{Error, Result};
use crate::nuclide::NuclideId;
use crate::records::{Line, Records, Tab1};

// external crates
use log::debug;

/// One entry of the MF1/MT451 section directory
#[derive(Debug, Clone, Copy)]
pub struct DirectoryEntry {
    /// File number
    pub mf: u32,
    /// Section number
    pub mt: u32,
    /// Number of records in the section
    pub records: u32,
    /// Modification flag
    pub modification: u32,
}

/// Pointwise cross section for one reaction, pulled from an MF3 section
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// Mass-difference Q value (eV)
    pub q_mass: f64,
    /// Reaction Q value for the lowest-lying state (eV)
    pub q_value: f64,
    /// Incident energy grid (eV)
    pub energy: Vec<f64>,
    /// Cross section values (barns)
    pub xs: Vec<f64>,
}

/// One evaluation from a sublibrary tape
///
/// An evaluation is indexed once up front: the tape is split into
/// `(MF, MT)` sections and the MF1/MT451 header is decoded for the target
/// identity and the section directory. Sections are then decoded lazily by
/// the accessors, since most tools touch only a handful of them.
///
/// ```rust, no_run
/// # use ndgen_endf::Evaluation;
/// let evaluation = Evaluation::from_file("neutrons/n-092_U_235.endf").unwrap();
/// assert_eq!(evaluation.gnd_name(), "U235");
///
/// // Reaction Q values keyed by MT number
/// let q_values = evaluation.reaction_q_values().unwrap();
/// println!("fission Q = {} eV", q_values[&18]);
/// ```
#[derive(Debug)]
pub struct Evaluation {
    /// ENDF material number
    pub material: i32,
    /// Target nuclide identity
    pub nuclide: NuclideId,
    /// Atomic weight ratio to the neutron mass
    pub atomic_weight_ratio: f64,
    /// Section directory from MF1/MT451
    pub reaction_list: Vec<DirectoryEntry>,
    /// Section content lines keyed by `(MF, MT)`
    sections: BTreeMap<(u32, u32), Vec<String>>,
}

impl Evaluation {
    /// Index an evaluation from a sublibrary file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut material = None;
        let mut sections: BTreeMap<(u32, u32), Vec<String>> = BTreeMap::new();

        // The first line is the TPID banner, the rest belong to sections.
        // SEND/FEND/MEND/TEND delimiters carry MF=0 or MT=0 and are dropped.
        for raw in reader.lines().skip(1) {
            let line = Line::parse(&raw?)?;
            if line.mf == 0 || line.mt == 0 {
                continue;
            }
            material.get_or_insert(line.material);
            sections
                .entry((line.mf, line.mt))
                .or_default()
                .push(line.content);
        }

        let material = material.ok_or_else(|| Error::EmptyTape {
            path: path.display().to_string(),
        })?;

        let header = sections
            .get(&(1, 451))
            .ok_or(Error::MissingSection { mf: 1, mt: 451 })?;

        let mut records = Records::new(header);
        let head = records.head()?;
        let control = records.cont()?;
        records.cont()?;
        let description = records.cont()?;

        // Skip the NWD lines of descriptive text before the NXC directory
        records.skip(description.n1 as usize)?;
        let mut reaction_list = Vec::with_capacity(description.n2 as usize);
        for _ in 0..description.n2 {
            let entry = records.cont()?;
            reaction_list.push(DirectoryEntry {
                mf: entry.l1 as u32,
                mt: entry.l2 as u32,
                records: entry.n1 as u32,
                modification: entry.n2 as u32,
            });
        }

        let nuclide = NuclideId::from_za(head.c1 as u32, control.l2 as u32);
        debug!(
            "indexed {} sections for {} (MAT {})",
            sections.len(),
            nuclide,
            material
        );

        Ok(Self {
            material,
            nuclide,
            atomic_weight_ratio: head.c2,
            reaction_list,
            sections,
        })
    }

    /// Content lines of one section, if present on the tape
    pub fn section(&self, mf: u32, mt: u32) -> Option<&[String]> {
        self.sections.get(&(mf, mt)).map(Vec::as_slice)
    }

    /// GNDS-style name of the target, e.g. `U235` or `Am242_m1`
    pub fn gnd_name(&self) -> String {
        self.nuclide.name()
    }

    /// Reaction Q values keyed by MT number
    ///
    /// The Q value of each reaction is the QI field of the TAB1 header
    /// that opens its MF3 section. Only sections named by the MT451
    /// directory are read.
    pub fn reaction_q_values(&self) -> Result<BTreeMap<u32, f64>> {
        let mut q_values = BTreeMap::new();
        for entry in self.reaction_list.iter().filter(|entry| entry.mf == 3) {
            let section = self
                .section(3, entry.mt)
                .ok_or(Error::MissingSection { mf: 3, mt: entry.mt })?;
            let mut records = Records::new(section);
            records.head()?;
            q_values.insert(entry.mt, records.cont()?.c2);
        }
        Ok(q_values)
    }

    /// Pointwise cross section for one MT from its MF3 section
    pub fn cross_section(&self, mt: u32) -> Result<CrossSection> {
        let section = self
            .section(3, mt)
            .ok_or(Error::MissingSection { mf: 3, mt })?;

        let mut records = Records::new(section);
        records.head()?;
        let table: Tab1 = records.tab1()?;

        Ok(CrossSection {
            q_mass: table.header.c1,
            q_value: table.header.c2,
            energy: table.x,
            xs: table.y,
        })
    }
}
