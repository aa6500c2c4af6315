//! Conversion of neutron evaluations to the processed HDF5 form

// standard library
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

// internal modules
use crate::error::{Error, Result};

// ndgen modules
use ndgen_endf::{Evaluation, NuclideId};

// external crates
use hdf5::types::VarLenUnicode;
use ndgen_utils::f;

/// HDF5 library versioning for produced files
///
/// `earliest` keeps the files readable by old HDF5 builds, `latest` lets
/// the library use the newest on-disk features for performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibVer {
    /// Maximum backwards compatibility
    Earliest,
    /// Newest on-disk format features
    #[default]
    Latest,
}

impl FromStr for LibVer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "earliest" => Ok(Self::Earliest),
            "latest" => Ok(Self::Latest),
            _ => Err(Error::UnknownLibVer {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for LibVer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Earliest => write!(f, "earliest"),
            Self::Latest => write!(f, "latest"),
        }
    }
}

/// One reaction channel of a processed neutron evaluation
#[derive(Debug, Clone)]
pub struct NeutronReaction {
    /// MT number of the reaction
    pub mt: u32,
    /// Reaction Q value (eV)
    pub q_value: f64,
    /// Index of the first master grid point covered by this channel
    pub threshold_idx: usize,
    /// Cross section values (barns) from the threshold upwards
    pub xs: Vec<f64>,
}

/// A neutron evaluation reduced to its processed form
///
/// The processed form is the evaluation's own zero kelvin data: the master
/// energy grid (the total cross section grid when tabulated) and one
/// channel per MF3 section.
///
/// ```rust, no_run
/// # use ndgen_library::{IncidentNeutron, LibVer};
/// let data = IncidentNeutron::from_endf("cendl-3.1-endf/92-U-235.C31").unwrap();
/// data.export_to_hdf5("cendl-3.1-hdf5/U235.h5", LibVer::Latest).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IncidentNeutron {
    /// GNDS-style nuclide name, which names the output group and file
    pub name: String,
    /// Target identity
    pub nuclide: NuclideId,
    /// Atomic weight ratio to the neutron mass
    pub atomic_weight_ratio: f64,
    /// Master incident energy grid (eV)
    pub energy: Vec<f64>,
    /// Reaction channels keyed by MT number
    pub reactions: BTreeMap<u32, NeutronReaction>,
}

impl IncidentNeutron {
    /// Process one neutron evaluation file
    pub fn from_endf<P: AsRef<Path>>(path: P) -> Result<Self> {
        let evaluation = Evaluation::from_file(path)?;

        let mut tables = BTreeMap::new();
        for entry in evaluation.reaction_list.iter().filter(|entry| entry.mf == 3) {
            tables.insert(entry.mt, evaluation.cross_section(entry.mt)?);
        }

        // The total section carries the master grid; evaluations without
        // one fall back to the lowest tabulated MT
        let energy = tables
            .get(&1)
            .or_else(|| tables.values().next())
            .map(|table| table.energy.clone())
            .unwrap_or_default();

        let reactions = tables
            .into_iter()
            .map(|(mt, table)| {
                let threshold = table.energy.first().copied().unwrap_or(0.0);
                let threshold_idx = energy
                    .iter()
                    .position(|&point| point >= threshold)
                    .unwrap_or(0);
                (
                    mt,
                    NeutronReaction {
                        mt,
                        q_value: table.q_value,
                        threshold_idx,
                        xs: table.xs,
                    },
                )
            })
            .collect();

        Ok(Self {
            name: evaluation.gnd_name(),
            nuclide: evaluation.nuclide,
            atomic_weight_ratio: evaluation.atomic_weight_ratio,
            energy,
            reactions,
        })
    }

    /// Export the processed data as one HDF5 file
    ///
    /// The layout is the one the downstream transport and depletion codes
    /// read: a group named after the nuclide with identity attributes, the
    /// `kTs`/`energy` temperature structure (a single 0K point here, since
    /// the data are unbroadened evaluations) and one `reactions/reaction_NNN`
    /// group per channel.
    pub fn export_to_hdf5<P: AsRef<Path>>(&self, path: P, libver: LibVer) -> Result<()> {
        let file = match libver {
            LibVer::Earliest => hdf5::File::with_options()
                .with_fapl(|fapl| {
                    fapl.libver_earliest();
                })
                .create(path.as_ref())?,
            LibVer::Latest => hdf5::File::with_options()
                .with_fapl(|fapl| {
                    fapl.libver_latest();
                })
                .create(path.as_ref())?,
        };

        let filetype: VarLenUnicode = "data_neutron".parse()?;
        file.new_attr::<VarLenUnicode>()
            .create("filetype")?
            .write_scalar(&filetype)?;
        let version = [2i32, 0];
        file.new_attr::<i32>()
            .shape(2)
            .create("version")?
            .write(version.as_slice())?;

        let group = file.create_group(&self.name)?;
        group
            .new_attr::<i32>()
            .create("Z")?
            .write_scalar(&(self.nuclide.atomic_number as i32))?;
        group
            .new_attr::<i32>()
            .create("A")?
            .write_scalar(&(self.nuclide.mass_number as i32))?;
        group
            .new_attr::<i32>()
            .create("metastable")?
            .write_scalar(&(self.nuclide.state as i32))?;
        group
            .new_attr::<f64>()
            .create("atomic_weight_ratio")?
            .write_scalar(&self.atomic_weight_ratio)?;

        // Unbroadened evaluations carry a single zero kelvin temperature
        let kts = group.create_group("kTs")?;
        kts.new_dataset::<f64>()
            .create("0K")?
            .write_scalar(&0.0)?;

        let energy = group.create_group("energy")?;
        energy
            .new_dataset_builder()
            .with_data(self.energy.as_slice())
            .create("0K")?;

        let reactions = group.create_group("reactions")?;
        for channel in self.reactions.values() {
            let rx_group = reactions.create_group(&f!("reaction_{:03}", channel.mt))?;
            rx_group
                .new_attr::<i32>()
                .create("mt")?
                .write_scalar(&(channel.mt as i32))?;
            rx_group
                .new_attr::<f64>()
                .create("Q_value")?
                .write_scalar(&channel.q_value)?;
            rx_group
                .new_attr::<i32>()
                .create("center_of_mass")?
                .write_scalar(&0)?;

            let temperature = rx_group.create_group("0K")?;
            let xs = temperature
                .new_dataset_builder()
                .with_data(channel.xs.as_slice())
                .create("xs")?;
            xs.new_attr::<i32>()
                .create("threshold_idx")?
                .write_scalar(&(channel.threshold_idx as i32))?;
        }

        Ok(())
    }
}
