//! Radioactive decay data from MF8/MT457

// standard library
use std::path::Path;

// internal modules
use crate::error::{Error, Result};
use crate::evaluation::Evaluation;
use crate::nuclide::NuclideId;
use crate::records::Records;

// external crates
use ndgen_utils::f;

/// A value with its one-sigma uncertainty
///
/// Consumers of the processed records read the nominal value; the
/// uncertainty is carried through because every MT457 quantity pairs them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Uncertain {
    /// Nominal value
    pub nominal: f64,
    /// One-sigma uncertainty
    pub sigma: f64,
}

impl Uncertain {
    /// Pair a nominal value with its uncertainty
    pub fn new(nominal: f64, sigma: f64) -> Self {
        Self { nominal, sigma }
    }
}

/// A single step of a decay sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayKind {
    /// Beta-minus emission
    BetaMinus,
    /// Electron capture or beta-plus emission
    EcBetaPlus,
    /// Isomeric transition to a lower state
    IsomericTransition,
    /// Alpha emission
    Alpha,
    /// Neutron emission
    Neutron,
    /// Spontaneous fission
    SpontaneousFission,
    /// Proton emission
    Proton,
}

impl DecayKind {
    /// Decode one RTYP digit
    fn from_digit(digit: u32, rtyp: f64) -> Result<Self> {
        match digit {
            1 => Ok(Self::BetaMinus),
            2 => Ok(Self::EcBetaPlus),
            3 => Ok(Self::IsomericTransition),
            4 => Ok(Self::Alpha),
            5 => Ok(Self::Neutron),
            6 => Ok(Self::SpontaneousFission),
            7 => Ok(Self::Proton),
            _ => Err(Error::UnsupportedDecayMode { rtyp }),
        }
    }

    /// Conventional label used in chain files and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::BetaMinus => "beta-",
            Self::EcBetaPlus => "ec/beta+",
            Self::IsomericTransition => "it",
            Self::Alpha => "alpha",
            Self::Neutron => "n",
            Self::SpontaneousFission => "sf",
            Self::Proton => "p",
        }
    }

    /// Change in (Z, A) applied to the parent by this step
    ///
    /// Spontaneous fission has no single daughter, so it leaves the
    /// identity untouched and the fragment accounting falls to the
    /// fission product yield data.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::BetaMinus => (1, 0),
            Self::EcBetaPlus => (-1, 0),
            Self::IsomericTransition => (0, 0),
            Self::Alpha => (-2, -4),
            Self::Neutron => (0, -1),
            Self::SpontaneousFission => (0, 0),
            Self::Proton => (-1, -1),
        }
    }
}

/// One decay mode of a nuclide
#[derive(Debug, Clone)]
pub struct DecayModeRecord {
    /// The decay sequence, one entry per RTYP digit
    pub kinds: Vec<DecayKind>,
    /// Daughter nuclide after the full sequence
    pub daughter: NuclideId,
    /// Branching ratio as a fraction
    pub branching_ratio: Uncertain,
    /// Total energy released (eV)
    pub q_value: Uncertain,
}

impl DecayModeRecord {
    /// Comma-joined label for the sequence, e.g. `beta-,n`
    pub fn type_label(&self) -> String {
        self.kinds
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Decay data for one nuclide from an MF8/MT457 section
///
/// ```rust, no_run
/// # use ndgen_endf::Decay;
/// let decay = Decay::from_file("decay/dec-027_Co_060.endf").unwrap();
/// assert_eq!(decay.name(), "Co60");
/// assert!(!decay.stable);
/// println!("half-life {} s", decay.half_life.nominal);
/// ```
#[derive(Debug, Clone)]
pub struct Decay {
    /// Identity of the decaying nuclide
    pub nuclide: NuclideId,
    /// True when the evaluation flags the nuclide as stable
    pub stable: bool,
    /// Half-life (s)
    pub half_life: Uncertain,
    /// Average decay energies (eV), in the light-particle/EM/heavy order
    /// of the file
    pub average_energies: Vec<Uncertain>,
    /// Decay modes with branching ratios
    pub modes: Vec<DecayModeRecord>,
}

impl Decay {
    /// Read decay data from a decay sublibrary file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let evaluation = Evaluation::from_file(path)?;
        let section = evaluation
            .section(8, 457)
            .ok_or(Error::MissingSection { mf: 8, mt: 457 })?;

        let mut records = Records::new(section);
        let head = records.head()?;
        let nuclide = NuclideId::from_za(head.c1 as u32, head.l2 as u32);
        let stable = head.n1 == 1;

        // First LIST: half-life and the average energy (value, uncertainty)
        // pairs
        let (half_life_header, energies) = records.list()?;
        let half_life = Uncertain::new(half_life_header.c1, half_life_header.c2);
        let average_energies = energies
            .chunks_exact(2)
            .map(|pair| Uncertain::new(pair[0], pair[1]))
            .collect();

        // Second LIST: NDK entries of (RTYP, RFS, Q, dQ, BR, dBR)
        let (_, mode_data) = records.list()?;
        let mut modes = Vec::new();
        for entry in mode_data.chunks_exact(6) {
            let kinds = decode_rtyp(entry[0])?;
            modes.push(DecayModeRecord {
                daughter: daughter_of(nuclide, &kinds, entry[1] as u32),
                kinds,
                q_value: Uncertain::new(entry[2], entry[3]),
                branching_ratio: Uncertain::new(entry[4], entry[5]),
            });
        }

        Ok(Self {
            nuclide,
            stable,
            half_life,
            average_energies,
            modes,
        })
    }

    /// GNDS-style name of the nuclide
    pub fn name(&self) -> String {
        self.nuclide.name()
    }

    /// Total average decay energy (eV), summed over the emission classes
    pub fn decay_energy(&self) -> f64 {
        self.average_energies
            .iter()
            .map(|energy| energy.nominal)
            .sum()
    }
}

/// Decode an RTYP value into its decay sequence
///
/// RTYP packs a sequence of decays into decimal digits, so `1.0` is a
/// single beta-minus and `1.5` is beta-minus followed by delayed neutron
/// emission.
fn decode_rtyp(rtyp: f64) -> Result<Vec<DecayKind>> {
    let text = f!("{rtyp:.6}");
    // The integer part is the first decay, so RTYP=10 ("unknown origin")
    // must not collapse into a beta-minus when zeros are stripped
    let (first, rest) = text
        .split_once('.')
        .ok_or(Error::UnsupportedDecayMode { rtyp })?;
    let first: u32 = first
        .parse()
        .map_err(|_| Error::UnsupportedDecayMode { rtyp })?;

    let mut sequence = vec![DecayKind::from_digit(first, rtyp)?];
    for digit in rest.trim_end_matches('0').chars() {
        let digit = digit
            .to_digit(10)
            .ok_or(Error::UnsupportedDecayMode { rtyp })?;
        sequence.push(DecayKind::from_digit(digit, rtyp)?);
    }
    Ok(sequence)
}

/// Daughter identity after applying a full decay sequence
fn daughter_of(parent: NuclideId, kinds: &[DecayKind], final_state: u32) -> NuclideId {
    let (mut z, mut a) = (parent.atomic_number as i32, parent.mass_number as i32);
    for kind in kinds {
        let (dz, da) = kind.delta();
        z += dz;
        a += da;
    }
    NuclideId {
        atomic_number: z.max(0) as u32,
        mass_number: a.max(0) as u32,
        state: final_state,
    }
}
