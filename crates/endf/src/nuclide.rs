//! Nuclide identity, naming and ordering

// internal modules
use crate::error::{Error, Result};
use crate::parsers::nuclide_from_str;

// external crates
use ndgen_utils::f;

/// Element symbols indexed by atomic number, with the neutron at Z=0
pub const SYMBOLS: [&str; 119] = [
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta",
    "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt",
    "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Element symbol for an atomic number
pub fn element_symbol(z: u32) -> Result<&'static str> {
    SYMBOLS
        .get(z as usize)
        .copied()
        .ok_or(Error::UnknownElement { z })
}

/// Atomic number for an element symbol
///
/// An exact match is preferred so the lowercase neutron symbol `n` is never
/// confused with nitrogen, then the lookup falls back to case-insensitive
/// for the common `xe`/`XE` style inputs.
pub fn atomic_number(symbol: &str) -> Option<u32> {
    SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .or_else(|| {
            SYMBOLS
                .iter()
                .skip(1)
                .position(|s| s.eq_ignore_ascii_case(symbol))
                .map(|z| z + 1)
        })
        .map(|z| z as u32)
}

/// Identity of a nuclide as atomic number, mass number and excited state
///
/// Names follow the GNDS convention used across the processed library:
/// `<symbol><mass number>` with a `_m<state>` suffix for metastable states.
/// Elemental (natural composition) evaluations carry a mass number of zero,
/// giving names like `C0`.
///
/// ```rust
/// # use ndgen_endf::NuclideId;
/// # use std::str::FromStr;
/// let am242m = NuclideId::from_str("Am242_m1").unwrap();
/// assert_eq!(am242m.atomic_number, 95);
/// assert_eq!(am242m.mass_number, 242);
/// assert_eq!(am242m.state, 1);
/// assert_eq!(am242m.name(), "Am242_m1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NuclideId {
    /// Atomic number Z
    pub atomic_number: u32,
    /// Mass number A, zero for elemental evaluations
    pub mass_number: u32,
    /// Metastable state index, zero for the ground state
    pub state: u32,
}

impl NuclideId {
    /// Split an ENDF `ZA = 1000*Z + A` identifier
    pub fn from_za(za: u32, state: u32) -> Self {
        Self {
            atomic_number: za / 1000,
            mass_number: za % 1000,
            state,
        }
    }

    /// GNDS-style display name, e.g. `U235` or `Am242_m1`
    pub fn name(&self) -> String {
        let symbol = SYMBOLS
            .get(self.atomic_number as usize)
            .copied()
            .unwrap_or("??");
        match self.state {
            0 => f!("{}{}", symbol, self.mass_number),
            m => f!("{}{}_m{}", symbol, self.mass_number, m),
        }
    }

    /// Canonical (Z, A, M) ordering key
    pub fn zam(&self) -> (u32, u32, u32) {
        (self.atomic_number, self.mass_number, self.state)
    }
}

impl std::str::FromStr for NuclideId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, nuclide) = nuclide_from_str(s).map_err(|_| Error::InvalidNuclide {
            name: s.to_string(),
        })?;
        Ok(nuclide)
    }
}

impl std::fmt::Display for NuclideId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Canonical (Z, A, M) ordering key for a nuclide name
///
/// This is the sort key the chain assembly iterates by, so `He4` orders
/// before `U235` regardless of lexicographic order, and ground states
/// order before their isomers.
///
/// ```rust
/// # use ndgen_endf::zam;
/// assert_eq!(zam("Am242_m1").unwrap(), (95, 242, 1));
/// assert!(zam("He4").unwrap() < zam("U235").unwrap());
/// ```
pub fn zam(name: &str) -> Result<(u32, u32, u32)> {
    name.parse::<NuclideId>().map(|nuclide| nuclide.zam())
}
