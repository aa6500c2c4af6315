//! Reading of ENDF-6 sublibrary records
//!
//! This crate reads the evaluated nuclear data records the `ndgen` tools
//! consume and nothing more. ENDF-6 is the fixed-width text format served
//! by the public evaluation archives; one file ("tape") carries one
//! evaluation split into numbered files (MF) and sections (MT).
//!
//! Three views of a tape are provided:
//!
//! - [Evaluation], the section index from the MF1/MT451 directory, with
//!   access to reaction Q values and pointwise cross sections (MF3)
//! - [Decay], radioactive decay data (MF8/MT457): half-life, average
//!   decay energies and decay modes with branching ratios
//! - [FissionProductYields], independent and cumulative fission product
//!   yields (MF8/MT454 and MT459)
//!
//! For example, pulling the decay modes of a nuclide:
//!
//! ```rust, no_run
//! # use ndgen_endf::Decay;
//! let decay = Decay::from_file("decay/dec-053_I_135.endf").unwrap();
//!
//! for mode in &decay.modes {
//!     println!(
//!         "{} -> {} ({}, BR {})",
//!         decay.name(),
//!         mode.daughter,
//!         mode.type_label(),
//!         mode.branching_ratio.nominal,
//!     );
//! }
//! ```
//!
//! Nuclide identity is shared through [NuclideId], which also provides the
//! canonical [zam] ordering key used when iterating chart-wide data.

// Modules
mod decay;
mod error;
mod evaluation;
mod fpy;
mod nuclide;
mod parsers;
mod records;

#[cfg(test)]
mod testing;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use records::{parse_float, parse_int, Cont, Line, Records, Tab1};

#[doc(inline)]
pub use nuclide::{atomic_number, element_symbol, zam, NuclideId, SYMBOLS};

#[doc(inline)]
pub use evaluation::{CrossSection, DirectoryEntry, Evaluation};

#[doc(inline)]
pub use decay::{Decay, DecayKind, DecayModeRecord, Uncertain};

#[doc(inline)]
pub use fpy::{FissionProductYields, YieldTable};
