//! Processed nuclear data library output
//!
//! The conversion tools turn raw evaluation files into a processed
//! library: one HDF5 file per nuclide plus a `cross_sections.xml` manifest
//! the downstream transport and depletion codes load.
//!
//! ## Core concepts
//!
//! [IncidentNeutron] is the processed form of one neutron evaluation: the
//! master energy grid and one channel per tabulated reaction, exported
//! with [export_to_hdf5](IncidentNeutron::export_to_hdf5) under either
//! `earliest` or `latest` HDF5 versioning ([LibVer]).
//!
//! [DataLibrary] accumulates the produced files and writes the manifest.
//! It also reads manifests back, which is how libraries are combined into
//! a single one.
//!
//! ## Quickstart example
//!
//! Converting one evaluation and registering it:
//!
//! ```rust, no_run
//! # use ndgen_library::{DataLibrary, IncidentNeutron, LibVer};
//! let data = IncidentNeutron::from_endf("cendl-3.1-endf/92-U-235.C31").unwrap();
//!
//! let mut library = DataLibrary::new();
//! let out = format!("cendl-3.1-hdf5/{}.h5", data.name);
//! data.export_to_hdf5(&out, LibVer::Latest).unwrap();
//! library.register_file(&out).unwrap();
//!
//! library.export_to_xml("cendl-3.1-hdf5/cross_sections.xml").unwrap();
//! ```

// Modules
mod error;
mod library;
mod neutron;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use neutron::{IncidentNeutron, LibVer, NeutronReaction};

#[doc(inline)]
pub use library::{DataLibrary, LibraryEntry};
