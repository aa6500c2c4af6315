//! Result and Error types for the ENDF reader

/// Type alias for `Result<T, endf::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `ndgen-endf`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Field could not be interpreted as an ENDF-6 number
    #[error("could not parse \"{field}\" as an ENDF number")]
    InvalidNumber { field: String },

    /// Record data ran out before the expected number of entries
    #[error("unexpected end of section data")]
    UnexpectedEnd,

    /// No material sections were found on the tape
    #[error("no material sections found in \"{path}\"")]
    EmptyTape { path: String },

    /// A section required by the caller is not on the tape
    #[error("evaluation has no section (MF={mf}, MT={mt})")]
    MissingSection { mf: u32, mt: u32 },

    /// Atomic number outside of the known element symbols
    #[error("no element symbol for Z={z}")]
    UnknownElement { z: u32 },

    /// String could not be interpreted as a nuclide name
    #[error("could not parse \"{name}\" as a nuclide")]
    InvalidNuclide { name: String },

    /// RTYP value outside of the decay chain sequences understood here
    #[error("unsupported decay mode RTYP={rtyp}")]
    UnsupportedDecayMode { rtyp: f64 },
}
