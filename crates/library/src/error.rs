//! Result and Error types for library conversion and manifests

/// Type alias for `Result<T, library::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `ndgen-library`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure reading evaluation records
    #[error("failed to read evaluation data")]
    Endf(#[from] ndgen_endf::Error),

    /// Failure in an HDF5 operation
    #[error("failed HDF5 operation")]
    Hdf5(#[from] hdf5::Error),

    /// String not representable as an HDF5 string type
    #[error("failed HDF5 string conversion")]
    Hdf5String(#[from] hdf5::types::StringError),

    /// A library file with no nuclide group to register
    #[error("no nuclide group found in \"{path}\"")]
    EmptyLibrary { path: String },

    /// A manifest line that does not describe a library
    #[error("could not parse manifest line: {line}")]
    InvalidManifest { line: String },

    /// Unrecognised HDF5 versioning name
    #[error("unknown HDF5 version \"{name}\", expected earliest or latest")]
    UnknownLibVer { name: String },
}
