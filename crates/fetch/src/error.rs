//! Result and Error types for archive acquisition

/// Type alias for `Result<T, fetch::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `ndgen-fetch`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure during a GET request to an archive server
    #[error("download request failed")]
    FailedRequest(#[from] reqwest::Error),

    /// Failure unpacking a zip archive
    #[error("failed to extract archive")]
    Zip(#[from] zip::result::ZipError),

    /// URL with no final path segment to use as a file name
    #[error("could not infer a file name from \"{url}\"")]
    InvalidUrl { url: String },
}
