//! Shared download and extraction helper for the batch tools
//!
//! Both generation tools fetch multi-gigabyte archives from the public
//! evaluation archives before doing anything useful, so the acquisition
//! logic lives in one place.
//!
//! Downloads land in the current directory under the final segment of the
//! URL and are skipped when that file already exists. There is no retry
//! or partial-resume handling; a failed transfer leaves the run to be
//! restarted.
//!
//! ```rust, no_run
//! # use ndgen_fetch::{download, extract_zip};
//! let archive = download("https://www.oecd-nea.org/dbforms/data/eva/evatapes/cendl_31/CENDL-31.zip").unwrap();
//! extract_zip(&archive, "cendl-3.1-endf").unwrap();
//! ```

// Modules
mod error;

#[doc(inline)]
pub use error::Error;
use error::Result;

// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

// external crates
use indicatif::ProgressBar;
use log::info;

/// Download a file into the current directory, returning its local path
///
/// The local name is the final segment of the URL. An existing file of
/// that name is trusted and the download is skipped, so an interrupted
/// run can be restarted after deleting the partial file.
pub fn download(url: &str) -> Result<PathBuf> {
    let name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidUrl {
            url: url.to_string(),
        })?;
    let path = PathBuf::from(name);

    if path.exists() {
        info!("Skipping {name}, already downloaded");
        return Ok(path);
    }

    info!("Downloading {url}...");
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;

    let progress = match response.content_length() {
        Some(length) => ProgressBar::new(length),
        None => ProgressBar::new_spinner(),
    };

    let file = BufWriter::new(File::create(&path)?);
    let mut writer = progress.wrap_write(file);
    response.copy_to(&mut writer)?;
    progress.finish_and_clear();

    Ok(path)
}

/// Unpack a zip archive into a destination directory
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, destination: Q) -> Result<()> {
    let archive = archive.as_ref();
    info!("Extracting {}...", archive.display());

    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    zip.extract(destination.as_ref())?;
    Ok(())
}
