//! Download CENDL 3.1 data from the OECD NEA and convert it to a
//! processed HDF5 library

// standard library
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

// ndgen modules
use ndgen_fetch::{download, extract_zip};
use ndgen_library::{DataLibrary, IncidentNeutron, LibVer};

// external crates
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glob::glob;
use log::info;

#[derive(Parser)]
#[command(
    about = "Download CENDL 3.1 data from the OECD NEA and convert it to a \
             processed HDF5 library"
)]
struct Args {
    /// Directory to create the new library in
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Download files from the OECD NEA
    #[arg(long, conflicts_with = "no_download")]
    download: bool,

    /// Do not download files from the OECD NEA
    #[arg(long)]
    no_download: bool,

    /// Extract the downloaded zip archives
    #[arg(long, conflicts_with = "no_extract")]
    extract: bool,

    /// Do not extract the downloaded archives
    #[arg(long)]
    no_extract: bool,

    /// Output HDF5 versioning, 'earliest' for backwards compatibility or
    /// 'latest' for performance
    #[arg(long, value_enum, default_value = "latest")]
    libver: LibVerArg,

    /// The nuclear data library release version
    #[arg(short, long, value_parser = ["3.1"], default_value = "3.1")]
    release: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LibVerArg {
    Earliest,
    Latest,
}

impl From<LibVerArg> for LibVer {
    fn from(arg: LibVerArg) -> Self {
        match arg {
            LibVerArg::Earliest => LibVer::Earliest,
            LibVerArg::Latest => LibVer::Latest,
        }
    }
}

/// Everything unique to one library release
struct ReleaseDetails {
    base_url: &'static str,
    files: &'static [&'static str],
    compressed_size: &'static str,
    uncompressed_size: &'static str,
}

/// Per-release download details, extendable when new releases appear
const RELEASE_DETAILS: [(&str, ReleaseDetails); 1] = [(
    "3.1",
    ReleaseDetails {
        base_url: "https://www.oecd-nea.org/dbforms/data/eva/evatapes/cendl_31/",
        files: &["CENDL-31.zip"],
        compressed_size: "0.03 GB",
        uncompressed_size: "0.4 GB",
    },
)];

/// Two files of the 3.1 release carry non-ASCII bytes on one header line
/// each; the replacement lines restore the published text
const KNOWN_FIXES: [(&str, usize, &str); 2] = [
    (
        "22-Ti-047.C31",
        205,
        " 8) YUAN Junqian,WANG Yongchang,etc.               ,16,(1),57,92012228 1451  205",
    ),
    (
        "5-B-010.C31",
        203,
        "21)   Day R.B. and Walt M.  Phys.rev.117,1330 (1960)               525 1451  203",
    ),
];

fn main() -> Result<()> {
    stderrlog::new().verbosity(2).init()?;
    let args = Args::parse();

    let details = RELEASE_DETAILS
        .iter()
        .find(|(release, _)| *release == args.release)
        .map(|(_, details)| details)
        .with_context(|| format!("unsupported release {}", args.release))?;

    let endf_files_dir = PathBuf::from(format!("cendl-{}-endf", args.release));
    let destination = args
        .destination
        .unwrap_or_else(|| PathBuf::from(format!("cendl-{}-hdf5", args.release)));

    // Both steps default on; the --download/--extract flags exist to be
    // explicit in scripts that also pass the negated forms
    let do_download = args.download || !args.no_download;
    let do_extract = args.extract || !args.no_extract;

    if do_download {
        info!(
            "This will download {} of data; extracting and processing requires {} \
             of additional free disk space",
            details.compressed_size, details.uncompressed_size
        );
        for file in details.files {
            let url = format!("{}{}", details.base_url, file);
            download(&url).with_context(|| format!("downloading {url}"))?;
        }
    }

    if do_extract {
        for file in details.files {
            extract_zip(file, &endf_files_dir)
                .with_context(|| format!("extracting {file}"))?;
        }
    }

    let pattern = endf_files_dir.join("*.C31");
    let mut neutron_files = glob(pattern.to_str().context("non UTF-8 library path")?)?
        .collect::<Result<Vec<PathBuf>, _>>()
        .context("globbing evaluation files")?;
    neutron_files.sort();

    fs::create_dir_all(&destination)
        .with_context(|| format!("creating {}", destination.display()))?;

    let mut library = DataLibrary::new();
    for path in neutron_files {
        repair_known_corruption(&path)?;

        info!("Converting: {}", path.display());
        let data = IncidentNeutron::from_endf(&path)
            .with_context(|| format!("converting {}", path.display()))?;

        let h5_file = destination.join(format!("{}.h5", data.name));
        info!("Writing {}...", h5_file.display());
        data.export_to_hdf5(&h5_file, args.libver.into())
            .with_context(|| format!("writing {}", h5_file.display()))?;

        library.register_file(&h5_file)?;
    }

    let manifest = destination.join("cross_sections.xml");
    library
        .export_to_xml(&manifest)
        .with_context(|| format!("writing {}", manifest.display()))?;
    Ok(())
}

/// Apply the hard-coded line repair to the two known-corrupt files
///
/// Matches a lossy decode followed by a CRLF split: non-ASCII bytes are
/// dropped and the line structure is preserved.
fn repair_known_corruption(path: &Path) -> Result<()> {
    let Some(&(_, line_number, replacement)) = KNOWN_FIXES
        .iter()
        .find(|(name, _, _)| path.file_name() == Some(OsStr::new(name)))
    else {
        return Ok(());
    };

    info!("Manual fix for incorrect value in ENDF file");
    let bytes = fs::read(path)?;
    let text: String = bytes
        .iter()
        .filter(|byte| byte.is_ascii())
        .map(|&byte| byte as char)
        .collect();

    let mut lines: Vec<&str> = text.split("\r\n").collect();
    if let Some(line) = lines.get_mut(line_number) {
        *line = replacement;
    }
    fs::write(path, lines.join("\r\n"))?;
    Ok(())
}
