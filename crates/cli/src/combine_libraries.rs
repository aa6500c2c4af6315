//! Combine nuclide files from multiple processed libraries into a single
//! library
//!
//! Libraries are given in order of preference: the first contributes every
//! file, later ones contribute only nuclides not already covered (same
//! data type and material list).

// standard library
use std::fs;
use std::path::PathBuf;

// ndgen modules
use ndgen_library::{DataLibrary, LibraryEntry};

// external crates
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(
    about = "Combine nuclide files from multiple processed HDF5 libraries into \
             a single library"
)]
struct Args {
    /// Directory to create the new library in
    #[arg(short, long)]
    destination: PathBuf,

    /// List of data libraries to combine, in order of preference
    #[arg(short, long, required = true, num_args = 1..)]
    libraries: Vec<PathBuf>,

    /// Don't copy library files, just create a cross_sections.xml file
    #[arg(short = 'n', long)]
    no_copy: bool,
}

fn main() -> Result<()> {
    stderrlog::new().verbosity(2).init()?;
    let args = Args::parse();

    if args.destination.exists() {
        if !args.destination.is_dir() {
            bail!(
                "destination {} should be a directory",
                args.destination.display()
            );
        }
        if args.destination.read_dir()?.next().is_some() {
            bail!("destination {} is not empty", args.destination.display());
        }
    }

    let mut read_libraries = Vec::with_capacity(args.libraries.len());
    for lib_dir in &args.libraries {
        let manifest = lib_dir.join("cross_sections.xml");
        if !manifest.exists() {
            bail!(
                "unable to find cross_sections.xml file in {}",
                lib_dir.display()
            );
        }
        read_libraries.push(
            DataLibrary::from_xml(&manifest)
                .with_context(|| format!("reading {}", manifest.display()))?,
        );
    }

    info!(
        "Creating library in {} from the following libraries in order of preference:",
        args.destination.display()
    );
    for (position, lib_dir) in args.libraries.iter().enumerate() {
        info!("{}) {}", position + 1, lib_dir.display());
    }
    if args.no_copy {
        info!("Original library files will not be copied into the destination folder");
    }

    fs::create_dir_all(&args.destination)
        .with_context(|| format!("creating {}", args.destination.display()))?;

    let mut combined = DataLibrary::new();

    // The first library contributes everything
    let (first, rest) = read_libraries
        .split_first()
        .context("at least one library is required")?;
    for entry in &first.libraries {
        add_entry(&mut combined, entry, &args, false)?;
        info!("Adding {} from {}", entry.path.display(), args.libraries[0].display());
    }

    // Later libraries contribute only what is not already covered
    for (library, lib_dir) in rest.iter().zip(&args.libraries[1..]) {
        for entry in &library.libraries {
            if combined.contains_equivalent(entry) {
                continue;
            }
            add_entry(&mut combined, entry, &args, true)?;
            info!("Adding {} from {}", entry.path.display(), lib_dir.display());
        }
    }

    let manifest = args.destination.join("cross_sections.xml");
    combined
        .export_to_xml(&manifest)
        .with_context(|| format!("writing {}", manifest.display()))?;
    Ok(())
}

/// Copy one source file into the destination (unless suppressed) and
/// register it with the combined manifest
fn add_entry(
    combined: &mut DataLibrary,
    entry: &LibraryEntry,
    args: &Args,
    check_collisions: bool,
) -> Result<()> {
    let mut destination_file = entry.path.clone();

    if !args.no_copy {
        let name = entry
            .path
            .file_name()
            .with_context(|| format!("library path {} has no file name", entry.path.display()))?;
        destination_file = args.destination.join(name);

        if check_collisions && destination_file.exists() {
            bail!(
                "library file {} already exists in the combined library",
                destination_file.display()
            );
        }
        fs::copy(&entry.path, &destination_file)
            .with_context(|| format!("copying {}", entry.path.display()))?;
    }

    combined.register_entry(LibraryEntry {
        materials: entry.materials.clone(),
        path: destination_file,
        kind: entry.kind.clone(),
    });
    Ok(())
}
