//! Generate the reduced depletion chain from the ENDF/B-VII.1 sublibraries
//!
//! Takes no arguments. Input data are resolved in order of preference:
//! local `decay/`, `nfy/` and `neutrons/` directories, a directory named
//! by the `NDGEN_ENDF_DATA` environment variable, or a fresh download of
//! the three sublibrary archives from the NNDC. The assembled chain is
//! written to `chain_casl.xml` in the current directory.

// standard library
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

// ndgen modules
use ndgen_chain::{ChainBuilder, QValueTable, CASL_CHAIN};
use ndgen_endf::{Decay, Evaluation, FissionProductYields};
use ndgen_fetch::{download, extract_zip};

// external crates
use anyhow::{Context, Result};
use glob::glob;
use log::{info, warn};

const URLS: [&str; 3] = [
    "https://www.nndc.bnl.gov/endf/b7.1/zips/ENDF-B-VII.1-neutrons.zip",
    "https://www.nndc.bnl.gov/endf/b7.1/zips/ENDF-B-VII.1-decay.zip",
    "https://www.nndc.bnl.gov/endf/b7.1/zips/ENDF-B-VII.1-nfy.zip",
];

/// Environment variable naming a local sublibrary directory
const ENDF_DATA_VAR: &str = "NDGEN_ENDF_DATA";

/// Output file name, fixed by convention
const CHAIN_FILE: &str = "chain_casl.xml";

fn main() -> Result<()> {
    stderrlog::new().verbosity(2).init()?;

    let endf_dir = resolve_data_dir()?;
    info!(
        "Reading ENDF nuclear data from \"{}\"...",
        endf_dir.display()
    );

    info!("Processing neutron sub-library files...");
    let mut q_values: BTreeMap<String, QValueTable> = BTreeMap::new();
    for path in sublibrary_files(&endf_dir, "neutrons")? {
        let evaluation = Evaluation::from_file(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = evaluation.gnd_name();
        if CASL_CHAIN.contains(&name) {
            let table = evaluation
                .reaction_q_values()
                .with_context(|| format!("reading Q values from {}", path.display()))?;
            q_values.insert(name, table);
        }
    }

    info!("Processing decay sub-library files...");
    let mut decay_data: BTreeMap<String, Decay> = BTreeMap::new();
    for path in sublibrary_files(&endf_dir, "decay")? {
        let decay =
            Decay::from_file(&path).with_context(|| format!("reading {}", path.display()))?;
        let name = decay.name();
        if CASL_CHAIN.contains(&name) {
            decay_data.insert(name, decay);
        }
    }
    for name in CASL_CHAIN.names() {
        if !decay_data.contains_key(name) {
            warn!("{name} has no decay data!");
        }
    }

    info!("Processing fission product yield sub-library files...");
    let mut fpy_data: BTreeMap<String, FissionProductYields> = BTreeMap::new();
    for path in sublibrary_files(&endf_dir, "nfy")? {
        let fpy = FissionProductYields::from_file(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = fpy.name();
        if CASL_CHAIN.contains(&name) {
            fpy_data.insert(name, fpy);
        }
    }

    info!("Creating depletion chain...");
    let builder = ChainBuilder::new(&decay_data, &q_values, &fpy_data, &CASL_CHAIN);
    let (chain, report) = builder.build();
    report.log_warnings();

    chain
        .export_to_xml(CHAIN_FILE)
        .with_context(|| format!("writing {CHAIN_FILE}"))?;
    info!(
        "Wrote {CHAIN_FILE} with {} nuclides",
        chain.nuclides.len()
    );
    Ok(())
}

/// Resolve the sublibrary directory, downloading the archives as a last
/// resort
fn resolve_data_dir() -> Result<PathBuf> {
    let local = ["decay", "nfy", "neutrons"];
    if local.iter().all(|name| Path::new(name).is_dir()) {
        return Ok(PathBuf::from("."));
    }

    if let Ok(dir) = env::var(ENDF_DATA_VAR) {
        return Ok(PathBuf::from(dir));
    }

    for url in URLS {
        let archive = download(url).with_context(|| format!("downloading {url}"))?;
        extract_zip(&archive, ".")
            .with_context(|| format!("extracting {}", archive.display()))?;
    }
    Ok(PathBuf::from("."))
}

/// Evaluation files of one sublibrary, in a stable order
fn sublibrary_files(endf_dir: &Path, sublibrary: &str) -> Result<Vec<PathBuf>> {
    let pattern = endf_dir.join(sublibrary).join("*.endf");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("non UTF-8 path to the {sublibrary} sublibrary"))?;

    let mut paths = glob(pattern)?
        .collect::<Result<Vec<PathBuf>, _>>()
        .context("globbing sublibrary files")?;
    paths.sort();
    Ok(paths)
}
