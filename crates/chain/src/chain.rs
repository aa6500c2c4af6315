//! The assembled depletion chain and its XML form

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// internal modules
use crate::error::Result;
use crate::nuclide::ChainNuclide;

// external crates
use ndgen_utils::{f, ValueExt};

/// An assembled depletion chain
///
/// Nuclides are kept in assembly order (ascending Z, A, M) together with
/// the distinct reaction names observed across all of them, which the
/// chain file lists once up front.
#[derive(Debug, Default)]
pub struct Chain {
    /// Chain nuclides in canonical order
    pub nuclides: Vec<ChainNuclide>,
    /// Distinct reaction names in first-seen order
    pub reactions: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl Chain {
    /// Start an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a nuclide, keeping the name index current
    pub fn push(&mut self, nuclide: ChainNuclide) {
        self.index.insert(nuclide.name.clone(), self.nuclides.len());
        self.nuclides.push(nuclide);
    }

    /// Look up a nuclide by name
    pub fn nuclide(&self, name: &str) -> Option<&ChainNuclide> {
        self.index.get(name).map(|&idx| &self.nuclides[idx])
    }

    /// Record a reaction name the first time it is seen
    pub fn add_reaction_name(&mut self, name: &str) {
        if !self.reactions.iter().any(|known| known == name) {
            self.reactions.push(name.to_string());
        }
    }

    /// Write the chain to an XML file
    pub fn export_to_xml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_xml(&mut writer)
    }

    /// Serialise the chain document to any writer
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "<depletion_chain>")?;
        for nuclide in &self.nuclides {
            write_nuclide(writer, nuclide)?;
        }
        writeln!(writer, "</depletion_chain>")?;
        Ok(())
    }
}

/// Serialise one nuclide element with its children
fn write_nuclide<W: Write>(writer: &mut W, nuclide: &ChainNuclide) -> Result<()> {
    let mut attributes = f!(" name=\"{}\"", nuclide.name);
    if let Some(half_life) = nuclide.half_life {
        attributes.push_str(&f!(" half_life=\"{}\"", sci(half_life)));
    }
    if !nuclide.decay_modes.is_empty() {
        attributes.push_str(&f!(" decay_modes=\"{}\"", nuclide.decay_modes.len()));
    }
    if let Some(decay_energy) = nuclide.decay_energy {
        attributes.push_str(&f!(" decay_energy=\"{}\"", sci(decay_energy)));
    }
    if !nuclide.reactions.is_empty() {
        attributes.push_str(&f!(" reactions=\"{}\"", nuclide.reactions.len()));
    }

    let childless = nuclide.decay_modes.is_empty()
        && nuclide.reactions.is_empty()
        && nuclide.yields.is_none();
    if childless {
        writeln!(writer, "  <nuclide{attributes}/>")?;
        return Ok(());
    }
    writeln!(writer, "  <nuclide{attributes}>")?;

    for mode in &nuclide.decay_modes {
        writeln!(
            writer,
            "    <decay type=\"{}\" target=\"{}\" branching_ratio=\"{}\"/>",
            mode.kind,
            mode.target,
            sci(mode.branching_ratio),
        )?;
    }

    for reaction in &nuclide.reactions {
        match &reaction.target {
            Some(target) => writeln!(
                writer,
                "    <reaction type=\"{}\" Q=\"{}\" target=\"{}\"/>",
                reaction.name,
                sci(reaction.q_value),
                target,
            )?,
            None => writeln!(
                writer,
                "    <reaction type=\"{}\" Q=\"{}\"/>",
                reaction.name,
                sci(reaction.q_value),
            )?,
        }
    }

    if let Some(yields) = &nuclide.yields {
        writeln!(writer, "    <neutron_fission_yields>")?;
        let energies = yields
            .energies()
            .iter()
            .map(|energy| sci(*energy))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "      <energies>{energies}</energies>")?;

        for entry in &yields.entries {
            writeln!(
                writer,
                "      <fission_yields energy=\"{}\">",
                sci(entry.energy)
            )?;
            let products = entry.products.keys().cloned().collect::<Vec<_>>();
            let data = entry
                .products
                .values()
                .map(|value| sci(*value))
                .collect::<Vec<_>>();
            writeln!(writer, "        <products>{}</products>", products.join(" "))?;
            writeln!(writer, "        <data>{}</data>", data.join(" "))?;
            writeln!(writer, "      </fission_yields>")?;
        }
        writeln!(writer, "    </neutron_fission_yields>")?;
    }

    writeln!(writer, "  </nuclide>")?;
    Ok(())
}

/// Consistent scientific formatting for chain file values
fn sci(value: f64) -> String {
    value.sci(6, 2)
}
