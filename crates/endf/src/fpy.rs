//! Fission product yields from MF8/MT454 and MT459

// standard library
use std::collections::BTreeMap;
use std::path::Path;

// internal modules
use crate::decay::Uncertain;
use crate::error::{Error, Result};
use crate::evaluation::Evaluation;
use crate::nuclide::NuclideId;
use crate::records::Records;

/// Product-name to yield-fraction table at one incident energy
pub type YieldTable = BTreeMap<String, Uncertain>;

/// Fission product yields for one fissionable nuclide
///
/// The independent yields (MT454) and cumulative yields (MT459) are both
/// tabulated over the same set of incident neutron energies. Consumers zip
/// [energies](Self::energies) with the two table lists.
///
/// ```rust, no_run
/// # use ndgen_endf::FissionProductYields;
/// let fpy = FissionProductYields::from_file("nfy/nfy-092_U_235.endf").unwrap();
/// for (energy, table) in fpy.energies.iter().zip(&fpy.independent) {
///     println!("{} products at {energy} eV", table.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FissionProductYields {
    /// Identity of the fissioning nuclide
    pub nuclide: NuclideId,
    /// Incident neutron energies (eV)
    pub energies: Vec<f64>,
    /// Independent yield tables, one per energy
    pub independent: Vec<YieldTable>,
    /// Cumulative yield tables, one per energy
    pub cumulative: Vec<YieldTable>,
}

impl FissionProductYields {
    /// Read both yield sections from a fission yield sublibrary file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let evaluation = Evaluation::from_file(path)?;

        let (energies, independent) = read_yield_section(&evaluation, 454)?;
        let (_, cumulative) = read_yield_section(&evaluation, 459)?;

        Ok(Self {
            nuclide: evaluation.nuclide,
            energies,
            independent,
            cumulative,
        })
    }

    /// GNDS-style name of the fissioning nuclide
    pub fn name(&self) -> String {
        self.nuclide.name()
    }
}

/// Decode one of the two yield sections into per-energy tables
fn read_yield_section(
    evaluation: &Evaluation,
    mt: u32,
) -> Result<(Vec<f64>, Vec<YieldTable>)> {
    let section = evaluation
        .section(8, mt)
        .ok_or(Error::MissingSection { mf: 8, mt })?;

    let mut records = Records::new(section);
    let head = records.head()?;
    let energy_count = head.l1 as usize;

    let mut energies = Vec::with_capacity(energy_count);
    let mut tables = Vec::with_capacity(energy_count);
    for _ in 0..energy_count {
        let (header, values) = records.list()?;
        energies.push(header.c1);

        // Entries are (ZAFP, FPS, YI, DYI) quadruplets
        let mut table = YieldTable::new();
        for entry in values.chunks_exact(4) {
            let product = NuclideId::from_za(entry[0] as u32, entry[1] as u32);
            table.insert(product.name(), Uncertain::new(entry[2], entry[3]));
        }
        tables.push(table);
    }

    Ok((energies, tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tape_line;
    use std::io::Write;

    // A fission yield file for a fake U235 with one incident energy and
    // two products in each table
    fn fpy_tape() -> String {
        let mut lines = vec!["Fake fission yield tape".to_string()];
        let mut push = |fields: [&str; 6], mf: u32, mt: u32| {
            lines.push(tape_line(fields, 9228, mf, mt));
        };

        push(["9.223500+4", "2.330248+2", "1", "1", "0", "6"], 1, 451);
        push(["0.000000+0", "1.000000+0", "0", "0", "0", "6"], 1, 451);
        push(["1.000000+0", "0.000000+0", "0", "0", "1", "8"], 1, 451);
        push(["0.000000+0", "0.000000+0", "0", "0", "0", "2"], 1, 451);
        push(["", "", "8", "454", "3", "0"], 1, 451);
        push(["", "", "8", "459", "3", "0"], 1, 451);
        push(["0.0", "0.0", "0", "0", "0", "0"], 1, 0);
        push(["0.0", "0.0", "0", "0", "0", "0"], 0, 0);

        // independent yields at thermal: Xe135 and Sr90
        push(["9.223500+4", "2.330248+2", "1", "0", "0", "0"], 8, 454);
        push(["2.530000-2", "0.000000+0", "2", "0", "8", "2"], 8, 454);
        push(["5.413500+4", "0.000000+0", "6.540000-2", "1.000000-3", "3.809000+4", "0.000000+0"], 8, 454);
        push(["4.500000-2", "2.000000-3", "", "", "", ""], 8, 454);
        push(["0.0", "0.0", "0", "0", "0", "0"], 8, 0);

        // cumulative yields at thermal for the same products
        push(["9.223500+4", "2.330248+2", "1", "0", "0", "0"], 8, 459);
        push(["2.530000-2", "0.000000+0", "2", "0", "8", "2"], 8, 459);
        push(["5.413500+4", "0.000000+0", "6.610000-2", "1.000000-3", "3.809000+4", "0.000000+0"], 8, 459);
        push(["5.800000-2", "2.000000-3", "", "", "", ""], 8, 459);
        push(["0.0", "0.0", "0", "0", "0", "0"], 8, 0);
        push(["0.0", "0.0", "0", "0", "0", "0"], 0, 0);

        lines.join("\n")
    }

    #[test]
    fn reads_both_yield_sections() {
        let path = std::env::temp_dir().join("ndgen-endf-fpy-test.endf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(fpy_tape().as_bytes()).unwrap();

        let fpy = FissionProductYields::from_file(&path).unwrap();
        assert_eq!(fpy.name(), "U235");
        assert_eq!(fpy.energies, vec![2.53e-2]);

        let independent = &fpy.independent[0];
        assert_eq!(independent["Xe135"].nominal, 6.54e-2);
        assert_eq!(independent["Sr90"].nominal, 4.5e-2);

        let cumulative = &fpy.cumulative[0];
        assert_eq!(cumulative["Xe135"].nominal, 6.61e-2);
        assert_eq!(cumulative["Sr90"].nominal, 5.8e-2);
    }
}
