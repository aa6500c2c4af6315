//! Assembly of a depletion chain from evaluated records

// standard library
use std::collections::BTreeMap;

// internal modules
use crate::chain::Chain;
use crate::nuclide::{
    ChainNuclide, DecayMode, FissionYieldDistribution, ReactionChannel, YieldEntry,
};
use crate::policy::{ChainPolicy, YieldBasis, YieldSource};
use crate::reactions::{FISSION_MTS, TRANSMUTATION_REACTIONS};

// ndgen modules
use ndgen_endf::{Decay, FissionProductYields, NuclideId, YieldTable};

// external crates
use itertools::Itertools;
use log::warn;

/// Reaction Q values keyed by MT number, per nuclide name
pub type QValueTable = BTreeMap<u32, f64>;

/// A decay mode dropped because its daughter has no decay data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDaughter {
    pub parent: String,
    pub daughter: String,
    pub mode: String,
}

/// A reaction product replaced by the no-product sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProduct {
    pub parent: String,
    pub reaction: String,
    pub daughter: String,
}

/// A referenced fission yield table entry that was absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingYield {
    pub parent: String,
    pub product: String,
    pub table: String,
}

/// Everything the assembly recovered from rather than failed on
///
/// No anomaly aborts a build. Each one is recorded here and the run
/// finishes with best-effort data, with the affected edge omitted.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Decay modes dropped for lack of daughter decay data
    pub missing_daughter: Vec<MissingDaughter>,
    /// Reaction products outside the chain, recorded as sinks
    pub missing_product: Vec<MissingProduct>,
    /// Fissionable nuclides with no fission product yield data
    pub missing_fpy: Vec<String>,
    /// Yield table entries referenced by the policy but not tabulated
    pub missing_yield: Vec<MissingYield>,
}

impl BuildReport {
    /// Print every recovered anomaly as grouped warnings
    pub fn log_warnings(&self) {
        if !self.missing_daughter.is_empty() {
            warn!("The following decay modes have daughters with no decay data:");
            for entry in &self.missing_daughter {
                warn!("  {} -> {} ({})", entry.parent, entry.daughter, entry.mode);
            }
        }

        if !self.missing_product.is_empty() {
            warn!("The following reaction products have no decay data:");
            for entry in &self.missing_product {
                warn!("  {} {} -> {}", entry.parent, entry.reaction, entry.daughter);
            }
        }

        if !self.missing_fpy.is_empty() {
            warn!("The following fissionable nuclides have no fission product yields:");
            for parent in &self.missing_fpy {
                warn!("  {parent}");
            }
        }

        for entry in &self.missing_yield {
            warn!(
                "No {} fission yields found for {} in {}",
                entry.table, entry.product, entry.parent
            );
        }
    }
}

/// Builds a [Chain] from evaluated records restricted to the policy
/// allow-list
///
/// The inputs are the three per-nuclide record sets the sublibraries
/// provide: decay data, reaction Q value tables and fission product
/// yields. Assembly walks the decay set in canonical (Z, A, M) order and
/// applies the policy rules nuclide by nuclide.
///
/// ```rust, no_run
/// # use std::collections::BTreeMap;
/// # use ndgen_chain::{ChainBuilder, CASL_CHAIN};
/// # let decay = BTreeMap::new();
/// # let q_values = BTreeMap::new();
/// # let yields = BTreeMap::new();
/// let builder = ChainBuilder::new(&decay, &q_values, &yields, &CASL_CHAIN);
/// let (chain, report) = builder.build();
/// report.log_warnings();
/// chain.export_to_xml("chain_casl.xml").unwrap();
/// ```
#[derive(Debug)]
pub struct ChainBuilder<'a> {
    decay: &'a BTreeMap<String, Decay>,
    q_values: &'a BTreeMap<String, QValueTable>,
    yields: &'a BTreeMap<String, FissionProductYields>,
    policy: &'a ChainPolicy,
}

impl<'a> ChainBuilder<'a> {
    /// Gather the record sets for one assembly pass
    pub fn new(
        decay: &'a BTreeMap<String, Decay>,
        q_values: &'a BTreeMap<String, QValueTable>,
        yields: &'a BTreeMap<String, FissionProductYields>,
        policy: &'a ChainPolicy,
    ) -> Self {
        Self {
            decay,
            q_values,
            yields,
            policy,
        }
    }

    /// Assemble the chain and the report of recovered anomalies
    pub fn build(&self) -> (Chain, BuildReport) {
        let mut chain = Chain::new();
        let mut report = BuildReport::default();

        let parents = self
            .decay
            .iter()
            .sorted_by_key(|(_, data)| data.nuclide.zam());

        for (parent, data) in parents {
            let mut nuclide = ChainNuclide::new(parent);

            self.populate_decay(parent, data, &mut nuclide, &mut report);
            self.populate_reactions(parent, data, &mut nuclide, &mut chain, &mut report);
            self.populate_yields(parent, &mut nuclide, &mut report);

            chain.push(nuclide);
        }

        (chain, report)
    }

    /// Half-life, decay energy and decay branches for one nuclide
    fn populate_decay(
        &self,
        parent: &str,
        data: &Decay,
        nuclide: &mut ChainNuclide,
        report: &mut BuildReport,
    ) {
        let excluded = self
            .policy
            .get(parent)
            .is_some_and(|policy| policy.exclude_decay);
        if excluded || data.stable || data.half_life.nominal == 0.0 {
            return;
        }

        nuclide.half_life = Some(data.half_life.nominal);
        nuclide.decay_energy = Some(data.decay_energy());

        for mode in &data.modes {
            let daughter = mode.daughter.name();
            if self.decay.contains_key(&daughter) {
                nuclide.decay_modes.push(DecayMode {
                    kind: mode.type_label(),
                    target: daughter,
                    branching_ratio: mode.branching_ratio.nominal,
                });
            } else {
                report.missing_daughter.push(MissingDaughter {
                    parent: parent.to_string(),
                    daughter,
                    mode: mode.type_label(),
                });
            }
        }

        // Ensure the branching ratios sum to unity by adjusting the last
        // recorded mode. When the evaluated sum is well off, this can
        // leave the last branch negative; the exemption list keeps the
        // evaluated values for nuclides where that is known to happen.
        let sum = nuclide.branching_sum();
        if sum != 1.0 && !nuclide.decay_modes.is_empty() && !self.policy.keep_branching(parent)
        {
            if let Some(mut last) = nuclide.decay_modes.pop() {
                last.branching_ratio = 1.0 - nuclide.branching_sum();
                nuclide.decay_modes.push(last);
            }
        }
    }

    /// Transmutation channels for one nuclide with incident neutron data
    fn populate_reactions(
        &self,
        parent: &str,
        data: &Decay,
        nuclide: &mut ChainNuclide,
        chain: &mut Chain,
        report: &mut BuildReport,
    ) {
        let Some(q_values) = self.q_values.get(parent) else {
            return;
        };

        for reaction in TRANSMUTATION_REACTIONS.iter() {
            if !reaction.mts.iter().any(|mt| q_values.contains_key(mt)) {
                continue;
            }

            let daughter = NuclideId {
                atomic_number: (data.nuclide.atomic_number as i32 + reaction.delta_z)
                    .max(0) as u32,
                mass_number: (data.nuclide.mass_number as i32 + reaction.delta_a).max(0)
                    as u32,
                state: 0,
            }
            .name();

            chain.add_reaction_name(reaction.name);

            let target = if self.decay.contains_key(&daughter) {
                Some(daughter)
            } else {
                report.missing_product.push(MissingProduct {
                    parent: parent.to_string(),
                    reaction: reaction.name.to_string(),
                    daughter,
                });
                None
            };

            // Ascending MT order, so summation sections are preferred
            // over their partials
            let q_value = reaction
                .mts
                .iter()
                .find_map(|mt| q_values.get(mt))
                .copied()
                .unwrap_or(0.0);

            nuclide.reactions.push(ReactionChannel {
                name: reaction.name.to_string(),
                target,
                q_value,
                branching_ratio: 1.0,
            });
        }

        if FISSION_MTS.iter().any(|mt| q_values.contains_key(mt)) {
            if self.yields.contains_key(parent) {
                nuclide.reactions.push(ReactionChannel {
                    name: "fission".to_string(),
                    target: None,
                    q_value: q_values.get(&18).copied().unwrap_or(0.0),
                    branching_ratio: 1.0,
                });
                chain.add_reaction_name("fission");
            } else {
                report.missing_fpy.push(parent.to_string());
            }
        }
    }

    /// Energy-resolved yield distribution for one fissionable nuclide
    fn populate_yields(
        &self,
        parent: &str,
        nuclide: &mut ChainNuclide,
        report: &mut BuildReport,
    ) {
        let Some(fpy) = self.yields.get(parent) else {
            return;
        };

        // Spontaneous yield evaluations tabulate a single unlabelled point
        let energies = if fpy.energies.is_empty() {
            vec![0.0]
        } else {
            fpy.energies.clone()
        };

        let empty = YieldTable::new();
        let mut entries = Vec::with_capacity(energies.len());
        for (index, energy) in energies.iter().enumerate() {
            let independent = fpy.independent.get(index).unwrap_or(&empty);
            let cumulative = fpy.cumulative.get(index).unwrap_or(&empty);

            let mut products: BTreeMap<String, f64> = BTreeMap::new();
            for product in independent.keys() {
                if !self.decay.contains_key(product) {
                    continue;
                }

                let treatment = self
                    .policy
                    .get(product)
                    .map(|policy| (policy.fpy, policy.combine.as_slice()))
                    .unwrap_or((YieldSource::Independent, &[]));

                match treatment {
                    (YieldSource::Independent, _) => {
                        if let Some(value) = independent.get(product) {
                            *products.entry(product.clone()).or_insert(0.0) +=
                                value.nominal;
                        }
                    }
                    (YieldSource::Cumulative, _) => match cumulative.get(product) {
                        Some(value) => {
                            *products.entry(product.clone()).or_insert(0.0) +=
                                value.nominal;
                        }
                        None => report.missing_yield.push(MissingYield {
                            parent: parent.to_string(),
                            product: product.clone(),
                            table: "cumulative".to_string(),
                        }),
                    },
                    (YieldSource::Combine, components) => {
                        for component in components {
                            let table = match component.yields {
                                YieldBasis::Independent => independent,
                                YieldBasis::Cumulative => cumulative,
                            };
                            match table.get(&component.product) {
                                Some(value) => {
                                    *products.entry(product.clone()).or_insert(0.0) +=
                                        component.weight * value.nominal;
                                }
                                None => report.missing_yield.push(MissingYield {
                                    parent: parent.to_string(),
                                    product: component.product.clone(),
                                    table: component.yields.label().to_string(),
                                }),
                            }
                        }
                    }
                }
            }

            entries.push(YieldEntry {
                energy: *energy,
                products,
            });
        }

        nuclide.yields = Some(FissionYieldDistribution { entries });
    }
}
