//! Integration tests for the chain assembly rules

use std::collections::BTreeMap;

use ndgen_chain::{ChainBuilder, ChainPolicy, NuclidePolicy, QValueTable, YieldBasis,
    YieldComponent, YieldSource};
use ndgen_endf::{Decay, DecayKind, DecayModeRecord, FissionProductYields, NuclideId,
    Uncertain, YieldTable};
use rstest::rstest;

fn id(z: u32, a: u32, m: u32) -> NuclideId {
    NuclideId {
        atomic_number: z,
        mass_number: a,
        state: m,
    }
}

fn unstable(
    nuclide: NuclideId,
    half_life: f64,
    modes: Vec<(Vec<DecayKind>, NuclideId, f64)>,
) -> Decay {
    Decay {
        nuclide,
        stable: false,
        half_life: Uncertain::new(half_life, 0.0),
        average_energies: vec![Uncertain::new(2.0e5, 1.0e3), Uncertain::new(1.0e5, 1.0e3)],
        modes: modes
            .into_iter()
            .map(|(kinds, daughter, ratio)| DecayModeRecord {
                kinds,
                daughter,
                branching_ratio: Uncertain::new(ratio, 0.0),
                q_value: Uncertain::new(1.0e6, 0.0),
            })
            .collect(),
    }
}

fn stable(nuclide: NuclideId) -> Decay {
    Decay {
        nuclide,
        stable: true,
        half_life: Uncertain::default(),
        average_energies: Vec::new(),
        modes: Vec::new(),
    }
}

fn policy_for(names: &[&str]) -> ChainPolicy {
    ChainPolicy {
        unmodified_decay_br: Default::default(),
        nuclides: names
            .iter()
            .map(|name| (name.to_string(), NuclidePolicy::default()))
            .collect(),
    }
}

fn yield_table(entries: &[(&str, f64)]) -> YieldTable {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), Uncertain::new(*value, 0.0)))
        .collect()
}

/// I135 with a beta- branch to Xe135 and a beta-,n branch to Xe134
fn iodine_set(second_ratio: f64) -> BTreeMap<String, Decay> {
    let i135 = id(53, 135, 0);
    let mut decay = BTreeMap::new();
    decay.insert(
        "I135".to_string(),
        unstable(
            i135,
            23652.0,
            vec![
                (vec![DecayKind::BetaMinus], id(54, 135, 0), 0.6),
                (
                    vec![DecayKind::BetaMinus, DecayKind::Neutron],
                    id(54, 134, 0),
                    second_ratio,
                ),
            ],
        ),
    );
    decay.insert("Xe135".to_string(), stable(id(54, 135, 0)));
    decay.insert("Xe134".to_string(), stable(id(54, 134, 0)));
    decay
}

#[rstest]
#[case(0.39, 0.4)]
#[case(0.2, 0.4)]
#[case(0.5, 0.4)]
fn branching_ratios_renormalise_to_unity(#[case] second: f64, #[case] adjusted: f64) {
    let decay = iodine_set(second);
    let q_values = BTreeMap::new();
    let yields = BTreeMap::new();
    let policy = policy_for(&["I135", "Xe135", "Xe134"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let i135 = chain.nuclide("I135").unwrap();
    let ratios: Vec<f64> = i135
        .decay_modes
        .iter()
        .map(|mode| mode.branching_ratio)
        .collect();
    assert_eq!(ratios, vec![0.6, adjusted]);
    assert_eq!(i135.branching_sum(), 1.0);
    assert!(report.missing_daughter.is_empty());
}

#[rstest]
fn exempted_nuclides_keep_evaluated_ratios() {
    let decay = iodine_set(0.39);
    let q_values = BTreeMap::new();
    let yields = BTreeMap::new();
    let mut policy = policy_for(&["I135", "Xe135", "Xe134"]);
    policy.unmodified_decay_br.insert("I135".to_string());

    let (chain, _) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let i135 = chain.nuclide("I135").unwrap();
    let ratios: Vec<f64> = i135
        .decay_modes
        .iter()
        .map(|mode| mode.branching_ratio)
        .collect();
    assert_eq!(ratios, vec![0.6, 0.39]);
}

#[rstest]
fn dropped_daughters_warn_once_and_renormalise() {
    let mut decay = iodine_set(0.39);
    // Xe134 disappears from the decay set, so the beta-,n branch drops
    decay.remove("Xe134");
    let q_values = BTreeMap::new();
    let yields = BTreeMap::new();
    let policy = policy_for(&["I135", "Xe135"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let i135 = chain.nuclide("I135").unwrap();
    assert_eq!(i135.decay_modes.len(), 1);
    assert_eq!(i135.decay_modes[0].branching_ratio, 1.0);

    assert_eq!(report.missing_daughter.len(), 1);
    assert_eq!(report.missing_daughter[0].daughter, "Xe134");
    assert_eq!(report.missing_daughter[0].mode, "beta-,n");
}

#[rstest]
fn stable_nuclides_carry_no_decay_terms() {
    let mut decay = BTreeMap::new();
    decay.insert("Xe134".to_string(), stable(id(54, 134, 0)));
    let q_values = BTreeMap::new();
    let yields = BTreeMap::new();
    let policy = policy_for(&["Xe134"]);

    let (chain, _) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let xe134 = chain.nuclide("Xe134").unwrap();
    assert!(xe134.half_life.is_none());
    assert!(xe134.decay_energy.is_none());
    assert!(xe134.decay_modes.is_empty());
}

#[rstest]
fn policy_exclusion_skips_decay_but_not_reactions() {
    let mut decay = BTreeMap::new();
    decay.insert(
        "Cd113".to_string(),
        unstable(
            id(48, 113, 0),
            2.5e23,
            vec![(vec![DecayKind::BetaMinus], id(49, 113, 0), 1.0)],
        ),
    );
    decay.insert("Cd114".to_string(), stable(id(48, 114, 0)));

    let mut q_values = BTreeMap::new();
    q_values.insert(
        "Cd113".to_string(),
        QValueTable::from([(102u32, 9.043e6)]),
    );
    let yields = BTreeMap::new();

    let mut policy = policy_for(&["Cd113", "Cd114"]);
    policy.nuclides.get_mut("Cd113").unwrap().exclude_decay = true;

    let (chain, _) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let cd113 = chain.nuclide("Cd113").unwrap();
    assert!(cd113.half_life.is_none());
    assert!(cd113.decay_modes.is_empty());
    assert_eq!(cd113.reactions.len(), 1);
    assert_eq!(cd113.reactions[0].name, "(n,gamma)");
    assert_eq!(cd113.reactions[0].target.as_deref(), Some("Cd114"));
}

#[rstest]
fn no_reaction_data_means_no_channels() {
    let mut decay = BTreeMap::new();
    decay.insert("Xe134".to_string(), stable(id(54, 134, 0)));

    let mut q_values = BTreeMap::new();
    q_values.insert("Xe134".to_string(), QValueTable::new());
    let yields = BTreeMap::new();
    let policy = policy_for(&["Xe134"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let xe134 = chain.nuclide("Xe134").unwrap();
    assert!(xe134.reactions.is_empty());
    assert!(chain.reactions.is_empty());
    assert!(report.missing_fpy.is_empty());
}

#[rstest]
fn fission_channel_uses_the_mt18_q_value() {
    let mut decay = BTreeMap::new();
    decay.insert("U235".to_string(), stable(id(92, 235, 0)));
    decay.insert("U236".to_string(), stable(id(92, 236, 0)));
    decay.insert("Xe135".to_string(), stable(id(54, 135, 0)));

    let mut q_values = BTreeMap::new();
    q_values.insert(
        "U235".to_string(),
        QValueTable::from([(18u32, 1.934054e8), (102u32, 6.5452e6)]),
    );

    let mut yields = BTreeMap::new();
    yields.insert(
        "U235".to_string(),
        FissionProductYields {
            nuclide: id(92, 235, 0),
            energies: vec![0.0253],
            independent: vec![yield_table(&[("Xe135", 0.065)])],
            cumulative: vec![yield_table(&[("Xe135", 0.066)])],
        },
    );
    let policy = policy_for(&["U235", "U236", "Xe135"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let u235 = chain.nuclide("U235").unwrap();
    let fission: Vec<_> = u235
        .reactions
        .iter()
        .filter(|channel| channel.name == "fission")
        .collect();
    assert_eq!(fission.len(), 1);
    assert_eq!(fission[0].q_value, 1.934054e8);
    assert_eq!(fission[0].target, None);

    assert!(chain.reactions.contains(&"fission".to_string()));
    assert!(chain.reactions.contains(&"(n,gamma)".to_string()));
    assert!(report.missing_fpy.is_empty());

    let distribution = u235.yields.as_ref().unwrap();
    assert_eq!(distribution.energies(), vec![0.0253]);
    assert_eq!(distribution.entries[0].products["Xe135"], 0.065);
}

#[rstest]
fn fissionable_without_yields_is_reported() {
    let mut decay = BTreeMap::new();
    decay.insert("Cm246".to_string(), stable(id(96, 246, 0)));

    let mut q_values = BTreeMap::new();
    q_values.insert("Cm246".to_string(), QValueTable::from([(18u32, 1.9e8)]));
    let yields = BTreeMap::new();
    let policy = policy_for(&["Cm246"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let cm246 = chain.nuclide("Cm246").unwrap();
    assert!(cm246.reactions.iter().all(|channel| channel.name != "fission"));
    assert_eq!(report.missing_fpy, vec!["Cm246".to_string()]);
}

#[rstest]
fn absent_reaction_products_become_sinks() {
    let mut decay = BTreeMap::new();
    decay.insert("Gd160".to_string(), stable(id(64, 160, 0)));

    // (n,gamma) leads to Gd161, which has no decay data in the set
    let mut q_values = BTreeMap::new();
    q_values.insert(
        "Gd160".to_string(),
        QValueTable::from([(102u32, 5.6e6)]),
    );
    let yields = BTreeMap::new();
    let policy = policy_for(&["Gd160"]);

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let gd160 = chain.nuclide("Gd160").unwrap();
    assert_eq!(gd160.reactions.len(), 1);
    assert_eq!(gd160.reactions[0].target, None);
    assert_eq!(gd160.reactions[0].q_value, 5.6e6);

    assert_eq!(report.missing_product.len(), 1);
    assert_eq!(report.missing_product[0].daughter, "Gd161");
    assert_eq!(report.missing_product[0].reaction, "(n,gamma)");
}

#[rstest]
fn summation_sections_win_the_q_value() {
    let mut decay = BTreeMap::new();
    decay.insert("Ni59".to_string(), stable(id(28, 59, 0)));
    decay.insert("Co59".to_string(), stable(id(27, 59, 0)));

    // Both the summation MT=103 and a partial MT=600 are tabulated
    let mut q_values = BTreeMap::new();
    q_values.insert(
        "Ni59".to_string(),
        QValueTable::from([(600u32, 1.0e6), (103u32, 2.0e6)]),
    );
    let yields = BTreeMap::new();
    let policy = policy_for(&["Ni59", "Co59"]);

    let (chain, _) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let ni59 = chain.nuclide("Ni59").unwrap();
    assert_eq!(ni59.reactions.len(), 1);
    assert_eq!(ni59.reactions[0].name, "(n,p)");
    assert_eq!(ni59.reactions[0].q_value, 2.0e6);
    assert_eq!(ni59.reactions[0].target.as_deref(), Some("Co59"));
}

#[rstest]
fn yield_treatments_follow_the_policy() {
    let mut decay = BTreeMap::new();
    decay.insert("U235".to_string(), stable(id(92, 235, 0)));
    for (name, z, a, m) in [
        ("Xe135", 54, 135, 0),
        ("Cs137", 55, 137, 0),
        ("Pm148", 61, 148, 0),
        ("Pm148_m1", 61, 148, 1),
    ] {
        decay.insert(name.to_string(), stable(id(z, a, m)));
    }

    let q_values = BTreeMap::new();
    let mut yields = BTreeMap::new();
    yields.insert(
        "U235".to_string(),
        FissionProductYields {
            nuclide: id(92, 235, 0),
            energies: vec![0.0253],
            independent: vec![yield_table(&[
                ("Xe135", 0.065),
                ("Cs137", 0.060),
                ("Pm148", 0.010),
                ("Pm148_m1", 0.005),
            ])],
            cumulative: vec![yield_table(&[
                ("Xe135", 0.066),
                ("Cs137", 0.0615),
                ("Pm148", 0.011),
                ("Pm148_m1", 0.0055),
            ])],
        },
    );

    let mut policy = policy_for(&["U235", "Xe135", "Cs137", "Pm148", "Pm148_m1"]);
    policy.nuclides.get_mut("Cs137").unwrap().fpy = YieldSource::Cumulative;
    {
        let pm148 = policy.nuclides.get_mut("Pm148").unwrap();
        pm148.fpy = YieldSource::Combine;
        pm148.combine = vec![
            YieldComponent {
                product: "Pm148".to_string(),
                weight: 0.53,
                yields: YieldBasis::Independent,
            },
            YieldComponent {
                product: "Pm148_m1".to_string(),
                weight: 0.47,
                yields: YieldBasis::Independent,
            },
        ];
    }

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let products = &chain.nuclide("U235").unwrap().yields.as_ref().unwrap().entries[0]
        .products;
    assert_eq!(products["Xe135"], 0.065);
    assert_eq!(products["Cs137"], 0.0615);
    assert_eq!(products["Pm148"], 0.53 * 0.010 + 0.47 * 0.005);
    assert!(report.missing_yield.is_empty());
}

#[rstest]
fn absent_yield_entries_are_reported() {
    let mut decay = BTreeMap::new();
    decay.insert("U235".to_string(), stable(id(92, 235, 0)));
    decay.insert("Cs137".to_string(), stable(id(55, 137, 0)));

    let q_values = BTreeMap::new();
    let mut yields = BTreeMap::new();
    yields.insert(
        "U235".to_string(),
        FissionProductYields {
            nuclide: id(92, 235, 0),
            energies: vec![0.0253],
            independent: vec![yield_table(&[("Cs137", 0.060)])],
            // no cumulative entry for Cs137 at this energy
            cumulative: vec![yield_table(&[])],
        },
    );

    let mut policy = policy_for(&["U235", "Cs137"]);
    policy.nuclides.get_mut("Cs137").unwrap().fpy = YieldSource::Cumulative;

    let (chain, report) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let entry = &chain.nuclide("U235").unwrap().yields.as_ref().unwrap().entries[0];
    assert!(!entry.products.contains_key("Cs137"));

    assert_eq!(report.missing_yield.len(), 1);
    assert_eq!(report.missing_yield[0].product, "Cs137");
    assert_eq!(report.missing_yield[0].table, "cumulative");
}

#[rstest]
fn assembly_iterates_in_zam_order() {
    let mut decay = BTreeMap::new();
    decay.insert("U238".to_string(), stable(id(92, 238, 0)));
    decay.insert("H3".to_string(), stable(id(1, 3, 0)));
    decay.insert("Am242_m1".to_string(), stable(id(95, 242, 1)));
    decay.insert("Am242".to_string(), stable(id(95, 242, 0)));

    let q_values = BTreeMap::new();
    let yields = BTreeMap::new();
    let policy = policy_for(&["U238", "H3", "Am242_m1", "Am242"]);

    let (chain, _) = ChainBuilder::new(&decay, &q_values, &yields, &policy).build();

    let order: Vec<&str> = chain
        .nuclides
        .iter()
        .map(|nuclide| nuclide.name.as_str())
        .collect();
    assert_eq!(order, vec!["H3", "U238", "Am242", "Am242_m1"]);
}
