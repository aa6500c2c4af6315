//! The chain policy registry
//!
//! Chain assembly is restricted to a fixed set of nuclides chosen ahead of
//! time. The registry carries the per-nuclide assembly policy: whether its
//! decay is intentionally excluded, how its fission yield is taken from the
//! evaluated tables, and whether its branching ratios are exempt from
//! renormalisation.
//!
//! The shipped registry is embedded as JSON and parsed once on first use.

// standard library
use std::collections::{BTreeMap, BTreeSet};

// external crates
use once_cell::sync::Lazy;
use serde::Deserialize;

/// How a product's fission yield is taken from the evaluated tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldSource {
    /// Direct (independent) yield of the product itself
    #[default]
    Independent,
    /// Cumulative yield of the product, absorbing its short-lived
    /// precursors
    Cumulative,
    /// Weighted combination of other tabulated products
    Combine,
}

/// Which evaluated table a combination component reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldBasis {
    /// Independent yield table
    Independent,
    /// Cumulative yield table
    Cumulative,
}

impl YieldBasis {
    /// Table name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Cumulative => "cumulative",
        }
    }
}

/// One component of a combined yield
#[derive(Debug, Clone, Deserialize)]
pub struct YieldComponent {
    /// Tabulated product the component reads
    pub product: String,
    /// Weight applied to the tabulated yield
    pub weight: f64,
    /// Which table the component reads from
    pub yields: YieldBasis,
}

/// Assembly policy for one nuclide of the chain
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NuclidePolicy {
    /// Skip half-life, decay energy and decay mode population
    #[serde(default)]
    pub exclude_decay: bool,
    /// Fission yield treatment when the nuclide appears as a product
    #[serde(default)]
    pub fpy: YieldSource,
    /// Components of a combined yield, read when `fpy` is `combine`
    #[serde(default)]
    pub combine: Vec<YieldComponent>,
}

/// The full chain policy registry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainPolicy {
    /// Nuclides whose evaluated branching ratios are kept as-is
    #[serde(default)]
    pub unmodified_decay_br: BTreeSet<String>,
    /// The allow-list with per-nuclide policies
    pub nuclides: BTreeMap<String, NuclidePolicy>,
}

impl ChainPolicy {
    /// Whether a nuclide is part of the chain
    pub fn contains(&self, name: &str) -> bool {
        self.nuclides.contains_key(name)
    }

    /// Policy entry for a nuclide
    pub fn get(&self, name: &str) -> Option<&NuclidePolicy> {
        self.nuclides.get(name)
    }

    /// Whether the evaluated branching ratios are exempt from
    /// renormalisation
    pub fn keep_branching(&self, name: &str) -> bool {
        self.unmodified_decay_br.contains(name)
    }

    /// Names of all chain nuclides
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.nuclides.keys()
    }
}

/// The shipped CASL-style reduced chain registry
pub static CASL_CHAIN: Lazy<ChainPolicy> = Lazy::new(|| {
    serde_json::from_str(include_str!("casl_chain.json"))
        .expect("embedded chain policy registry is valid JSON")
});
