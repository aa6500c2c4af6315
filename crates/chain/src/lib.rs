//! Depletion chain assembly from evaluated nuclear data
//!
//! A depletion chain is the directed graph of nuclide transmutations
//! (decay branches plus neutron reactions) a depletion solver walks when
//! simulating material composition over time. This crate assembles one
//! from the evaluated record sets read by `ndgen-endf` and writes it out
//! as a single XML document.
//!
//! Assembly is restricted to a fixed registry of nuclides, the
//! [chain policy](ChainPolicy), which also carries the per-product fission
//! yield treatments and the branching-ratio renormalisation exemptions.
//! The shipped registry is available as [`CASL_CHAIN`].
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use std::collections::BTreeMap;
//! # use ndgen_chain::{ChainBuilder, CASL_CHAIN};
//! # let decay = BTreeMap::new();
//! # let q_values = BTreeMap::new();
//! # let yields = BTreeMap::new();
//! // Record sets come from the decay, neutron and nfy sublibraries
//! let builder = ChainBuilder::new(&decay, &q_values, &yields, &CASL_CHAIN);
//!
//! // Anomalies never abort the assembly, they are reported instead
//! let (chain, report) = builder.build();
//! report.log_warnings();
//!
//! chain.export_to_xml("chain_casl.xml").unwrap();
//! ```
//!
//! ## Assembly rules
//!
//! For each nuclide with decay data, in ascending (Z, A, M) order:
//!
//! - decay population is skipped for stable, zero half-life and
//!   policy-excluded nuclides
//! - decay branches whose daughter has no decay data are dropped with a
//!   warning, and the remaining branching ratios are renormalised to
//!   unity by adjusting the last branch (unless exempted)
//! - a transmutation channel is recorded for every registry reaction with
//!   a matching MT section, its Q value taken from the lowest matching MT
//! - a `fission` channel is recorded when a fission MT and yield data are
//!   both present, with the MT=18 Q value
//! - the energy-resolved yield distribution is built per product using
//!   the policy treatment (independent, cumulative or weighted
//!   combination)

// Modules
mod builder;
mod chain;
mod error;
mod nuclide;
mod policy;
mod reactions;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use chain::Chain;

#[doc(inline)]
pub use nuclide::{
    ChainNuclide, DecayMode, FissionYieldDistribution, ReactionChannel, YieldEntry,
};

#[doc(inline)]
pub use builder::{
    BuildReport, ChainBuilder, MissingDaughter, MissingProduct, MissingYield, QValueTable,
};

#[doc(inline)]
pub use policy::{
    ChainPolicy, NuclidePolicy, YieldBasis, YieldComponent, YieldSource, CASL_CHAIN,
};

#[doc(inline)]
pub use reactions::{TransmutationReaction, FISSION_MTS, TRANSMUTATION_REACTIONS};
