//! `ndgen` is a toolkit for generating processed nuclear data libraries
//! from ENDF evaluations
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use ndgen_utils as utils;

#[cfg(feature = "chain")]
#[cfg_attr(docsrs, doc(cfg(feature = "chain")))]
#[doc(inline)]
pub use ndgen_chain as chain;

#[cfg(feature = "endf")]
#[cfg_attr(docsrs, doc(cfg(feature = "endf")))]
#[doc(inline)]
pub use ndgen_endf as endf;

#[cfg(feature = "fetch")]
#[cfg_attr(docsrs, doc(cfg(feature = "fetch")))]
#[doc(inline)]
pub use ndgen_fetch as fetch;

#[cfg(feature = "library")]
#[cfg_attr(docsrs, doc(cfg(feature = "library")))]
#[doc(inline)]
pub use ndgen_library as library;
