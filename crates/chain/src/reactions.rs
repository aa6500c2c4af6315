//! Registry of transmutation reactions tracked by the chain

// external crates
use once_cell::sync::Lazy;

/// One tracked transmutation reaction
#[derive(Debug, Clone)]
pub struct TransmutationReaction {
    /// Reaction name as it appears in the chain file
    pub name: &'static str,
    /// MT numbers indicating the reaction, ascending so summation
    /// sections order before their partials
    pub mts: Vec<u32>,
    /// Change in mass number of the target
    pub delta_a: i32,
    /// Change in atomic number of the target
    pub delta_z: i32,
}

/// The single-product reactions the chain tracks
///
/// Partial MT ranges (600-649 for proton emission, 800-849 for alpha
/// emission) indicate the reaction when an evaluation tabulates excited
/// final states without the summation section.
pub static TRANSMUTATION_REACTIONS: Lazy<Vec<TransmutationReaction>> = Lazy::new(|| {
    vec![
        reaction("(n,2n)", vec![16], -1, 0),
        reaction("(n,3n)", vec![17], -2, 0),
        reaction("(n,4n)", vec![37], -3, 0),
        reaction("(n,gamma)", vec![102], 1, 0),
        reaction("(n,p)", std::iter::once(103).chain(600..=649).collect(), 0, -1),
        reaction("(n,a)", std::iter::once(107).chain(800..=849).collect(), -3, -2),
    ]
});

/// MT numbers indicating that a nuclide fissions
pub const FISSION_MTS: [u32; 5] = [18, 19, 20, 21, 38];

fn reaction(
    name: &'static str,
    mts: Vec<u32>,
    delta_a: i32,
    delta_z: i32,
) -> TransmutationReaction {
    TransmutationReaction {
        name,
        mts,
        delta_a,
        delta_z,
    }
}
