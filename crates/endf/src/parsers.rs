//! Parser combinators for nuclide name strings

// internal modules
use crate::nuclide::{atomic_number, NuclideId};

// nom parser combinators
use nom::bytes::complete::tag;
use nom::character::complete::alpha1;
use nom::combinator::opt;
use nom::error::{Error, ErrorKind};
use nom::sequence::preceded;
use nom::{Err, IResult};

/// Parse a GNDS-style name into a [NuclideId]
///
/// Expects `<element><mass number>` with an optional `_m<state>` suffix,
/// e.g. `U235`, `Xe135`, `Am242_m1`. The element symbol must be a known
/// entry of the chart, which keeps strings like `Quack9` from slipping
/// through as element "Qu".
pub(crate) fn nuclide_from_str(i: &str) -> IResult<&str, NuclideId> {
    let (i, element) = element(i)?;
    let (i, mass_number) = mass_number(i)?;
    let (i, state) = opt(metastable)(i)?;

    // Anything trailing means this was not a nuclide name
    if !i.is_empty() {
        return Err(Err::Error(Error::new(i, ErrorKind::Fail)));
    }

    Ok((
        i,
        NuclideId {
            atomic_number: element,
            mass_number,
            state: state.unwrap_or(0),
        },
    ))
}

/// Get the atomic number from a known element symbol
fn element(i: &str) -> IResult<&str, u32> {
    let (i, symbol) = alpha1(i)?;

    match atomic_number(symbol) {
        Some(z) => Ok((i, z)),
        None => Err(Err::Error(Error::new(i, ErrorKind::Fail))),
    }
}

/// Get the mass number
fn mass_number(i: &str) -> IResult<&str, u32> {
    nom::character::complete::u32(i)
}

/// Get the metastable state index from an `_m<state>` suffix
fn metastable(i: &str) -> IResult<&str, u32> {
    preceded(tag("_m"), nom::character::complete::u32)(i)
}
