//! Low-level ENDF-6 record primitives
//!
//! An ENDF-6 line carries 66 columns of content split into six 11-column
//! fields, followed by the MAT (4), MF (2) and MT (3) identifiers. The
//! [Records] cursor walks the content lines of one section and decodes the
//! record types the rest of the workspace consumes.

// internal modules
use crate::error::{Error, Result};

// external crates
use ndgen_utils::f;

/// Width of a single content field
const FIELD: usize = 11;

/// Number of content fields per line
const FIELDS_PER_LINE: usize = 6;

/// Columns of record content before the MAT/MF/MT identifiers
const CONTENT: usize = FIELD * FIELDS_PER_LINE;

/// One line of an ENDF tape split into content and identifiers
#[derive(Debug, Clone)]
pub struct Line {
    /// The 66 columns of record content, space padded
    pub content: String,
    /// Material number (`-1` closes the tape)
    pub material: i32,
    /// File number
    pub mf: u32,
    /// Section number
    pub mt: u32,
}

impl Line {
    /// Split a raw tape line into content and MAT/MF/MT identifiers
    ///
    /// Short lines are padded out to the full 80 columns first, since many
    /// archives strip trailing whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut padded = raw.trim_end_matches(['\r', '\n']).to_string();
        if padded.len() < 75 {
            padded.push_str(&" ".repeat(75 - padded.len()));
        }

        Ok(Self {
            content: padded[..CONTENT].to_string(),
            material: parse_int(&padded[CONTENT..CONTENT + 4])? as i32,
            mf: parse_int(&padded[CONTENT + 4..CONTENT + 6])? as u32,
            mt: parse_int(&padded[CONTENT + 6..CONTENT + 9])? as u32,
        })
    }
}

/// The six floating point fields shared by HEAD/CONT record headers
///
/// Conventionally `[C1, C2, L1, L2, N1, N2]`, with the last four being
/// integer flags or counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cont {
    pub c1: f64,
    pub c2: f64,
    pub l1: i64,
    pub l2: i64,
    pub n1: i64,
    pub n2: i64,
}

/// A TAB1 record, one tabulated function `y(x)`
#[derive(Debug, Clone)]
pub struct Tab1 {
    /// The CONT header of the record
    pub header: Cont,
    /// Interpolation regions as `(boundary index, scheme)` pairs
    pub interpolation: Vec<(usize, u32)>,
    /// Abscissa values
    pub x: Vec<f64>,
    /// Ordinate values
    pub y: Vec<f64>,
}

/// Cursor over the content lines of one section
#[derive(Debug)]
pub struct Records<'a> {
    lines: &'a [String],
    position: usize,
}

impl<'a> Records<'a> {
    /// Start a cursor at the first line of a section
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, position: 0 }
    }

    /// Next raw content line, failing when the section runs dry
    fn next_line(&mut self) -> Result<&'a str> {
        let line = self.lines.get(self.position).ok_or(Error::UnexpectedEnd)?;
        self.position += 1;
        Ok(line)
    }

    /// Skip `n` lines of text records
    pub fn skip(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.next_line()?;
        }
        Ok(())
    }

    /// Read a HEAD record, which shares the CONT layout
    pub fn head(&mut self) -> Result<Cont> {
        self.cont()
    }

    /// Read a CONT record
    pub fn cont(&mut self) -> Result<Cont> {
        let line = self.next_line()?;
        Ok(Cont {
            c1: parse_float(field(line, 0))?,
            c2: parse_float(field(line, 1))?,
            l1: parse_int(field(line, 2))?,
            l2: parse_int(field(line, 3))?,
            n1: parse_int(field(line, 4))?,
            n2: parse_int(field(line, 5))?,
        })
    }

    /// Read a LIST record, returning the header and the `NPL` values
    pub fn list(&mut self) -> Result<(Cont, Vec<f64>)> {
        let header = self.cont()?;
        let values = self.values(header.n1 as usize)?;
        Ok((header, values))
    }

    /// Read a TAB1 record
    pub fn tab1(&mut self) -> Result<Tab1> {
        let header = self.cont()?;
        let regions = header.n1 as usize;
        let points = header.n2 as usize;

        let bounds = self.values(2 * regions)?;
        let interpolation = bounds
            .chunks_exact(2)
            .map(|pair| (pair[0] as usize, pair[1] as u32))
            .collect();

        let pairs = self.values(2 * points)?;
        let (mut x, mut y) = (Vec::with_capacity(points), Vec::with_capacity(points));
        for pair in pairs.chunks_exact(2) {
            x.push(pair[0]);
            y.push(pair[1]);
        }

        Ok(Tab1 {
            header,
            interpolation,
            x,
            y,
        })
    }

    /// Read `count` packed values, six to a line
    fn values(&mut self, count: usize) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            let line = self.next_line()?;
            let remaining = count - values.len();
            for index in 0..remaining.min(FIELDS_PER_LINE) {
                values.push(parse_float(field(line, index))?);
            }
        }
        Ok(values)
    }
}

/// Slice one of the six 11-column fields out of a content line
///
/// Trailing whitespace may have been stripped by an archive, so fields
/// past the end of the line read as blank.
fn field(line: &str, index: usize) -> &str {
    let start = FIELD * index;
    let end = FIELD * (index + 1);
    if line.len() >= end {
        &line[start..end]
    } else if line.len() > start {
        &line[start..]
    } else {
        ""
    }
}

/// Interpret an ENDF-6 number field
///
/// ENDF drops the `e` from exponents to fit the 11 column fields, so
/// `1.234567+8` reads as `1.234567e8`. Blank fields read as zero.
///
/// ```rust
/// # use ndgen_endf::parse_float;
/// assert_eq!(parse_float(" 2.300000+7").unwrap(), 2.3e7);
/// assert_eq!(parse_float("-1.23456-12").unwrap(), -1.23456e-12);
/// assert_eq!(parse_float("           ").unwrap(), 0.0);
/// ```
pub fn parse_float(field: &str) -> Result<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    // Plain decimal and exponent forms parse directly
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(value);
    }

    // Otherwise look for the implied exponent sign beyond the mantissa sign
    let exponent = trimmed
        .char_indices()
        .skip(1)
        .find(|(index, c)| {
            (*c == '+' || *c == '-')
                && !matches!(trimmed.as_bytes()[index - 1], b'e' | b'E')
        })
        .map(|(index, _)| index);

    match exponent {
        Some(index) => f!("{}e{}", &trimmed[..index], &trimmed[index..])
            .parse::<f64>()
            .map_err(|_| Error::InvalidNumber {
                field: trimmed.to_string(),
            }),
        None => Err(Error::InvalidNumber {
            field: trimmed.to_string(),
        }),
    }
}

/// Interpret an integer field, tolerating float notation
///
/// Blank fields read as zero, matching the format convention.
pub fn parse_int(field: &str) -> Result<i64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(_) => Ok(parse_float(trimmed)? as i64),
    }
}
