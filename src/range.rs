//! `Range` header parsing
//!
//! The non-list outcomes Express-style frameworks signal with `-1`/`-2`
//! sentinels are a tagged enum here; "no Range header at all" stays on the
//! caller's side as `Option::None`.

use tracing::trace;

/// One requested range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

/// A satisfiable parse: the range unit plus the resolved ranges, in header
/// order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRanges {
    pub unit: String,
    pub ranges: Vec<ByteRange>,
}

/// Outcome of parsing a present `Range` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Header is syntactically invalid
    Malformed,
    /// Header parsed but no requested range fits inside `size`
    Unsatisfiable,
    /// At least one satisfiable range
    Ranges(ParsedRanges),
}

/// Parse a `Range` header value against a resource of `size` bytes
///
/// Open-ended ranges (`500-`) and suffix ranges (`-500`) are resolved
/// against `size`; explicit ends are capped at `size - 1`. Individually
/// invalid parts are dropped, and only a header with no `=` separator at
/// all counts as malformed.
pub fn parse(size: u64, header: &str) -> RangeOutcome {
    let Some((unit, spec)) = header.split_once('=') else {
        trace!(header, "range header missing unit separator");
        return RangeOutcome::Malformed;
    };
    let unit = unit.trim();
    if unit.is_empty() {
        return RangeOutcome::Malformed;
    }

    let mut ranges = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        let (start_text, end_text) = match part.split_once('-') {
            Some(split) => split,
            None => (part, ""),
        };
        let start = start_text.trim().parse::<u64>().ok();
        let end = end_text.trim().parse::<u64>().ok();

        let resolved = match (start, end) {
            // "-n": the final n bytes of the resource.
            (None, Some(suffix)) => size
                .checked_sub(suffix)
                .and_then(|start| size.checked_sub(1).map(|end| (start, end))),
            // "n-": from n to the end.
            (Some(start), None) => size.checked_sub(1).map(|end| (start, end)),
            // "n-m": explicit, capped to the resource.
            (Some(start), Some(end)) => size.checked_sub(1).map(|cap| (start, end.min(cap))),
            (None, None) => None,
        };

        match resolved {
            Some((start, end)) if start <= end => ranges.push(ByteRange { start, end }),
            _ => {}
        }
    }

    if ranges.is_empty() {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Ranges(ParsedRanges {
        unit: unit.to_string(),
        ranges,
    })
}
