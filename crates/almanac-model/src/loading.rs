// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Almanac loader for the seed-to-location text format.
//!
//! This module turns a line-oriented text stream into an [`Almanac`]. The
//! first non-blank line declares the seeds, every following block starts with
//! a `<source>-to-<destination> map:` header and lists one rule per line:
//!
//! ```raw
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! ```
//!
//! Rule lines hold `<destination start> <source start> <length>`. Blank lines
//! separate blocks, and `#` starts a comment that runs to the end of the line.
//! Every error carries the 1-based line number it was detected on, so a
//! malformed input can be fixed without guessing.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.

use crate::{
    almanac::{Almanac, AlmanacBuilder},
    category_map::CategoryMap,
    range_map::{RangeMap, RangeMapError},
};
use almanac_core::math::interval::Interval;
use num_traits::PrimInt;
use regex::Regex;
use std::{
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

const SEEDS_PREFIX: &str = "seeds:";
const HEADER_PATTERN: &str = r"^([A-Za-z0-9_]+)-to-([A-Za-z0-9_]+)\s+map:$";

/// The error type for the almanac loading process.
#[derive(Debug, thiserror::Error)]
pub enum AlmanacLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input does not start with a `seeds:` line.
    #[error("Expected a line starting with `seeds:`, found {found}")]
    MissingSeeds { found: String },
    /// The seeds are read as start/length pairs but an odd number of values was given.
    #[error("Line {line}: expected start-length pairs of seeds, got {count} values")]
    OddSeedCount { line: usize, count: usize },
    /// A seed range whose end is not representable, or whose length is negative.
    #[error("Line {line}: invalid seed range {text}")]
    InvalidSeed { line: usize, text: String },
    /// A token could not be parsed into the expected numeric type.
    #[error("Line {line}: {error}")]
    Parse {
        line: usize,
        #[source]
        error: ParseTokenError,
    },
    /// A line looks like a map header but does not follow `<source>-to-<destination> map:`.
    #[error("Line {line}: expected `<source>-to-<destination> map:`, got `{text}`")]
    MalformedHeader { line: usize, text: String },
    /// A rule line does not hold exactly three values.
    #[error("Line {line}: expected `<destination start> <source start> <length>`, got {count} values")]
    RuleArity { line: usize, count: usize },
    /// A rule line appears before the first map header.
    #[error("Line {line}: range rule appears before any map header")]
    RuleBeforeHeader { line: usize },
    /// A rule describes an invalid range.
    #[error("Line {line}: invalid range rule: {error}")]
    InvalidRule {
        line: usize,
        #[source]
        error: RangeMapError,
    },
    /// Two maps translate out of the same category.
    #[error("Line {line}: duplicate map for source category `{category}`")]
    DuplicateCategory { line: usize, category: String },
    /// Two rules of the same map have overlapping source ranges.
    #[error("Map `{from}-to-{to}`: rules {first} and {second} have overlapping source ranges")]
    OverlappingRules {
        from: String,
        to: String,
        first: usize,
        second: usize,
    },
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

/// How the integers on the `seeds:` line are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeedMode {
    /// The values are `<start> <length>` pairs, each describing a seed interval.
    #[default]
    Ranges,
    /// Every value is a single seed.
    Points,
}

impl Display for SeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedMode::Ranges => write!(f, "ranges"),
            SeedMode::Points => write!(f, "points"),
        }
    }
}

/// A configurable loader for almanac inputs.
///
/// # Configuration
/// * `seed_mode`: How the values on the `seeds:` line are read. Defaults to
///   [`SeedMode::Ranges`].
/// * `reject_overlapping_rules`: If true, the loader returns an error if two
///   rules of one map have overlapping source ranges. Off by default; the
///   remapping engine assumes disjoint sources without checking.
#[derive(Debug, Clone)]
pub struct AlmanacLoader<T> {
    seed_mode: SeedMode,
    reject_overlapping_rules: bool,
    header: Regex,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for AlmanacLoader<T> {
    fn default() -> Self {
        Self {
            seed_mode: SeedMode::default(),
            reject_overlapping_rules: false,
            header: Regex::new(HEADER_PATTERN).expect("map header pattern must compile"),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> AlmanacLoader<T>
where
    T: PrimInt + FromStr + Display + Debug,
{
    /// Creates a new `AlmanacLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the values on the `seeds:` line are interpreted.
    #[inline]
    pub fn seed_mode(mut self, mode: SeedMode) -> Self {
        self.seed_mode = mode;
        self
    }

    /// Configures whether maps with overlapping rule sources are rejected.
    #[inline]
    pub fn reject_overlapping_rules(mut self, yes: bool) -> Self {
        self.reject_overlapping_rules = yes;
        self
    }

    /// Loads an almanac from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Almanac<T>, AlmanacLoaderError> {
        let mut lines = LineReader::new(rdr);
        let mut builder = AlmanacBuilder::new();

        let (seed_line, text) = match lines.next_content()? {
            Some(found) => found,
            None => {
                return Err(AlmanacLoaderError::MissingSeeds {
                    found: "end of input".to_owned(),
                });
            }
        };
        let Some(values) = text.strip_prefix(SEEDS_PREFIX) else {
            return Err(AlmanacLoaderError::MissingSeeds {
                found: format!("`{}` on line {}", text, seed_line),
            });
        };
        let values: Vec<T> = parse_values(values, seed_line)?;
        builder.add_seeds(self.seeds_from_values(&values, seed_line)?);

        // The map currently being filled, with the line of its header.
        let mut current: Option<(usize, CategoryMap<T>)> = None;

        while let Some((line, text)) = lines.next_content()? {
            if let Some(caps) = self.header.captures(&text) {
                if let Some((header_line, map)) = current.take() {
                    self.finish_map(&mut builder, header_line, map)?;
                }
                current = Some((line, CategoryMap::new(&caps[1], &caps[2])));
                continue;
            }

            if text.contains("map:") {
                return Err(AlmanacLoaderError::MalformedHeader { line, text });
            }

            let Some((_, map)) = current.as_mut() else {
                return Err(AlmanacLoaderError::RuleBeforeHeader { line });
            };

            let values: Vec<T> = parse_values(&text, line)?;
            let &[destination_start, source_start, length] = values.as_slice() else {
                return Err(AlmanacLoaderError::RuleArity {
                    line,
                    count: values.len(),
                });
            };
            let rule = RangeMap::from_triple(destination_start, source_start, length)
                .map_err(|error| AlmanacLoaderError::InvalidRule { line, error })?;
            map.push_rule(rule);
        }

        if let Some((header_line, map)) = current.take() {
            self.finish_map(&mut builder, header_line, map)?;
        }

        let almanac = builder.build();
        tracing::debug!(
            seeds = almanac.num_seeds(),
            maps = almanac.chain().len(),
            seed_mode = %self.seed_mode,
            "loaded almanac"
        );
        Ok(almanac)
    }

    /// Loads an almanac from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Almanac<T>, AlmanacLoaderError> {
        tracing::debug!(path = %path.as_ref().display(), "opening almanac");
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an almanac from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Almanac<T>, AlmanacLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an almanac from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Almanac<T>, AlmanacLoaderError> {
        self.from_reader(s.as_bytes())
    }

    fn seeds_from_values(
        &self,
        values: &[T],
        line: usize,
    ) -> Result<Vec<Interval<T>>, AlmanacLoaderError> {
        let invalid = |start: T, len: T| AlmanacLoaderError::InvalidSeed {
            line,
            text: format!("{} {}", start, len),
        };

        match self.seed_mode {
            SeedMode::Ranges => {
                if values.len() % 2 != 0 {
                    return Err(AlmanacLoaderError::OddSeedCount {
                        line,
                        count: values.len(),
                    });
                }
                values
                    .chunks_exact(2)
                    .map(|pair| {
                        Interval::with_len(pair[0], pair[1]).ok_or_else(|| invalid(pair[0], pair[1]))
                    })
                    .collect()
            }
            SeedMode::Points => values
                .iter()
                .map(|&v| Interval::with_len(v, T::one()).ok_or_else(|| invalid(v, T::one())))
                .collect(),
        }
    }

    fn finish_map(
        &self,
        builder: &mut AlmanacBuilder<T>,
        header_line: usize,
        map: CategoryMap<T>,
    ) -> Result<(), AlmanacLoaderError> {
        if builder.contains_source(map.source().as_str()) {
            return Err(AlmanacLoaderError::DuplicateCategory {
                line: header_line,
                category: map.source().to_string(),
            });
        }

        if self.reject_overlapping_rules {
            if let Some((first, second)) = map.find_overlap() {
                return Err(AlmanacLoaderError::OverlappingRules {
                    from: map.source().to_string(),
                    to: map.destination().to_string(),
                    first,
                    second,
                });
            }
        }

        tracing::debug!(
            source = %map.source(),
            destination = %map.destination(),
            rules = map.num_rules(),
            "loaded category map"
        );
        builder.add_category_map(map);
        Ok(())
    }
}

/// Parses every whitespace-separated token of `text` into `T`.
fn parse_values<T>(text: &str, line: usize) -> Result<Vec<T>, AlmanacLoaderError>
where
    T: FromStr,
{
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|_| AlmanacLoaderError::Parse {
                    line,
                    error: ParseTokenError {
                        token: token.to_owned(),
                        type_name: std::any::type_name::<T>(),
                    },
                })
        })
        .collect()
}

/// A helper yielding the non-blank, comment-stripped lines of a reader.
struct LineReader<R> {
    rdr: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
        }
    }

    /// Returns the next line with content as `(line number, trimmed text)`,
    /// or `Ok(None)` at the end of the input.
    fn next_content(&mut self) -> Result<Option<(usize, String)>, AlmanacLoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = match self.buf.split_once('#') {
                Some((head, _comment)) => head,
                None => self.buf.as_str(),
            }
            .trim();

            if !text.is_empty() {
                return Ok(Some((self.line, text.to_owned())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_ALMANAC: &str = r#"
        seeds: 79 14 55 13      # two seed ranges

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-location map:   # identity table
    "#;

    #[test]
    fn test_loads_seeds_and_maps() {
        let almanac: Almanac<i64> = AlmanacLoader::new()
            .from_str(SMALL_ALMANAC)
            .expect("Failed to load");

        assert_eq!(
            almanac.seeds(),
            &[Interval::new(79, 93), Interval::new(55, 68)]
        );
        assert_eq!(almanac.chain().len(), 2);

        let soil = almanac.chain().get("seed").unwrap();
        assert_eq!(soil.destination(), "soil");
        assert_eq!(soil.rules()[0], RangeMap::from_triple(50, 98, 2).unwrap());
        assert_eq!(soil.rules()[1], RangeMap::from_triple(52, 50, 48).unwrap());

        let location = almanac.chain().get("soil").unwrap();
        assert_eq!(location.destination(), "location");
        assert_eq!(location.num_rules(), 0);
    }

    #[test]
    fn test_points_mode() {
        let almanac: Almanac<i64> = AlmanacLoader::new()
            .seed_mode(SeedMode::Points)
            .from_str("seeds: 79 14 55")
            .unwrap();
        assert_eq!(
            almanac.seeds(),
            &[
                Interval::new(79, 80),
                Interval::new(14, 15),
                Interval::new(55, 56)
            ]
        );
    }

    #[test]
    fn test_missing_seeds_on_empty_input() {
        let res = AlmanacLoader::<i64>::new().from_str("\n   \n# nothing\n");
        assert!(matches!(res, Err(AlmanacLoaderError::MissingSeeds { .. })));
    }

    #[test]
    fn test_missing_seeds_prefix() {
        let res = AlmanacLoader::<i64>::new().from_str("seed-to-soil map:\n1 2 3\n");
        match res {
            Err(AlmanacLoaderError::MissingSeeds { found }) => {
                assert!(found.contains("seed-to-soil map:"));
                assert!(found.contains("line 1"));
            }
            other => panic!("Expected MissingSeeds, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_odd_seed_count() {
        let res = AlmanacLoader::<i64>::new().from_str("seeds: 1 2 3");
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::OddSeedCount { line: 1, count: 3 })
        ));
    }

    #[test]
    fn test_seed_range_overflow() {
        let res = AlmanacLoader::<u8>::new().from_str("seeds: 250 10");
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::InvalidSeed { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_error_structure() {
        let data = "seeds: 1 2\n\nseed-to-soil map:\n1 garbage 3\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);

        match res {
            Err(AlmanacLoaderError::Parse { line, error }) => {
                assert_eq!(line, 4);
                assert_eq!(error.token, "garbage");
                assert!(error.type_name.contains("i64"));
            }
            other => panic!("Expected Parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_header() {
        let data = "seeds: 1 2\nseed_to_soil map:\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::MalformedHeader { line: 2, .. })
        ));
    }

    #[test]
    fn test_rule_before_header() {
        let data = "seeds: 1 2\n\n50 98 2\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::RuleBeforeHeader { line: 3 })
        ));
    }

    #[test]
    fn test_rule_arity() {
        let data = "seeds: 1 2\nseed-to-soil map:\n50 98\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::RuleArity { line: 3, count: 2 })
        ));
    }

    #[test]
    fn test_invalid_rule() {
        let data = "seeds: 1 2\nseed-to-soil map:\n50 98 -2\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);
        assert!(matches!(
            res,
            Err(AlmanacLoaderError::InvalidRule {
                line: 3,
                error: RangeMapError::NegativeLength
            })
        ));
    }

    #[test]
    fn test_duplicate_category() {
        let data = "seeds: 1 2\nseed-to-soil map:\n\nseed-to-water map:\n";
        let res = AlmanacLoader::<i64>::new().from_str(data);
        match res {
            Err(AlmanacLoaderError::DuplicateCategory { line, category }) => {
                assert_eq!(line, 4);
                assert_eq!(category, "seed");
            }
            other => panic!("Expected DuplicateCategory, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_overlapping_rules_only_rejected_when_enabled() {
        let data = "seeds: 1 2\nseed-to-soil map:\n0 10 10\n100 15 10\n";

        let lenient = AlmanacLoader::<i64>::new().from_str(data);
        assert!(lenient.is_ok());

        let strict = AlmanacLoader::<i64>::new()
            .reject_overlapping_rules(true)
            .from_str(data);
        match strict {
            Err(AlmanacLoaderError::OverlappingRules {
                from,
                to,
                first,
                second,
            }) => {
                assert_eq!(from, "seed");
                assert_eq!(to, "soil");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("Expected OverlappingRules, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_error_messages_name_the_line() {
        let err = AlmanacLoader::<i64>::new()
            .from_str("seeds: 1 2\nseed-to-soil map:\n1 2\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 3: expected `<destination start> <source start> <length>`, got 2 values"
        );
    }
}
