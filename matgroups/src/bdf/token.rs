//! Set entry tokens of the bulk-data `SET` card.

use std::str::FromStr;

use crate::error::Error;
use crate::ranges::{Range, Runs};

/// Keyword joining the bounds of a range entry.
pub const THRU: &str = "THRU";

/// One comma-separated entry of a `SET` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single label, written as the bare integer
    Single(u64),
    /// An inclusive label range, written as `<lower> THRU <upper>`
    Thru(u64, u64),
}

impl Token {
    /// Iterates over the labels the token stands for.
    pub fn values(&self) -> std::ops::RangeInclusive<u64> {
        match *self {
            Token::Single(value) => value..=value,
            Token::Thru(lower, upper) => lower..=upper,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Single(value) => write!(f, "{value}"),
            Token::Thru(lower, upper) => write!(f, "{lower} {THRU} {upper}"),
        }
    }
}

impl FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidToken(s.to_string());
        let mut words = s.split_whitespace();

        let token = match (words.next(), words.next(), words.next(), words.next()) {
            (Some(value), None, None, None) => {
                Token::Single(value.parse().map_err(|_| invalid())?)
            }
            (Some(lower), Some(THRU), Some(upper), None) => {
                let lower: u64 = lower.parse().map_err(|_| invalid())?;
                let upper: u64 = upper.parse().map_err(|_| invalid())?;
                if lower > upper {
                    return Err(invalid());
                }
                Token::Thru(lower, upper)
            }
            _ => return Err(invalid()),
        };

        Ok(token)
    }
}

/// Converts one run into its tokens.
///
/// A two-label run is written as two singles, since `a THRU b` would be no
/// shorter than listing both.
fn push_range_tokens(range: &Range, tokens: &mut Vec<Token>) {
    let (lower, upper) = (range.lower(), range.upper());
    match range.span() {
        0 => tokens.push(Token::Single(lower)),
        1 => tokens.extend([Token::Single(lower), Token::Single(upper)]),
        _ => tokens.push(Token::Thru(lower, upper)),
    }
}

/// Converts compressed runs into `SET` card tokens, in ascending order.
pub fn tokens(runs: &Runs) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(runs.len());
    for range in runs {
        push_range_tokens(range, &mut tokens);
    }
    tokens
}

/// Parses a comma-separated token list back into the labels it denotes.
pub fn parse_entries(line: &str) -> Result<Vec<u64>, Error> {
    let mut values = Vec::new();
    for entry in line.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        values.extend(entry.parse::<Token>()?.values());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::{BisectingCompressor, Compressor};
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_tokens_follow_run_widths() {
        let runs = BisectingCompressor.compress(&[10, 11, 12, 1, 2, 3, 4, 17, 18, 20]);
        let rendered: Vec<String> = tokens(&runs).iter().map(ToString::to_string).collect();

        assert_eq!(rendered, vec!["1 THRU 4", "10 THRU 12", "17", "18", "20"]);
    }

    #[test]
    fn test_no_tokens_for_no_runs() {
        assert!(tokens(&Runs::default()).is_empty());
    }

    #[test_case("17" => Token::Single(17); "single")]
    #[test_case("1 THRU 4" => Token::Thru(1, 4); "range")]
    #[test_case("  10   THRU 12 " => Token::Thru(10, 12); "extra whitespace")]
    fn test_parse_token(s: &str) -> Token {
        s.parse().unwrap()
    }

    #[test_case(""; "empty")]
    #[test_case("abc"; "not a number")]
    #[test_case("-3"; "negative")]
    #[test_case("1 TO 4"; "wrong keyword")]
    #[test_case("4 THRU 1"; "inverted")]
    #[test_case("1 THRU 4 THRU 9"; "trailing words")]
    fn test_parse_invalid_token(s: &str) {
        assert_matches!(s.parse::<Token>(), Err(Error::InvalidToken(t)) if t == s);
    }

    #[test]
    fn test_parse_entries() {
        let values = parse_entries("1 THRU 4,10,11,\n20").unwrap();
        assert_eq!(values, vec![1, 2, 3, 4, 10, 11, 20]);
    }

    proptest! {
        #[test]
        fn prop_rendered_tokens_parse_back(values in prop::collection::vec(0..5_000u64, 0..400)) {
            let runs = BisectingCompressor.compress(&values);
            let line = tokens(&runs)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");

            let mut expected = values.clone();
            expected.sort_unstable();
            expected.dedup();

            prop_assert_eq!(parse_entries(&line).unwrap(), expected);
        }
    }
}
