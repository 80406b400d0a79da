//! Parsing of whitespace separated key lists, as typed into the shell.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parses every whitespace separated token of `input` as a key.
///
/// # Errors
///
/// [`Error::InvalidArgument`] naming the first token that isn't a valid key.
///
/// # Examples
///
/// ```
/// use avl_bst::keys::parse_keys;
///
/// assert_eq!(parse_keys::<i64>(" 5 3\t8 ").unwrap(), vec![5, 3, 8]);
/// assert!(parse_keys::<i64>("5 three").is_err());
/// ```
pub fn parse_keys<K>(input: &str) -> Result<Vec<K>>
where
    K: FromStr,
    K::Err: Display,
{
    input
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|err| {
                Error::InvalidArgument(format!("`{token}` is not a valid key: {err}"))
            })
        })
        .collect()
}

/// Parses a count of keys, such as the answer to the shell's `nodes>` prompt.
///
/// # Errors
///
/// [`Error::InvalidArgument`] unless `input` is a single non-negative integer.
pub fn parse_count(input: &str) -> Result<usize> {
    let input = input.trim();
    input
        .parse()
        .map_err(|err| Error::InvalidArgument(format!("`{input}` is not a valid count: {err}")))
}

/// Like [`parse_keys`], but also checks that exactly `count` keys were given.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a bad token or the wrong number of keys.
pub fn parse_exact<K>(count: usize, input: &str) -> Result<Vec<K>>
where
    K: FromStr,
    K::Err: Display,
{
    let keys = parse_keys(input)?;
    if keys.len() != count {
        return Err(Error::InvalidArgument(format!(
            "expected {count} keys, got {}",
            keys.len()
        )));
    }
    Ok(keys)
}
