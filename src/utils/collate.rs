//! Title ordering for the report. Approximates the root-locale collation a user expects from a
//! sorted list: accents and case are ignored at first, and spaces and punctuation sort before
//! digits, which sort before letters.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

fn class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

/// Sort key of a string. Every level is derived from the same decomposed characters, and keys
/// are compared field by field, so any two titles compare the same way no matter how their
/// accents were encoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    /// Lowercased base characters, accents dropped.
    primary: Vec<(u8, char)>,
    /// Accents as (index of the base character they follow, mark).
    accents: Vec<(usize, char)>,
    /// One entry per base character, lowercase first.
    case: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let mut primary = vec![];
        let mut accents = vec![];
        let mut case = vec![];
        for c in s.nfd() {
            if is_combining_mark(c) {
                accents.push((case.len(), c));
            } else {
                case.push(!c.is_lowercase() && c.to_lowercase().ne(std::iter::once(c)));
                primary.extend(c.to_lowercase().map(|c| (class(c), c)));
            }
        }
        Self {
            primary,
            accents,
            case,
            raw: s.to_owned(),
        }
    }
}

/// Compares two strings the way a person reading the report would. Returns [Ordering::Equal] only
/// for identical strings, so combined with a stable sort ties keep their original order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
