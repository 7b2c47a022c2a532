//! Locale-aware string ordering.
//!
//! Strings are ordered the way people read a sorted table rather than by code
//! point: `"apple" < "Banana" < "cherry"`, `"Émile"` next to `"Emile"`. The
//! comparison is layered:
//!
//! 1. **Base letters**: transliterated (via `deunicode`) and lower-cased text,
//!    with punctuation and whitespace before digits before letters.
//! 2. **Accents**: lower-cased text with accents kept, so `"resume" < "résumé"`.
//! 3. **Case**: lower case before upper case, so `"a" < "A"`.
//! 4. **Code points**, so distinct strings never compare equal.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Precomputed collation key for one string.
///
/// Building the key once per row keeps sorting from re-transliterating the
/// same text on every comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey<'a> {
    base: Vec<(u8, char)>,
    accents: String,
    raw: &'a str,
}

impl<'a> CollationKey<'a> {
    /// Builds the key for `text`.
    pub fn new(text: &'a str) -> Self {
        CollationKey {
            base: deunicode(text).to_lowercase().chars().map(weight).collect(),
            accents: text.to_lowercase(),
            raw: text,
        }
    }

    /// The string this key was built from.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }
}

impl Ord for CollationKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base
            .cmp(&other.base)
            .then_with(|| self.accents.cmp(&other.accents))
            .then_with(|| case_mask(self.raw).cmp(case_mask(other.raw)))
            .then_with(|| self.raw.cmp(other.raw))
    }
}

impl PartialOrd for CollationKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two strings with locale-aware ordering.
///
/// ```
/// use std::cmp::Ordering;
/// use rowseek::locale_cmp;
///
/// assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_cmp("Zoë", "zoe"), Ordering::Greater);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

fn weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}

fn case_mask(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.chars().map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_at_base_level() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Banana", "cherry"), Ordering::Less);
        // code point order would put every capital first
        assert_eq!("Banana".cmp("apple"), Ordering::Less);
    }

    #[test]
    fn lower_case_first_on_ties() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("alice", "Alice"), Ordering::Less);
    }

    #[test]
    fn accents_sort_next_to_base_letters() {
        assert_eq!(locale_cmp("Émile", "Fred"), Ordering::Less);
        assert_eq!(locale_cmp("Emile", "Émile"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn punctuation_then_digits_then_letters() {
        assert_eq!(locale_cmp("-x", "1x"), Ordering::Less);
        assert_eq!(locale_cmp("1x", "ax"), Ordering::Less);
        assert_eq!(locale_cmp("a b", "ab"), Ordering::Less);
    }

    #[test]
    fn distinct_strings_never_equal() {
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_ne!(locale_cmp("ﬁ", "fi"), Ordering::Equal);
    }

    #[test]
    fn reversed_arguments_reverse_the_result() {
        let words = ["Dan", "carol", "Álvaro", "alvaro", "10", "9", "", " "];
        for a in words {
            for b in words {
                assert_eq!(locale_cmp(a, b), locale_cmp(b, a).reverse(), "{a:?} vs {b:?}");
            }
        }
    }
}
