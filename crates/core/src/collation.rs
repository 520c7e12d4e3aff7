//! Locale-aware, case-insensitive ordering of display names.
//!
//! Names are compared in two levels:
//!
//! 1. **Primary**: lowercase text decomposed (NFD) with combining marks
//!    dropped, so `Ávila` ~ `avila` and `Conceição` ~ `conceicao` whether the
//!    accents were typed precomposed or as separate marks. A few letters with
//!    no decomposition (`ß`, `æ`, `ø`, ...) are folded by hand.
//! 2. **Secondary**: lowercase text in composed form (NFC) with diacritics
//!    kept, consulted only when the primary level ties, so `Jose` sorts
//!    before `José`.
//!
//! Case never affects the result. Names that differ only in case compare
//! [`Ordering::Equal`], leaving their relative order to a stable sort.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed sort key for a display name.
///
/// Build once per entry and sort by it; comparing keys is equivalent to
/// [`compare_names`] on the original strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
}

impl CollationKey {
    /// Build the collation key for a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let secondary = name.nfc().collect::<String>().to_lowercase();
        let mut primary = String::with_capacity(secondary.len());
        for c in secondary.nfd().filter(|c| !is_combining_mark(*c)) {
            match base_letters(c) {
                Some(base) => primary.push_str(base),
                None => primary.push(c),
            }
        }
        Self { primary, secondary }
    }
}

/// Compare two display names, ascending.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Base letters for lowercase Latin letters that NFD leaves whole.
const fn base_letters(c: char) -> Option<&'static str> {
    Some(match c {
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'ø' => "o",
        'đ' => "d",
        'ħ' => "h",
        'ı' => "i",
        'ŀ' | 'ł' => "l",
        'ŧ' => "t",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare_names("alice", "Alice"), Ordering::Equal);
        assert_eq!(compare_names("bob", "Alice"), Ordering::Greater);
        assert_eq!(compare_names("ALICE", "bob"), Ordering::Less);
    }

    #[test]
    fn test_accents_fold_at_primary_level() {
        // Byte order would put 'Á' after 'Z'
        assert_eq!(compare_names("Ávila", "Zanon"), Ordering::Less);
        assert_eq!(compare_names("Éder", "Fabio"), Ordering::Less);
        assert_eq!(compare_names("Conceição", "Conceicao Z"), Ordering::Less);
    }

    #[test]
    fn test_accents_break_primary_ties() {
        assert_eq!(compare_names("Jose", "José"), Ordering::Less);
        assert_eq!(compare_names("José", "jose"), Ordering::Greater);
    }

    #[test]
    fn test_ligatures_and_sharp_s() {
        assert_eq!(compare_names("Straße", "strasse"), Ordering::Greater);
        assert_eq!(compare_names("Strasse", "Strasso"), Ordering::Less);
        assert_eq!(compare_names("Straße", "Strasso"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_names("Ana", "Ana Paula"), Ordering::Less);
    }

    #[test]
    fn test_key_matches_compare() {
        let names = ["Carol", "álvaro", "Bob", "alice", "Ângela"];
        for a in names {
            for b in names {
                assert_eq!(
                    CollationKey::new(a).cmp(&CollationKey::new(b)),
                    compare_names(a, b)
                );
            }
        }
    }

    #[test]
    fn test_decomposed_accents_fold_like_composed() {
        let composed = "\u{c1}vila";
        let decomposed = "A\u{301}vila";

        assert_eq!(compare_names(composed, "Azevedo"), Ordering::Less);
        assert_eq!(compare_names(decomposed, "Azevedo"), Ordering::Less);
        assert_eq!(compare_names(composed, decomposed), Ordering::Equal);
        assert_eq!(
            compare_names("Conc\u{327}eic\u{327}a\u{303}o", "Conceição"),
            Ordering::Equal
        );
    }

    #[test]
    fn test_decomposed_accent_still_breaks_ties() {
        assert_eq!(compare_names("Jose", "Jose\u{301}"), Ordering::Less);
        assert_eq!(compare_names("Jose\u{301}", "José"), Ordering::Equal);
    }
}
