//! Locale-aware text ordering.
//!
//! Approximates a root-locale collator with three levels: base letters
//! (NFD, combining marks removed, full case fold), then accents, then case
//! with lowercase first. ASCII input skips the ICU work.

use icu_casemap::{CaseMapper, CaseMapperBorrowed};
use icu_normalizer::{DecomposingNormalizer, DecomposingNormalizerBorrowed};
use std::cmp::Ordering;
use std::sync::OnceLock;

fn case_mapper() -> &'static CaseMapperBorrowed<'static> {
    static CM: OnceLock<CaseMapperBorrowed<'static>> = OnceLock::new();
    CM.get_or_init(CaseMapper::new)
}

fn nfd() -> &'static DecomposingNormalizerBorrowed<'static> {
    static NFD: OnceLock<DecomposingNormalizerBorrowed<'static>> = OnceLock::new();
    NFD.get_or_init(DecomposingNormalizer::new_nfd)
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c as u32,
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F
    )
}

fn base_key(s: &str) -> String {
    if s.is_ascii() {
        return s.to_ascii_lowercase();
    }
    let stripped: String = nfd()
        .normalize(s)
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    case_mapper().fold_string(&stripped).into_owned()
}

fn accent_key(s: &str) -> String {
    if s.is_ascii() {
        return s.to_ascii_lowercase();
    }
    let decomposed = nfd().normalize(s);
    case_mapper().fold_string(&decomposed).into_owned()
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.len().cmp(&b.len())
}

pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_order(a, b))
}
