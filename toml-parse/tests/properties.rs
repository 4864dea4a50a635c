//! Property tests for the two invariants SPEC_FULL.md commits to:
//! integer width promotion is monotonic in digit count, and flattening a
//! parsed document's object tree back to dotted-key paths never invents a
//! key absent from the source.

use std::collections::HashSet;

use indexmap::IndexMap;
use quickcheck_macros::quickcheck;
use toml_parse::{decode_integer, Number, Value};

/// Ranks a decoded integer's width tier. Higher means wider.
fn rank(n: &Number) -> u8 {
    match n {
        Number::I32(_) => 0,
        Number::I64(_) => 1,
        Number::BigInt(_) => 2,
        Number::Float(_) => panic!("decode_integer never returns a float"),
    }
}

/// Padding a based (`0x`/`0o`/`0b`) literal's digits with a leading zero can
/// only hold its width tier steady or widen it, never narrow it: the ladder
/// picks a tier purely from digit count (`numeric::decode_based`), and more
/// digits only ever cross a threshold upward.
#[quickcheck]
fn integer_width_promotion_is_monotonic_in_digit_count(extra_zeros: u8, seed: u32) -> bool {
    let extra_zeros = (extra_zeros % 40) as usize;
    let digits = format!("{:x}", seed as u64 + 1);
    let padded = format!("{}{}", "0".repeat(extra_zeros), digits);

    let short = decode_integer(&format!("0x{digits}")).expect("valid hex literal");
    let long = decode_integer(&format!("0x{padded}")).expect("valid hex literal");

    rank(&long) >= rank(&short)
}

/// Restricts a raw string down to the bare-key alphabet, falling back to a
/// fixed key when nothing usable survives — mirrors `toml-lex`'s own
/// `bare_key_chars` helper in `tests/key_properties.rs`.
fn bare_key_chars(raw: &str, fallback: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if filtered.is_empty() {
        fallback.to_string()
    } else {
        filtered
    }
}

/// Recursively walks a parsed `Value::Object` tree, collecting the
/// dot-joined path of every leaf (non-object) value it finds.
fn flatten_leaf_paths(object: &IndexMap<String, Value>, prefix: &str, out: &mut HashSet<String>) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_leaf_paths(nested, &path, out),
            _ => {
                out.insert(path);
            }
        }
    }
}

/// Builds a handful of three-segment dotted-key assignments from arbitrary
/// index triples (mapped into a small fixed alphabet so the keys are valid
/// and the paths are all the same depth, which keeps any two paths from
/// sharing a prefix relationship), parses the result, flattens it back out,
/// and checks no path surfaces that wasn't one of the assignments written.
#[quickcheck]
fn re_flattening_never_invents_keys(raw_triples: Vec<(u8, u8, u8, String)>) -> bool {
    const ALPHABET: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

    let mut seen_paths: HashSet<String> = HashSet::new();
    let mut source = String::new();
    for (i, (a, b, c, salt)) in raw_triples.iter().enumerate() {
        let seg0 = ALPHABET[*a as usize % ALPHABET.len()];
        let seg1 = bare_key_chars(salt, &format!("seg1{i}"));
        let seg2 = ALPHABET[*c as usize % ALPHABET.len()];
        let path = format!("{seg0}.{seg1}.{seg2}");
        if !seen_paths.insert(path.clone()) {
            continue;
        }
        source.push_str(&format!("{path} = {}\n", *b as i64));
    }

    if seen_paths.is_empty() {
        return true;
    }

    let parsed = match toml_parse::parse(&source) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let root = match parsed.as_object() {
        Some(o) => o,
        None => return false,
    };

    let mut flattened = HashSet::new();
    flatten_leaf_paths(root, "", &mut flattened);

    flattened.is_subset(&seen_paths) && seen_paths.is_subset(&flattened)
}
