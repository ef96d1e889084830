//! Edit distances over chars.

use std::cmp::min;

/// Damerau-Levenshtein distance (optimal string alignment): insertions, deletions,
/// substitutions and transpositions of adjacent chars each cost one.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = Vec::new();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ca) in a.iter().enumerate() {
        let last = i.checked_sub(1).map(|k| a[k]);
        let next = osa_row(&b, &prev, &row, last, ca);
        prev = std::mem::replace(&mut row, next);
    }

    row[b.len()]
}

/// Bounded variant; `None` when the distance exceeds `max`.
pub fn damerau_levenshtein_within(a: &str, b: &str, max: usize) -> Option<usize> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max {
        return None;
    }

    let distance = damerau_levenshtein(a, b);
    (distance <= max).then_some(distance)
}

/// One row of the optimal-string-alignment table.
///
/// `prev` is row `i - 2` (empty for the first row), `row` is row `i - 1`, `last` the
/// char consumed before `ch`.
pub(crate) fn osa_row(
    target: &[char],
    prev: &[usize],
    row: &[usize],
    last: Option<char>,
    ch: char,
) -> Vec<usize> {
    let mut next = Vec::with_capacity(row.len());
    next.push(row[0] + 1);

    for j in 1..row.len() {
        let cost = usize::from(target[j - 1] != ch);
        let mut value = min(
            min(
                row[j] + 1,      // deletion
                next[j - 1] + 1, // insertion
            ),
            row[j - 1] + cost, // substitution
        );

        if j > 1 && !prev.is_empty() && ch == target[j - 2] && last == Some(target[j - 1]) {
            value = min(value, prev[j - 2] + 1); // transposition
        }

        next.push(value);
    }

    next
}
