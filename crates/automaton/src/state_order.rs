#![forbid(unsafe_code)]

//! The total order on state identifiers. It determines the order of states in
//! an automaton, of target sets and therefore also the identifiers produced by
//! the subset construction, so every call site must use [`compare_state_ids`].

use std::cmp::Ordering;

/// Compares two state identifiers.
///
/// Numeric identifiers compare by their value and sort before all other
/// identifiers, which compare lexicographically (a strict prefix sorts first).
pub fn compare_state_ids(left: &str, right: &str) -> Ordering {
    match (is_numeric(left), is_numeric(right)) {
        (true, true) => {
            let left_digits = left.trim_start_matches('0');
            let right_digits = right.trim_start_matches('0');

            // Equal values with different leading zeros are ordered by the raw text.
            left_digits
                .len()
                .cmp(&right_digits.len())
                .then_with(|| left_digits.cmp(right_digits))
                .then_with(|| left.cmp(right))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.cmp(right),
    }
}

/// Returns true iff the identifier consists of ASCII digits only.
fn is_numeric(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|byte| byte.is_ascii_digit())
}
