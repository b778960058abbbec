//! Sibling ordering.

use std::cmp::Ordering;

/// Compare two names ignoring case.
///
/// Lowercases character by character, so no intermediate strings are
/// allocated. Names that differ only in case compare `Equal`.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case() {
        assert_eq!(cmp_ignore_case("Actor", "actor"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("actor", "Brush"), Ordering::Less);
        assert_eq!(cmp_ignore_case("Zone", "actor"), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(cmp_ignore_case("Pawn", "PawnBase"), Ordering::Less);
        assert_eq!(cmp_ignore_case("", "A"), Ordering::Less);
    }
}
