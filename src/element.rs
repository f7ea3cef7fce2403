//! Tagged element values
//!
//! Game elements cross component boundaries as either numbers (Set A, Venn
//! divisor problems) or single-character symbols (Set B, letter problems).
//! A discriminated type keeps that explicit instead of stringly-typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A primitive game element: numeric or symbolic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Num(i64),
    Sym(char),
}

impl Element {
    /// Numeric value, if this is a number
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Element::Num(n) => Some(*n),
            Element::Sym(_) => None,
        }
    }

    /// Symbol, if this is a character
    pub fn as_sym(&self) -> Option<char> {
        match self {
            Element::Num(_) => None,
            Element::Sym(c) => Some(*c),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Num(n) => write!(f, "{}", n),
            Element::Sym(c) => write!(f, "{}", c),
        }
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Num(n)
    }
}

impl From<char> for Element {
    fn from(c: char) -> Self {
        Element::Sym(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Element::Num(12).to_string(), "12");
        assert_eq!(Element::Sym('b').to_string(), "b");
    }

    #[test]
    fn test_ordering_is_total() {
        // Numbers and symbols sort into disjoint runs, so BTreeSet keys work
        let mut v = vec![Element::Sym('a'), Element::Num(3), Element::Num(1)];
        v.sort();
        assert_eq!(v, vec![Element::Num(1), Element::Num(3), Element::Sym('a')]);
    }
}
