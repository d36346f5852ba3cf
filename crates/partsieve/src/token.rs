//! Operator tokens of the per-field query language.
//!
//! A field query is either plain text or text split by exactly one
//! [`Operator`]. [`tokenize`] finds every operator occurrence in a single
//! pass so that the parser can reject ambiguous input before splitting.

/// Operator token inside a field query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`: ascending bound chain, `lower < field < upper`.
    Lt,
    /// `>`: descending bound chain, `upper > field > lower`.
    Gt,
    /// `+-`: tolerance range, `center +- tolerance`.
    PlusMinus,
}

impl Operator {
    /// Returns the source text of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::PlusMinus => "+-",
        }
    }

    /// Byte length of the operator in the query text.
    pub fn width(self) -> usize {
        self.as_str().len()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator occurrences found in one query text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    found: Vec<(usize, Operator)>,
}

impl Tokens {
    /// Returns `true` if the text holds no operator.
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Number of operator occurrences.
    pub fn len(&self) -> usize {
        self.found.len()
    }

    /// Returns the byte offset and operator when exactly one is present.
    pub fn single(&self) -> Option<(usize, Operator)> {
        match self.found.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Iterates over the operators in source order.
    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.found.iter().map(|(_, op)| *op)
    }
}

/// Scans `text` once and records every operator with its byte offset.
///
/// A `+` only forms an operator when immediately followed by `-`; lone `+`
/// and `-` characters are ordinary text.
///
/// ```
/// use partsieve::{tokenize, Operator};
///
/// let tokens = tokenize("10+-2");
/// assert_eq!(tokens.single(), Some((2, Operator::PlusMinus)));
/// assert_eq!(tokenize("<5>10").len(), 2);
/// ```
pub fn tokenize(text: &str) -> Tokens {
    let mut found = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '<' => found.push((pos, Operator::Lt)),
            '>' => found.push((pos, Operator::Gt)),
            '+' if matches!(chars.peek(), Some((_, '-'))) => {
                chars.next();
                found.push((pos, Operator::PlusMinus));
            }
            _ => {}
        }
    }

    Tokens { found }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_tokens() {
        assert!(tokenize("0805").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize("10-2").is_empty());
        assert!(tokenize("+5").is_empty());
    }

    #[test]
    fn single_operators() {
        assert_eq!(tokenize("<10").single(), Some((0, Operator::Lt)));
        assert_eq!(tokenize("5<").single(), Some((1, Operator::Lt)));
        assert_eq!(tokenize("10k>2k").single(), Some((3, Operator::Gt)));
        assert_eq!(tokenize("10+-2").single(), Some((2, Operator::PlusMinus)));
    }

    #[test]
    fn multiple_operators_in_order() {
        let tokens = tokenize("<5>10");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.single(), None);
        let ops: Vec<_> = tokens.operators().collect();
        assert_eq!(ops, vec![Operator::Lt, Operator::Gt]);

        let ops: Vec<_> = tokenize("1+-2<3>4").operators().collect();
        assert_eq!(ops, vec![Operator::PlusMinus, Operator::Lt, Operator::Gt]);
    }

    #[test]
    fn repeated_operator_counts_twice() {
        assert_eq!(tokenize("1<2<3").len(), 2);
    }

    #[test]
    fn offsets_are_bytes() {
        // 'µ' is two bytes wide.
        assert_eq!(tokenize("µ<3").single(), Some((2, Operator::Lt)));
    }

    #[test]
    fn operator_display() {
        assert_eq!(Operator::Lt.to_string(), "<");
        assert_eq!(Operator::Gt.to_string(), ">");
        assert_eq!(Operator::PlusMinus.to_string(), "+-");
        assert_eq!(Operator::PlusMinus.width(), 2);
    }
}
