use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of nodes on the 3x3 grid.
pub const NODE_COUNT: u8 = 9;

/// Ordered path of distinct grid nodes (0..=8, row-major).
///
/// Equality is order-sensitive: `[0, 1, 2]` and `[2, 1, 0]` differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PatternSequence(Vec<u8>);

impl PatternSequence {
    pub fn nodes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, node: u8) -> bool {
        self.0.contains(&node)
    }

    /// Append `node` unless it is already part of the path.
    /// Returns whether the node was added.
    pub(crate) fn push_unvisited(&mut self, node: u8) -> bool {
        if node >= NODE_COUNT || self.contains(node) {
            return false;
        }
        self.0.push(node);
        true
    }

    /// Parse `"0,4,8"`.
    pub fn parse_list(input: &str) -> Result<Self, ValidationError> {
        let nodes = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<u8>().map_err(|_| ValidationError::InvalidValue {
                    field: "pattern".into(),
                    message: format!("'{p}' is not a node index"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(nodes)
    }
}

impl TryFrom<Vec<u8>> for PatternSequence {
    type Error = ValidationError;

    fn try_from(nodes: Vec<u8>) -> Result<Self, Self::Error> {
        let mut seq = PatternSequence::default();
        for node in nodes {
            if node >= NODE_COUNT {
                return Err(ValidationError::InvalidPatternNode {
                    node,
                    message: format!("must be below {NODE_COUNT}"),
                });
            }
            if !seq.push_unvisited(node) {
                return Err(ValidationError::InvalidPatternNode {
                    node,
                    message: "appears more than once".into(),
                });
            }
        }
        Ok(seq)
    }
}

impl From<PatternSequence> for Vec<u8> {
    fn from(seq: PatternSequence) -> Self {
        seq.0
    }
}

impl fmt::Display for PatternSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u8::to_string).collect();
        write!(f, "[{}]", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_order_sensitive() {
        let a = PatternSequence::try_from(vec![0, 1, 2]).unwrap();
        let b = PatternSequence::try_from(vec![2, 1, 0]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_repeats_and_out_of_grid() {
        assert!(PatternSequence::try_from(vec![0, 4, 0]).is_err());
        assert!(PatternSequence::try_from(vec![9]).is_err());
    }

    #[test]
    fn parse_list() {
        let seq = PatternSequence::parse_list("0, 4,8").unwrap();
        assert_eq!(seq.nodes(), &[0, 4, 8]);
        assert_eq!(seq.to_string(), "[0,4,8]");
        assert!(PatternSequence::parse_list("0,x").is_err());
    }

    #[test]
    fn serde_validates() {
        let seq: PatternSequence = serde_json::from_str("[3,4,5]").unwrap();
        assert_eq!(serde_json::to_string(&seq).unwrap(), "[3,4,5]");
        assert!(serde_json::from_str::<PatternSequence>("[3,3]").is_err());
    }
}
