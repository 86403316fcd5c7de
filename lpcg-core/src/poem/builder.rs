//! Building the linked chain of poem lines from cleaned text.

use super::line::{LineRef, PoemLine};

/// Every line of one poem, linked front to back.
///
/// Nodes live in an arena; index 0 is the beginning sentinel and each real
/// line's index equals its sequence number.
#[derive(Debug, Clone)]
pub struct PoemChain {
    nodes: Vec<PoemLine>,
}

impl PoemChain {
    /// Build the chain from normalized lines.
    ///
    /// With `group_lines` of 1 every line is its own node. Otherwise the
    /// lines are split into consecutive groups of `group_lines`, the last
    /// group holding whatever remains.
    pub fn build(text_lines: &[String], group_lines: usize) -> Self {
        let group_lines = group_lines.max(1);
        let mut chain = Self {
            nodes: vec![PoemLine::Beginning { successor: None }],
        };

        if group_lines == 1 {
            for line in text_lines {
                chain.push(|seq, predecessor| PoemLine::Single {
                    seq,
                    text: line.clone(),
                    predecessor,
                    successor: None,
                });
            }
        } else {
            for group in text_lines.chunks(group_lines) {
                chain.push(|seq, predecessor| PoemLine::Grouped {
                    seq,
                    text: group.to_vec(),
                    predecessor,
                    successor: None,
                });
            }
        }

        log::debug!(
            "Built {} poem line(s) from {} text line(s) in groups of {}",
            chain.len(),
            text_lines.len(),
            group_lines
        );
        chain
    }

    /// Append a node after the current last one and link the two.
    fn push(&mut self, make: impl FnOnce(usize, usize) -> PoemLine) {
        let index = self.nodes.len();
        let predecessor = index - 1;
        self.nodes.push(make(index, predecessor));
        self.nodes[predecessor].set_successor(index);
    }

    pub(super) fn node(&self, index: usize) -> &PoemLine {
        &self.nodes[index]
    }

    /// Number of poem lines, not counting the sentinel.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The line with the given sequence number (1-based).
    pub fn line(&self, seq: usize) -> Option<LineRef<'_>> {
        (1..self.nodes.len())
            .contains(&seq)
            .then(|| LineRef::new(self, seq))
    }

    /// All poem lines in sequence order.
    pub fn lines(&self) -> impl Iterator<Item = LineRef<'_>> + '_ {
        (1..self.nodes.len()).map(move |index| LineRef::new(self, index))
    }
}
