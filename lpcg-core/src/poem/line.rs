//! Poem line nodes and the context/recitation lookups made on them.

use super::PoemChain;
use crate::notes::NoteFields;

/// Context text standing in for everything before the first line.
pub const BEGINNING_TEXT: &str = "[Beginning]";

/// One node of a [`PoemChain`]. Links are indices into the chain's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoemLine {
    /// Sentinel before the first line (sequence 0). Only context lookups
    /// may reach it; it is never recited and never becomes a note.
    Beginning { successor: Option<usize> },
    /// An ordinary line of the poem.
    Single {
        seq: usize,
        text: String,
        predecessor: usize,
        successor: Option<usize>,
    },
    /// Several physical lines tested together as one virtual line.
    Grouped {
        seq: usize,
        text: Vec<String>,
        predecessor: usize,
        successor: Option<usize>,
    },
}

impl PoemLine {
    pub fn seq(&self) -> usize {
        match self {
            Self::Beginning { .. } => 0,
            Self::Single { seq, .. } | Self::Grouped { seq, .. } => *seq,
        }
    }

    pub fn predecessor(&self) -> Option<usize> {
        match self {
            Self::Beginning { .. } => None,
            Self::Single { predecessor, .. } | Self::Grouped { predecessor, .. } => {
                Some(*predecessor)
            }
        }
    }

    pub fn successor(&self) -> Option<usize> {
        match self {
            Self::Beginning { successor }
            | Self::Single { successor, .. }
            | Self::Grouped { successor, .. } => *successor,
        }
    }

    pub(super) fn set_successor(&mut self, index: usize) {
        match self {
            Self::Beginning { successor }
            | Self::Single { successor, .. }
            | Self::Grouped { successor, .. } => *successor = Some(index),
        }
    }

    /// The lines this node contributes when it appears as context.
    fn push_context(&self, out: &mut Vec<String>) {
        match self {
            Self::Beginning { .. } => out.push(BEGINNING_TEXT.to_string()),
            Self::Single { text, .. } => out.push(text.clone()),
            Self::Grouped { text, .. } => out.extend_from_slice(text),
        }
    }

    /// The lines the learner recites for this node.
    ///
    /// # Panics
    /// On the `Beginning` sentinel, which has nothing to recite.
    pub fn text(&self) -> &[String] {
        match self {
            Self::Beginning { .. } => {
                panic!("the beginning of the poem has no text to recite")
            }
            Self::Single { text, .. } => std::slice::from_ref(text),
            Self::Grouped { text, .. } => text,
        }
    }
}

/// A real (non-sentinel) line of a chain, with the chain it lives in.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    chain: &'a PoemChain,
    index: usize,
}

impl<'a> LineRef<'a> {
    pub(super) fn new(chain: &'a PoemChain, index: usize) -> Self {
        assert!(index != 0, "the beginning sentinel is not a poem line");
        Self { chain, index }
    }

    fn node(&self) -> &'a PoemLine {
        self.chain.node(self.index)
    }

    pub fn seq(&self) -> usize {
        self.node().seq()
    }

    /// This node's own lines.
    pub fn text(&self) -> &'a [String] {
        self.node().text()
    }

    /// The previous line, or `None` if this is the first line.
    pub fn predecessor(&self) -> Option<LineRef<'a>> {
        self.node()
            .predecessor()
            .filter(|&index| index != 0)
            .map(|index| LineRef::new(self.chain, index))
    }

    pub fn successor(&self) -> Option<LineRef<'a>> {
        self.node()
            .successor()
            .map(|index| LineRef::new(self.chain, index))
    }

    /// The text of up to `lines` nodes before this one, oldest first.
    ///
    /// The beginning sentinel counts as one node, so asking for more context
    /// than exists yields `[Beginning]` followed by every earlier line.
    pub fn context(&self, lines: usize) -> Vec<String> {
        let mut visited = Vec::new();
        let mut cursor = self.node().predecessor();

        while visited.len() < lines {
            let Some(index) = cursor else {
                break;
            };
            let node = self.chain.node(index);
            visited.push(node);
            cursor = node.predecessor();
        }

        let mut context = Vec::new();
        for node in visited.into_iter().rev() {
            node.push_context(&mut context);
        }
        context
    }

    /// This node's lines plus those of up to `lines - 1` following nodes.
    pub fn recitation(&self, lines: usize) -> Vec<String> {
        let mut text = Vec::new();
        let mut cursor = Some(self.index);

        for _ in 0..lines.max(1) {
            let Some(index) = cursor else {
                break;
            };
            let node = self.chain.node(index);
            text.extend_from_slice(node.text());
            cursor = node.successor();
        }

        text
    }

    /// `[...N]` when the learner must recite N > 1 physical lines here.
    ///
    /// N is worked out for this node rather than taken from the setting,
    /// since near the end of the poem fewer lines remain.
    pub fn prompt(&self, recite_lines: usize) -> Option<String> {
        let lines_to_recite = self.recitation(recite_lines).len();
        (lines_to_recite > 1).then(|| format!("[...{lines_to_recite}]"))
    }

    /// Render the note fields testing this line.
    pub fn populate(&self, context_lines: usize, recite_lines: usize) -> NoteFields {
        NoteFields {
            sequence: self.seq().to_string(),
            context: paragraphs(&self.context(context_lines)),
            line: paragraphs(&self.recitation(recite_lines)),
            prompt: self.prompt(recite_lines),
        }
    }
}

fn paragraphs(lines: &[String]) -> String {
    lines.iter().map(|line| format!("<p>{line}</p>")).collect()
}
