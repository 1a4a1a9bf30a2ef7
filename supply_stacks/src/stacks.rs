use std::{collections::BTreeMap, iter::from_fn};

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::moves::Move;

/// Which crane performs the moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneModel {
    /// Moves one crate at a time, reversing a moved block.
    CrateMover9000,
    /// Moves a whole block at once, keeping its order.
    CrateMover9001,
}

impl CraneModel {
    pub fn preserves_order(self) -> bool {
        matches!(self, CraneModel::CrateMover9001)
    }
}

impl From<bool> for CraneModel {
    fn from(preserve_order: bool) -> Self {
        if preserve_order {
            CraneModel::CrateMover9001
        } else {
            CraneModel::CrateMover9000
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StacksParseError {
    #[error("Missing stacks description")]
    MissingLabelRow,

    #[error("Stack label {label:?} in column {column} is not a single digit")]
    InvalidLabel { column: usize, label: char },

    #[error("Stack label {0} appears more than once")]
    DuplicateLabel(u32),

    #[error("Row {row} of the diagram is too short to reach column {column}")]
    ShortRow { row: usize, column: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("No stack labelled {0}")]
    UnknownStack(u32),
}

/// Crate stacks keyed by their label, each stored bottom-to-top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stacks {
    stacks: BTreeMap<u32, Vec<char>>,
}

impl Stacks {
    /// Builds the stacks from the diagram rows; the last row holds the labels.
    pub fn from_diagram(lines: &[impl AsRef<str>]) -> Result<Self, StacksParseError> {
        let (label_row, crate_rows) = lines
            .split_last()
            .ok_or(StacksParseError::MissingLabelRow)?;

        let crate_rows = crate_rows
            .iter()
            .map(|row| row.as_ref().chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut stacks = BTreeMap::new();

        for (column, label) in label_row.as_ref().chars().enumerate() {
            if label.is_whitespace() {
                continue;
            }

            let id = label
                .to_digit(10)
                .ok_or(StacksParseError::InvalidLabel { column, label })?;

            let stack = crate_rows
                .iter()
                .enumerate()
                .rev()
                .map(|(row, chars)| {
                    chars
                        .get(column)
                        .copied()
                        .ok_or(StacksParseError::ShortRow { row, column })
                })
                .filter(|c| !matches!(c, Ok(' ')))
                .collect::<Result<Vec<_>, _>>()?;

            if stacks.insert(id, stack).is_some() {
                return Err(StacksParseError::DuplicateLabel(id));
            }
        }

        let stacks = Self { stacks };
        debug!(
            stacks = stacks.len(),
            crates = stacks.crate_count(),
            "built stacks from diagram"
        );

        Ok(stacks)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn get(&self, id: u32) -> Option<&[char]> {
        self.stacks.get(&id).map(Vec::as_slice)
    }

    pub fn crate_count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Applies one move and returns how many crates were actually moved.
    ///
    /// A source running out of crates ends the move early.
    pub fn apply(&mut self, mv: &Move, crane: CraneModel) -> Result<usize, MoveError> {
        for id in [mv.from, mv.to] {
            if !self.stacks.contains_key(&id) {
                return Err(MoveError::UnknownStack(id));
            }
        }

        let available = self.stacks.get(&mv.from).map_or(0, Vec::len);
        let moved = mv.count.min(available);

        // Popping and pushing back onto the same stack leaves it as it was,
        // whichever crane is used.
        if mv.from != mv.to {
            // Can't hold both stacks mutably at once, so the lifted crates wait
            // here, topmost first.
            let mut lifted = Vec::with_capacity(moved);
            if let Some(from) = self.stacks.get_mut(&mv.from) {
                lifted.extend(from_fn(|| from.pop()).take(moved));
            }

            if let Some(to) = self.stacks.get_mut(&mv.to) {
                if crane.preserves_order() {
                    to.extend(lifted.into_iter().rev());
                } else {
                    to.extend(lifted);
                }
            }
        }

        if moved < mv.count {
            warn!(
                requested = mv.count,
                moved,
                from = mv.from,
                "source stack ran out of crates"
            );
        }
        trace!(moved, from = mv.from, to = mv.to, ?crane, "applied move");

        Ok(moved)
    }

    pub fn execute<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a Move>,
        crane: CraneModel,
    ) -> Result<&mut Self, MoveError> {
        for mv in moves {
            self.apply(mv, crane)?;
        }

        Ok(self)
    }

    /// Pops the top crate of every stack, in label order. Empty stacks are skipped.
    pub fn take_top_crates(&mut self) -> String {
        self.stacks.values_mut().filter_map(Vec::pop).collect()
    }
}
