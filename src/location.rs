//! Source locations and the monotonic statement-id counter.
//!
//! Every [`Statement`](crate::ast::Statement) the parser produces is wrapped in an
//! [`IdentifiedStatement`](crate::ast::Statement::IdentifiedStatement) carrying a
//! [`StatementId`] drawn from a single counter that is threaded through the whole
//! parse. The counter never goes backwards and never reuses an id, even across
//! backtracking: ids are only ever consumed by a parse that eventually succeeds,
//! so a wasted id from an abandoned alternative simply never appears in the final
//! tree.

use std::collections::HashMap;

/// A 1-indexed `(line, column)` pair referring into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Identifies one statement occurrence within a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementId(pub u32);

/// The side-table the parser fills in as it runs: every [`StatementId`] it has
/// handed out maps to the `(line, column)` of the first token of that statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationData {
    locs: HashMap<StatementId, Location>,
    counter: u32,
}

impl LocationData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a fresh, never-before-seen id. Must be called *before* the
    /// sub-parser for the statement runs, so that the id reflects the position
    /// of the statement's first token even if parsing of its interior fails
    /// and the caller backtracks past this call.
    pub fn next_id(&mut self) -> StatementId {
        let id = StatementId(self.counter);
        self.counter += 1;
        id
    }

    /// Record the source position at which `id` was minted.
    pub fn save(&mut self, id: StatementId, location: Location) {
        self.locs.insert(id, location);
    }

    pub fn get(&self, id: StatementId) -> Option<Location> {
        self.locs.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.locs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let mut locs = LocationData::new();
        let a = locs.next_id();
        let b = locs.next_id();
        assert_ne!(a, b);
        assert!(a.0 < b.0);
    }

    #[test]
    fn save_then_get_round_trips() {
        let mut locs = LocationData::new();
        let id = locs.next_id();
        locs.save(id, Location::new(3, 7));
        assert_eq!(locs.get(id), Some(Location::new(3, 7)));
    }

    #[test]
    fn unsaved_id_has_no_location() {
        let mut locs = LocationData::new();
        let id = locs.next_id();
        assert_eq!(locs.get(id), None);
    }
}
