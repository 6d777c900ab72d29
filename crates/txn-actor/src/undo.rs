//! # Undo Log
//!
//! The change log of one open transaction. Savepoints are markers placed between
//! changes; rolling back to a savepoint truncates the log to its marker and hands
//! the truncated changes back, newest first, for the actor to revert.

use crate::error::TxError;

#[derive(Debug)]
enum Entry<C> {
    Change(C),
    Savepoint(String),
}

/// Ordered log of changes and savepoint markers for a single transaction.
#[derive(Debug)]
pub struct UndoLog<C> {
    entries: Vec<Entry<C>>,
}

impl<C> Default for UndoLog<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> UndoLog<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends the changes of one successful statement.
    pub fn record(&mut self, changes: impl IntoIterator<Item = C>) {
        self.entries.extend(changes.into_iter().map(Entry::Change));
    }

    /// Number of recorded changes, excluding markers.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Change(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_savepoint(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Places a savepoint marker. An existing savepoint with the same name is moved here.
    pub fn savepoint(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(pos) = self.position(&name) {
            self.entries.remove(pos);
        }
        self.entries.push(Entry::Savepoint(name));
    }

    /// Truncates the log back to the named savepoint and returns the removed
    /// changes newest first. The savepoint itself stays in place; later
    /// savepoints are discarded.
    pub fn rollback_to(&mut self, name: &str) -> Result<Vec<C>, TxError> {
        let pos = self
            .position(name)
            .ok_or_else(|| TxError::SavepointNotFound(name.to_string()))?;
        let tail = self.entries.split_off(pos + 1);
        Ok(Self::changes_newest_first(tail))
    }

    /// Removes the named savepoint and every savepoint created after it.
    /// Changes are kept.
    pub fn release(&mut self, name: &str) -> Result<(), TxError> {
        let pos = self
            .position(name)
            .ok_or_else(|| TxError::SavepointNotFound(name.to_string()))?;
        let mut index = 0;
        self.entries.retain(|e| {
            let keep = index < pos || matches!(e, Entry::Change(_));
            index += 1;
            keep
        });
        Ok(())
    }

    /// Consumes the log, returning every change newest first.
    pub fn into_reverted(self) -> Vec<C> {
        Self::changes_newest_first(self.entries)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| matches!(e, Entry::Savepoint(n) if n == name))
    }

    fn changes_newest_first(entries: Vec<Entry<C>>) -> Vec<C> {
        entries
            .into_iter()
            .rev()
            .filter_map(|e| match e {
                Entry::Change(c) => Some(c),
                Entry::Savepoint(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_to_keeps_earlier_changes_and_marker() {
        let mut log = UndoLog::new();
        log.record([1, 2]);
        log.savepoint("order_insert");
        log.record([3, 4]);

        let reverted = log.rollback_to("order_insert").unwrap();
        assert_eq!(reverted, vec![4, 3]);
        assert_eq!(log.len(), 2);
        assert!(log.has_savepoint("order_insert"));

        // Rolling back again to the same marker is allowed and reverts nothing new.
        log.record([5]);
        assert_eq!(log.rollback_to("order_insert").unwrap(), vec![5]);
    }

    #[test]
    fn test_rollback_to_discards_later_savepoints() {
        let mut log = UndoLog::new();
        log.savepoint("a");
        log.record([1]);
        log.savepoint("b");
        log.record([2]);

        assert_eq!(log.rollback_to("a").unwrap(), vec![2, 1]);
        assert!(log.has_savepoint("a"));
        assert!(!log.has_savepoint("b"));
    }

    #[test]
    fn test_reusing_a_name_moves_the_savepoint() {
        let mut log = UndoLog::new();
        log.savepoint("sp");
        log.record([1]);
        log.savepoint("sp");
        log.record([2]);

        assert_eq!(log.rollback_to("sp").unwrap(), vec![2]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_release_drops_marker_and_later_markers_only() {
        let mut log = UndoLog::new();
        log.record([1]);
        log.savepoint("a");
        log.record([2]);
        log.savepoint("b");
        log.record([3]);

        log.release("a").unwrap();
        assert!(!log.has_savepoint("a"));
        assert!(!log.has_savepoint("b"));
        assert_eq!(log.len(), 3);
        assert_eq!(log.into_reverted(), vec![3, 2, 1]);
    }

    #[test]
    fn test_unknown_savepoint() {
        let mut log: UndoLog<u8> = UndoLog::new();
        assert!(matches!(
            log.rollback_to("missing"),
            Err(TxError::SavepointNotFound(name)) if name == "missing"
        ));
        assert!(matches!(log.release("missing"), Err(TxError::SavepointNotFound(_))));
    }
}
