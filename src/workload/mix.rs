//! Fixed-ratio operation mixes
//!
//! A mix maps an operation index to one of the three list operations by
//! the index modulo 10, never by set membership: a delete routinely
//! targets an absent value and a search often targets a value another
//! worker just inserted. That stress pattern is deliberate. Given the same
//! `(value, op_index)` pair a mix always issues the same call, so an
//! operation stream replays identically across runs and implementations.

use std::fmt;

use crate::list::ListOps;

/// A single list operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    Delete,
    Search,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Search => "search",
        }
    }
}

/// Supported operation mixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mix {
    /// 60% insert, 20% delete, 20% search
    InsertHeavy,
    /// 10% insert, 10% delete, 80% search
    ReadHeavy,
    /// 40% insert, 40% delete, 20% search
    WriteHeavy,
}

impl Mix {
    /// Every mix, in canonical run order.
    pub const ALL: [Mix; 3] = [Mix::InsertHeavy, Mix::ReadHeavy, Mix::WriteHeavy];

    /// Parse mix name from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "insert-heavy" | "insert_heavy" | "insertheavy" => Some(Self::InsertHeavy),
            "read-heavy" | "read_heavy" | "readheavy" => Some(Self::ReadHeavy),
            "write-heavy" | "write_heavy" | "writeheavy" => Some(Self::WriteHeavy),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertHeavy => "insert-heavy",
            Self::ReadHeavy => "read-heavy",
            Self::WriteHeavy => "write-heavy",
        }
    }

    /// Human-readable ratio description
    pub fn describe(&self) -> &'static str {
        match self {
            Self::InsertHeavy => "60% insert, 20% delete, 20% search",
            Self::ReadHeavy => "10% insert, 10% delete, 80% search",
            Self::WriteHeavy => "40% insert, 40% delete, 20% search",
        }
    }

    /// Which operation this mix issues at the given index.
    ///
    /// Pure in `op_index`; only the index modulo 10 matters.
    pub fn op_at(&self, op_index: u64) -> Op {
        let slot = op_index % 10;
        match self {
            Self::InsertHeavy => match slot {
                0..=5 => Op::Insert,
                6..=7 => Op::Delete,
                _ => Op::Search,
            },
            Self::ReadHeavy => match slot {
                0 => Op::Insert,
                1 => Op::Delete,
                _ => Op::Search,
            },
            Self::WriteHeavy => match slot {
                0..=3 => Op::Insert,
                4..=7 => Op::Delete,
                _ => Op::Search,
            },
        }
    }

    /// Issue exactly one list call for this iteration.
    ///
    /// Returns the operation performed and its boolean outcome.
    pub fn apply<L: ListOps + ?Sized>(&self, list: &L, value: i64, op_index: u64) -> (Op, bool) {
        let op = self.op_at(op_index);
        let outcome = match op {
            Op::Insert => list.insert(value),
            Op::Delete => list.delete(value),
            Op::Search => list.search(value),
        };
        (op, outcome)
    }
}

impl fmt::Display for Mix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::CoarseList;

    fn ratio(mix: Mix) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for op_index in 0..10 {
            match mix.op_at(op_index) {
                Op::Insert => counts.0 += 1,
                Op::Delete => counts.1 += 1,
                Op::Search => counts.2 += 1,
            }
        }
        counts
    }

    #[test]
    fn test_parse_mix_names() {
        assert_eq!(Mix::parse("insert-heavy"), Some(Mix::InsertHeavy));
        assert_eq!(Mix::parse("READ-HEAVY"), Some(Mix::ReadHeavy));
        assert_eq!(Mix::parse("write_heavy"), Some(Mix::WriteHeavy));
        assert_eq!(Mix::parse("unknown"), None);
    }

    #[test]
    fn test_ratios_exact() {
        assert_eq!(ratio(Mix::InsertHeavy), (6, 2, 2));
        assert_eq!(ratio(Mix::ReadHeavy), (1, 1, 8));
        assert_eq!(ratio(Mix::WriteHeavy), (4, 4, 2));
    }

    #[test]
    fn test_op_at_is_index_periodic() {
        for mix in Mix::ALL {
            for op_index in 0..10u64 {
                assert_eq!(mix.op_at(op_index), mix.op_at(op_index + 10));
                assert_eq!(mix.op_at(op_index), mix.op_at(op_index + 1000));
            }
        }
    }

    #[test]
    fn test_apply_performs_one_operation() {
        let list = CoarseList::new();

        // Index 0 is an insert in every mix
        let (op, ok) = Mix::InsertHeavy.apply(&list, 42, 0);
        assert_eq!(op, Op::Insert);
        assert!(ok);
        assert!(list.search(42));

        // Re-inserting reports the ordinary duplicate outcome
        let (_, ok) = Mix::InsertHeavy.apply(&list, 42, 0);
        assert!(!ok);

        // Index 1 under read-heavy is a delete
        let (op, ok) = Mix::ReadHeavy.apply(&list, 42, 1);
        assert_eq!(op, Op::Delete);
        assert!(ok);
        assert!(!list.search(42));

        // Searches never mutate
        let (op, ok) = Mix::ReadHeavy.apply(&list, 42, 5);
        assert_eq!(op, Op::Search);
        assert!(!ok);
    }
}
