//! Longest-contiguous-match correlation over sequences of diff units.
//!
//! This backs the inline word differ. The algorithm finds the longest
//! contiguous matching run between two unit arrays, then recursively
//! processes the non-matching portions on either side. It is not the
//! classic non-contiguous LCS; the recursion is what recovers all
//! matches, and it keeps segment boundaries contiguous, which is what a
//! redline needs.

/// How a correlated range relates the two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStatus {
    Unchanged,
    Deleted,
    Inserted,
}

/// A contiguous range of units with one status. `items1` comes from the
/// original sequence (absent for insertions), `items2` from the modified
/// one (absent for deletions).
#[derive(Debug, Clone)]
pub struct CorrelatedSequence<T> {
    pub status: CorrelationStatus,
    pub items1: Option<Vec<T>>,
    pub items2: Option<Vec<T>>,
}

impl<T> CorrelatedSequence<T> {
    pub fn unchanged(items1: Vec<T>, items2: Vec<T>) -> Self {
        Self {
            status: CorrelationStatus::Unchanged,
            items1: Some(items1),
            items2: Some(items2),
        }
    }

    pub fn deleted(items1: Vec<T>) -> Self {
        Self {
            status: CorrelationStatus::Deleted,
            items1: Some(items1),
            items2: None,
        }
    }

    pub fn inserted(items2: Vec<T>) -> Self {
        Self {
            status: CorrelationStatus::Inserted,
            items1: None,
            items2: Some(items2),
        }
    }
}

/// Start indices and length of the longest contiguous match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub i1: usize,
    pub i2: usize,
    pub length: usize,
}

/// Find the longest run of consecutive equal units. O(n·m) scan;
/// returns None when nothing matches.
pub fn find_longest_match<T: PartialEq>(items1: &[T], items2: &[T]) -> Option<MatchRange> {
    let mut best = MatchRange {
        i1: 0,
        i2: 0,
        length: 0,
    };

    for i1 in 0..items1.len() {
        for i2 in 0..items2.len() {
            let mut length = 0usize;
            while i1 + length < items1.len()
                && i2 + length < items2.len()
                && items1[i1 + length] == items2[i2 + length]
            {
                length += 1;
            }

            if length > best.length {
                best = MatchRange { i1, i2, length };
            }
        }
    }

    if best.length == 0 {
        None
    } else {
        Some(best)
    }
}

/// Correlate two unit sequences into ordered Unchanged/Deleted/Inserted
/// ranges. Deletions are emitted before insertions at a replacement
/// site.
pub fn correlate<T: PartialEq + Clone>(items1: &[T], items2: &[T]) -> Vec<CorrelatedSequence<T>> {
    if items1.is_empty() && items2.is_empty() {
        return vec![];
    }
    if items1.is_empty() {
        return vec![CorrelatedSequence::inserted(items2.to_vec())];
    }
    if items2.is_empty() {
        return vec![CorrelatedSequence::deleted(items1.to_vec())];
    }

    let Some(m) = find_longest_match(items1, items2) else {
        return vec![
            CorrelatedSequence::deleted(items1.to_vec()),
            CorrelatedSequence::inserted(items2.to_vec()),
        ];
    };

    let mut result = Vec::new();

    if m.i1 > 0 || m.i2 > 0 {
        result.extend(correlate(&items1[..m.i1], &items2[..m.i2]));
    }

    result.push(CorrelatedSequence::unchanged(
        items1[m.i1..m.i1 + m.length].to_vec(),
        items2[m.i2..m.i2 + m.length].to_vec(),
    ));

    let after1 = m.i1 + m.length;
    let after2 = m.i2 + m.length;
    if after1 < items1.len() || after2 < items2.len() {
        result.extend(correlate(&items1[after1..], &items2[after2..]));
    }

    result
}

/// Merge adjacent ranges that share a status.
pub fn flatten_correlation<T>(sequences: Vec<CorrelatedSequence<T>>) -> Vec<CorrelatedSequence<T>> {
    let mut result: Vec<CorrelatedSequence<T>> = Vec::new();

    for next in sequences {
        match result.last_mut() {
            Some(current) if current.status == next.status => {
                if let (Some(items1), Some(next1)) = (&mut current.items1, next.items1) {
                    items1.extend(next1);
                }
                if let (Some(items2), Some(next2)) = (&mut current.items2, next.items2) {
                    items2.extend(next2);
                }
            }
            _ => result.push(next),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_identical() {
        let a = vec!["a", "b", "c"];
        let b = vec!["a", "b", "c"];
        let m = find_longest_match(&a, &b).unwrap();
        assert_eq!((m.i1, m.i2, m.length), (0, 0, 3));
    }

    #[test]
    fn longest_match_interior() {
        let a = vec!["a", "b", "c", "d"];
        let b = vec!["x", "b", "c", "y"];
        let m = find_longest_match(&a, &b).unwrap();
        assert_eq!((m.i1, m.i2, m.length), (1, 1, 2));
    }

    #[test]
    fn longest_match_none() {
        let a = vec!["a"];
        let b = vec!["z"];
        assert!(find_longest_match(&a, &b).is_none());
    }

    #[test]
    fn correlate_identical_is_single_unchanged() {
        let result = correlate(&["a", "b"], &["a", "b"]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, CorrelationStatus::Unchanged);
    }

    #[test]
    fn correlate_insertion_in_middle() {
        let result = correlate(&["a", "c"], &["a", "b", "c"]);
        let statuses: Vec<_> = result.iter().map(|s| s.status).collect();
        assert!(statuses.contains(&CorrelationStatus::Inserted));
        assert!(statuses.contains(&CorrelationStatus::Unchanged));
        assert!(!statuses.contains(&CorrelationStatus::Deleted));
    }

    #[test]
    fn correlate_replacement_orders_delete_first() {
        let result = correlate(&["a", "x", "c"], &["a", "y", "c"]);
        let statuses: Vec<_> = result.iter().map(|s| s.status).collect();
        let del = statuses
            .iter()
            .position(|s| *s == CorrelationStatus::Deleted)
            .unwrap();
        let ins = statuses
            .iter()
            .position(|s| *s == CorrelationStatus::Inserted)
            .unwrap();
        assert!(del < ins);
    }

    #[test]
    fn correlate_empty_sides() {
        assert!(correlate::<&str>(&[], &[]).is_empty());

        let inserted = correlate(&[], &["a"]);
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].status, CorrelationStatus::Inserted);

        let deleted = correlate(&["a"], &[]);
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].status, CorrelationStatus::Deleted);
    }

    #[test]
    fn flatten_merges_adjacent_same_status() {
        let sequences = vec![
            CorrelatedSequence::deleted(vec!["a"]),
            CorrelatedSequence::deleted(vec!["b"]),
            CorrelatedSequence::unchanged(vec!["c"], vec!["c"]),
        ];

        let result = flatten_correlation(sequences);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].items1.as_ref().unwrap().len(), 2);
    }
}
