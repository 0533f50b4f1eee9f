// vim: set ai et ts=4 sw=4 sts=4:
use super::enumerate::Placement;
use super::super::grid::CellState::{self, *};

/// Outcome of intersecting a line with its surviving placements.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Merge {
    /// The working line: committed squares as they were, new deductions as
    /// `TentativeFilled`/`TentativeEmpty`, undecided squares as `Conflicting`
    /// (or `Unset` when no placement survived).
    pub line: Vec<CellState>,
    pub derived_any: bool,
}

fn contradicts(trial: CellState, committed: CellState) -> bool {
    (trial == TentativeEmpty && committed == Filled) || (trial == TentativeFilled && committed == Empty)
}

/// Drops every placement that contradicts a committed square of `snapshot`
/// and folds the survivors into a single working line.
///
/// `candidates` is pruned in place and never grows.
pub fn merge(snapshot: &[CellState], hints: &[usize], candidates: &mut Vec<Placement>) -> Merge {
    let mut line = snapshot.to_vec();
    candidates.retain(|placement| {
        let trial = placement.layout(hints, snapshot.len());
        if trial.iter().zip(snapshot).any(|(&t, &c)| contradicts(t, c)) {
            return false;
        }
        for (square, &mark) in line.iter_mut().zip(&trial) {
            *square = match (*square, mark) {
                (Unset, mark)                          => mark,
                (TentativeEmpty, TentativeFilled)      => Conflicting,
                (TentativeFilled, TentativeEmpty)      => Conflicting,
                (current, _)                           => current,
            };
        }
        true
    });

    let derived_any = line.iter().any(|&s| s == TentativeFilled || s == TentativeEmpty);
    Merge { line, derived_any }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::enumerate::enumerate;

    fn resolved(line: &[CellState]) -> Vec<CellState> {
        line.iter().map(|s| s.resolved()).collect()
    }

    #[test]
    fn overlap_of_a_long_run_is_derived() {
        let hints = [4];
        let mut candidates = enumerate(6, &hints);
        let merged = merge(&[Unset; 6], &hints, &mut candidates);
        assert!(merged.derived_any);
        assert_eq!(resolved(&merged.line), vec![Unset, Unset, Filled, Filled, Unset, Unset]);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn committed_squares_prune_candidates() {
        let hints = [1];
        let mut candidates = enumerate(3, &hints);
        let merged = merge(&[Unset, Unset, Filled], &hints, &mut candidates);
        assert_eq!(candidates, vec![Placement { blanks: vec![2] }]);
        assert_eq!(merged.line, vec![TentativeEmpty, TentativeEmpty, Filled]);
        assert!(merged.derived_any);
    }

    #[test]
    fn no_overlap_means_nothing_derived() {
        let hints = [1];
        let mut candidates = enumerate(2, &hints);
        let merged = merge(&[Unset, Unset], &hints, &mut candidates);
        assert!(!merged.derived_any);
        assert_eq!(merged.line, vec![Conflicting, Conflicting]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn exhausted_candidates_leave_the_line_untouched() {
        let hints = [2];
        let mut candidates = enumerate(3, &hints);
        let merged = merge(&[Filled, Empty, Filled], &hints, &mut candidates);
        assert!(candidates.is_empty());
        assert!(!merged.derived_any);
        assert_eq!(merged.line, vec![Filled, Empty, Filled]);
    }

    #[test]
    fn merge_is_idempotent_once_committed() {
        let hints = [2, 1];
        let mut snapshot = vec![Unset, Unset, Unset, Empty, Unset, Unset];
        let mut candidates = enumerate(snapshot.len(), &hints);
        let first = merge(&snapshot, &hints, &mut candidates);
        assert!(first.derived_any);
        snapshot = resolved(&first.line);
        let survivors = candidates.clone();

        let second = merge(&snapshot, &hints, &mut candidates);
        assert!(!second.derived_any);
        assert_eq!(resolved(&second.line), snapshot);
        assert_eq!(candidates, survivors);
    }

    #[test]
    fn candidates_only_shrink() {
        let hints = [1, 1];
        let mut candidates = enumerate(5, &hints);
        let mut previous = candidates.len();
        let snapshots = [
            vec![Unset, Unset, Unset, Unset, Unset],
            vec![Filled, Unset, Unset, Unset, Unset],
            vec![Filled, Empty, Unset, Unset, Filled],
        ];
        for snapshot in &snapshots {
            merge(snapshot, &hints, &mut candidates);
            assert!(candidates.len() <= previous);
            previous = candidates.len();
        }
        assert_eq!(candidates, vec![Placement { blanks: vec![0, 3] }]);
    }
}
