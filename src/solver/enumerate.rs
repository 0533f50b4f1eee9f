// vim: set ai et ts=4 sw=4 sts=4:
use super::super::grid::CellState::{self, TentativeEmpty, TentativeFilled};

/// One admissible layout of a line: the number of blank squares preceding each run.
///
/// The first blank may be zero, every later one is at least one. Whatever
/// length is left after the last run is trailing blank space.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Placement {
    pub blanks: Vec<usize>,
}

impl Placement {
    pub fn layout(&self, hints: &[usize], length: usize) -> Vec<CellState> {
        let mut line = Vec::with_capacity(length);
        for (&blank, &run) in self.blanks.iter().zip(hints) {
            line.extend(std::iter::repeat(TentativeEmpty).take(blank));
            line.extend(std::iter::repeat(TentativeFilled).take(run));
        }
        line.resize(length, TentativeEmpty);
        line
    }
}

/// Every placement of `hints` within a line of `length` squares.
///
/// An unsatisfiable line simply yields no placements.
pub fn enumerate(length: usize, hints: &[usize]) -> Vec<Placement> {
    let mut result = Vec::new();
    let mut blanks = Vec::with_capacity(hints.len());
    extend(length, hints, &mut blanks, &mut result);
    result
}

fn extend(remaining: usize, hints: &[usize], blanks: &mut Vec<usize>, result: &mut Vec<Placement>) {
    // recursion depth is bounded by the number of runs
    let idx = blanks.len();
    if idx == hints.len() {
        result.push(Placement { blanks: blanks.clone() });
        return;
    }
    let run = hints[idx];
    let mut blank: usize = if idx == 0 { 0 } else { 1 };
    while blank.checked_add(run).map_or(false, |n| n <= remaining) {
        blanks.push(blank);
        extend(remaining - blank - run, hints, blanks, result);
        blanks.pop();
        blank += 1;
    }
}

/// Number of placements `enumerate` yields for an empty line: C(length - sum + 1, runs).
///
/// Run lengths too large to add up simply admit no placement.
pub fn count_placements(length: usize, hints: &[usize]) -> u128 {
    let k = hints.len();
    if k == 0 {
        return 1;
    }
    let needed = hints.iter()
                      .try_fold(0usize, |sum, &run| sum.checked_add(run))
                      .and_then(|filled| filled.checked_add(k - 1).map(|n| (filled, n)));
    match needed {
        Some((filled, n)) if n <= length => binomial((length - filled) as u128 + 1, k as u128),
        _                                => 0,
    }
}

fn binomial(n: u128, k: u128) -> u128 {
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blanks(placements: &[Placement]) -> Vec<Vec<usize>> {
        placements.iter().map(|p| p.blanks.clone()).collect()
    }

    #[test]
    fn single_run_slides_across_the_line() {
        assert_eq!(blanks(&enumerate(4, &[2])), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn later_runs_keep_a_gap() {
        assert_eq!(blanks(&enumerate(5, &[1, 2])),
                   vec![vec![0, 1], vec![0, 2], vec![1, 1]]);
    }

    #[test]
    fn exact_fit_has_one_placement() {
        assert_eq!(blanks(&enumerate(7, &[3, 3])), vec![vec![0, 1]]);
    }

    #[test]
    fn empty_hints_yield_one_empty_placement() {
        let placements = enumerate(3, &[]);
        assert_eq!(blanks(&placements), vec![Vec::<usize>::new()]);
        assert_eq!(placements[0].layout(&[], 3), vec![TentativeEmpty; 3]);
    }

    #[test]
    fn overlong_hints_yield_nothing() {
        assert!(enumerate(3, &[5]).is_empty());
        assert!(enumerate(4, &[2, 2]).is_empty());
        assert_eq!(count_placements(4, &[2, 2]), 0);
    }

    #[test]
    fn huge_runs_do_not_overflow() {
        assert!(enumerate(1, &[1, usize::MAX]).is_empty());
        assert!(enumerate(usize::MAX, &[usize::MAX, 1]).is_empty());
        assert_eq!(count_placements(1, &[1, usize::MAX]), 0);
        assert_eq!(count_placements(usize::MAX, &[usize::MAX, usize::MAX]), 0);
        assert_eq!(count_placements(usize::MAX, &[usize::MAX]), 1);
    }

    #[test]
    fn enumeration_matches_binomial_count() {
        let cases: &[(usize, &[usize])] = &[
            (1, &[1]),
            (5, &[1]),
            (10, &[3, 1, 2]),
            (15, &[1, 1, 1, 1]),
            (20, &[4, 4, 4]),
            (12, &[]),
            (0, &[]),
        ];
        for &(length, hints) in cases {
            assert_eq!(enumerate(length, hints).len() as u128,
                       count_placements(length, hints),
                       "length {} hints {:?}", length, hints);
        }
        assert_eq!(count_placements(10, &[3, 1, 2]), 10);
        assert_eq!(count_placements(20, &[4, 4, 4]), 84);
    }

    #[test]
    fn layout_places_runs_after_blanks() {
        let placement = Placement { blanks: vec![1, 2] };
        assert_eq!(placement.layout(&[2, 1], 7),
                   vec![TentativeEmpty, TentativeFilled, TentativeFilled,
                        TentativeEmpty, TentativeEmpty, TentativeFilled, TentativeEmpty]);
    }
}
