// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Merges overlapping runs into the minimal set of maximal contiguous
/// index runs.
///
/// All indices are flattened into one set, deduplicated, sorted
/// ascending, and partitioned wherever successive indices differ by
/// more than one. The operation is idempotent: collapsing runs that
/// are already disjoint and maximal returns them unchanged. It never
/// adds or loses flagged indices, only reshapes them.
pub fn collapse_runs(runs: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut indices: Vec<usize> = runs.iter().flatten().copied().collect();
    indices.sort_unstable();
    indices.dedup();

    let mut collapsed: Vec<Vec<usize>> = vec![];
    for index in indices {
        match collapsed.last_mut() {
            Some(run) if index == run[run.len() - 1] + 1 => run.push(index),
            _ => collapsed.push(vec![index]),
        }
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::collapse_runs;

    #[test]
    fn empty_input_collapses_to_empty() {
        assert!(collapse_runs(&[]).is_empty());
        assert!(collapse_runs(&[vec![], vec![]]).is_empty());
    }

    #[test]
    fn overlapping_windows_merge_into_one_range() {
        let runs = vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]];
        assert_eq!(collapse_runs(&runs), vec![vec![0, 1, 2, 3, 4]]);
    }

    #[test]
    fn gaps_split_into_separate_ranges() {
        let runs = vec![vec![0, 1], vec![5, 6], vec![6, 7], vec![9]];
        assert_eq!(
            collapse_runs(&runs),
            vec![vec![0, 1], vec![5, 6, 7], vec![9]]
        );
    }

    #[test]
    fn unordered_and_duplicated_indices_are_normalized() {
        let runs = vec![vec![4, 5], vec![2, 3, 4], vec![2, 3]];
        assert_eq!(collapse_runs(&runs), vec![vec![2, 3, 4, 5]]);
    }

    #[test]
    fn single_point_runs_survive() {
        let runs = vec![vec![46]];
        assert_eq!(collapse_runs(&runs), vec![vec![46]]);
    }

    #[test]
    fn collapse_is_idempotent() {
        let runs = vec![vec![0, 1, 2], vec![2, 3], vec![7, 8], vec![10]];
        let once = collapse_runs(&runs);
        let twice = collapse_runs(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn collapse_preserves_the_flagged_index_set() {
        let runs = vec![vec![3, 4, 5], vec![5, 6], vec![9, 10], vec![4]];
        let collapsed = collapse_runs(&runs);
        let mut before: Vec<usize> = runs.iter().flatten().copied().collect();
        before.sort_unstable();
        before.dedup();
        let after: Vec<usize> = collapsed.into_iter().flatten().collect();
        assert_eq!(before, after);
    }
}
