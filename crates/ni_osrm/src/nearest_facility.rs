use std::{cmp::Ordering, collections::BTreeMap};

use fxhash::FxHashSet;

use crate::{durations_table::Seconds, matrix_row::MatrixRow};

fn compare_durations(a: Seconds, b: Seconds) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// For every origin, the row with the shortest duration to one of the
/// `eligible` destinations.
///
/// Missing durations rank after every known one. Ties keep the row that came
/// first in `rows`. The result is ordered by origin identifier.
pub fn nearest_facilities<'a, S: AsRef<str>>(
    rows: &[MatrixRow<'a>],
    eligible: &[S],
) -> Vec<MatrixRow<'a>> {
    let eligible = eligible
        .iter()
        .map(|code| code.as_ref())
        .collect::<FxHashSet<&str>>();

    let mut candidates = rows
        .iter()
        .filter(|row| eligible.contains(row.to))
        .collect::<Vec<_>>();

    // stable, so equal durations keep input order
    candidates.sort_by(|a, b| compare_durations(a.duration, b.duration));

    let mut nearest: BTreeMap<&str, &MatrixRow<'a>> = BTreeMap::new();
    for row in candidates {
        nearest.entry(row.from).or_insert(row);
    }

    nearest.into_values().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(from: &'a str, to: &'a str, duration: Option<f64>) -> MatrixRow<'a> {
        MatrixRow { duration, to, from }
    }

    #[test]
    fn test_nearest_facilities() {
        let rows = vec![
            row("X", "P", Some(5.0)),
            row("X", "Q", Some(3.0)),
            row("Y", "P", Some(7.0)),
        ];

        let nearest = nearest_facilities(&rows, &["P", "Q"]);

        assert_eq!(
            nearest,
            vec![row("X", "Q", Some(3.0)), row("Y", "P", Some(7.0))]
        );
    }

    #[test]
    fn test_ineligible_destinations_are_ignored() {
        let rows = vec![
            row("X", "P", Some(5.0)),
            row("X", "R", Some(1.0)),
            row("Z", "R", Some(2.0)),
        ];

        let nearest = nearest_facilities(&rows, &["P"]);

        assert_eq!(nearest, vec![row("X", "P", Some(5.0))]);
    }

    #[test]
    fn test_ties_keep_first_row() {
        let rows = vec![row("X", "Q", Some(4.0)), row("X", "P", Some(4.0))];

        let nearest = nearest_facilities(&rows, &["P", "Q"]);

        assert_eq!(nearest, vec![row("X", "Q", Some(4.0))]);
    }

    #[test]
    fn test_missing_durations_rank_last() {
        let rows = vec![
            row("X", "P", None),
            row("X", "Q", Some(900.0)),
            row("Y", "P", None),
        ];

        let nearest = nearest_facilities(&rows, &["P", "Q"]);

        assert_eq!(
            nearest,
            vec![row("X", "Q", Some(900.0)), row("Y", "P", None)]
        );
    }

    #[test]
    fn test_sorted_by_origin() {
        let rows = vec![
            row("C", "P", Some(1.0)),
            row("A", "P", Some(3.0)),
            row("B", "P", Some(2.0)),
        ];

        let nearest = nearest_facilities(&rows, &["P"]);
        let origins = nearest.iter().map(|r| r.from).collect::<Vec<_>>();

        assert_eq!(origins, vec!["A", "B", "C"]);
    }
}
