use std::collections::BTreeMap;

use super::model::{AggregatedPairCurve, AtomPair, ColumnLayout, CurveKind, ParsedFile, PairCurves};

/// Sum every interaction's columns into one curve per atom pair.
///
/// Interactions resolving to the same pair are added, not averaged. COHP
/// values are negated on the way in; COOP values are kept as written.
/// Records whose columns lie outside the matrix contribute nothing, and
/// column groups without a record are ignored.
pub fn aggregate(parsed: &ParsedFile, kind: CurveKind, layout: ColumnLayout) -> PairCurves {
    let n = parsed.energy.len();
    let sign = kind.sign();
    let matrix = &parsed.matrix;

    let groups = layout.column_groups(matrix.n_cols());
    if groups > parsed.interactions.len() {
        log::debug!(
            "{kind}: ignoring {} column groups without an interaction record",
            groups - parsed.interactions.len()
        );
    }

    let mut curves: BTreeMap<AtomPair, AggregatedPairCurve> = BTreeMap::new();
    for record in &parsed.interactions {
        let entry = curves
            .entry(record.pair.clone())
            .or_insert_with(|| AggregatedPairCurve {
                primary_sum: vec![0.0; n],
                integrated_sum: vec![0.0; n],
            });

        let (primary_col, integrated_col) = layout.columns(record.index);
        let (Some(primary), Some(integrated)) =
            (matrix.column(primary_col), matrix.column(integrated_col))
        else {
            log::warn!(
                "{kind}: interaction No.{} ({}) has no columns {primary_col}/{integrated_col}; skipped",
                record.index + 1,
                record.pair
            );
            continue;
        };

        for (acc, v) in entry.primary_sum.iter_mut().zip(&primary) {
            *acc += sign * v;
        }
        for (acc, v) in entry.integrated_sum.iter_mut().zip(&integrated) {
            *acc += sign * v;
        }
    }

    let pairs: Vec<AtomPair> = curves.keys().cloned().collect();
    PairCurves {
        kind,
        energy: parsed.energy.clone(),
        curves,
        pairs,
        interaction_count: parsed.interactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CurveMatrix, InteractionRecord};

    fn parsed(rows: Vec<Vec<f64>>, pairs: &[(&str, &str)]) -> ParsedFile {
        let lines: Vec<usize> = (1..=rows.len()).collect();
        let matrix = CurveMatrix::from_rows(rows, &lines).unwrap();
        ParsedFile {
            energy: matrix.energy(),
            matrix,
            interactions: pairs
                .iter()
                .enumerate()
                .map(|(index, (a, b))| InteractionRecord {
                    index,
                    pair: AtomPair::new(a, b),
                })
                .collect(),
        }
    }

    /// Three energies, two interactions on the same pair with primary
    /// columns `[1,2,3]` and `[4,5,6]`.
    fn same_pair_twice() -> ParsedFile {
        parsed(
            vec![
                vec![-1.0, 1.0, 0.1, 4.0, 0.4],
                vec![0.0, 2.0, 0.2, 5.0, 0.5],
                vec![1.0, 3.0, 0.3, 6.0, 0.6],
            ],
            &[("Fe", "O"), ("O", "Fe")],
        )
    }

    #[test]
    fn coop_sums_without_negation() {
        let out = aggregate(&same_pair_twice(), CurveKind::Coop, ColumnLayout::Bare);
        let curve = out.get(&AtomPair::new("Fe", "O")).unwrap();
        assert_eq!(curve.primary_sum, vec![5.0, 7.0, 9.0]);
        assert_eq!(out.pairs, vec![AtomPair::new("Fe", "O")]);
        assert_eq!(out.interaction_count, 2);
    }

    #[test]
    fn cohp_sums_are_negated() {
        let out = aggregate(&same_pair_twice(), CurveKind::Cohp, ColumnLayout::Bare);
        let curve = out.get(&AtomPair::new("Fe", "O")).unwrap();
        assert_eq!(curve.primary_sum, vec![-5.0, -7.0, -9.0]);
        let expected = [-0.5, -0.7, -0.9];
        for (got, want) in curve.integrated_sum.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn lobster_layout_skips_average_columns() {
        // energy, avg, iavg, then two interactions on different pairs
        let p = parsed(
            vec![vec![0.0, 99.0, 99.0, 1.0, 2.0, 3.0, 4.0]],
            &[("Al", "Ce"), ("Co", "Co")],
        );
        let out = aggregate(&p, CurveKind::Coop, ColumnLayout::Lobster);
        assert_eq!(out.get(&AtomPair::new("Al", "Ce")).unwrap().primary_sum, vec![1.0]);
        assert_eq!(out.get(&AtomPair::new("Al", "Ce")).unwrap().integrated_sum, vec![2.0]);
        // last ordinal reads the last two columns
        assert_eq!(out.get(&AtomPair::new("Co", "Co")).unwrap().primary_sum, vec![3.0]);
        assert_eq!(out.get(&AtomPair::new("Co", "Co")).unwrap().integrated_sum, vec![4.0]);
    }

    #[test]
    fn pairs_are_sorted_and_distinct() {
        let p = parsed(
            vec![vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]],
            &[("O", "O"), ("Fe", "O"), ("O", "Fe")],
        );
        let out = aggregate(&p, CurveKind::Coop, ColumnLayout::Bare);
        assert_eq!(out.pairs, vec![AtomPair::new("Fe", "O"), AtomPair::new("O", "O")]);
    }

    #[test]
    fn excess_column_groups_are_ignored() {
        let p = parsed(vec![vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]], &[("Fe", "O")]);
        let out = aggregate(&p, CurveKind::Coop, ColumnLayout::Bare);
        assert_eq!(out.get(&AtomPair::new("Fe", "O")).unwrap().primary_sum, vec![1.0]);
    }

    #[test]
    fn records_beyond_the_matrix_contribute_nothing() {
        let p = parsed(vec![vec![0.0, 1.0, 1.0]], &[("Fe", "O"), ("Fe", "O"), ("Al", "Al")]);
        let out = aggregate(&p, CurveKind::Coop, ColumnLayout::Bare);
        assert_eq!(out.get(&AtomPair::new("Fe", "O")).unwrap().primary_sum, vec![1.0]);
        assert_eq!(out.get(&AtomPair::new("Al", "Al")).unwrap().primary_sum, vec![0.0]);
    }

    #[test]
    fn no_records_means_no_pairs() {
        let p = parsed(vec![vec![0.0, 1.0, 1.0]], &[]);
        let out = aggregate(&p, CurveKind::Cohp, ColumnLayout::Lobster);
        assert!(out.is_empty());
        assert_eq!(out.energy, vec![0.0]);
    }
}
