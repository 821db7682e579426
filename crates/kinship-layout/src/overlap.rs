//! Per-layer overlap resolution over atomic units

use crate::placement::{Arrangement, EPSILON};
use crate::LayoutConfig;

/// A solo node or a couple, moved as one piece
#[derive(Debug, Clone)]
pub(crate) struct Unit {
    /// Members in left-to-right order
    pub members: Vec<usize>,
    pub center: f64,
    pub width: f64,
    /// Smallest member index, the tie-break key
    pub key: usize,
}

impl Unit {
    pub fn left(&self) -> f64 {
        self.center - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + self.width / 2.0
    }

    pub fn solo(i: usize, arrangement: &Arrangement, config: &LayoutConfig) -> Self {
        Unit {
            members: vec![i],
            center: arrangement.xs[i],
            width: config.node_width,
            key: i,
        }
    }

    pub fn couple(a: usize, b: usize, arrangement: &Arrangement, config: &LayoutConfig) -> Self {
        let (left, right) = arrangement.ordered(a, b);
        Unit {
            members: vec![left, right],
            center: (arrangement.xs[left] + arrangement.xs[right]) / 2.0,
            width: config.couple_width(),
            key: a.min(b),
        }
    }
}

/// Units of one layer, each node in exactly one unit, sorted by (centre, key)
pub(crate) fn units_in(bucket: &[usize], arrangement: &Arrangement, config: &LayoutConfig) -> Vec<Unit> {
    let mut seen = vec![false; arrangement.xs.len()];
    let mut units = Vec::new();

    for &i in bucket {
        if seen[i] {
            continue;
        }
        seen[i] = true;
        match arrangement.mates[i] {
            Some(j) if !seen[j] => {
                seen[j] = true;
                units.push(Unit::couple(i, j, arrangement, config));
            }
            _ => units.push(Unit::solo(i, arrangement, config)),
        }
    }

    units.sort_by(|a, b| a.center.total_cmp(&b.center).then(a.key.cmp(&b.key)));
    units
}

/// Push overlapping units right until every layer is overlap-free
///
/// Returns the number of units moved.
pub(crate) fn resolve_overlaps(
    buckets: &[Vec<usize>],
    arrangement: &mut Arrangement,
    config: &LayoutConfig,
) -> usize {
    buckets
        .iter()
        .map(|bucket| resolve_layer(bucket, arrangement, config))
        .sum()
}

fn resolve_layer(bucket: &[usize], arrangement: &mut Arrangement, config: &LayoutConfig) -> usize {
    let mut moved = 0;
    let mut previous_right: Option<f64> = None;

    for unit in units_in(bucket, arrangement, config) {
        let mut right = unit.right();
        if let Some(limit) = previous_right {
            let dx = limit - unit.left();
            if dx > EPSILON {
                for &member in &unit.members {
                    arrangement.xs[member] += dx;
                }
                right += dx;
                moved += 1;
            }
        }
        previous_right = Some(right);
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrangement(xs: Vec<f64>, mates: Vec<Option<usize>>) -> Arrangement {
        Arrangement { xs, mates }
    }

    #[test]
    fn test_solo_units_pushed_apart() {
        let config = LayoutConfig::default();
        let mut arr = arrangement(vec![0.0, 10.0, 20.0], vec![None; 3]);
        let moved = resolve_overlaps(&[vec![0, 1, 2]], &mut arr, &config);

        assert_eq!(moved, 2);
        assert_eq!(arr.xs, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_couple_moves_as_one_unit() {
        let config = LayoutConfig::default();
        // Solo node at 0, couple centred at 50
        let mut arr = arrangement(vec![0.0, 5.0, 95.0], vec![None, Some(2), Some(1)]);
        resolve_overlaps(&[vec![0, 1, 2]], &mut arr, &config);

        let center = (arr.xs[1] + arr.xs[2]) / 2.0;
        assert!((center - (50.0 + 90.0)).abs() < EPSILON);
        assert!((arr.xs[2] - arr.xs[1] - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_separated_units_untouched() {
        let config = LayoutConfig::default();
        let mut arr = arrangement(vec![0.0, 500.0], vec![None; 2]);
        assert_eq!(resolve_overlaps(&[vec![0, 1]], &mut arr, &config), 0);
        assert_eq!(arr.xs, vec![0.0, 500.0]);
    }

    #[test]
    fn test_equal_centres_break_ties_by_index() {
        let config = LayoutConfig::default();
        let mut arr = arrangement(vec![30.0, 30.0], vec![None; 2]);
        resolve_overlaps(&[vec![1, 0]], &mut arr, &config);
        assert_eq!(arr.xs, vec![30.0, 130.0]);
    }
}
