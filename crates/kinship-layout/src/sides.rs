//! Maternal/paternal side packing around the anchor couple
//!
//! The anchor couple is the generation-1 couple with the most shared
//! children in generation 2, normally the ego's parents. Their siblings are
//! packed outward: the mother's side to the left, the father's to the right.

use crate::frame::Frame;
use crate::overlap::Unit;
use crate::placement::{centroid, Arrangement};
use crate::LayoutConfig;
use kinship_domain::Sex;
use tracing::debug;

const PARENT_LAYER: usize = 1;
const CHILD_LAYER: usize = 2;

/// Pack both sides; returns false when no anchor couple exists
pub(crate) fn pack_sides(
    frame: &Frame,
    layers: &[usize],
    buckets: &[Vec<usize>],
    arrangement: &mut Arrangement,
    config: &LayoutConfig,
) -> bool {
    let Some((mother, father)) = anchor_couple(frame, layers, buckets, arrangement) else {
        return false;
    };

    let maternal: Vec<usize> = frame
        .siblings(mother)
        .into_iter()
        .filter(|&s| layers[s] == PARENT_LAYER && s != father)
        .collect();
    let paternal: Vec<usize> = frame
        .siblings(father)
        .into_iter()
        .filter(|&s| layers[s] == PARENT_LAYER && s != mother && !maternal.contains(&s))
        .collect();

    let mut claimed = vec![false; frame.len()];
    claimed[mother] = true;
    claimed[father] = true;
    let maternal_units = side_units(&maternal, arrangement, config, &mut claimed);
    let paternal_units = side_units(&paternal, arrangement, config, &mut claimed);

    debug!(
        maternal = maternal_units.len(),
        paternal = paternal_units.len(),
        "Packing sides around anchor couple"
    );

    let anchor = Unit::couple(mother, father, arrangement, config);
    let mut protected = vec![false; frame.len()];
    protected[mother] = true;
    protected[father] = true;

    // Closest unit first on each side
    let mut edge = anchor.left();
    for unit in maternal_units.iter().rev() {
        let target = edge - unit.width / 2.0;
        shift_family(frame, arrangement, unit, target - unit.center, &mut protected);
        edge -= unit.width;
    }

    let mut edge = anchor.right();
    for unit in &paternal_units {
        let target = edge + unit.width / 2.0;
        shift_family(frame, arrangement, unit, target - unit.center, &mut protected);
        edge += unit.width;
    }

    for parent in [mother, father] {
        recenter_parents_of(frame, parent, arrangement, config);
    }

    true
}

/// The anchor couple as (mother, father)
fn anchor_couple(
    frame: &Frame,
    layers: &[usize],
    buckets: &[Vec<usize>],
    arrangement: &Arrangement,
) -> Option<(usize, usize)> {
    let bucket = buckets.get(PARENT_LAYER)?;
    let mut best: Option<(usize, usize, usize)> = None;

    for &i in bucket {
        let Some(j) = arrangement.mates[i] else {
            continue;
        };
        if j < i {
            continue;
        }
        let count = frame
            .shared_children(i, j)
            .into_iter()
            .filter(|&c| layers[c] == CHILD_LAYER)
            .count();
        if count > 0 && best.map_or(true, |(_, _, top)| count > top) {
            best = Some((i, j, count));
        }
    }

    let (a, b, _) = best?;
    let pair = match (frame.sexes[a], frame.sexes[b]) {
        (Sex::Female, Sex::Male) => (a, b),
        (Sex::Male, Sex::Female) => (b, a),
        _ => arrangement.ordered(a, b),
    };
    Some(pair)
}

/// Group side members into units, pulling in their unclaimed in-layer mates
fn side_units(
    members: &[usize],
    arrangement: &Arrangement,
    config: &LayoutConfig,
    claimed: &mut [bool],
) -> Vec<Unit> {
    let mut units = Vec::new();
    for &m in members {
        if claimed[m] {
            continue;
        }
        claimed[m] = true;
        match arrangement.mates[m] {
            Some(mate) if !claimed[mate] => {
                claimed[mate] = true;
                units.push(Unit::couple(m, mate, arrangement, config));
            }
            _ => units.push(Unit::solo(m, arrangement, config)),
        }
    }
    units.sort_by(|a, b| a.center.total_cmp(&b.center).then(a.key.cmp(&b.key)));
    units
}

/// Move a unit together with its descendants and their mates
fn shift_family(
    frame: &Frame,
    arrangement: &mut Arrangement,
    unit: &Unit,
    dx: f64,
    protected: &mut [bool],
) {
    let mut stack: Vec<usize> = unit.members.clone();
    while let Some(i) = stack.pop() {
        if protected[i] {
            continue;
        }
        protected[i] = true;
        arrangement.xs[i] += dx;
        stack.extend(arrangement.mates[i]);
        stack.extend(frame.children[i].iter().copied());
    }
}

/// Centre the parents of `child` over their children again
fn recenter_parents_of(frame: &Frame, child: usize, arrangement: &mut Arrangement, config: &LayoutConfig) {
    let parents = &frame.parents[child];
    match parents.as_slice() {
        [a, b] if arrangement.mates[*a] == Some(*b) => {
            let shared = frame.shared_children(*a, *b);
            if let Some(center) = centroid(shared.iter().map(|&c| arrangement.xs[c])) {
                let (left, right) = arrangement.ordered(*a, *b);
                arrangement.place_couple(left, right, center, config);
            }
        }
        _ => {
            for &p in parents {
                if let Some(center) = centroid(frame.children[p].iter().map(|&c| arrangement.xs[c])) {
                    arrangement.xs[p] = center;
                }
            }
        }
    }
}
