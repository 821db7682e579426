//! Horizontal coordinate assignment and couple re-centering

use crate::frame::Frame;
use crate::LayoutConfig;
use kinship_domain::Sex;

/// Tolerance for coordinate comparisons
pub(crate) const EPSILON: f64 = 1e-6;

/// Working x coordinates plus the in-layer couple pairing
pub(crate) struct Arrangement {
    pub xs: Vec<f64>,
    pub mates: Vec<Option<usize>>,
}

impl Arrangement {
    /// The pair ordered left to right by current x, ties by index
    pub fn ordered(&self, a: usize, b: usize) -> (usize, usize) {
        match self.xs[a].total_cmp(&self.xs[b]) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => (a.min(b), a.max(b)),
        }
    }

    /// Put a couple at `center`, keeping the given left/right order
    pub fn place_couple(&mut self, left: usize, right: usize, center: f64, config: &LayoutConfig) {
        let offset = config.partner_offset();
        self.xs[left] = center - offset;
        self.xs[right] = center + offset;
    }
}

pub(crate) fn centroid(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Centre of the next free slot of the given width
fn allocate(cursor: &mut f64, width: f64) -> f64 {
    let center = *cursor + width / 2.0;
    *cursor += width;
    center
}

/// First couple candidate of `i` in the same layer that is still free
fn pick_mate(frame: &Frame, layers: &[usize], placed: &[bool], i: usize) -> Option<usize> {
    frame
        .couple_candidates(i)
        .into_iter()
        .find(|&j| j != i && !placed[j] && layers[j] == layers[i])
}

/// Assign initial x coordinates, deepest layer first
///
/// Couples centre over their shared children and solo nodes over their own
/// children; anything without placed children takes the next free slot.
/// The slot cursor is shared by all layers, so results depend on insertion
/// order and nothing else.
pub(crate) fn assign_coordinates(
    frame: &Frame,
    layers: &[usize],
    buckets: &[Vec<usize>],
    config: &LayoutConfig,
) -> Arrangement {
    let n = frame.len();
    let mut arrangement = Arrangement {
        xs: vec![0.0; n],
        mates: vec![None; n],
    };
    let mut placed = vec![false; n];
    let mut cursor = 0.0;

    for bucket in buckets.iter().rev() {
        for &i in bucket {
            if placed[i] {
                continue;
            }

            match pick_mate(frame, layers, &placed, i) {
                Some(j) => {
                    let anchored = frame
                        .shared_children(i, j)
                        .into_iter()
                        .filter(|&c| placed[c])
                        .map(|c| arrangement.xs[c]);
                    let center = centroid(anchored)
                        .unwrap_or_else(|| allocate(&mut cursor, config.couple_width()));

                    // Female on the left
                    let (left, right) =
                        if frame.sexes[i] == Sex::Male && frame.sexes[j] == Sex::Female {
                            (j, i)
                        } else {
                            (i, j)
                        };
                    arrangement.place_couple(left, right, center, config);
                    arrangement.mates[i] = Some(j);
                    arrangement.mates[j] = Some(i);
                    placed[i] = true;
                    placed[j] = true;
                }
                None => {
                    let anchored = frame.children[i]
                        .iter()
                        .copied()
                        .filter(|&c| placed[c])
                        .map(|c| arrangement.xs[c]);
                    arrangement.xs[i] = centroid(anchored)
                        .unwrap_or_else(|| allocate(&mut cursor, config.node_width));
                    placed[i] = true;
                }
            }
        }
    }

    arrangement
}

/// Re-tighten every couple and re-centre its shared children under it
///
/// Runs top-down so a couple moved by its parents' pass re-centres its own
/// children in the next layer.
pub(crate) fn recenter_couples(
    frame: &Frame,
    buckets: &[Vec<usize>],
    arrangement: &mut Arrangement,
    config: &LayoutConfig,
) {
    for bucket in buckets {
        for &i in bucket {
            let Some(j) = arrangement.mates[i] else {
                continue;
            };
            if j < i {
                continue;
            }

            let (left, right) = arrangement.ordered(i, j);
            let mid = (arrangement.xs[left] + arrangement.xs[right]) / 2.0;
            arrangement.place_couple(left, right, mid, config);

            let shared = frame.shared_children(left, right);
            let Some(current) = centroid(shared.iter().map(|&c| arrangement.xs[c])) else {
                continue;
            };
            let dx = mid - current;
            if dx.abs() <= EPSILON {
                continue;
            }

            let mut moved: Vec<usize> = Vec::new();
            for child in shared {
                for member in std::iter::once(child).chain(arrangement.mates[child]) {
                    if !moved.contains(&member) {
                        arrangement.xs[member] += dx;
                        moved.push(member);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layering::{assign_layers, bucket_by_layer};
    use kinship_domain::{NewEdge, NewNode, NodeId};
    use kinship_store::FamilyGraph;

    fn add(graph: &mut FamilyGraph, label: &str, sex: Sex) -> NodeId {
        graph.add_node(NewNode::new(label, sex)).unwrap().value
    }

    fn arrange(graph: &FamilyGraph) -> (Frame, Arrangement) {
        let frame = Frame::build(graph);
        let layers = assign_layers(&frame);
        let buckets = bucket_by_layer(&layers);
        let config = LayoutConfig::default();
        let mut arrangement = assign_coordinates(&frame, &layers, &buckets, &config);
        recenter_couples(&frame, &buckets, &mut arrangement, &config);
        (frame, arrangement)
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid([1.0, 3.0]), Some(2.0));
        assert_eq!(centroid(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_couple_centred_over_children_female_left() {
        let mut graph = FamilyGraph::new();
        // Male inserted first so the swap rule is exercised
        let father = add(&mut graph, "father", Sex::Male);
        let mother = add(&mut graph, "mother", Sex::Female);
        let a = add(&mut graph, "brother", Sex::Male);
        let b = add(&mut graph, "sister", Sex::Female);
        graph.add_edge(NewEdge::partner(father, mother)).unwrap();
        for child in [a, b] {
            graph.add_edge(NewEdge::parent(father, child)).unwrap();
            graph.add_edge(NewEdge::parent(mother, child)).unwrap();
        }

        let (frame, arrangement) = arrange(&graph);
        let x = |id: NodeId| arrangement.xs[frame.ids.iter().position(|&n| n == id).unwrap()];
        let config = LayoutConfig::default();

        assert!(x(mother) < x(father));
        assert!((x(father) - x(mother) - 2.0 * config.partner_offset()).abs() < EPSILON);
        let parents_mid = (x(father) + x(mother)) / 2.0;
        let children_mid = (x(a) + x(b)) / 2.0;
        assert!((parents_mid - children_mid).abs() < EPSILON);
    }

    #[test]
    fn test_childless_nodes_take_successive_slots() {
        let mut graph = FamilyGraph::new();
        let first = add(&mut graph, "first", Sex::Female);
        let second = add(&mut graph, "second", Sex::Male);

        let (frame, arrangement) = arrange(&graph);
        let config = LayoutConfig::default();
        let i = frame.ids.iter().position(|&n| n == first).unwrap();
        let j = frame.ids.iter().position(|&n| n == second).unwrap();

        assert!((arrangement.xs[j] - arrangement.xs[i] - config.node_width).abs() < EPSILON);
    }
}
