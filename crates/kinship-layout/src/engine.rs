//! The layout pipeline and its result type

use crate::frame::Frame;
use crate::layering::{assign_layers, bucket_by_layer};
use crate::overlap::resolve_overlaps;
use crate::placement::{assign_coordinates, recenter_couples};
use crate::sides::pack_sides;
use crate::{LayoutConfig, Viewport};
use kinship_domain::{NodeId, PedigreeView, Point};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Computes node coordinates for a pedigree
///
/// The engine holds no state between runs: every call recomputes from
/// scratch, and the same graph with the same insertion order always yields
/// the same coordinates.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given geometry
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The geometry in use
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out every node of `view`
    ///
    /// Returns an empty layout when the pedigree has no ego.
    pub fn compute<V: PedigreeView + ?Sized>(&self, view: &V, viewport: Option<Viewport>) -> Layout {
        if view.ego().is_none() {
            warn!("No ego node in pedigree, skipping layout");
            return Layout::default();
        }

        let config = &self.config;
        let frame = Frame::build(view);
        let layers = assign_layers(&frame);
        let buckets = bucket_by_layer(&layers);

        let mut arrangement = assign_coordinates(&frame, &layers, &buckets, config);
        recenter_couples(&frame, &buckets, &mut arrangement, config);
        let mut moved = resolve_overlaps(&buckets, &mut arrangement, config);
        if pack_sides(&frame, &layers, &buckets, &mut arrangement, config) {
            moved += resolve_overlaps(&buckets, &mut arrangement, config);
        }

        debug!(
            nodes = frame.len(),
            layers = buckets.len(),
            overlaps_resolved = moved,
            "Layout computed"
        );

        // Final translation
        let min_x = arrangement.xs.iter().copied().fold(f64::INFINITY, f64::min);
        let mut points: Vec<Point> = arrangement
            .xs
            .iter()
            .zip(&layers)
            .map(|(&x, &layer)| {
                Point::new(
                    x - min_x + config.origin_x,
                    config.origin_y + layer as f64 * config.layer_height,
                )
            })
            .collect();

        if let Some(viewport) = viewport {
            center_in(&mut points, viewport);
        }

        let mut couples = Vec::new();
        for (i, mate) in arrangement.mates.iter().enumerate() {
            if let Some(j) = *mate {
                if i < j {
                    let (left, right) = arrangement.ordered(i, j);
                    couples.push((frame.ids[left], frame.ids[right]));
                }
            }
        }

        Layout {
            positions: frame.ids.iter().copied().zip(points).collect(),
            layers: frame.ids.iter().copied().zip(layers).collect(),
            couples,
        }
    }
}

/// Translate so the bounding box of node centres sits in the middle of the viewport
fn center_in(points: &mut [Point], viewport: Viewport) {
    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), p| (a.min(p.x), b.max(p.x), c.min(p.y), d.max(p.y)),
    );
    if !min_x.is_finite() {
        return;
    }
    let dx = (viewport.width - (max_x - min_x)) / 2.0 - min_x;
    let dy = (viewport.height - (max_y - min_y)) / 2.0 - min_y;
    for p in points {
        p.x += dx;
        p.y += dy;
    }
}

/// Result of a layout run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: HashMap<NodeId, Point>,
    layers: HashMap<NodeId, usize>,
    couples: Vec<(NodeId, NodeId)>,
}

impl Layout {
    /// Coordinates of a node
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Generation of a node, 0 at the top
    pub fn layer(&self, id: NodeId) -> Option<usize> {
        self.layers.get(&id).copied()
    }

    /// Number of positioned nodes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if nothing was laid out
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions, in no particular order
    pub fn positions(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.positions.iter().map(|(&id, &p)| (id, p))
    }

    /// Couples drawn as units, each ordered left to right
    pub fn couples(&self) -> &[(NodeId, NodeId)] {
        &self.couples
    }

    /// Number of generations
    pub fn layer_count(&self) -> usize {
        self.layers.values().max().map_or(0, |&deepest| deepest + 1)
    }
}
