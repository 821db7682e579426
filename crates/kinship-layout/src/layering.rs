//! Generation (layer) assignment
//!
//! Three monotone passes are repeated until none of them changes anything:
//!
//! 1. Longest-path propagation: `layer(child) >= layer(parent) + 1`
//! 2. Pull toward children: a node sits directly above its highest child,
//!    so married-in roots drop to their partner's generation
//! 3. Couple alignment: both members of a couple take the larger layer
//!
//! Every pass only raises layers and no layer exceeds `len - 1`, so the loop
//! terminates even on malformed (cyclic) input.

use crate::frame::Frame;
use std::collections::VecDeque;

/// Layer per node index
pub(crate) fn assign_layers(frame: &Frame) -> Vec<usize> {
    let ceiling = frame.len().saturating_sub(1);
    let mut layers = vec![0usize; frame.len()];

    loop {
        let mut changed = propagate_down(frame, &mut layers, ceiling);
        changed |= pull_toward_children(frame, &mut layers);
        changed |= align_couples(frame, &mut layers);
        if !changed {
            break;
        }
    }

    layers
}

/// Node indices grouped by layer, index order inside each layer
pub(crate) fn bucket_by_layer(layers: &[usize]) -> Vec<Vec<usize>> {
    let Some(&deepest) = layers.iter().max() else {
        return Vec::new();
    };
    let mut buckets = vec![Vec::new(); deepest + 1];
    for (i, &layer) in layers.iter().enumerate() {
        buckets[layer].push(i);
    }
    buckets
}

fn propagate_down(frame: &Frame, layers: &mut [usize], ceiling: usize) -> bool {
    let mut changed = false;
    // Parentless nodes come first in the queue; the rest are seeded so that
    // nodes raised by the other passes push their descendants down too.
    let (roots, rest): (Vec<usize>, Vec<usize>) =
        (0..frame.len()).partition(|&i| frame.parents[i].is_empty());
    let mut queue: VecDeque<usize> = roots.into_iter().chain(rest).collect();

    while let Some(u) = queue.pop_front() {
        let next = layers[u] + 1;
        if next > ceiling {
            continue;
        }
        for &child in &frame.children[u] {
            if layers[child] < next {
                layers[child] = next;
                changed = true;
                queue.push_back(child);
            }
        }
    }

    changed
}

fn pull_toward_children(frame: &Frame, layers: &mut [usize]) -> bool {
    let mut changed = false;
    for i in 0..frame.len() {
        let Some(nearest) = frame.children[i].iter().map(|&c| layers[c]).min() else {
            continue;
        };
        let target = nearest.saturating_sub(1);
        if target > layers[i] {
            layers[i] = target;
            changed = true;
        }
    }
    changed
}

fn align_couples(frame: &Frame, layers: &mut [usize]) -> bool {
    let mut changed = false;
    for &(a, b, _) in &frame.couples {
        let layer = layers[a].max(layers[b]);
        if layers[a] != layer || layers[b] != layer {
            layers[a] = layer;
            layers[b] = layer;
            changed = true;
        }
    }
    changed
}
