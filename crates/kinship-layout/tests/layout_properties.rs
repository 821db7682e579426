//! Structural properties of computed layouts

use kinship_domain::{NewEdge, NewNode, NodeId, PedigreeView, RelationshipType, Sex};
use kinship_layout::{Layout, LayoutConfig, LayoutEngine};
use kinship_store::FamilyGraph;
use proptest::prelude::*;
use std::collections::HashMap;

const EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    brothers: u32,
    sisters: u32,
    sons: u32,
    daughters: u32,
    maternal_uncles: u32,
    maternal_aunts: u32,
    paternal_uncles: u32,
    paternal_aunts: u32,
}

fn node(graph: &mut FamilyGraph, label: &str, sex: Sex) -> NodeId {
    graph.add_node(NewNode::new(label, sex)).unwrap().value
}

fn child_of(graph: &mut FamilyGraph, (a, b): (NodeId, NodeId), child: NodeId) {
    graph.add_edge(NewEdge::parent(a, child)).unwrap();
    graph.add_edge(NewEdge::parent(b, child)).unwrap();
}

fn couple(graph: &mut FamilyGraph, a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    graph.add_edge(NewEdge::partner(a, b)).unwrap();
    (a, b)
}

/// A seeded pedigree built directly on the store
fn census_graph(counts: Counts, ego_sex: Sex) -> FamilyGraph {
    let mut graph = FamilyGraph::new();
    let ego = graph.add_node(NewNode::new("You", ego_sex).ego()).unwrap().value;

    let mgm = node(&mut graph, "maternal grandmother", Sex::Female);
    let mgf = node(&mut graph, "maternal grandfather", Sex::Male);
    let maternal = couple(&mut graph, mgm, mgf);
    let pgm = node(&mut graph, "paternal grandmother", Sex::Female);
    let pgf = node(&mut graph, "paternal grandfather", Sex::Male);
    let paternal = couple(&mut graph, pgm, pgf);

    let mother = node(&mut graph, "mother", Sex::Female);
    child_of(&mut graph, maternal, mother);
    let father = node(&mut graph, "father", Sex::Male);
    child_of(&mut graph, paternal, father);
    let parents = couple(&mut graph, mother, father);
    child_of(&mut graph, parents, ego);

    let own = if counts.sons + counts.daughters > 0 {
        let partner = node(&mut graph, "partner", ego_sex.opposite());
        Some(couple(&mut graph, ego, partner))
    } else {
        None
    };

    let groups = [
        (counts.brothers, "brother", Sex::Male, Some(parents)),
        (counts.sisters, "sister", Sex::Female, Some(parents)),
        (counts.sons, "son", Sex::Male, own),
        (counts.daughters, "daughter", Sex::Female, own),
        (counts.maternal_uncles, "maternal uncle", Sex::Male, Some(maternal)),
        (counts.maternal_aunts, "maternal aunt", Sex::Female, Some(maternal)),
        (counts.paternal_uncles, "paternal uncle", Sex::Male, Some(paternal)),
        (counts.paternal_aunts, "paternal aunt", Sex::Female, Some(paternal)),
    ];
    for (count, label, sex, pair) in groups {
        let Some(pair) = pair else { continue };
        for _ in 0..count {
            let id = node(&mut graph, label, sex);
            child_of(&mut graph, pair, id);
        }
    }

    graph
}

fn assert_layer_monotonic(graph: &FamilyGraph, layout: &Layout) {
    for edge in graph.edges() {
        let (s, t) = (layout.layer(edge.source).unwrap(), layout.layer(edge.target).unwrap());
        match edge.relationship {
            RelationshipType::Parent => assert!(t > s, "child above parent on {}", edge.id),
            _ => assert_eq!(s, t, "couple split across layers on {}", edge.id),
        }
    }
}

fn assert_no_overlap(graph: &FamilyGraph, layout: &Layout, config: &LayoutConfig) {
    let mut mate: HashMap<NodeId, NodeId> = HashMap::new();
    for &(a, b) in layout.couples() {
        mate.insert(a, b);
        mate.insert(b, a);
    }

    let mut per_layer: HashMap<usize, Vec<(f64, f64)>> = HashMap::new();
    for n in graph.nodes() {
        let p = layout.position(n.id).unwrap();
        let layer = layout.layer(n.id).unwrap();
        match mate.get(&n.id) {
            Some(&m) => {
                // Count each couple once, from its left member
                let q = layout.position(m).unwrap();
                if p.x < q.x || (p.x == q.x && n.id < m) {
                    per_layer
                        .entry(layer)
                        .or_default()
                        .push(((p.x + q.x) / 2.0, config.couple_width()));
                }
            }
            None => per_layer.entry(layer).or_default().push((p.x, config.node_width)),
        }
    }

    for (layer, mut units) in per_layer {
        units.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in units.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            let needed = (pair[0].1 + pair[1].1) / 2.0;
            assert!(gap + EPS >= needed, "layer {} overlap: gap {} < {}", layer, gap, needed);
        }
    }

    // Only the two halves of a couple may sit closer than one node width
    let nodes = graph.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if layout.layer(a.id) != layout.layer(b.id) || mate.get(&a.id) == Some(&b.id) {
                continue;
            }
            let gap = (layout.position(a.id).unwrap().x - layout.position(b.id).unwrap().x).abs();
            assert!(
                gap + EPS >= config.node_width,
                "{} and {} only {} apart",
                a.label,
                b.label,
                gap
            );
        }
    }
}

#[test]
fn test_seeded_layout_properties() {
    let counts = Counts {
        brothers: 1,
        sisters: 2,
        maternal_aunts: 1,
        paternal_uncles: 2,
        sons: 1,
        ..Counts::default()
    };
    let graph = census_graph(counts, Sex::Male);
    let config = LayoutConfig::default();
    let layout = LayoutEngine::new(config.clone()).compute(&graph, None);

    assert_eq!(layout.len(), graph.node_count());
    assert_eq!(layout.layer_count(), 4);
    assert_layer_monotonic(&graph, &layout);
    assert_no_overlap(&graph, &layout, &config);
}

#[test]
fn test_adjacent_couples_keep_members_a_node_apart() {
    let mut graph = census_graph(
        Counts {
            brothers: 1,
            sisters: 1,
            ..Counts::default()
        },
        Sex::Male,
    );
    let brother = graph.find_by_label("brother").unwrap().id;
    let wife = node(&mut graph, "partner", Sex::Female);
    let pair = couple(&mut graph, wife, brother);
    let nephew = node(&mut graph, "nephew", Sex::Male);
    child_of(&mut graph, pair, nephew);

    let config = LayoutConfig::default();
    let layout = LayoutEngine::new(config.clone()).compute(&graph, None);
    let x = |label: &str| layout.position(graph.find_by_label(label).unwrap().id).unwrap().x;

    // Inner members of the two grandparent couples
    let gap = x("paternal grandmother") - x("maternal grandfather");
    assert!(gap + EPS >= config.node_width, "grandparents only {} apart", gap);
    assert_no_overlap(&graph, &layout, &config);
}

#[test]
fn test_sides_follow_parents() {
    let counts = Counts {
        maternal_uncles: 1,
        paternal_aunts: 1,
        ..Counts::default()
    };
    let graph = census_graph(counts, Sex::Female);
    let layout = LayoutEngine::default().compute(&graph, None);
    let x = |label: &str| layout.position(graph.find_by_label(label).unwrap().id).unwrap().x;

    assert!(x("maternal uncle") < x("mother"));
    assert!(x("mother") < x("father"));
    assert!(x("father") < x("paternal aunt"));
    assert!(x("maternal grandfather") < x("paternal grandmother"));
}

#[test]
fn test_relayout_is_idempotent() {
    let graph = census_graph(
        Counts {
            brothers: 2,
            daughters: 1,
            ..Counts::default()
        },
        Sex::Female,
    );
    let engine = LayoutEngine::default();
    assert_eq!(engine.compute(&graph, None), engine.compute(&graph, None));
}

#[test]
fn test_minimum_x_is_origin() {
    let graph = census_graph(Counts { sisters: 1, ..Counts::default() }, Sex::Male);
    let config = LayoutConfig {
        origin_x: 40.0,
        ..LayoutConfig::default()
    };
    let layout = LayoutEngine::new(config).compute(&graph, None);
    let min_x = layout.positions().map(|(_, p)| p.x).fold(f64::INFINITY, f64::min);
    assert!((min_x - 40.0).abs() < EPS);
}

#[test]
fn test_y_follows_layer() {
    let graph = census_graph(Counts::default(), Sex::Male);
    let config = LayoutConfig::compact();
    let layout = LayoutEngine::new(config.clone()).compute(&graph, None);
    for (id, p) in layout.positions() {
        let layer = layout.layer(id).unwrap() as f64;
        assert!((p.y - layer * config.layer_height).abs() < EPS);
    }
}

fn arb_counts() -> impl Strategy<Value = Counts> {
    prop::array::uniform8(0u32..4).prop_map(|c| Counts {
        brothers: c[0],
        sisters: c[1],
        sons: c[2],
        daughters: c[3],
        maternal_uncles: c[4],
        maternal_aunts: c[5],
        paternal_uncles: c[6],
        paternal_aunts: c[7],
    })
}

proptest! {
    #[test]
    fn prop_layout_invariants(counts in arb_counts(), male in any::<bool>()) {
        let sex = if male { Sex::Male } else { Sex::Female };
        let graph = census_graph(counts, sex);
        let config = LayoutConfig::default();
        let layout = LayoutEngine::new(config.clone()).compute(&graph, None);

        prop_assert_eq!(layout.len(), graph.node_count());
        assert_layer_monotonic(&graph, &layout);
        assert_no_overlap(&graph, &layout, &config);
    }

    #[test]
    fn prop_layout_depends_only_on_insertion_order(counts in arb_counts()) {
        // Same structure, fresh ids
        let first = census_graph(counts, Sex::Male);
        let second = census_graph(counts, Sex::Male);
        let engine = LayoutEngine::default();
        let a = engine.compute(&first, None);
        let b = engine.compute(&second, None);

        for (x, y) in first.nodes().into_iter().zip(second.nodes()) {
            prop_assert_eq!(a.position(x.id), b.position(y.id));
            prop_assert_eq!(a.layer(x.id), b.layer(y.id));
        }
    }
}
