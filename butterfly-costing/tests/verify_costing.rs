//! End-to-end checks of the costing contract against reference searches on a
//! synthetic graph: A* driven by the model's heuristic factor must find the
//! same optimal costs as plain Dijkstra, and one model instance must be
//! shareable across search workers.

use std::cmp::Reverse;
use std::sync::Arc;
use std::thread;

use priority_queue::PriorityQueue;

use butterfly_costing::graph::{access, edge_flags};
use butterfly_costing::{cost_model_for_mode, CostModel, DirectedEdge, Mode};

struct TestGraph {
    /// Node positions in meters (flat plane)
    positions: Vec<(f32, f32)>,
    /// Outgoing edges per node: (target node, edge attributes)
    adjacency: Vec<Vec<(usize, DirectedEdge)>>,
}

fn euclid(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn car_edge(length: f32, speed: u8) -> DirectedEdge {
    DirectedEdge {
        length,
        speed,
        forward_access: access::CAR,
        ..Default::default()
    }
}

/// 4x4 grid with 1 km spacing and a deterministic mix of speeds, all at or
/// below the 120 km/h heuristic reference so the estimate stays admissible.
fn build_grid() -> TestGraph {
    const N: usize = 4;
    const SPACING: f32 = 1000.0;
    let speeds = [30u8, 50, 90, 120];

    let mut positions = Vec::with_capacity(N * N);
    for row in 0..N {
        for col in 0..N {
            positions.push((col as f32 * SPACING, row as f32 * SPACING));
        }
    }

    let mut adjacency = vec![Vec::new(); N * N];
    for row in 0..N {
        for col in 0..N {
            let node = row * N + col;
            let mut connect = |other: usize| {
                let length = euclid(positions[node], positions[other]);
                let speed = speeds[(node + other) % speeds.len()];
                adjacency[node].push((other, car_edge(length, speed)));
                adjacency[other].push((node, car_edge(length, speed)));
            };
            if col + 1 < N {
                connect(node + 1);
            }
            if row + 1 < N {
                connect(node + N);
            }
        }
    }

    TestGraph {
        positions,
        adjacency,
    }
}

/// Label-correcting search over the test graph. With `use_heuristic` this is
/// A* using the model's cost factor; without it, plain Dijkstra. Priorities
/// are bucketed by the model's unit size, so relaxation (not pop order)
/// carries correctness.
fn search(
    graph: &TestGraph,
    model: &dyn CostModel,
    source: usize,
    target: usize,
    use_heuristic: bool,
) -> Option<f32> {
    let factor = if use_heuristic {
        model.astar_cost_factor()
    } else {
        0.0
    };
    let unit = model.unit_size();

    let mut dist = vec![f32::INFINITY; graph.positions.len()];
    let mut queue: PriorityQueue<usize, Reverse<u64>> = PriorityQueue::new();
    dist[source] = 0.0;
    queue.push(source, Reverse(0));

    while let Some((node, _)) = queue.pop() {
        let here = dist[node];
        for (next, edge) in &graph.adjacency[node] {
            let remaining = euclid(graph.positions[*next], graph.positions[target]);
            if !model.edge_allowed(edge, 0, false, remaining) {
                continue;
            }
            let next_cost = here + model.edge_cost(edge);
            if next_cost < dist[*next] {
                dist[*next] = next_cost;
                let estimate = next_cost + factor * remaining;
                queue.push(*next, Reverse((estimate / unit) as u64));
            }
        }
    }

    dist[target].is_finite().then(|| dist[target])
}

#[test]
fn test_astar_matches_dijkstra_on_grid() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .try_init();

    let graph = build_grid();
    let model = cost_model_for_mode(Mode::Car).expect("car model");

    for (source, target) in [(0, 15), (0, 3), (12, 3), (5, 10), (15, 0)] {
        let dijkstra = search(&graph, model.as_ref(), source, target, false)
            .expect("grid is connected");
        let astar =
            search(&graph, model.as_ref(), source, target, true).expect("grid is connected");

        assert!(
            (dijkstra - astar).abs() < 1e-3,
            "{source}->{target}: dijkstra {dijkstra}s vs astar {astar}s"
        );

        // The heuristic from the start must underestimate the optimal cost.
        let straight_line = euclid(graph.positions[source], graph.positions[target]);
        assert!(
            model.astar_cost_factor() * straight_line <= dijkstra + 1e-3,
            "heuristic overestimates {source}->{target}"
        );
    }
}

#[test]
fn test_model_shared_across_threads() {
    let graph = Arc::new(build_grid());
    let model = cost_model_for_mode(Mode::Car).expect("car model");

    let reference =
        search(&graph, model.as_ref(), 0, 15, true).expect("grid is connected");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            let model = Arc::clone(&model);
            thread::spawn(move || search(&graph, model.as_ref(), 0, 15, true))
        })
        .collect();

    for handle in handles {
        let cost = handle.join().expect("worker panicked").expect("route found");
        assert_eq!(cost, reference);
    }
}

#[test]
fn test_filter_excludes_snap_candidates() {
    let model = cost_model_for_mode(Mode::Car).expect("car model");
    let filter = model.edge_filter();

    let mut trans_up = car_edge(500.0, 80);
    trans_up.flags |= 1 << edge_flags::TRANS_UP;
    let mut trans_down = car_edge(500.0, 80);
    trans_down.flags |= 1 << edge_flags::TRANS_DOWN;
    let mut foot_only = car_edge(500.0, 5);
    foot_only.forward_access = access::FOOT;

    let candidates = [car_edge(500.0, 80), trans_up, trans_down, foot_only];
    let kept: Vec<_> = candidates.iter().filter(|edge| !filter(edge)).collect();

    // Only the ordinary car-accessible edge survives snapping candidacy.
    assert_eq!(kept.len(), 1);
    assert!(!kept[0].transitions_up() && !kept[0].transitions_down());
    assert_eq!(kept[0].forward_access & access::CAR, access::CAR);
}
