//! Dijkstra's shortest paths and Prim's minimum spanning forest
//!
//! Both algorithms keep one heap entry per frontier vertex and lower it with
//! `decrease_key` when a cheaper edge shows up, which is exactly the access
//! pattern a Fibonacci heap is built for: O(E + V log V) overall.
//!
//! Heap elements are `(cost, vertex)` tuples. Tuples order by cost first and
//! the vertex id breaks ties, so any `Ord` cost type works without a wrapper.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::pathfinding::{shortest_paths, Graph};
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 4u32);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 2);
//! graph.add_edge(1, 3, 5);
//!
//! let paths = shortest_paths(&graph, 0);
//! assert_eq!(paths.distance(3), Some(8));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use crate::fibonacci::{FibHandle, FibonacciHeap};
use std::ops::Add;

/// Trait for types that can be used as edge weights.
///
/// `Default::default()` must be the zero cost. Weights must not be negative.
///
/// Costs are summed with plain `+`: every path length [`shortest_paths`]
/// reaches, and the total of [`minimum_spanning_forest`], must fit in the
/// weight type. Integer overflow panics in debug builds and wraps in
/// release builds; pick a wider type (say `u64` for `u32` inputs) when
/// sums can get that large.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Weighted graph stored as adjacency lists
#[derive(Debug, Clone)]
pub struct Graph<W> {
    adjacency: Vec<Vec<(usize, W)>>,
}

impl<W: Cost> Graph<W> {
    /// A graph with vertices `0..vertices` and no edges.
    pub fn new(vertices: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a directed edge. Edges touching a vertex outside the graph are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) {
        if to < self.adjacency.len() {
            if let Some(edges) = self.adjacency.get_mut(from) {
                edges.push((to, weight));
            }
        }
    }

    /// Adds an edge in both directions.
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: W) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Outgoing `(target, weight)` pairs of `vertex`.
    pub fn neighbours(&self, vertex: usize) -> &[(usize, W)] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Result of [`shortest_paths`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths<W> {
    source: usize,
    distance: Vec<Option<W>>,
    previous: Vec<Option<usize>>,
}

impl<W: Cost> ShortestPaths<W> {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source, or `None` if unreachable.
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distance.get(vertex).copied().flatten()
    }

    /// Vertices of one shortest path from the source to `target`, both ends
    /// included, or `None` if `target` is unreachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.previous[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Single-source shortest paths with Dijkstra's algorithm.
///
/// A source outside the graph yields a result where nothing is reachable.
pub fn shortest_paths<W: Cost>(graph: &Graph<W>, source: usize) -> ShortestPaths<W> {
    let n = graph.vertex_count();
    let mut distance: Vec<Option<W>> = vec![None; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut handles: Vec<Option<FibHandle>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut frontier = FibonacciHeap::new();

    if source < n {
        distance[source] = Some(W::default());
        handles[source] = Some(frontier.insert((W::default(), source)));
    }

    while let Ok((dist, u)) = frontier.extract_min() {
        settled[u] = true;
        handles[u] = None;

        for &(v, weight) in graph.neighbours(u) {
            if settled[v] {
                continue;
            }
            let candidate = dist + weight;
            match (handles[v], distance[v]) {
                (Some(handle), Some(known)) if candidate < known => {
                    // the queued entry is (known, v), so this always lowers it
                    let lowered = frontier.decrease_key(&handle, (candidate, v));
                    debug_assert_eq!(lowered, Ok(()));
                    distance[v] = Some(candidate);
                    previous[v] = Some(u);
                }
                (None, None) => {
                    distance[v] = Some(candidate);
                    previous[v] = Some(u);
                    handles[v] = Some(frontier.insert((candidate, v)));
                }
                _ => {}
            }
        }
    }

    ShortestPaths {
        source,
        distance,
        previous,
    }
}

/// Result of [`minimum_spanning_forest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest<W> {
    /// Chosen edges as `(parent, child, weight)`
    pub edges: Vec<(usize, usize, W)>,
    /// Sum of the chosen edge weights
    pub total: W,
    /// Number of connected components spanned
    pub trees: usize,
}

/// Minimum spanning forest with Prim's algorithm.
///
/// The graph is read as undirected: add each edge in both directions (see
/// [`Graph::add_undirected_edge`]). Every connected component gets its own tree.
pub fn minimum_spanning_forest<W: Cost>(graph: &Graph<W>) -> SpanningForest<W> {
    let n = graph.vertex_count();
    let mut in_tree = vec![false; n];
    let mut best: Vec<Option<(W, usize)>> = vec![None; n];
    let mut handles: Vec<Option<FibHandle>> = vec![None; n];
    let mut forest = SpanningForest {
        edges: Vec::new(),
        total: W::default(),
        trees: 0,
    };

    for start in 0..n {
        if in_tree[start] {
            continue;
        }
        forest.trees += 1;

        let mut frontier = FibonacciHeap::new();
        handles[start] = Some(frontier.insert((W::default(), start)));

        while let Ok((_, u)) = frontier.extract_min() {
            in_tree[u] = true;
            handles[u] = None;
            if let Some((weight, parent)) = best[u] {
                forest.edges.push((parent, u, weight));
                forest.total = forest.total + weight;
            }

            for &(v, weight) in graph.neighbours(u) {
                if in_tree[v] {
                    continue;
                }
                match (handles[v], best[v]) {
                    (Some(handle), Some((known, _))) if weight < known => {
                        let lowered = frontier.decrease_key(&handle, (weight, v));
                        debug_assert_eq!(lowered, Ok(()));
                        best[v] = Some((weight, u));
                    }
                    (None, _) => {
                        best[v] = Some((weight, u));
                        handles[v] = Some(frontier.insert((weight, v)));
                    }
                    _ => {}
                }
            }
        }
    }

    forest
}
