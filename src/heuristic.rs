use rand::Rng;
use rand::seq::SliceRandom;
use crate::balance::sample_by_mass;
use crate::bipartite_graph::TypeGraph;
use crate::matching::{MatchResult, SelectionSet};
use crate::realization::Realization;
use crate::regularized_greedy::TypeProb;

/// RANKING (Karp, Vazirani, Vazirani): offline vertices get a uniformly random rank up front,
/// every arrival takes its free neighbor of best rank.
pub fn ranking<R: Rng + ?Sized>(g: &TypeGraph, r: &Realization, rng: &mut R) -> MatchResult {
    let mut order: Vec<usize> = g.offline_range().collect();
    order.shuffle(rng);
    let mut rank = vec![usize::MAX; g.node_count()];
    for (pos, j) in order.iter().cloned().enumerate() {
        rank[j] = pos;
    }
    let mut matched = SelectionSet::new(g);
    r.types().iter().map(|&ty| {
        let best = g.neighbors(ty).iter().cloned()
            .filter(|&j| !matched.contains(j))
            .min_by_key(|&j| rank[j]);
        if let Some(j) = best {
            matched.select(j);
        }
        best
    }).collect()
}

/// Every arrival takes its free neighbor of smallest degree in the type graph.
/// Ties go to the neighbor listed first.
pub fn min_degree(g: &TypeGraph, r: &Realization) -> MatchResult {
    let mut matched = SelectionSet::new(g);
    r.types().iter().map(|&ty| {
        let best = g.neighbors(ty).iter().cloned()
            .filter(|&j| !matched.contains(j))
            .min_by_key(|&j| g.neighbors(j).len());
        if let Some(j) = best {
            matched.select(j);
        }
        best
    }).collect()
}

/// Every arrival samples a free neighbor with probability proportional to the reference
/// probability of its (type, vertex) pair. Arrivals whose free neighbors all carry zero
/// probability stay unmatched and draw nothing.
pub fn sampling_without_replacement<R: Rng + ?Sized>(g: &TypeGraph, r: &Realization, prob: &TypeProb, rng: &mut R) -> MatchResult {
    let mut matched = SelectionSet::new(g);
    r.types().iter().map(|&ty| {
        let neigh = g.neighbors(ty);
        let mass: Vec<f64> = neigh.iter()
            .map(|&j| if matched.contains(j) { 0.0 } else { prob.get(ty, j) })
            .collect();
        let choice = sample_by_mass(&mass, rng).map(|k| neigh[k]);
        if let Some(j) = choice {
            matched.select(j);
        }
        choice
    }).collect()
}
