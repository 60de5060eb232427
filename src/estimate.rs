use log::debug;
use rand::Rng;
use crate::bipartite_graph::TypeGraph;
use crate::error::GraphError;
use crate::max_matching::maximum_matching;
use crate::realization::ArrivalMode;
use crate::regularized_greedy::TypeProb;

/// Monte-Carlo estimate of how often each (type, offline vertex) pair is used by the optimal
/// matching of a stochastic realization with `arrivals` arrivals.
///
/// Every sample contributes at most `1 / samples` to each offline vertex, so the mass
/// collected by one vertex never exceeds 1.
pub fn optimal_matching_prob<R: Rng + ?Sized>(g: &TypeGraph, samples: usize, arrivals: usize, rng: &mut R) -> Result<TypeProb, GraphError> {
    let mut prob = TypeProb::new();
    if samples == 0 {
        return Ok(prob);
    }
    for _ in 0..samples {
        let r = g.realize(arrivals, ArrivalMode::Stochastic, rng)?;
        let res = maximum_matching(g, &r);
        for (i, m) in res.iter().enumerate() {
            if let Some(j) = *m {
                prob.add(r.type_of(i), j, 1.0);
            }
        }
    }
    prob.scale(1.0 / samples as f64);
    debug!("estimated {} type pairs from {} samples", prob.len(), samples);
    Ok(prob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_edge_is_always_used() {
        let mut g = TypeGraph::new(1, 1);
        g.add_edge(0, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let prob = optimal_matching_prob(&g, 50, 1, &mut rng).unwrap();
        assert!((prob.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn offline_mass_is_at_most_one() {
        let mut g = TypeGraph::new(3, 2);
        for i in 0..3 {
            g.add_edge(i, 3).unwrap();
        }
        g.add_edge(2, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let prob = optimal_matching_prob(&g, 200, 3, &mut rng).unwrap();
        for j in g.offline_range() {
            let total: f64 = (0..3).map(|i| prob.get(i, j)).sum();
            assert!(total <= 1.0 + 1e-9);
        }
        assert_eq!(prob.get(0, 4), 0.0);
    }

    #[test]
    fn no_samples_gives_empty_table() {
        let g = TypeGraph::new(0, 0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(optimal_matching_prob(&g, 0, 5, &mut rng).unwrap().is_empty());
    }
}
