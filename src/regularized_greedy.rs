use std::collections::HashMap;
use crate::bipartite_graph::TypeGraph;
use crate::matching::{MatchResult, SelectionSet};
use crate::realization::Realization;

/// Regularization parameter of the blend schedule.
pub const THETA: f64 = 0.4253;

/// Probability that online type `i` is matched to offline vertex `j` under a reference policy.
/// Pairs that were never inserted have probability 0.
#[derive(Clone, Debug, Default)]
pub struct TypeProb {
    prob: HashMap<(usize, usize), f64>,
}

impl TypeProb {
    pub fn new() -> TypeProb {
        TypeProb::default()
    }

    pub fn insert(&mut self, i: usize, j: usize, p: f64) {
        self.prob.insert((i, j), p);
    }

    /// Adds `p` to the entry of `(i, j)`.
    pub fn add(&mut self, i: usize, j: usize, p: f64) {
        *self.prob.entry((i, j)).or_insert(0.0) += p;
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.prob.get(&(i, j)).cloned().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    pub fn scale(&mut self, factor: f64) {
        self.prob.values_mut().for_each(|p| *p *= factor);
    }
}

impl FromIterator<((usize, usize), f64)> for TypeProb {
    fn from_iter<I: IntoIterator<Item = ((usize, usize), f64)>>(iter: I) -> Self {
        TypeProb { prob: iter.into_iter().collect() }
    }
}

fn decay_fast() -> f64 {
    1.0 - (1.0 - THETA).ln()
}

fn normalizer() -> f64 {
    1.0 / THETA - 1.0 + (1.0 - THETA).ln()
}

/// Weight of the offline mass at time fraction `t`.
pub fn alpha(t: f64) -> f64 {
    let a = decay_fast();
    let b = 1.0 / THETA;
    (1.0 - (b * (-a * (1.0 - t)).exp() - a * (-b * (1.0 - t)).exp())) / normalizer()
}

/// Weight of the online mass at time fraction `t`.
pub fn beta(t: f64) -> f64 {
    let a = decay_fast();
    let b = 1.0 / THETA;
    ((-a * (1.0 - t)).exp() - (-b * (1.0 - t)).exp()) / normalizer()
}

/// Capacity clamp `min(x / theta, 1)`.
pub fn capacity(x: f64) -> f64 {
    (x / THETA).min(1.0)
}

/// Remaining reference mass of every node: offline vertices collect what flows in, online types
/// what flows out.
struct Mass {
    offline: Vec<f64>,
    online: Vec<f64>,
}

impl Mass {
    fn new(g: &TypeGraph, prob: &TypeProb) -> Mass {
        let mut offline = vec![0.0; g.node_count()];
        let mut online = vec![0.0; g.node_count()];
        for i in 0..g.online_size() {
            for j in g.neighbors(i).iter().cloned() {
                let p = prob.get(i, j);
                offline[j] += p;
                online[i] += p;
            }
        }
        Mass { offline, online }
    }

    fn score(&self, g: &TypeGraph, prob: &TypeProb, j: usize, t: f64) -> f64 {
        let (a, b) = (alpha(t), beta(t));
        let mut val = a * self.offline[j];
        for k in g.neighbors(j).iter().cloned() {
            val += b * (capacity(self.online[k]) - capacity(self.online[k] - prob.get(k, j)));
        }
        val
    }

    fn spend(&mut self, g: &TypeGraph, prob: &TypeProb, j: usize) {
        self.offline[j] = 0.0;
        for k in g.neighbors(j).iter().cloned() {
            self.online[k] -= prob.get(k, j);
        }
    }
}

/// Deterministic greedy that routes every arrival to the free neighbor with the smallest
/// regularized score. Ties go to the neighbor listed first.
pub fn regularized_greedy(g: &TypeGraph, r: &Realization, prob: &TypeProb) -> MatchResult {
    let mut mass = Mass::new(g, prob);
    let mut matched = SelectionSet::new(g);
    let mut res: MatchResult = vec![None; r.len()];
    for (i, ty) in r.types().iter().cloned().enumerate() {
        let t = i as f64 / r.len() as f64;
        let mut mn = f64::INFINITY;
        let mut index = None;
        for j in g.neighbors(ty).iter().cloned() {
            if matched.contains(j) {
                continue;
            }
            let val = mass.score(g, prob, j, t);
            if val < mn {
                mn = val;
                index = Some(j);
            }
        }
        if let Some(j) = index {
            res[i] = Some(j);
            matched.select(j);
            mass.spend(g, prob, j);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_endpoints() {
        assert_eq!(beta(1.0), 0.0);
        let n = 1.0 / THETA - 1.0 + (1.0 - THETA).ln();
        assert!((alpha(1.0) - (1.0 - n) / n).abs() < 1e-12);
        assert!((alpha(0.0) - 0.8163).abs() < 1e-3);
        assert!((beta(0.0) - 0.1457).abs() < 1e-3);
    }

    #[test]
    fn capacity_clamps_at_one() {
        assert_eq!(capacity(0.0), 0.0);
        assert!((capacity(THETA / 2.0) - 0.5).abs() < 1e-12);
        assert_eq!(capacity(1.0), 1.0);
    }

    #[test]
    fn missing_pairs_have_zero_probability() {
        let mut prob = TypeProb::new();
        prob.insert(0, 2, 0.5);
        prob.add(0, 2, 0.25);
        assert_eq!(prob.get(0, 2), 0.75);
        assert_eq!(prob.get(1, 2), 0.0);
        assert_eq!(prob.len(), 1);
    }

    #[test]
    fn unique_neighbor_is_selected() {
        let mut g = TypeGraph::new(2, 2);
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 3).unwrap();
        let prob: TypeProb = [((0, 2), 1.0)].into_iter().collect();
        let r = Realization::from_types(&g, vec![0]).unwrap();
        assert_eq!(regularized_greedy(&g, &r, &prob), vec![Some(2)]);
    }

    #[test]
    fn routes_away_from_congested_vertex() {
        let mut g = TypeGraph::new(1, 2);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        let prob: TypeProb = [((0, 1), 1.0)].into_iter().collect();
        let r = Realization::from_types(&g, vec![0, 0, 0]).unwrap();
        assert_eq!(regularized_greedy(&g, &r, &prob), vec![Some(2), Some(1), None]);
    }

    #[test]
    fn ties_go_to_first_neighbor() {
        let mut g = TypeGraph::new(1, 3);
        g.add_edge(0, 3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        let r = Realization::from_types(&g, vec![0]).unwrap();
        assert_eq!(regularized_greedy(&g, &r, &TypeProb::new()), vec![Some(3)]);
    }

    #[test]
    fn spent_online_mass_reroutes_later_arrivals() {
        // type 0 feeds vertices 3 and 4; matching 3 drains type 0 below theta, which makes
        // vertex 4 look congested to the type 1 arrival at t = 0.5
        let mut g = TypeGraph::new(3, 3);
        g.add_edge(0, 3).unwrap();
        g.add_edge(0, 4).unwrap();
        g.add_edge(1, 4).unwrap();
        g.add_edge(1, 5).unwrap();
        g.add_edge(2, 3).unwrap();
        let prob: TypeProb = [((0, 3), 0.5), ((0, 4), 0.3), ((1, 5), 0.23)].into_iter().collect();
        let r = Realization::from_types(&g, vec![2, 1]).unwrap();

        let (a, b) = (alpha(0.5), beta(0.5));
        let drained = a * 0.3 + b * (capacity(0.3) - capacity(0.0));
        let full = a * 0.3 + b * (capacity(0.8) - capacity(0.5));
        let other = a * 0.23 + b * capacity(0.23);
        assert!(full < other && other < drained);

        assert_eq!(regularized_greedy(&g, &r, &prob), vec![Some(3), Some(5)]);
    }

    #[test]
    fn spend_clears_vertex_and_drains_types() {
        let mut g = TypeGraph::new(2, 1);
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 2).unwrap();
        let prob: TypeProb = [((0, 2), 0.4), ((1, 2), 0.25)].into_iter().collect();
        let mut mass = Mass::new(&g, &prob);
        assert!((mass.offline[2] - 0.65).abs() < 1e-12);
        mass.spend(&g, &prob, 2);
        assert_eq!(mass.offline[2], 0.0);
        assert!(mass.online[0].abs() < 1e-12);
        assert!(mass.online[1].abs() < 1e-12);
    }
}
