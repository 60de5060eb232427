use rand::Rng;
use crate::bipartite_graph::TypeGraph;
use crate::matching::{MatchResult, SelectionSet};
use crate::realization::Realization;
use crate::water_fill::fill_water;

/// Per-node water level. Levels only ever rise during a run.
#[derive(Clone, Debug)]
pub struct LoadTracker {
    level: Vec<f64>,
}

impl LoadTracker {
    pub fn new(g: &TypeGraph) -> LoadTracker {
        LoadTracker { level: vec![0.0; g.node_count()] }
    }

    #[inline(always)]
    pub fn level(&self, j: usize) -> f64 {
        self.level[j]
    }

    pub fn levels(&self) -> &[f64] {
        &self.level
    }

    pub fn levels_of(&self, nodes: &[usize]) -> Vec<f64> {
        nodes.iter().map(|&j| self.level[j]).collect()
    }

    /// Lifts every node in `nodes` to at least `ceiling`.
    pub fn raise(&mut self, nodes: &[usize], ceiling: f64) {
        for j in nodes.iter().cloned() {
            self.level[j] = self.level[j].max(ceiling);
        }
    }
}

/// Reweighting of the water-fill increments before sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correction {
    /// Plain sampling without replacement, proportional to the increment.
    Linear,
    /// Online correlated selection weights, evaluated at the level before the update.
    Ocs,
}

impl Correction {
    #[inline(always)]
    pub fn weight(self, level: f64) -> f64 {
        match self {
            Correction::Linear => 1.0,
            Correction::Ocs => ocs_weight(level),
        }
    }
}

/// `exp(y + y^2/2 + c*y^3)` with `c = (4 - 2*sqrt(3))/3`, see Huang et al. (2020).
pub fn ocs_weight(y: f64) -> f64 {
    let c = (4.0 - 2.0 * 3f64.sqrt()) / 3.0;
    (y + y * y / 2.0 + c * y * y * y).exp()
}

/// Picks index `k` with probability `mass[k] / sum(mass)` using a single uniform draw.
/// Draws nothing and returns `None` if the total mass is zero.
pub fn sample_by_mass<R: Rng + ?Sized>(mass: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = mass.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let sample = rng.gen_range(0.0..total);
    let mut chosen = 0.0;
    for (k, m) in mass.iter().cloned().enumerate() {
        chosen += m;
        if chosen > sample {
            return Some(k);
        }
    }
    // rounding: fall back to the last entry carrying mass
    mass.iter().rposition(|&m| m > 0.0)
}

/// Online state of the balance algorithm for one run. Each call to [`Balance::step`] handles one arrival.
pub struct Balance<'a> {
    g: &'a TypeGraph,
    correction: Correction,
    load: LoadTracker,
    selected: SelectionSet,
}

impl<'a> Balance<'a> {
    pub fn new(g: &'a TypeGraph, correction: Correction) -> Balance<'a> {
        Balance { g, correction, load: LoadTracker::new(g), selected: SelectionSet::new(g) }
    }

    pub fn load(&self) -> &LoadTracker {
        &self.load
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    /// Selection mass of every neighbor in `neigh` once the water surface rises to `new_level`.
    /// The correction weight is taken at the current level, before the rise.
    fn mass(&self, neigh: &[usize], new_level: f64) -> Vec<f64> {
        neigh.iter().map(|&j| {
            if self.selected.contains(j) {
                0.0
            } else {
                let cur = self.load.level(j);
                (new_level - cur).max(0.0) * self.correction.weight(cur)
            }
        }).collect()
    }

    /// Processes an arrival of type `ty` and returns the offline vertex it is irrevocably matched to.
    pub fn step<R: Rng + ?Sized>(&mut self, ty: usize, rng: &mut R) -> Option<usize> {
        debug_assert!(ty < self.g.online_size(), "{} is not an online type", ty);
        let g = self.g;
        let neigh = g.neighbors(ty);
        if neigh.is_empty() {
            return None;
        }
        let new_level = fill_water(&self.load.levels_of(neigh), 1.0);

        let mass = self.mass(neigh, new_level);
        let choice = sample_by_mass(&mass, rng).map(|k| neigh[k]);
        if let Some(j) = choice {
            self.selected.select(j);
        }

        // the whole neighborhood absorbs the unit of mass, matched or not
        self.load.raise(neigh, new_level);
        choice
    }
}

pub fn balance<R: Rng + ?Sized>(g: &TypeGraph, r: &Realization, correction: Correction, rng: &mut R) -> MatchResult {
    let mut state = Balance::new(g, correction);
    r.types().iter().map(|&ty| state.step(ty, rng)).collect()
}

/// Balance with sampling without replacement.
pub fn balance_swor<R: Rng + ?Sized>(g: &TypeGraph, r: &Realization, rng: &mut R) -> MatchResult {
    balance(g, r, Correction::Linear, rng)
}

/// Balance with online correlated selection weights.
pub fn balance_ocs<R: Rng + ?Sized>(g: &TypeGraph, r: &Realization, rng: &mut R) -> MatchResult {
    balance(g, r, Correction::Ocs, rng)
}
