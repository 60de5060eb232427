use std::fmt;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use crate::balance::{balance_ocs, balance_swor};
use crate::bipartite_graph::TypeGraph;
use crate::error::GraphError;
use crate::estimate::optimal_matching_prob;
use crate::heuristic::{min_degree, ranking, sampling_without_replacement};
use crate::matching::match_size;
use crate::max_matching::maximum_matching;
use crate::realization::{ArrivalMode, Realization};
use crate::regularized_greedy::{regularized_greedy, TypeProb};
use crate::stats::Summary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Opt,
    StochasticSwor,
    RegularizedGreedy,
    Ranking,
    BalanceSwor,
    BalanceOcs,
    MinDegree,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Opt => "OPT",
            Algorithm::StochasticSwor => "StochasticSWOR",
            Algorithm::RegularizedGreedy => "RegularizedGreedy",
            Algorithm::BalanceSwor => "Balance-SWOR",
            Algorithm::BalanceOcs => "Balance-OCS",
            Algorithm::Ranking => "Ranking",
            Algorithm::MinDegree => "MinDegree",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    /// Number of simulated repetitions per graph.
    pub repetitions: usize,
    pub seed: u64,
    pub mode: ArrivalMode,
    /// Samples for the Monte-Carlo estimate of the reference probabilities.
    pub estimate_samples: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig { repetitions: 1000, seed: 0, mode: ArrivalMode::Stochastic, estimate_samples: 1000 }
    }
}

/// Result of an experiment on one type graph.
#[derive(Clone, Debug)]
pub struct Report {
    /// Size of the optimal matching.
    pub opt: Summary,
    /// Matching size of every online algorithm relative to the mean optimum.
    pub ratios: Vec<(Algorithm, Summary)>,
}

impl Report {
    pub fn ratio(&self, alg: Algorithm) -> Option<&Summary> {
        self.ratios.iter().find(|(a, _)| *a == alg).map(|(_, s)| s)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {:>8} {:>8} {:>8}", "Algorithm", "mean", "std", "min")?;
        writeln!(f, "{:<20} {:>8.3} {:>8.3} {:>8.3}", Algorithm::Opt, self.opt.mean, self.opt.std, self.opt.min)?;
        for (alg, s) in self.ratios.iter() {
            writeln!(f, "{:<20} {:>8.3} {:>8.3} {:>8.3}", alg, s.mean, s.std, s.min)?;
        }
        Ok(())
    }
}

fn repetition_seed(seed: u64, rep: usize) -> u64 {
    seed.wrapping_add(1 + rep as u64)
}

/// Runs all algorithms on `g`, see [`ExperimentConfig`]. Repetitions run in parallel, each
/// with its own seeded generator, so the report only depends on the configuration.
pub fn run(g: &TypeGraph, cfg: &ExperimentConfig) -> Result<Report, GraphError> {
    let arrivals = g.online_size();
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    match cfg.mode {
        ArrivalMode::Stochastic => {
            let prob = optimal_matching_prob(g, cfg.estimate_samples, arrivals, &mut rng)?;
            info!("estimated reference probabilities from {} samples", cfg.estimate_samples);
            let algs = [
                Algorithm::Opt,
                Algorithm::StochasticSwor,
                Algorithm::RegularizedGreedy,
                Algorithm::Ranking,
                Algorithm::BalanceSwor,
                Algorithm::BalanceOcs,
                Algorithm::MinDegree,
            ];
            let runs = (0..cfg.repetitions).into_par_iter().map(|rep| -> Result<Vec<usize>, GraphError> {
                let mut rng = StdRng::seed_from_u64(repetition_seed(cfg.seed, rep));
                let r = g.realize(arrivals, ArrivalMode::Stochastic, &mut rng)?;
                Ok(stochastic_repetition(g, &r, &prob, &mut rng))
            }).collect::<Result<Vec<Vec<usize>>, GraphError>>()?;
            Ok(summarize(&algs, &runs))
        },
        ArrivalMode::Adversarial => {
            let r = g.realize(arrivals, ArrivalMode::Adversarial, &mut rng)?;
            let opt = match_size(&maximum_matching(g, &r));
            let min_deg = match_size(&min_degree(g, &r));
            let algs = [Algorithm::Opt, Algorithm::Ranking, Algorithm::BalanceSwor, Algorithm::BalanceOcs, Algorithm::MinDegree];
            let runs: Vec<Vec<usize>> = (0..cfg.repetitions).into_par_iter().map(|rep| {
                let mut rng = StdRng::seed_from_u64(repetition_seed(cfg.seed, rep));
                let rank = match_size(&ranking(g, &r, &mut rng));
                let swor = match_size(&balance_swor(g, &r, &mut rng));
                let ocs = match_size(&balance_ocs(g, &r, &mut rng));
                debug!("repetition {}: opt {} ranking {} swor {} ocs {}", rep, opt, rank, swor, ocs);
                vec![opt, rank, swor, ocs, min_deg]
            }).collect();
            Ok(summarize(&algs, &runs))
        }
    }
}

fn stochastic_repetition(g: &TypeGraph, r: &Realization, prob: &TypeProb, rng: &mut StdRng) -> Vec<usize> {
    let opt = match_size(&maximum_matching(g, r));
    let sampled = match_size(&sampling_without_replacement(g, r, prob, rng));
    let greedy = match_size(&regularized_greedy(g, r, prob));
    let rank = match_size(&ranking(g, r, rng));
    let swor = match_size(&balance_swor(g, r, rng));
    let ocs = match_size(&balance_ocs(g, r, rng));
    let min_deg = match_size(&min_degree(g, r));
    debug!("opt {} sampled {} greedy {} ranking {} swor {} ocs {} min-degree {}", opt, sampled, greedy, rank, swor, ocs, min_deg);
    vec![opt, sampled, greedy, rank, swor, ocs, min_deg]
}

/// `runs[rep][k]` is the matching size of `algs[k]` in repetition `rep`; `algs[0]` is the optimum.
fn summarize(algs: &[Algorithm], runs: &[Vec<usize>]) -> Report {
    let column = |k: usize| runs.iter().map(|sizes| sizes[k] as f64).collect::<Vec<f64>>();
    let empty = Summary { mean: 0.0, std: 0.0, min: 0.0, runs: 0 };
    let opt = Summary::from_runs(&column(0)).unwrap_or(empty);
    let ratios = algs.iter().enumerate().skip(1).map(|(k, &alg)| {
        let sizes = column(k);
        let ratio: Vec<f64> = sizes.iter().map(|&s| if opt.mean > 0.0 { s / opt.mean } else { 1.0 }).collect();
        (alg, Summary::from_runs(&ratio).unwrap_or(empty))
    }).collect();
    Report { opt, ratios }
}
