use itertools::{Itertools, MinMaxResult};

/// Mean, sample standard deviation and minimum of repeated runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub runs: usize,
}

impl Summary {
    pub fn from_runs(res: &[f64]) -> Option<Summary> {
        let min = match res.iter().cloned().minmax_by(|a, b| a.total_cmp(b)) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => x,
            MinMaxResult::MinMax(x, _) => x,
        };
        let n = res.len() as f64;
        let mean = res.iter().sum::<f64>() / n;
        let std = if res.len() > 1 {
            (res.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Some(Summary { mean, std, min, runs: res.len() })
    }
}
