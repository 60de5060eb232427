pub mod bipartite_graph;
pub mod realization;
pub mod matching;
pub mod water_fill;
pub mod balance;
pub mod regularized_greedy;
pub mod heuristic;
pub mod max_matching;
pub mod estimate;
pub mod stats;
pub mod experiment;
pub mod error;

// Re-exports to flatten the crate.
pub use bipartite_graph::TypeGraph as TypeGraph;
pub use realization::{ArrivalMode, Realization};
pub use matching::{MatchResult, match_size};
pub use balance::{balance_ocs, balance_swor};
pub use regularized_greedy::{regularized_greedy, TypeProb};
pub use max_matching::maximum_matching;
pub use heuristic::{min_degree, ranking, sampling_without_replacement};
pub use error::GraphError;
