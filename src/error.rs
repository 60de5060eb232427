use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read graph input")]
    Read(#[source] std::io::Error),
    #[error("line {line}: could not parse integer")]
    Parse {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: malformed p-line")]
    Header { line: usize },
    #[error("line {line}: found edge before p-line")]
    EdgeBeforeHeader { line: usize },
    #[error("no p-line found, maybe the input was empty")]
    MissingHeader,
    #[error("edge ({a}, {b}) does not join an online type and an offline vertex")]
    InvalidEdge { a: usize, b: usize },
    #[error("type index {ty} is not an online type (graph has {on_size})")]
    InvalidType { ty: usize, on_size: usize },
    #[error("cannot draw arrivals from a graph without online types")]
    NoOnlineTypes,
    #[error("adversarial realization of {requested} arrivals exceeds {on_size} online types")]
    RealizationTooLarge { requested: usize, on_size: usize },
}
