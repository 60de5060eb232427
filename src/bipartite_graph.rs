use std::io::BufRead;
use std::ops::Range;
use rand::Rng;
use rand::seq::SliceRandom;
use crate::error::GraphError;
use crate::realization::{ArrivalMode, Realization};

/// Bipartite type graph. Nodes are numbered `0..on_size + off_size`: online types
/// first, offline vertices afterwards. The adjacency is stored for both sides and
/// kept symmetric.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    on_size: usize,
    off_size: usize,
    adj: Vec<Vec<usize>>,
}

impl TypeGraph {
    /// Constructs an empty type graph with `on_size` online types and `off_size` offline vertices.
    pub fn new(on_size: usize, off_size: usize) -> TypeGraph {
        TypeGraph { on_size, off_size, adj: vec![Vec::new(); on_size + off_size] }
    }

    /// Reads a graph in the format
    /// ```text
    /// c comment
    /// p obm <online types> <offline vertices> <edges>
    /// <a> <b>
    /// ```
    /// with 1-based ids, online types first.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<TypeGraph, GraphError> {
        let mut graph: Option<TypeGraph> = None;
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(GraphError::Read)?;
            let lineno = idx + 1;
            let ll: Vec<&str> = line.split_whitespace().collect();
            if ll.is_empty() {
                continue;
            }
            match ll[0] {
                "c" => {} // skip comments
                "p" => { // parse header
                    if ll.len() < 4 {
                        return Err(GraphError::Header { line: lineno });
                    }
                    let a = parse_id(ll[2], lineno)?;
                    let b = parse_id(ll[3], lineno)?;
                    graph = Some(TypeGraph::new(a, b));
                },
                _ => { // parse edge
                    match graph {
                        None => return Err(GraphError::EdgeBeforeHeader { line: lineno }),
                        Some(ref mut graph) => {
                            if ll.len() < 2 {
                                continue;
                            }
                            let a = parse_id(ll[0], lineno)?;
                            let b = parse_id(ll[1], lineno)?;
                            if a == 0 || b == 0 {
                                return Err(GraphError::InvalidEdge { a, b });
                            }
                            let (a, b) = if a <= graph.on_size { (a, b) } else { (b, a) };
                            graph.add_edge(a - 1, b - 1)?;
                        }
                    }
                }
            }
        }
        graph.ok_or(GraphError::MissingHeader)
    }

    pub fn new_from_stdin() -> Result<TypeGraph, GraphError> {
        TypeGraph::from_reader(std::io::stdin().lock())
    }

    /// Adds edge between online type `i` and offline node `j`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        if i >= self.on_size || !self.is_offline(j) {
            return Err(GraphError::InvalidEdge { a: i, b: j });
        }
        if !self.adj[i].contains(&j) {
            self.adj[i].push(j);
            self.adj[j].push(i);
        }
        Ok(())
    }

    #[inline(always)]
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adj[u]
    }

    pub fn online_size(&self) -> usize {
        self.on_size
    }

    pub fn offline_size(&self) -> usize {
        self.off_size
    }

    /// Total number of nodes, i.e. the length of per-node state vectors.
    pub fn node_count(&self) -> usize {
        self.on_size + self.off_size
    }

    pub fn offline_range(&self) -> Range<usize> {
        self.on_size..self.on_size + self.off_size
    }

    #[inline(always)]
    pub fn is_offline(&self, j: usize) -> bool {
        j >= self.on_size && j < self.on_size + self.off_size
    }

    pub fn edge_count(&self) -> usize {
        self.adj[..self.on_size].iter().map(|n| n.len()).sum()
    }

    /// Draws a realization with `n` arrivals. Stochastic mode samples types uniformly
    /// with replacement, adversarial mode shuffles the first `n` types.
    pub fn realize<R: Rng + ?Sized>(&self, n: usize, mode: ArrivalMode, rng: &mut R) -> Result<Realization, GraphError> {
        let types = match mode {
            ArrivalMode::Stochastic => {
                if self.on_size == 0 && n > 0 {
                    return Err(GraphError::NoOnlineTypes);
                }
                (0..n).map(|_| rng.gen_range(0..self.on_size)).collect()
            },
            ArrivalMode::Adversarial => {
                if n > self.on_size {
                    return Err(GraphError::RealizationTooLarge { requested: n, on_size: self.on_size });
                }
                let mut types: Vec<usize> = (0..n).collect();
                types.shuffle(rng);
                types
            }
        };
        Ok(Realization::new_unchecked(types))
    }
}

fn parse_id(s: &str, line: usize) -> Result<usize, GraphError> {
    s.parse::<usize>().map_err(|source| GraphError::Parse { line, source })
}
