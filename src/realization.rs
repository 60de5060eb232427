use crate::bipartite_graph::TypeGraph;
use crate::error::GraphError;

/// How arrivals are drawn from the type graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrivalMode {
    /// Types drawn independently and uniformly, with replacement.
    Stochastic,
    /// Every type arrives once, in random order.
    Adversarial,
}

/// One concrete sequence of online arrivals, each tagged with its type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Realization {
    types: Vec<usize>,
}

impl Realization {
    /// Builds a fixed realization, checking every type against `g`.
    pub fn from_types(g: &TypeGraph, types: Vec<usize>) -> Result<Realization, GraphError> {
        if let Some(&ty) = types.iter().find(|&&t| t >= g.online_size()) {
            return Err(GraphError::InvalidType { ty, on_size: g.online_size() });
        }
        Ok(Realization { types })
    }

    pub(crate) fn new_unchecked(types: Vec<usize>) -> Realization {
        Realization { types }
    }

    pub fn types(&self) -> &[usize] {
        &self.types
    }

    #[inline(always)]
    pub fn type_of(&self, i: usize) -> usize {
        self.types[i]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_types_validates_indices() {
        let g = TypeGraph::new(2, 1);
        let r = Realization::from_types(&g, vec![1, 0, 1]).unwrap();
        assert_eq!(r.types(), &[1, 0, 1]);
        assert_eq!(r.type_of(2), 1);
        let err = Realization::from_types(&g, vec![0, 2]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidType { ty: 2, on_size: 2 }));
    }
}
