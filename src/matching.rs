use bit_set::BitSet;
use crate::bipartite_graph::TypeGraph;
use crate::realization::Realization;

/// Entry `i` is the offline vertex matched to arrival `i`, or `None` if the arrival was left unmatched.
pub type MatchResult = Vec<Option<usize>>;

/// Offline vertices that are already matched. A vertex enters at most once and never leaves.
pub struct SelectionSet {
    matched: BitSet,
}

impl SelectionSet {
    pub fn new(g: &TypeGraph) -> SelectionSet {
        SelectionSet { matched: BitSet::with_capacity(g.node_count()) }
    }

    #[inline(always)]
    pub fn contains(&self, j: usize) -> bool {
        self.matched.contains(j)
    }

    /// Marks `j` as matched. Matching a vertex twice is a logic error.
    pub fn select(&mut self, j: usize) {
        let fresh = self.matched.insert(j);
        debug_assert!(fresh, "offline vertex {} matched twice", j);
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Number of matched arrivals.
pub fn match_size(res: &MatchResult) -> usize {
    res.iter().filter(|m| m.is_some()).count()
}

/// Checks that `res` is a matching of the realization graph: one entry per arrival,
/// every matched vertex adjacent to the arrival's type and used at most once.
pub fn is_valid_matching(g: &TypeGraph, r: &Realization, res: &MatchResult) -> bool {
    if res.len() != r.len() {
        return false;
    }
    let mut used = BitSet::with_capacity(g.node_count());
    for (i, m) in res.iter().enumerate() {
        if let Some(j) = *m {
            if !g.neighbors(r.type_of(i)).contains(&j) || !used.insert(j) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> TypeGraph {
        let mut g = TypeGraph::new(2, 2);
        g.add_edge(0, 2).unwrap();
        g.add_edge(0, 3).unwrap();
        g.add_edge(1, 3).unwrap();
        g
    }

    #[test]
    fn counts_matched_arrivals() {
        assert_eq!(match_size(&vec![Some(2), None, Some(3)]), 2);
        assert_eq!(match_size(&vec![None, None]), 0);
    }

    #[test]
    fn rejects_reused_or_foreign_vertices() {
        let g = path_graph();
        let r = Realization::from_types(&g, vec![0, 1]).unwrap();
        assert!(is_valid_matching(&g, &r, &vec![Some(2), Some(3)]));
        assert!(is_valid_matching(&g, &r, &vec![Some(3), None]));
        assert!(!is_valid_matching(&g, &r, &vec![Some(3), Some(3)]));
        assert!(!is_valid_matching(&g, &r, &vec![None, Some(2)]));
        assert!(!is_valid_matching(&g, &r, &vec![None]));
    }

    #[test]
    fn selection_set_tracks_vertices() {
        let g = path_graph();
        let mut s = SelectionSet::new(&g);
        assert!(s.is_empty());
        s.select(3);
        assert!(s.contains(3));
        assert!(!s.contains(2));
        assert_eq!(s.len(), 1);
    }
}
