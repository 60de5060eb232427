use std::collections::VecDeque;
use crate::bipartite_graph::TypeGraph;
use crate::matching::MatchResult;
use crate::realization::Realization;

/// Maximum matching of the realization graph, in which arrival `i` is adjacent to the
/// neighbors of its type. This is the offline optimum every online policy is compared to.
pub fn maximum_matching(g: &TypeGraph, r: &Realization) -> MatchResult {
    let mut res: MatchResult = vec![None; r.len()];
    let mut owner: Vec<Option<usize>> = vec![None; g.node_count()];
    for s in 0..r.len() {
        augment(g, r, &mut res, &mut owner, s);
    }
    res
}

/// Searches an augmenting path starting at the unmatched arrival `s` by BFS and flips it.
fn augment(g: &TypeGraph, r: &Realization, res: &mut MatchResult, owner: &mut [Option<usize>], s: usize) {
    let mut vis: Vec<bool> = vec![false; g.node_count()];
    let mut pre: Vec<usize> = vec![0; g.node_count()];
    let mut q: VecDeque<usize> = VecDeque::new();
    q.push_back(s);
    while let Some(u) = q.pop_front() {
        for j in g.neighbors(r.type_of(u)).iter().cloned() {
            if vis[j] {
                continue;
            }
            vis[j] = true;
            pre[j] = u;
            match owner[j] {
                Some(v) => q.push_back(v),
                None => {
                    flip_path(res, owner, &pre, j);
                    return;
                }
            }
        }
    }
}

fn flip_path(res: &mut MatchResult, owner: &mut [Option<usize>], pre: &[usize], free: usize) {
    let mut j = free;
    loop {
        let u = pre[j];
        let next = res[u];
        res[u] = Some(j);
        owner[j] = Some(u);
        match next {
            None => return,
            Some(nj) => j = nj,
        }
    }
}
