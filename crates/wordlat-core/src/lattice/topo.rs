use std::collections::BTreeMap;

use tracing::debug_span;

use super::Edge;

/// Depth-first traversal state for one sort call.
struct DfsContext<'a> {
    successors: &'a [BTreeMap<usize, Edge>],
    start: usize,
    end: usize,
    visited: Vec<bool>,
    /// Nodes in post-order (finished after all of their successors).
    finished: Vec<usize>,
}

impl<'a> DfsContext<'a> {
    fn in_range(&self, node: usize) -> bool {
        self.start <= node && node <= self.end
    }

    /// Visit `root` and everything reachable from it.
    ///
    /// Equivalent to the recursive post-order walk (successors in ascending
    /// index order) but uses an explicit stack so long lattices cannot
    /// overflow the call stack.
    fn visit(&mut self, root: usize) {
        let successors = self.successors;
        let mut stack = vec![(root, successors[root].keys())];
        self.visited[root] = true;

        while let Some((node, children)) = stack.last_mut() {
            let node = *node;
            let next = children.find(|&&child| {
                self.start <= child && child <= self.end && !self.visited[child]
            });
            match next {
                Some(&child) => {
                    self.visited[child] = true;
                    stack.push((child, successors[child].keys()));
                }
                None => {
                    self.finished.push(node);
                    stack.pop();
                }
            }
        }
    }
}

/// Topologically sort the nodes in `[start, end]`.
///
/// Roots are tried in ascending index order; each node is emitted ahead
/// of everything it reaches (reversed post-order). Input must be acyclic.
pub(crate) fn topological_sort(
    successors: &[BTreeMap<usize, Edge>],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let _span = debug_span!("topological_sort", start, end).entered();
    let mut ctx = DfsContext {
        successors,
        start,
        end,
        visited: vec![false; successors.len()],
        finished: Vec::new(),
    };
    if start <= end {
        for root in start..=end {
            if ctx.in_range(root) && !ctx.visited[root] {
                ctx.visit(root);
            }
        }
    }
    let mut order = ctx.finished;
    order.reverse();
    order
}
