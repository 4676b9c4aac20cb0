use crate::result_tree::ResultTree;

/// Folds `node` into the verdict accumulated so far.
///
/// A failure is sticky: once `prior` is false the result stays false.
/// Skipped checks never fail a run.
pub fn is_ok<R>(prior: bool, node: &ResultTree<R>) -> bool {
    if !prior {
        return false;
    }

    match node {
        ResultTree::Passed | ResultTree::Skipped => prior,
        ResultTree::Failed { .. } => false,
        ResultTree::Labeled { inner, .. } => is_ok(prior, inner),
        ResultTree::Batch { children } => children.iter().fold(prior, is_ok),
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    /// Counts the leaves of `node`. Labels and batches count nothing themselves.
    pub fn of<R>(node: &ResultTree<R>) -> Self {
        let mut tally = Self::default();
        tally.add(node);
        tally
    }

    fn add<R>(&mut self, node: &ResultTree<R>) {
        match node {
            ResultTree::Passed => self.passed += 1,
            ResultTree::Failed { .. } => self.failed += 1,
            ResultTree::Skipped => self.skipped += 1,
            ResultTree::Labeled { inner, .. } => self.add(inner),
            ResultTree::Batch { children } => children.iter().for_each(|child| self.add(child)),
        }
    }

    pub fn len(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}
