use crate::models::{FoldDescriptor, FoldGroup, FoldPolicy};
use crate::syntax::{preorder, TreeNode};
use crate::text::SourceText;
use tracing::{debug, trace};

/// Extracts foldable whitespace regions from a syntax tree.
///
/// One pre-order walk, two local rules checked at every node:
///
/// - **Whitespace-run rule**: a run of 3+ consecutive whitespace siblings
///   folds from its second member through its last, leaving the first
///   visible as one blank line. The fold renders as nothing.
/// - **Lead-whitespace rule**: the whitespace immediately before an opening
///   brace, a `catch`/`else`/`where` keyword, or a parameter declaration
///   folds to a single space, so `if (x)` followed by a brace on its own
///   line reads as `if (x) {` when collapsed.
///
/// Every check is a qualification gate: absent neighbors and non-matching
/// nodes skip, nothing fails. The extractor holds no state across calls
/// and never mutates the tree.
#[derive(Debug, Clone, Default)]
pub struct FoldRegionExtractor {
    policy: FoldPolicy,
}

impl FoldRegionExtractor {
    pub fn new(policy: FoldPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FoldPolicy {
        &self.policy
    }

    /// Walk the subtree under `root` and emit fold descriptors in
    /// pre-order. Returns an empty vec when nothing qualifies.
    pub fn build_fold_regions<'t, N: TreeNode<'t>>(
        &self,
        root: N,
        text: &SourceText,
    ) -> Vec<FoldDescriptor<N>> {
        let mut descriptors = Vec::new();

        for node in preorder(root) {
            if self.is_whitespace(node) {
                if let Some(d) = self.check_whitespace_run(node) {
                    descriptors.push(d);
                }
            } else if let Some(d) = self.check_lead_whitespace(node, text) {
                descriptors.push(d);
            }
        }

        debug!(count = descriptors.len(), "extracted fold regions");
        descriptors
    }

    fn is_whitespace<'t, N: TreeNode<'t>>(&self, node: N) -> bool {
        self.policy.is_whitespace_kind(node.kind())
    }

    /// Whitespace-run rule. Fires only on the first whitespace node of a
    /// run; later members are rejected by the previous-sibling check, so
    /// each node is considered as a run start at most once per walk.
    fn check_whitespace_run<'t, N: TreeNode<'t>>(&self, node: N) -> Option<FoldDescriptor<N>> {
        if node.prev_sibling().is_some_and(|p| self.is_whitespace(p)) {
            // Not the start of the run.
            return None;
        }

        // A run needs at least three members before anything folds; the
        // first one stays visible as the surviving blank line.
        let second = node.next_sibling().filter(|n| self.is_whitespace(*n))?;
        let third = second.next_sibling().filter(|n| self.is_whitespace(*n))?;

        let mut range = second.range().union(third.range());
        let mut last = third;
        loop {
            match last.next_sibling() {
                // Run ends at the sibling list without a terminator:
                // an open-ended gap at end of input stays unfolded.
                None => return None,
                Some(n) if self.is_whitespace(n) => {
                    range = range.union(n.range());
                    last = n;
                }
                Some(_) => break,
            }
        }

        trace!(start = range.start, end = range.end, "blank-line fold");
        Some(FoldDescriptor {
            anchor: second,
            range,
            group: FoldGroup::BlankLine,
            placeholder: self.policy.blank_line_placeholder.clone(),
            default_collapsed: true,
        })
    }

    /// Lead-whitespace rule for braces, clause keywords, and parameter
    /// declarations.
    fn check_lead_whitespace<'t, N: TreeNode<'t>>(
        &self,
        node: N,
        text: &SourceText,
    ) -> Option<FoldDescriptor<N>> {
        if !self.qualifies_as_lead(node) {
            return None;
        }

        // A token nested first inside a clause node has no sibling of its
        // own; its effective predecessor is the clause's external neighbor.
        let prev = match node.prev_sibling() {
            Some(p) => p,
            None => node.parent()?.prev_sibling()?,
        };
        if !self.is_whitespace(prev) {
            return None;
        }

        let mut range = prev.range();
        match prev.prev_sibling().filter(|p| self.is_whitespace(*p)) {
            Some(prev_prev) => {
                // Blank line plus indentation line fold as one region.
                range = prev_prev.range().union(range);
            }
            None => {
                // A single inline space is too trivial to fold; a lone
                // newline still qualifies.
                if range.len() == 1 && text.char_at(range.start) != Some('\n') {
                    return None;
                }
            }
        }

        trace!(
            kind = node.kind(),
            start = range.start,
            end = range.end,
            "lead-whitespace fold"
        );
        Some(FoldDescriptor {
            anchor: node,
            range,
            group: FoldGroup::Brace,
            placeholder: self.policy.brace_placeholder.clone(),
            default_collapsed: true,
        })
    }

    fn qualifies_as_lead<'t, N: TreeNode<'t>>(&self, node: N) -> bool {
        let kind = node.kind();
        if node.is_leaf() {
            self.policy.lead_token_kinds.contains(kind)
        } else {
            self.policy.lead_element_kinds.contains(kind)
        }
    }
}

/// Extract fold regions with the default C# policy.
pub fn build_fold_regions<'t, N: TreeNode<'t>>(
    root: N,
    text: &SourceText,
) -> Vec<FoldDescriptor<N>> {
    FoldRegionExtractor::default().build_fold_regions(root, text)
}
