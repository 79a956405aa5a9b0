use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Half-open byte interval `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {}..{}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest range containing both `self` and `other`.
    pub fn union(&self, other: TextRange) -> TextRange {
        TextRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Group tag linking fold regions that expand/collapse together.
///
/// The two rules emit into distinct groups so blank-line folds and
/// brace folds toggle independently in the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldGroup {
    /// Whitespace preceding a brace, clause keyword, or parameter
    Brace,
    /// Interior of a run of consecutive blank-line whitespace nodes
    BlankLine,
}

impl FoldGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoldGroup::Brace => "brace",
            FoldGroup::BlankLine => "blank_line",
        }
    }
}

/// A foldable region produced by the extractor.
///
/// Generic over the node handle `N` so the anchor borrows whatever tree
/// the host supplied; the descriptor never outlives one extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldDescriptor<N> {
    /// Node the fold is attached to
    pub anchor: N,
    /// Span of source text that collapses
    pub range: TextRange,
    /// Synchronized expand/collapse group
    pub group: FoldGroup,
    /// Text shown in place of the collapsed span
    pub placeholder: String,
    /// Whether the host should collapse this fold when the file first opens
    pub default_collapsed: bool,
}

impl<N> FoldDescriptor<N> {
    /// Placeholder shown when the region is collapsed.
    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    /// Collapse-on-first-open policy for this region.
    pub fn is_collapsed_by_default(&self) -> bool {
        self.default_collapsed
    }

    /// Anchor-free projection for serialization and diagnostics.
    pub fn record<'t>(&self) -> FoldRecord
    where
        N: crate::syntax::TreeNode<'t>,
    {
        FoldRecord {
            anchor_kind: self.anchor.kind().to_string(),
            range: self.range,
            group: self.group,
            placeholder: self.placeholder.clone(),
            default_collapsed: self.default_collapsed,
        }
    }
}

/// Serializable snapshot of a [`FoldDescriptor`] without the tree anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldRecord {
    /// Kind of the node the fold was anchored to
    pub anchor_kind: String,
    pub range: TextRange,
    pub group: FoldGroup,
    pub placeholder: String,
    pub default_collapsed: bool,
}

/// Policy table of node kinds the extractor reacts to.
///
/// The qualifying sets are configuration rather than hard-coded branching:
/// adding a construct means adding a kind here, not touching the traversal.
/// Lead token kinds match leaf tokens only; lead element kinds match
/// interior nodes (constructs like parameter declarations that have no
/// single representative leading token).
#[derive(Debug, Clone)]
pub struct FoldPolicy {
    /// Kinds classified as whitespace nodes
    pub whitespace_kinds: HashSet<&'static str>,
    /// Leaf token kinds that qualify for the lead-whitespace rule
    pub lead_token_kinds: HashSet<&'static str>,
    /// Interior node kinds that qualify for the lead-whitespace rule
    pub lead_element_kinds: HashSet<&'static str>,
    /// Placeholder for brace-group folds
    pub brace_placeholder: String,
    /// Placeholder for blank-line-group folds
    pub blank_line_placeholder: String,
}

impl FoldPolicy {
    /// Policy for C# trees produced by [`crate::parsers::CSharpParser`]:
    /// opening braces, the `catch`/`else`/`where` keywords, and parameter
    /// declarations. Folded lead whitespace renders as a single space so
    /// the line still reads naturally; folded blank-line runs render as
    /// nothing, leaving one visible blank line.
    pub fn csharp() -> Self {
        Self {
            whitespace_kinds: [crate::syntax::WHITESPACE].into_iter().collect(),
            lead_token_kinds: ["{", "catch", "else", "where"].into_iter().collect(),
            lead_element_kinds: ["parameter"].into_iter().collect(),
            brace_placeholder: " ".to_string(),
            blank_line_placeholder: String::new(),
        }
    }

    pub fn is_whitespace_kind(&self, kind: &str) -> bool {
        self.whitespace_kinds.contains(kind)
    }
}

impl Default for FoldPolicy {
    fn default() -> Self {
        Self::csharp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_union() {
        let a = TextRange::new(4, 7);
        let b = TextRange::new(7, 12);
        assert_eq!(a.union(b), TextRange::new(4, 12));
        assert_eq!(b.union(a), TextRange::new(4, 12));
    }

    #[test]
    fn test_range_contains() {
        let r = TextRange::new(2, 5);
        assert!(r.contains(2));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert!(TextRange::new(3, 3).is_empty());
    }

    #[test]
    fn test_group_as_str() {
        assert_eq!(FoldGroup::Brace.as_str(), "brace");
        assert_eq!(FoldGroup::BlankLine.as_str(), "blank_line");
    }

    #[test]
    fn test_csharp_policy() {
        let policy = FoldPolicy::csharp();
        assert!(policy.lead_token_kinds.contains("{"));
        assert!(policy.lead_token_kinds.contains("catch"));
        assert!(policy.lead_token_kinds.contains("else"));
        assert!(policy.lead_token_kinds.contains("where"));
        assert!(policy.lead_element_kinds.contains("parameter"));
        assert!(policy.is_whitespace_kind("whitespace"));
        assert!(!policy.is_whitespace_kind("identifier"));
    }

    #[test]
    fn test_record_roundtrip() {
        let record = FoldRecord {
            anchor_kind: "{".to_string(),
            range: TextRange::new(7, 8),
            group: FoldGroup::Brace,
            placeholder: " ".to_string(),
            default_collapsed: true,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"group\":\"brace\""));
        let back: FoldRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
