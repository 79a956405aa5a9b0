use crate::models::TextRange;
use crate::syntax::{SyntaxTree, TreeBuilder, SKIPPED, WHITESPACE};
use tracing::debug;
use tree_sitter::{Node, Parser};

use super::ParserError;

/// C# front-end: parses source with Tree-sitter and lowers the CST into a
/// whitespace-aware [`SyntaxTree`].
///
/// Tree-sitter trees carry no whitespace nodes, so the byte gaps between
/// CST nodes are materialized as whitespace leaves during lowering. Gap
/// text is split after each newline, giving one whitespace node per line
/// break; the folding rules operate at that granularity (a run of blank
/// lines is a run of whitespace siblings, and the indentation before a
/// brace is a separate node from the blank line above it).
pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse C# source into a whitespace-aware syntax tree covering the
    /// whole input, leading and trailing gaps included.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParserError> {
        let ts_tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParserError::ParseError("parser returned no tree".to_string()))?;

        let mut builder = TreeBuilder::new();
        let root = ts_tree.root_node();
        // The root spans the entire buffer so whitespace at the very start
        // and end of the file still becomes child nodes.
        copy_node(&mut builder, root, source, 0, source.len());
        let tree = builder.finish();

        debug!(nodes = tree.len(), bytes = source.len(), "lowered C# tree");
        Ok(tree)
    }
}

/// Copy one CST node into the builder as an interior node spanning
/// `[start, end)`, interleaving gap whitespace between its children.
fn copy_node(builder: &mut TreeBuilder, node: Node<'_>, source: &str, start: usize, end: usize) {
    if node.child_count() == 0 {
        builder.token(node.kind(), TextRange::new(start, end));
        return;
    }

    builder.open(node.kind(), TextRange::new(start, end));
    let mut pos = start;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        // Zero-length nodes (error-recovery "missing" tokens) carry no
        // text and would produce empty ranges.
        if child.start_byte() == child.end_byte() && child.child_count() == 0 {
            continue;
        }
        if child.start_byte() > pos {
            push_gap(builder, source, pos, child.start_byte());
        }
        copy_node(builder, child, source, child.start_byte(), child.end_byte());
        pos = pos.max(child.end_byte());
    }
    if end > pos {
        push_gap(builder, source, pos, end);
    }
    builder.close();
}

/// Materialize the gap `[start, end)` as leaf nodes, split after each
/// newline so one whitespace leaf holds at most one line break.
fn push_gap(builder: &mut TreeBuilder, source: &str, start: usize, end: usize) {
    let gap = &source[start..end];
    let mut seg_start = start;
    for (i, ch) in gap.char_indices() {
        if ch == '\n' {
            let seg_end = start + i + 1;
            push_gap_leaf(builder, source, seg_start, seg_end);
            seg_start = seg_end;
        }
    }
    if seg_start < end {
        push_gap_leaf(builder, source, seg_start, end);
    }
}

fn push_gap_leaf(builder: &mut TreeBuilder, source: &str, start: usize, end: usize) {
    let kind = if source[start..end].chars().all(char::is_whitespace) {
        WHITESPACE
    } else {
        SKIPPED
    };
    builder.token(kind, TextRange::new(start, end));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{preorder, TreeNode};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> SyntaxTree {
        CSharpParser::new().unwrap().parse(source).unwrap()
    }

    #[test]
    fn test_parser_creation() {
        // Guards the grammar/runtime pairing: a language ABI mismatch
        // between the tree-sitter runtime and the C# grammar crate fails
        // here, at set_language, before any source is parsed.
        let parser = CSharpParser::new();
        assert!(parser.is_ok(), "{:?}", parser.err());
    }

    fn whitespace_ranges(tree: &SyntaxTree) -> Vec<(usize, usize)> {
        preorder(tree.root())
            .filter(|n| n.kind() == WHITESPACE)
            .map(|n| (n.range().start, n.range().end))
            .collect()
    }

    #[test]
    fn test_root_spans_whole_buffer() {
        let source = "class C\n{\n}\n";
        let tree = parse(source);
        assert_eq!(tree.root().range(), TextRange::new(0, source.len()));
    }

    #[test]
    fn test_gap_whitespace_is_materialized() {
        let source = "class C\n{\n}";
        let tree = parse(source);
        let ws = whitespace_ranges(&tree);
        assert!(ws.contains(&(7, 8)), "newline before brace: {:?}", ws);
        assert!(ws.contains(&(9, 10)), "newline before close brace: {:?}", ws);
    }

    #[test]
    fn test_blank_line_run_is_one_node_per_newline() {
        let source = "class C\n{\nvoid M()\n\n\n\n{\n}\n}";
        let tree = parse(source);
        let ws = whitespace_ranges(&tree);
        for range in [(18, 19), (19, 20), (20, 21), (21, 22)] {
            assert!(ws.contains(&range), "missing {:?} in {:?}", range, ws);
        }
    }

    #[test]
    fn test_indentation_splits_after_newline() {
        let source = "class C\n{\n    void M() { }\n}";
        let tree = parse(source);
        let ws = whitespace_ranges(&tree);
        // "\n" then "    " as separate leaves.
        assert!(ws.contains(&(9, 10)), "{:?}", ws);
        assert!(ws.contains(&(10, 14)), "{:?}", ws);
    }

    #[test]
    fn test_whitespace_nodes_are_siblings_in_order() {
        let source = "class C\n{\nvoid M()\n\n\n\n{\n}\n}";
        let tree = parse(source);
        let first = preorder(tree.root())
            .find(|n| n.kind() == WHITESPACE && n.range().start == 18)
            .unwrap();
        let second = first.next_sibling().unwrap();
        let third = second.next_sibling().unwrap();
        assert_eq!(second.kind(), WHITESPACE);
        assert_eq!(third.kind(), WHITESPACE);
        assert_eq!(second.range(), TextRange::new(19, 20));
        assert_eq!(third.range(), TextRange::new(20, 21));
    }

    #[test]
    fn test_leading_and_trailing_gaps_kept() {
        let source = "\nclass C { }\n";
        let tree = parse(source);
        let ws = whitespace_ranges(&tree);
        assert!(ws.contains(&(0, 1)), "{:?}", ws);
        assert!(ws.contains(&(12, 13)), "{:?}", ws);
    }

    #[test]
    fn test_brace_tokens_present() {
        let source = "class C\n{\n}";
        let tree = parse(source);
        let braces: Vec<_> = preorder(tree.root())
            .filter(|n| n.kind() == "{")
            .collect();
        assert_eq!(braces.len(), 1);
        assert_eq!(braces[0].range(), TextRange::new(8, 9));
    }
}
