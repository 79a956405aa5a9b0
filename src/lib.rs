//! Bracefold
//!
//! A folding-region provider for C# editors: given a parsed syntax tree and
//! the raw source text, it decides which spans of whitespace around braces
//! (and a few clause keywords) collapse to a single space, and which runs of
//! consecutive blank lines collapse down to one visible blank line.
//!
//! # Features
//!
//! - Parse C# with Tree-sitter and lower the CST into a whitespace-aware
//!   syntax tree
//! - Fold the whitespace before `{`, `catch`, `else`, `where`, and parameter
//!   declarations so multi-line headers read as one line when collapsed
//! - Fold runs of 3+ blank lines, keeping the first one visible
//! - Policy-driven: the qualifying node kinds and placeholders are a
//!   configuration table, not hard-coded branches
//! - Works against any host tree through the generic [`syntax::TreeNode`]
//!   interface
//!
//! # Example
//!
//! ```
//! use bracefold::{CSharpParser, FoldRegionExtractor, SourceText};
//!
//! let source = "class C\n{\n}\n";
//! let mut parser = CSharpParser::new().unwrap();
//! let tree = parser.parse(source).unwrap();
//!
//! let extractor = FoldRegionExtractor::default();
//! let folds = extractor.build_fold_regions(tree.root(), &SourceText::from(source));
//! for fold in &folds {
//!     println!("{} {:?}", fold.group.as_str(), fold.range);
//! }
//! ```

pub mod engine;
pub mod models;
pub mod output;
pub mod parsers;
pub mod syntax;
pub mod text;

// Re-exports for convenience
pub use engine::{build_fold_regions, FoldRegionExtractor};
pub use models::{FoldDescriptor, FoldGroup, FoldPolicy, FoldRecord, TextRange};
pub use output::{to_json, to_json_compact, FormatError};
pub use parsers::{CSharpParser, ParserError};
pub use syntax::{SyntaxNodeRef, SyntaxTree, TreeBuilder, TreeNode};
pub use text::SourceText;
