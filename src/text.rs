use crate::models::TextRange;
use ropey::Rope;

/// Read-only source buffer backing one extraction call.
///
/// The extractor needs exactly one text query: the character at a byte
/// offset, used to test whether a length-1 whitespace span is a newline.
#[derive(Debug, Clone)]
pub struct SourceText {
    rope: Rope,
}

impl SourceText {
    pub fn new(source: &str) -> Self {
        Self {
            rope: Rope::from_str(source),
        }
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Character starting at the given byte offset, if in bounds.
    pub fn char_at(&self, byte: usize) -> Option<char> {
        if byte >= self.rope.len_bytes() {
            return None;
        }
        Some(self.rope.char(self.rope.byte_to_char(byte)))
    }

    /// Text covered by a range, for diagnostics and tests.
    pub fn slice(&self, range: TextRange) -> String {
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end.min(self.rope.len_bytes()));
        self.rope.slice(start..end).to_string()
    }
}

impl From<&str> for SourceText {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_at() {
        let text = SourceText::from("if (x)\n{");
        assert_eq!(text.char_at(6), Some('\n'));
        assert_eq!(text.char_at(7), Some('{'));
        assert_eq!(text.char_at(8), None);
    }

    #[test]
    fn test_slice() {
        let text = SourceText::from("void M()\n{\n}");
        assert_eq!(text.slice(TextRange::new(8, 9)), "\n");
        assert_eq!(text.slice(TextRange::new(0, 4)), "void");
    }
}
