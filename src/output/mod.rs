use crate::models::FoldRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convert fold records to pretty-printed JSON
pub fn to_json(records: &[FoldRecord]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(records).map_err(FormatError::from)
}

/// Convert fold records to compact JSON
pub fn to_json_compact(records: &[FoldRecord]) -> Result<String, FormatError> {
    serde_json::to_string(records).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoldGroup, TextRange};

    #[test]
    fn test_to_json() {
        let records = vec![FoldRecord {
            anchor_kind: "{".to_string(),
            range: TextRange::new(7, 8),
            group: FoldGroup::Brace,
            placeholder: " ".to_string(),
            default_collapsed: true,
        }];

        let json = to_json(&records).unwrap();
        assert!(json.contains("\"anchor_kind\""));
        assert!(json.contains("\"brace\""));

        let compact = to_json_compact(&records).unwrap();
        assert!(!compact.contains('\n'));
    }
}
