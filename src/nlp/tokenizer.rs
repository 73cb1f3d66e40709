//! Label tokenization
//!
//! Labels are split on whitespace only. Punctuation, casing and hyphenation
//! are left as the corpus spells them.

use crate::errors::{HierarchyError, Result};

/// Split a label into tokens
pub fn tokenize_label(label: &str) -> Vec<&str> {
    label.split_whitespace().collect()
}

/// Tokenize a label, rejecting labels with no tokens.
///
/// `document` is the index of the corpus document the label came from and
/// is reported back in the error.
pub fn checked_tokens(label: &str, document: usize) -> Result<Vec<&str>> {
    let tokens = tokenize_label(label);
    if tokens.is_empty() {
        return Err(HierarchyError::InvalidLabel {
            label: label.to_string(),
            document,
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            tokenize_label("  change of\tcontrol "),
            vec!["change", "of", "control"]
        );
    }

    #[test]
    fn test_empty_label_rejected() {
        let err = checked_tokens(" \t", 7).unwrap_err();
        match err {
            HierarchyError::InvalidLabel { label, document } => {
                assert_eq!(label, " \t");
                assert_eq!(document, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_token_accepted() {
        assert_eq!(checked_tokens("governing", 0).unwrap(), vec!["governing"]);
    }
}
