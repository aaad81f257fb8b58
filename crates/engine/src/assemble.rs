use crate::types::Fragment;

/// Join the confident fragments with single spaces, in engine order.
///
/// Fragment text is trimmed before joining; blank fragments and those at or
/// below [`crate::MIN_CONFIDENCE`] are dropped.
pub fn assemble_text(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter(|f| f.is_confident())
        .map(|f| f.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
