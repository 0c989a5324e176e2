//! Commit-message classification.
//!
//! Keyword presence in the commit subject nudges the time estimate: bug
//! fixes tend to be small targeted changes, refactors touch more than their
//! diff suggests.

/// Multiplier for commits whose message mentions a fix or bug.
pub const BUGFIX_MULTIPLIER: f64 = 0.8;
/// Multiplier for refactoring commits.
pub const REFACTOR_MULTIPLIER: f64 = 1.3;
/// Multiplier for everything else.
pub const STANDARD_MULTIPLIER: f64 = 1.0;

/// Time multiplier for a commit message.
///
/// Matching is case-insensitive substring containment, in fixed priority
/// order: "fix" or "bug" wins over "refactor", which wins over the default.
/// Total over all strings, including the empty one.
///
/// # Examples
///
/// ```
/// use hourglass_estimate::classifier::message_multiplier;
///
/// assert_eq!(message_multiplier("Fix login crash"), 0.8);
/// assert_eq!(message_multiplier("refactor auth module"), 1.3);
/// assert_eq!(message_multiplier("add dark mode"), 1.0);
/// assert_eq!(message_multiplier(""), 1.0);
/// ```
pub fn message_multiplier(message: &str) -> f64 {
    let message = message.to_lowercase();
    if message.contains("fix") || message.contains("bug") {
        BUGFIX_MULTIPLIER
    } else if message.contains("refactor") {
        REFACTOR_MULTIPLIER
    } else {
        STANDARD_MULTIPLIER
    }
}
