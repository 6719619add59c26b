//! resolve::merge_commit
//!
//! Recognizes the commit message GitHub writes when a pull request is
//! merged with a merge commit: `Merge pull request #N from <source>`.

/// Literal prefix of a merge commit message.
const MERGE_PREFIX: &str = "Merge pull request #";

/// Separator between the number and the source branch.
const FROM_SEPARATOR: &str = " from ";

/// Extract the pull request number from a merge commit message.
///
/// The message must start with `Merge pull request #`, followed by one or
/// more ASCII digits and ` from `. Matching is case-sensitive and anchored
/// at the start of the message. Whatever follows ` from ` (normally
/// `owner/branch` and the PR title on later lines) is ignored.
///
/// Returns `None` for any other message, and for numbers that are zero or
/// do not fit in a `u64`.
///
/// # Example
///
/// ```
/// use sawyer::resolve::parse_merge_commit;
///
/// assert_eq!(parse_merge_commit("Merge pull request #42 from someuser/some-branch"), Some(42));
/// assert_eq!(parse_merge_commit("Fix typo"), None);
/// ```
pub fn parse_merge_commit(message: &str) -> Option<u64> {
    let rest = message.strip_prefix(MERGE_PREFIX)?;

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(digits_end);

    if digits.is_empty() || !tail.starts_with(FROM_SEPARATOR) {
        return None;
    }

    digits.parse::<u64>().ok().filter(|&n| n > 0)
}
