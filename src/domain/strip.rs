//! Removal of candidate substrings that also occur in the original string.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Removes every candidate from a working copy of `original`.
///
/// Candidates are processed in order. A candidate is only eligible while it
/// occurs in the untouched `original`; while eligible, its leftmost occurrence
/// in the working copy is removed until none remain. Substrings that only form
/// after earlier removals are therefore kept.
///
/// # Errors
/// [`DomainError::InvalidArgument`] if any candidate is empty. Candidates are
/// checked before anything is removed.
///
/// # Examples
/// ```
/// use challenges::domain::remove_instances;
///
/// let cleaned = remove_instances("absdefge", &["ab", "fg", "ee"]).unwrap();
/// assert_eq!(cleaned, "sdee");
/// ```
#[instrument(level = "debug", skip(instances), fields(candidates = instances.len()))]
pub fn remove_instances<S: AsRef<str>>(original: &str, instances: &[S]) -> DomainResult<String> {
    if let Some(idx) = instances.iter().position(|s| s.as_ref().is_empty()) {
        return Err(DomainError::InvalidArgument(format!(
            "candidate #{} is an empty string",
            idx + 1
        )));
    }

    let mut modified = original.to_string();

    for instance in instances.iter().map(AsRef::as_ref) {
        // original never changes, one membership check per candidate is enough
        if !original.contains(instance) {
            trace!(instance, "not in original, skipped");
            continue;
        }

        while let Some(pos) = modified.find(instance) {
            modified.replace_range(pos..pos + instance.len(), "");
            trace!(instance, pos, remaining = %modified, "removed");
        }
    }

    debug!(result = %modified, "done");
    Ok(modified)
}
