//! Logical id normalization and validation
//!
//! Logical ids key the resource and output maps of a stack. Registration
//! normalizes caller-supplied ids to camel case (`bucket-arn` → `bucketArn`)
//! unless the caller overrides the logical id explicitly.

use crate::error::{Result, SynthError};

/// Maximum length accepted for a logical id
const MAX_LOGICAL_ID_LEN: usize = 255;

/// Normalize an id to camel case
///
/// Splits on any non-alphanumeric character, capitalizes each segment
/// after the first, and lowercases the leading character:
///
/// - `bucket-arn` → `bucketArn`
/// - `api_endpoint` → `apiEndpoint`
/// - `BucketArn` → `bucketArn`
pub fn camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = false;

    for c in input.chars() {
        if !c.is_ascii_alphanumeric() {
            capitalize_next = !result.is_empty();
            continue;
        }
        if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    // Lowercase the leading character (segments are ascii after stripping)
    if !result.is_empty() {
        let first = result.remove(0).to_ascii_lowercase();
        result.insert(0, first);
    }
    result
}

/// Validate a logical id
///
/// Must be non-empty, at most 255 characters, alphanumeric only,
/// and start with a letter.
pub fn validate(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(SynthError::InvalidLogicalId {
            id: id.to_string(),
            reason: "must contain at least 1 character".to_string(),
        });
    }
    if id.len() > MAX_LOGICAL_ID_LEN {
        return Err(SynthError::InvalidLogicalId {
            id: id.to_string(),
            reason: format!("must be at most {} characters", MAX_LOGICAL_ID_LEN),
        });
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SynthError::InvalidLogicalId {
            id: id.to_string(),
            reason: "must contain only alphanumeric characters [A-Za-z0-9]".to_string(),
        });
    }
    if !id.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(SynthError::InvalidLogicalId {
            id: id.to_string(),
            reason: "must start with a letter".to_string(),
        });
    }
    Ok(())
}
