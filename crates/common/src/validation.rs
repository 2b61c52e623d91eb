//! Identifier validation for the Deuce API.
//!
//! Every identifier class the service understands has a fixed shape:
//!
//! - project / vault ids: `[a-zA-Z0-9_-]+`, at most 128 characters
//! - file ids: lowercase hyphenated UUIDs, assigned by the server
//! - metadata block ids: 40 lowercase hex characters (a SHA-1 digest)
//! - storage block ids: `{block_id}_{uuid}`, assigned by the storage layer
//!
//! Collections re-run these checks on every keyed access, so a malformed
//! id is caught before it ever reaches the wire.

use std::sync::LazyLock;

use regex::Regex;

pub const PROJECT_ID_MAX_LEN: usize = 128;
pub const VAULT_ID_MAX_LEN: usize = 128;

static OPEN_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());
static METADATA_BLOCK_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").unwrap());
static FILE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});
static STORAGE_BLOCK_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9a-f]{40}_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .unwrap()
});

/// An identifier failed its format check. One variant per identifier
/// category so callers can tell which field was at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid project id: {0:?}")]
    Project(String),
    #[error("invalid vault id: {0:?}")]
    Vault(String),
    #[error("invalid file id: {0:?}")]
    File(String),
    #[error("invalid block id: {0:?}")]
    Block(String),
    #[error("invalid storage block id: {0:?}")]
    StorageBlock(String),
}

pub fn validate_project_id(value: &str) -> Result<(), ValidationError> {
    if OPEN_STRING_REGEX.is_match(value) && value.len() <= PROJECT_ID_MAX_LEN {
        Ok(())
    } else {
        Err(ValidationError::Project(value.to_string()))
    }
}

pub fn validate_vault_id(value: &str) -> Result<(), ValidationError> {
    if OPEN_STRING_REGEX.is_match(value) && value.len() <= VAULT_ID_MAX_LEN {
        Ok(())
    } else {
        Err(ValidationError::Vault(value.to_string()))
    }
}

pub fn validate_file_id(value: &str) -> Result<(), ValidationError> {
    if FILE_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::File(value.to_string()))
    }
}

pub fn validate_block_id(value: &str) -> Result<(), ValidationError> {
    if METADATA_BLOCK_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Block(value.to_string()))
    }
}

pub fn validate_storage_block_id(value: &str) -> Result<(), ValidationError> {
    if STORAGE_BLOCK_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::StorageBlock(value.to_string()))
    }
}

/// Variants for fields that may legitimately be unset, e.g. a `File`
/// that has not been created on the server yet.
pub fn validate_optional_file_id(value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), validate_file_id)
}

pub fn validate_optional_block_id(value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), validate_block_id)
}

pub fn validate_optional_storage_block_id(value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), validate_storage_block_id)
}
