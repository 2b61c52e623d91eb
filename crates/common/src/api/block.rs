use bytes::Bytes;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

use crate::validation::{self, ValidationError};

/// Compute the metadata block id for a chunk of content: the lowercase
/// hex SHA-1 digest of its bytes.
pub fn content_block_id(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Whether the storage layer considers a block orphaned (no metadata
/// block references it). Unknown until the server has been asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orphaned {
    Yes,
    No,
    #[default]
    Indeterminate,
}

impl From<bool> for Orphaned {
    fn from(value: bool) -> Self {
        if value {
            Orphaned::Yes
        } else {
            Orphaned::No
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    #[error("a block needs at least one of block_id and storage_id")]
    MissingIdentifiers,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One content-addressed chunk of file data.
///
/// A block may be known by its content hash before it has ever been
/// uploaded (`block_id` set, `storage_id` unset), or discovered from
/// the storage layer before its content hash is known (`storage_id`
/// set). Constructing one with neither identifier is an error.
///
/// The payload and the server-tracked bookkeeping fields are filled in
/// after construction as responses arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    project_id: String,
    vault_id: String,
    block_id: Option<String>,
    storage_id: Option<String>,
    data: Option<Bytes>,
    block_size: Option<u64>,
    ref_count: Option<u64>,
    ref_modified: Option<i64>,
    block_orphaned: Orphaned,
}

impl Block {
    pub fn new(
        project_id: impl Into<String>,
        vault_id: impl Into<String>,
        block_id: Option<String>,
        storage_id: Option<String>,
    ) -> Result<Self, BlockError> {
        let project_id = project_id.into();
        let vault_id = vault_id.into();

        validation::validate_project_id(&project_id)?;
        validation::validate_vault_id(&vault_id)?;
        validation::validate_optional_block_id(block_id.as_deref())?;
        validation::validate_optional_storage_block_id(storage_id.as_deref())?;

        if block_id.is_none() && storage_id.is_none() {
            return Err(BlockError::MissingIdentifiers);
        }

        Ok(Self {
            project_id,
            vault_id,
            block_id,
            storage_id,
            data: None,
            block_size: None,
            ref_count: None,
            ref_modified: None,
            block_orphaned: Orphaned::Indeterminate,
        })
    }

    /// Build a block directly from content: the block id is the SHA-1
    /// of `data`, and the payload and size are recorded.
    pub fn from_content(
        project_id: impl Into<String>,
        vault_id: impl Into<String>,
        data: Bytes,
    ) -> Result<Self, BlockError> {
        let mut block = Self::new(project_id, vault_id, Some(content_block_id(&data)), None)?;
        block.block_size = Some(data.len() as u64);
        block.data = Some(data);
        Ok(block)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    pub fn block_id(&self) -> Option<&str> {
        self.block_id.as_deref()
    }

    pub fn set_block_id(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validation::validate_block_id(&value)?;
        self.block_id = Some(value);
        Ok(())
    }

    pub fn storage_id(&self) -> Option<&str> {
        self.storage_id.as_deref()
    }

    pub fn set_storage_id(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validation::validate_storage_block_id(&value)?;
        self.storage_id = Some(value);
        Ok(())
    }

    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, value: Bytes) {
        self.data = Some(value);
    }

    pub fn block_size(&self) -> Option<u64> {
        self.block_size
    }

    pub fn set_block_size(&mut self, value: u64) {
        self.block_size = Some(value);
    }

    pub fn ref_count(&self) -> Option<u64> {
        self.ref_count
    }

    pub fn set_ref_count(&mut self, value: u64) {
        self.ref_count = Some(value);
    }

    /// Unix timestamp of the last reference change, as reported by the
    /// server.
    pub fn ref_modified(&self) -> Option<i64> {
        self.ref_modified
    }

    pub fn set_ref_modified(&mut self, value: i64) {
        self.ref_modified = Some(value);
    }

    pub fn block_orphaned(&self) -> Orphaned {
        self.block_orphaned
    }

    pub fn set_block_orphaned(&mut self, value: bool) {
        self.block_orphaned = value.into();
    }
}

// Snapshot representation. A snapshot captures the client-side view of
// the hierarchy, not block content, so the payload is not persisted.
#[derive(Serialize, Deserialize)]
struct BlockRepr {
    project_id: String,
    vault_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ref_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ref_modified: Option<i64>,
    #[serde(default)]
    block_orphaned: Orphaned,
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BlockRepr {
            project_id: self.project_id.clone(),
            vault_id: self.vault_id.clone(),
            block_id: self.block_id.clone(),
            storage_id: self.storage_id.clone(),
            block_size: self.block_size,
            ref_count: self.ref_count,
            ref_modified: self.ref_modified,
            block_orphaned: self.block_orphaned,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = BlockRepr::deserialize(deserializer)?;
        let mut block = Block::new(
            repr.project_id,
            repr.vault_id,
            repr.block_id,
            repr.storage_id,
        )
        .map_err(D::Error::custom)?;
        block.block_size = repr.block_size;
        block.ref_count = repr.ref_count;
        block.ref_modified = repr.ref_modified;
        block.block_orphaned = repr.block_orphaned;
        Ok(block)
    }
}
