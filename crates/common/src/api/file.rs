use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::{self, ValidationError};

use super::blocks::Blocks;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("block {block_id} is not part of file {file_id:?}")]
    UnknownBlock {
        file_id: Option<String>,
        block_id: String,
    },
    #[error("no block assigned at offset {0}")]
    UnknownOffset(u64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One logical uploaded file: a composition of blocks at byte offsets.
///
/// The `file_id` is a server-assigned UUID; a file constructed before
/// `CreateFile` has run has none yet. `blocks` is the set of blocks
/// that make up the content, and `offsets` records where each block
/// sits. A block must be in `blocks` before it can be assigned to an
/// offset, which is what keeps the two tables consistent ahead of an
/// assignment request.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    project_id: String,
    vault_id: String,
    file_id: Option<String>,
    url: Option<String>,
    blocks: Blocks,
    offsets: BTreeMap<u64, String>,
}

impl File {
    pub fn new(
        project_id: impl Into<String>,
        vault_id: impl Into<String>,
        file_id: Option<String>,
    ) -> Result<Self, FileError> {
        let project_id = project_id.into();
        let vault_id = vault_id.into();

        validation::validate_project_id(&project_id)?;
        validation::validate_vault_id(&vault_id)?;
        validation::validate_optional_file_id(file_id.as_deref())?;

        Ok(Self {
            project_id,
            vault_id,
            file_id,
            url: None,
            blocks: Blocks::new(),
            offsets: BTreeMap::new(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn set_file_id(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validation::validate_file_id(&value)?;
        self.file_id = Some(value);
        Ok(())
    }

    /// Server location of the file resource, from the `location` header
    /// of the create response.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = Some(value.into());
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Blocks {
        &mut self.blocks
    }

    pub fn offsets(&self) -> &BTreeMap<u64, String> {
        &self.offsets
    }

    /// Raw access to the offset table, for reconciling with state
    /// reported by the server. `assign_block` is the checked path.
    pub fn offsets_mut(&mut self) -> &mut BTreeMap<u64, String> {
        &mut self.offsets
    }

    /// Record that `block_id` composes the file at `offset`. The block
    /// must already be in this file's `blocks`.
    pub fn assign_block(&mut self, block_id: &str, offset: u64) -> Result<(), FileError> {
        validation::validate_block_id(block_id)?;

        if !self.blocks.contains(block_id) {
            return Err(FileError::UnknownBlock {
                file_id: self.file_id.clone(),
                block_id: block_id.to_string(),
            });
        }

        self.offsets.insert(offset, block_id.to_string());
        Ok(())
    }

    pub fn get_block_for_offset(&self, offset: u64) -> Result<&str, FileError> {
        self.offsets
            .get(&offset)
            .map(String::as_str)
            .ok_or(FileError::UnknownOffset(offset))
    }

    /// All offsets currently mapped to `block_id`. Empty when the block
    /// is unreferenced; more than one entry when identical content
    /// appears at several positions.
    pub fn get_offsets_for_block(&self, block_id: &str) -> Result<Vec<u64>, FileError> {
        validation::validate_block_id(block_id)?;
        Ok(self
            .offsets
            .iter()
            .filter(|(_, id)| id.as_str() == block_id)
            .map(|(offset, _)| *offset)
            .collect())
    }
}

#[derive(Serialize, Deserialize)]
struct FileRepr {
    project_id: String,
    vault_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    blocks: Blocks,
    offsets: BTreeMap<u64, String>,
}

impl Serialize for File {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FileRepr {
            project_id: self.project_id.clone(),
            vault_id: self.vault_id.clone(),
            file_id: self.file_id.clone(),
            url: self.url.clone(),
            blocks: self.blocks.clone(),
            offsets: self.offsets.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for File {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = FileRepr::deserialize(deserializer)?;
        let mut file = File::new(repr.project_id, repr.vault_id, repr.file_id)
            .map_err(D::Error::custom)?;
        for block_id in repr.offsets.values() {
            validation::validate_block_id(block_id).map_err(D::Error::custom)?;
        }
        file.url = repr.url;
        file.blocks = repr.blocks;
        file.offsets = repr.offsets;
        Ok(file)
    }
}

#[cfg(test)]
mod test {
    use bytes::Bytes;

    use super::super::block::Block;
    use super::*;

    fn file_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn content_block(data: &'static [u8]) -> (String, Block) {
        let block = Block::from_content("project", "vault", Bytes::from_static(data)).unwrap();
        (block.block_id().unwrap().to_string(), block)
    }

    #[test]
    fn test_new_validates_file_id() {
        assert!(File::new("project", "vault", None).is_ok());
        assert!(File::new("project", "vault", Some(file_id())).is_ok());

        let err = File::new("project", "vault", Some("not-a-uuid".into())).unwrap_err();
        assert!(matches!(
            err,
            FileError::Validation(ValidationError::File(_))
        ));
    }

    #[test]
    fn test_assign_block_requires_known_block() {
        let mut file = File::new("project", "vault", Some(file_id())).unwrap();
        let (block_id, block) = content_block(b"content");

        let err = file.assign_block(&block_id, 0).unwrap_err();
        assert!(matches!(err, FileError::UnknownBlock { .. }));

        file.blocks_mut().insert(&block_id, block).unwrap();
        file.assign_block(&block_id, 0).unwrap();

        assert_eq!(file.get_block_for_offset(0).unwrap(), block_id);
        assert!(matches!(
            file.get_block_for_offset(100),
            Err(FileError::UnknownOffset(100))
        ));
    }

    #[test]
    fn test_offsets_for_block() {
        let mut file = File::new("project", "vault", Some(file_id())).unwrap();
        let (repeated_id, repeated) = content_block(b"deduplicated");
        let (other_id, other) = content_block(b"other");

        file.blocks_mut().insert(&repeated_id, repeated).unwrap();
        file.blocks_mut().insert(&other_id, other).unwrap();

        // unreferenced block: no offsets
        assert_eq!(file.get_offsets_for_block(&repeated_id).unwrap(), Vec::<u64>::new());

        file.assign_block(&repeated_id, 0).unwrap();
        file.assign_block(&other_id, 100).unwrap();
        file.assign_block(&repeated_id, 250).unwrap();

        let mut offsets = file.get_offsets_for_block(&repeated_id).unwrap();
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 250]);
        assert_eq!(file.get_offsets_for_block(&other_id).unwrap(), vec![100]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut file = File::new("project", "vault", Some(file_id())).unwrap();
        file.set_url("/v1.0/vault/files/abc");
        let (block_id, block) = content_block(b"round trip");
        file.blocks_mut().insert(&block_id, block).unwrap();
        file.assign_block(&block_id, 42).unwrap();

        let json = serde_json::to_string(&file).unwrap();
        let reloaded: File = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded.file_id(), file.file_id());
        assert_eq!(reloaded.url(), file.url());
        assert_eq!(reloaded.offsets(), file.offsets());
        assert!(reloaded.blocks().contains(&block_id));
    }
}
