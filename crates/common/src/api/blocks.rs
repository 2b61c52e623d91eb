use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::{self, ValidationError};

use super::block::Block;

/// Metadata blocks keyed by content hash.
///
/// Every keyed access validates the key against the metadata-block-id
/// format, so a malformed id never lands in (or is looked up from) the
/// collection. Values are [`Block`]s by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blocks {
    inner: BTreeMap<String, Block>,
}

impl Blocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, block_id: &str) -> Result<Option<&Block>, ValidationError> {
        validation::validate_block_id(block_id)?;
        Ok(self.inner.get(block_id))
    }

    pub fn get_mut(&mut self, block_id: &str) -> Result<Option<&mut Block>, ValidationError> {
        validation::validate_block_id(block_id)?;
        Ok(self.inner.get_mut(block_id))
    }

    pub fn insert(
        &mut self,
        block_id: impl Into<String>,
        block: Block,
    ) -> Result<Option<Block>, ValidationError> {
        let block_id = block_id.into();
        validation::validate_block_id(&block_id)?;
        Ok(self.inner.insert(block_id, block))
    }

    /// Bulk insert, validating every key.
    pub fn update<I>(&mut self, entries: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (String, Block)>,
    {
        for (block_id, block) in entries {
            self.insert(block_id, block)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, block_id: &str) -> Result<Option<Block>, ValidationError> {
        validation::validate_block_id(block_id)?;
        Ok(self.inner.remove(block_id))
    }

    pub fn contains(&self, block_id: &str) -> bool {
        self.inner.contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Block)> {
        self.inner.iter()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }
}

impl Serialize for Blocks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Blocks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let inner = BTreeMap::<String, Block>::deserialize(deserializer)?;
        let mut blocks = Blocks::new();
        blocks.update(inner).map_err(D::Error::custom)?;
        Ok(blocks)
    }
}

/// Storage-layer blocks keyed by the compound storage id
/// (`{block_id}_{uuid}`).
///
/// Kept apart from [`Blocks`] because the two id formats and lifecycles
/// differ: a block is known by content hash before it is uploaded, and
/// by storage id once the storage layer has placed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageBlocks {
    inner: BTreeMap<String, Block>,
}

impl StorageBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, storage_id: &str) -> Result<Option<&Block>, ValidationError> {
        validation::validate_storage_block_id(storage_id)?;
        Ok(self.inner.get(storage_id))
    }

    pub fn get_mut(&mut self, storage_id: &str) -> Result<Option<&mut Block>, ValidationError> {
        validation::validate_storage_block_id(storage_id)?;
        Ok(self.inner.get_mut(storage_id))
    }

    pub fn insert(
        &mut self,
        storage_id: impl Into<String>,
        block: Block,
    ) -> Result<Option<Block>, ValidationError> {
        let storage_id = storage_id.into();
        validation::validate_storage_block_id(&storage_id)?;
        Ok(self.inner.insert(storage_id, block))
    }

    /// Bulk insert, validating every key.
    pub fn update<I>(&mut self, entries: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (String, Block)>,
    {
        for (storage_id, block) in entries {
            self.insert(storage_id, block)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, storage_id: &str) -> Result<Option<Block>, ValidationError> {
        validation::validate_storage_block_id(storage_id)?;
        Ok(self.inner.remove(storage_id))
    }

    pub fn contains(&self, storage_id: &str) -> bool {
        self.inner.contains_key(storage_id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Block)> {
        self.inner.iter()
    }

    pub fn storage_ids(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }
}

impl Serialize for StorageBlocks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StorageBlocks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let inner = BTreeMap::<String, Block>::deserialize(deserializer)?;
        let mut blocks = StorageBlocks::new();
        blocks.update(inner).map_err(D::Error::custom)?;
        Ok(blocks)
    }
}
