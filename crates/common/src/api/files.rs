use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::{self, ValidationError};

use super::file::File;

/// Files keyed by their server-assigned UUID, with the key format
/// validated on every keyed access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Files {
    inner: BTreeMap<String, File>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_id: &str) -> Result<Option<&File>, ValidationError> {
        validation::validate_file_id(file_id)?;
        Ok(self.inner.get(file_id))
    }

    pub fn get_mut(&mut self, file_id: &str) -> Result<Option<&mut File>, ValidationError> {
        validation::validate_file_id(file_id)?;
        Ok(self.inner.get_mut(file_id))
    }

    pub fn insert(
        &mut self,
        file_id: impl Into<String>,
        file: File,
    ) -> Result<Option<File>, ValidationError> {
        let file_id = file_id.into();
        validation::validate_file_id(&file_id)?;
        Ok(self.inner.insert(file_id, file))
    }

    /// Bulk insert, validating every key.
    pub fn update<I>(&mut self, entries: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (String, File)>,
    {
        for (file_id, file) in entries {
            self.insert(file_id, file)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, file_id: &str) -> Result<Option<File>, ValidationError> {
        validation::validate_file_id(file_id)?;
        Ok(self.inner.remove(file_id))
    }

    pub fn contains(&self, file_id: &str) -> bool {
        self.inner.contains_key(file_id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &File)> {
        self.inner.iter()
    }

    pub fn file_ids(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }
}

impl Serialize for Files {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Files {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let inner = BTreeMap::<String, File>::deserialize(deserializer)?;
        let mut files = Files::new();
        files.update(inner).map_err(D::Error::custom)?;
        Ok(files)
    }
}
