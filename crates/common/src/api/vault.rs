use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::{self, ValidationError};

use super::blocks::{Blocks, StorageBlocks};
use super::file::{File, FileError};
use super::files::Files;

/// Server-confirmed lifecycle state of a vault.
///
/// A vault starts `Unknown` and only moves as a side effect of a
/// successful remote operation: create confirms `Created`, an
/// existence probe confirms `Valid` or `Invalid`, delete confirms
/// `Deleted`. Nothing transitions back automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultStatus {
    #[default]
    Unknown,
    Created,
    Deleted,
    Valid,
    Invalid,
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VaultStatus::Unknown => "unknown",
            VaultStatus::Created => "created",
            VaultStatus::Deleted => "deleted",
            VaultStatus::Valid => "valid",
            VaultStatus::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// A named container of files and blocks, scoped to a project.
///
/// Tracks the client-side view of everything known about the vault:
/// metadata blocks by content hash, storage blocks by storage id,
/// files by file id, plus the last server-confirmed status and the
/// most recently fetched statistics payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Vault {
    project_id: String,
    vault_id: String,
    status: VaultStatus,
    statistics: Option<serde_json::Value>,
    blocks: Blocks,
    storage_blocks: StorageBlocks,
    files: Files,
}

impl Vault {
    pub fn new(
        project_id: impl Into<String>,
        vault_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let project_id = project_id.into();
        let vault_id = vault_id.into();

        validation::validate_project_id(&project_id)?;
        validation::validate_vault_id(&vault_id)?;

        Ok(Self {
            project_id,
            vault_id,
            status: VaultStatus::Unknown,
            statistics: None,
            blocks: Blocks::new(),
            storage_blocks: StorageBlocks::new(),
            files: Files::new(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    pub fn status(&self) -> VaultStatus {
        self.status
    }

    pub fn set_status(&mut self, status: VaultStatus) {
        self.status = status;
    }

    /// Statistics payload from the server, opaque to the client.
    pub fn statistics(&self) -> Option<&serde_json::Value> {
        self.statistics.as_ref()
    }

    pub fn set_statistics(&mut self, statistics: serde_json::Value) {
        self.statistics = Some(statistics);
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Blocks {
        &mut self.blocks
    }

    pub fn storage_blocks(&self) -> &StorageBlocks {
        &self.storage_blocks
    }

    pub fn storage_blocks_mut(&mut self) -> &mut StorageBlocks {
        &mut self.storage_blocks
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut Files {
        &mut self.files
    }

    /// Construct a [`File`] under this vault and track it.
    pub fn add_file(
        &mut self,
        file_id: impl Into<String>,
        file_url: Option<String>,
    ) -> Result<(), FileError> {
        let file_id = file_id.into();
        let mut file = File::new(&self.project_id, &self.vault_id, Some(file_id.clone()))?;
        if let Some(url) = file_url {
            file.set_url(url);
        }
        self.files.insert(file_id, file)?;
        Ok(())
    }

    /// Snapshot the client-side view to JSON. Status and statistics are
    /// transient probe results and are not part of the snapshot.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reload a snapshot produced by [`Vault::to_json`], re-validating
    /// every identifier in it.
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

#[derive(Serialize, Deserialize)]
struct VaultRepr {
    project_id: String,
    vault_id: String,
    blocks: Blocks,
    storage_blocks: StorageBlocks,
    files: Files,
}

impl Serialize for Vault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VaultRepr {
            project_id: self.project_id.clone(),
            vault_id: self.vault_id.clone(),
            blocks: self.blocks.clone(),
            storage_blocks: self.storage_blocks.clone(),
            files: self.files.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Vault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = VaultRepr::deserialize(deserializer)?;
        let mut vault = Vault::new(repr.project_id, repr.vault_id).map_err(D::Error::custom)?;
        vault.blocks = repr.blocks;
        vault.storage_blocks = repr.storage_blocks;
        vault.files = repr.files;
        Ok(vault)
    }
}
