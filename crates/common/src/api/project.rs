use std::collections::BTreeMap;

use crate::validation::{self, ValidationError};

use super::vault::Vault;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("vault {vault_id:?} belongs to project {vault_project:?}, not {project_id:?}")]
    ForeignVault {
        project_id: String,
        vault_project: String,
        vault_id: String,
    },
}

/// The vaults known under one project id.
///
/// Vaults are keyed by their own `vault_id`, so the mapping invariant
/// (key equals the value's id) holds by construction; inserting a
/// vault that was built for a different project is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    project_id: String,
    vaults: BTreeMap<String, Vault>,
}

impl Project {
    pub fn new(project_id: impl Into<String>) -> Result<Self, ValidationError> {
        let project_id = project_id.into();
        validation::validate_project_id(&project_id)?;
        Ok(Self {
            project_id,
            vaults: BTreeMap::new(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn insert(&mut self, vault: Vault) -> Result<Option<Vault>, ProjectError> {
        if vault.project_id() != self.project_id {
            return Err(ProjectError::ForeignVault {
                project_id: self.project_id.clone(),
                vault_project: vault.project_id().to_string(),
                vault_id: vault.vault_id().to_string(),
            });
        }
        Ok(self.vaults.insert(vault.vault_id().to_string(), vault))
    }

    pub fn get(&self, vault_id: &str) -> Result<Option<&Vault>, ValidationError> {
        validation::validate_vault_id(vault_id)?;
        Ok(self.vaults.get(vault_id))
    }

    pub fn get_mut(&mut self, vault_id: &str) -> Result<Option<&mut Vault>, ValidationError> {
        validation::validate_vault_id(vault_id)?;
        Ok(self.vaults.get_mut(vault_id))
    }

    pub fn remove(&mut self, vault_id: &str) -> Result<Option<Vault>, ValidationError> {
        validation::validate_vault_id(vault_id)?;
        Ok(self.vaults.remove(vault_id))
    }

    pub fn contains(&self, vault_id: &str) -> bool {
        self.vaults.contains_key(vault_id)
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vault)> {
        self.vaults.iter()
    }

    pub fn vault_ids(&self) -> impl Iterator<Item = &String> {
        self.vaults.keys()
    }
}
