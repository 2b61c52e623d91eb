use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use common::api::{Block, Vault, VaultStatus};
use common::validation;

use crate::api::v1::files::assign::BlockAssignment;
use crate::api::v1::{blocks, files, storage, vault as vault_ops};
use crate::auth::Authenticator;

use super::error::ApiError;
use super::ApiRequest;

const X_AUTH_TOKEN: &str = "X-Auth-Token";
const X_PROJECT_ID: &str = "X-Project-ID";
const X_FILE_ID: &str = "x-file-id";
const LOCATION: &str = "location";
const X_BLOCK_ID: &str = "X-Block-ID";
const X_STORAGE_ID: &str = "X-Storage-ID";
const X_BLOCK_REFERENCE_COUNT: &str = "X-Block-Reference-Count";
const X_REF_MODIFIED: &str = "X-Ref-Modified";
const X_BLOCK_SIZE: &str = "X-Block-Size";
const X_BLOCK_ORPHANED: &str = "X-Block-Orphaned";

/// HTTP REST client for the Deuce API.
///
/// Each method performs exactly one request against the service:
/// validate the domain objects locally, fetch credentials from the
/// [`Authenticator`], issue the call, and on success mutate the
/// vault/file/block state to match what the server confirmed. There is
/// no retry at this layer; the authenticator owns token-acquisition
/// retries and everything else surfaces to the caller.
#[derive(Clone)]
pub struct DeuceClient {
    base_url: Url,
    client: Client,
    authenticator: Arc<dyn Authenticator>,
}

impl DeuceClient {
    pub fn new(authenticator: Arc<dyn Authenticator>, apihost: &Url) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            base_url: apihost.clone(),
            client,
            authenticator,
        })
    }

    /// The project id all requests run under, from the authenticator.
    pub fn project_id(&self) -> &str {
        self.authenticator.auth_tenant_id()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self.authenticator.auth_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(
            X_AUTH_TOKEN,
            HeaderValue::from_str(&token)
                .map_err(|e| ApiError::InvalidHeader(X_AUTH_TOKEN, e.to_string()))?,
        );
        headers.insert(
            X_PROJECT_ID,
            HeaderValue::from_str(self.authenticator.auth_tenant_id())
                .map_err(|e| ApiError::InvalidHeader(X_PROJECT_ID, e.to_string()))?,
        );
        Ok(headers)
    }

    /// One round trip: refresh auth headers, build the request for its
    /// URL template, send.
    async fn send<R: ApiRequest>(&self, request: R) -> Result<Response, ApiError> {
        let headers = self.auth_headers().await?;
        let request = request
            .build_request(&self.base_url, &self.client)?
            .headers(headers)
            .build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "deuce api request");
        Ok(self.client.execute(request).await?)
    }

    async fn expect_status(
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, ApiError> {
        let status = response.status();
        if status == expected {
            Ok(response)
        } else {
            let body = response.text().await?;
            tracing::warn!(%status, "deuce api request failed");
            Err(ApiError::HttpStatus(status, body))
        }
    }

    /// Create a vault. On 201 the returned vault is marked
    /// [`VaultStatus::Created`].
    pub async fn create_vault(&self, vault_name: &str) -> Result<Vault, ApiError> {
        let mut vault = Vault::new(self.project_id(), vault_name)?;

        let response = self
            .send(vault_ops::create::CreateRequest {
                vault_id: vault_name.to_string(),
            })
            .await?;
        Self::expect_status(response, StatusCode::CREATED).await?;

        vault.set_status(VaultStatus::Created);
        Ok(vault)
    }

    /// Fetch a vault by name via the existence probe. A missing vault
    /// is a failure here, unlike [`DeuceClient::vault_exists`].
    pub async fn get_vault(&self, vault_name: &str) -> Result<Vault, ApiError> {
        let mut vault = Vault::new(self.project_id(), vault_name)?;
        if self.vault_exists(&mut vault).await? {
            Ok(vault)
        } else {
            Err(ApiError::HttpStatus(
                StatusCode::NOT_FOUND,
                format!("vault not found: {vault_name}"),
            ))
        }
    }

    /// Probe whether the vault exists. 204 and 404 are both answers;
    /// the vault's status records which one the server gave.
    pub async fn vault_exists(&self, vault: &mut Vault) -> Result<bool, ApiError> {
        let response = self
            .send(vault_ops::exists::ExistsRequest {
                vault_id: vault.vault_id().to_string(),
            })
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                vault.set_status(VaultStatus::Valid);
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                vault.set_status(VaultStatus::Invalid);
                Ok(false)
            }
            status => Err(ApiError::HttpStatus(status, response.text().await?)),
        }
    }

    /// Delete the vault. On 204 the vault is marked
    /// [`VaultStatus::Deleted`]; its local collections are untouched.
    pub async fn delete_vault(&self, vault: &mut Vault) -> Result<(), ApiError> {
        let response = self
            .send(vault_ops::delete::DeleteRequest {
                vault_id: vault.vault_id().to_string(),
            })
            .await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;

        vault.set_status(VaultStatus::Deleted);
        Ok(())
    }

    /// Fetch the vault's statistics payload and store it on the vault.
    pub async fn get_vault_statistics(&self, vault: &mut Vault) -> Result<(), ApiError> {
        let response = self
            .send(vault_ops::statistics::StatisticsRequest {
                vault_id: vault.vault_id().to_string(),
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        let statistics: serde_json::Value = response.json().await?;
        vault.set_statistics(statistics);
        Ok(())
    }

    /// List the vault's metadata block ids, one page per call. Each
    /// returned id is tracked in `vault.blocks` as an unpopulated
    /// block; the caller drives pagination with the last id as the
    /// next marker.
    pub async fn get_block_list(
        &self,
        vault: &mut Vault,
        marker: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<String>, ApiError> {
        validation::validate_optional_block_id(marker)?;

        let response = self
            .send(blocks::list::ListRequest {
                vault_id: vault.vault_id().to_string(),
                marker: marker.map(str::to_string),
                limit,
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        let block_ids: Vec<String> = response.json().await?;
        for block_id in &block_ids {
            let block = Block::new(
                vault.project_id().to_string(),
                vault.vault_id().to_string(),
                Some(block_id.clone()),
                None,
            )?;
            vault.blocks_mut().insert(block_id.clone(), block)?;
        }
        Ok(block_ids)
    }

    /// Upload one block's content. The block must carry its content
    /// id; an unset payload uploads as empty.
    pub async fn upload_block(&self, vault: &Vault, block: &Block) -> Result<(), ApiError> {
        let block_id = block.block_id().ok_or(ApiError::MissingBlockId)?;

        let response = self
            .send(blocks::upload::UploadRequest {
                vault_id: vault.vault_id().to_string(),
                block_id: block_id.to_string(),
                data: block.data().cloned().unwrap_or_else(Bytes::new),
            })
            .await?;
        Self::expect_status(response, StatusCode::CREATED).await?;
        Ok(())
    }

    /// Fetch one block's content into `block.data`.
    pub async fn download_block(&self, vault: &Vault, block: &mut Block) -> Result<(), ApiError> {
        let block_id = block.block_id().ok_or(ApiError::MissingBlockId)?;

        let response = self
            .send(blocks::download::DownloadRequest {
                vault_id: vault.vault_id().to_string(),
                block_id: block_id.to_string(),
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        block.set_data(response.bytes().await?);
        Ok(())
    }

    /// Delete a metadata block on the server. The vault's local
    /// collections are left alone.
    pub async fn delete_block(&self, vault: &Vault, block: &Block) -> Result<(), ApiError> {
        let block_id = block.block_id().ok_or(ApiError::MissingBlockId)?;

        let response = self
            .send(blocks::delete::DeleteRequest {
                vault_id: vault.vault_id().to_string(),
                block_id: block_id.to_string(),
            })
            .await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Create an empty file in the vault. The server assigns the file
    /// id (`x-file-id` header) and resource path (`location` header);
    /// both land in `vault.files`. Returns the new file id.
    pub async fn create_file(&self, vault: &mut Vault) -> Result<String, ApiError> {
        let response = self
            .send(files::create::CreateRequest {
                vault_id: vault.vault_id().to_string(),
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::CREATED).await?;

        let file_id = required_header(response.headers(), X_FILE_ID)?.to_string();
        let file_url = required_header(response.headers(), LOCATION)?.to_string();

        vault.add_file(&file_id, Some(file_url))?;
        Ok(file_id)
    }

    /// Commit block-to-offset assignments for a file.
    ///
    /// With `block_ids` given, every `(block_id, offset)` pair must
    /// already agree with the client's own bookkeeping: the block is
    /// registered with the vault, part of the file, and recorded at
    /// exactly that offset in the file's offset table. Without
    /// `block_ids`, the pairs are derived from the file's offset table
    /// directly. Returns the server's list of block ids that still
    /// need to be uploaded.
    pub async fn assign_blocks_to_file(
        &self,
        vault: &mut Vault,
        file_id: &str,
        block_ids: Option<&[(String, u64)]>,
    ) -> Result<Vec<String>, ApiError> {
        validation::validate_file_id(file_id)?;

        let file = vault
            .files()
            .get(file_id)?
            .ok_or_else(|| ApiError::UnknownFile {
                vault_id: vault.vault_id().to_string(),
                file_id: file_id.to_string(),
            })?;

        let pairs: Vec<(String, u64)> = match block_ids {
            Some(pairs) => {
                if pairs.is_empty() {
                    return Err(ApiError::EmptyBlockList);
                }
                for (block_id, offset) in pairs {
                    if !vault.blocks().contains(block_id) {
                        return Err(ApiError::BlockNotInVault(block_id.clone()));
                    }
                    if !file.blocks().contains(block_id) {
                        return Err(ApiError::BlockNotInFile(block_id.clone()));
                    }
                    match file.offsets().get(offset) {
                        None => return Err(ApiError::OffsetNotAssigned(*offset)),
                        Some(assigned) if assigned != block_id => {
                            return Err(ApiError::OffsetMismatch {
                                offset: *offset,
                                assigned: assigned.clone(),
                                requested: block_id.clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
                pairs.to_vec()
            }
            None => {
                if file.offsets().is_empty() || file.blocks().is_empty() {
                    return Err(ApiError::EmptyBlockList);
                }
                for block_id in file.offsets().values() {
                    if !file.blocks().contains(block_id) {
                        return Err(ApiError::BlockNotInFile(block_id.clone()));
                    }
                }
                file.offsets()
                    .iter()
                    .map(|(offset, block_id)| (block_id.clone(), *offset))
                    .collect()
            }
        };

        let assignments = pairs
            .iter()
            .map(|(block_id, offset)| {
                let block = file
                    .blocks()
                    .get(block_id)?
                    .ok_or_else(|| ApiError::BlockNotInFile(block_id.clone()))?;
                let size = block
                    .data()
                    .map(|data| data.len() as u64)
                    .or(block.block_size())
                    .unwrap_or(0);
                Ok(BlockAssignment {
                    id: block_id.clone(),
                    offset: *offset,
                    size,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let response = self
            .send(files::assign::AssignRequest {
                vault_id: vault.vault_id().to_string(),
                file_id: file_id.to_string(),
                blocks: assignments,
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        Ok(response.json().await?)
    }

    /// List the blocks assigned to a file as `(block_id, offset)`
    /// pairs, one page per call; the marker is a byte offset.
    pub async fn get_file_block_list(
        &self,
        vault: &Vault,
        file_id: &str,
        marker: Option<u64>,
        limit: Option<u32>,
    ) -> Result<Vec<(String, u64)>, ApiError> {
        validation::validate_file_id(file_id)?;

        let response = self
            .send(files::list_blocks::ListBlocksRequest {
                vault_id: vault.vault_id().to_string(),
                file_id: file_id.to_string(),
                marker,
                limit,
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        Ok(response.json().await?)
    }

    /// List the storage layer's block ids, one page per call. Each
    /// returned id is tracked in `vault.storage_blocks` as an
    /// unpopulated block.
    pub async fn get_block_storage_list(
        &self,
        vault: &mut Vault,
        marker: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<String>, ApiError> {
        validation::validate_optional_storage_block_id(marker)?;

        let response = self
            .send(storage::list::ListRequest {
                vault_id: vault.vault_id().to_string(),
                marker: marker.map(str::to_string),
                limit,
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        let storage_ids: Vec<String> = response.json().await?;
        for storage_id in &storage_ids {
            let block = Block::new(
                vault.project_id().to_string(),
                vault.vault_id().to_string(),
                None,
                Some(storage_id.clone()),
            )?;
            vault
                .storage_blocks_mut()
                .insert(storage_id.clone(), block)?;
        }
        Ok(storage_ids)
    }

    /// Fetch storage-layer bookkeeping for a block; the 204 response
    /// carries everything in headers, which are folded into `block`.
    pub async fn head_block_storage(
        &self,
        vault: &Vault,
        block: &mut Block,
    ) -> Result<(), ApiError> {
        let storage_id = block.storage_id().ok_or(ApiError::MissingStorageId)?;

        let response = self
            .send(storage::head::HeadRequest {
                vault_id: vault.vault_id().to_string(),
                storage_id: storage_id.to_string(),
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::NO_CONTENT).await?;

        apply_storage_headers(block, response.headers())
    }

    /// Delete a block from the storage layer.
    pub async fn delete_block_storage(
        &self,
        vault: &Vault,
        block: &Block,
    ) -> Result<(), ApiError> {
        let storage_id = block.storage_id().ok_or(ApiError::MissingStorageId)?;

        let response = self
            .send(storage::delete::DeleteRequest {
                vault_id: vault.vault_id().to_string(),
                storage_id: storage_id.to_string(),
            })
            .await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Fetch a block's content by storage id. The payload lands in
    /// `block.data` and the bookkeeping headers are folded in as well.
    pub async fn download_block_storage_data(
        &self,
        vault: &Vault,
        block: &mut Block,
    ) -> Result<(), ApiError> {
        let storage_id = block.storage_id().ok_or(ApiError::MissingStorageId)?;

        let response = self
            .send(storage::download::DownloadRequest {
                vault_id: vault.vault_id().to_string(),
                storage_id: storage_id.to_string(),
            })
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        apply_storage_headers(block, response.headers())?;
        block.set_data(response.bytes().await?);
        Ok(())
    }
}

impl std::fmt::Debug for DeuceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeuceClient")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id())
            .finish_non_exhaustive()
    }
}

fn header_str<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<Option<&'a str>, ApiError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|e| ApiError::InvalidHeader(name, e.to_string())),
    }
}

fn required_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, ApiError> {
    header_str(headers, name)?.ok_or(ApiError::MissingHeader(name))
}

fn parse_header<T: FromStr>(value: &str, name: &'static str) -> Result<T, ApiError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ApiError::InvalidHeader(name, format!("{value:?}: {e}")))
}

/// Fold the storage layer's bookkeeping headers into a block. Absent
/// headers leave the corresponding fields alone.
fn apply_storage_headers(block: &mut Block, headers: &HeaderMap) -> Result<(), ApiError> {
    if let Some(value) = header_str(headers, X_BLOCK_ID)? {
        block
            .set_block_id(value)
            .map_err(|e| ApiError::InvalidHeader(X_BLOCK_ID, e.to_string()))?;
    }
    if let Some(value) = header_str(headers, X_STORAGE_ID)? {
        block
            .set_storage_id(value)
            .map_err(|e| ApiError::InvalidHeader(X_STORAGE_ID, e.to_string()))?;
    }
    if let Some(value) = header_str(headers, X_BLOCK_REFERENCE_COUNT)? {
        block.set_ref_count(parse_header(value, X_BLOCK_REFERENCE_COUNT)?);
    }
    if let Some(value) = header_str(headers, X_REF_MODIFIED)? {
        block.set_ref_modified(parse_header(value, X_REF_MODIFIED)?);
    }
    if let Some(value) = header_str(headers, X_BLOCK_SIZE)? {
        block.set_block_size(parse_header(value, X_BLOCK_SIZE)?);
    }
    if let Some(value) = header_str(headers, X_BLOCK_ORPHANED)? {
        let orphaned = match value.to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ApiError::InvalidHeader(
                    X_BLOCK_ORPHANED,
                    other.to_string(),
                ))
            }
        };
        block.set_block_orphaned(orphaned);
    }
    Ok(())
}
