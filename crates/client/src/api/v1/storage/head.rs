use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `HEAD /v1.0/{vault_id}/storage/blocks/{storage_id}`: storage-layer
/// bookkeeping for one block, answered entirely through response
/// headers on a 204.
#[derive(Debug, Clone)]
pub struct HeadRequest {
    pub vault_id: String,
    pub storage_id: String,
}

impl ApiRequest for HeadRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/storage/blocks/{}",
            self.vault_id, self.storage_id
        ))?;
        Ok(client.head(url))
    }
}
