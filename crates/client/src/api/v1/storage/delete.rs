use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `DELETE /v1.0/{vault_id}/storage/blocks/{storage_id}`: drop a
/// block from the storage layer. Success is 204.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub vault_id: String,
    pub storage_id: String,
}

impl ApiRequest for DeleteRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/storage/blocks/{}",
            self.vault_id, self.storage_id
        ))?;
        Ok(client.delete(url))
    }
}
