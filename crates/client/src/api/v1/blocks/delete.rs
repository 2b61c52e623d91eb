use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `DELETE /v1.0/{vault_id}/blocks/{block_id}`: drop a metadata
/// block. Success is 204.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub vault_id: String,
    pub block_id: String,
}

impl ApiRequest for DeleteRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/blocks/{}",
            self.vault_id, self.block_id
        ))?;
        Ok(client.delete(url))
    }
}
