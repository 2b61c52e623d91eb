use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `GET /v1.0/{vault_id}/blocks/{block_id}`: fetch one block's
/// content. The response body is the raw octet stream.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub vault_id: String,
    pub block_id: String,
}

impl ApiRequest for DownloadRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/blocks/{}",
            self.vault_id, self.block_id
        ))?;
        Ok(client.get(url))
    }
}
