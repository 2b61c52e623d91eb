use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `PUT /v1.0/{vault_id}/blocks/{block_id}`: upload one block's
/// content as an octet stream. Success is 201.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub vault_id: String,
    pub block_id: String,
    pub data: Bytes,
}

impl ApiRequest for UploadRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/blocks/{}",
            self.vault_id, self.block_id
        ))?;
        Ok(client
            .put(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(self.data))
    }
}
