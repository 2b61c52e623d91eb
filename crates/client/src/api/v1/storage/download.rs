use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `GET /v1.0/{vault_id}/storage/blocks/{storage_id}`: fetch a
/// block's content by storage id. The body is the raw octet stream and
/// the bookkeeping headers ride along.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub vault_id: String,
    pub storage_id: String,
}

impl ApiRequest for DownloadRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/storage/blocks/{}",
            self.vault_id, self.storage_id
        ))?;
        Ok(client.get(url))
    }
}
