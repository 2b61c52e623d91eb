use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};
use crate::api::v1::append_page_params;

/// `GET /v1.0/{vault_id}/files/{file_id}/blocks[?marker=&limit=]`:
/// page through a file's assigned blocks. The marker is a byte offset;
/// the response body is a JSON array of `[block_id, offset]` pairs.
#[derive(Debug, Clone)]
pub struct ListBlocksRequest {
    pub vault_id: String,
    pub file_id: String,
    pub marker: Option<u64>,
    pub limit: Option<u32>,
}

impl ApiRequest for ListBlocksRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let mut url = base_url.join(&format!(
            "/v1.0/{}/files/{}/blocks",
            self.vault_id, self.file_id
        ))?;
        let marker = self.marker.map(|offset| offset.to_string());
        append_page_params(&mut url, marker.as_deref(), self.limit);
        Ok(client.get(url))
    }
}
