use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};
use crate::api::v1::append_page_params;

/// `GET /v1.0/{vault_id}/storage/blocks[?marker=&limit=]`: page
/// through the storage layer's block ids. The response body is a JSON
/// array of storage ids.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub vault_id: String,
    pub marker: Option<String>,
    pub limit: Option<u32>,
}

impl ApiRequest for ListRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let mut url = base_url.join(&format!("/v1.0/{}/storage/blocks", self.vault_id))?;
        append_page_params(&mut url, self.marker.as_deref(), self.limit);
        Ok(client.get(url))
    }
}
