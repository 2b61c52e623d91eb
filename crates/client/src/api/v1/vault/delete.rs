use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `DELETE /v1.0/{vault_id}`: delete a vault. Success is 204.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub vault_id: String,
}

impl ApiRequest for DeleteRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!("/v1.0/{}", self.vault_id))?;
        Ok(client.delete(url))
    }
}
