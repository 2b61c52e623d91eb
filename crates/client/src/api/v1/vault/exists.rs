use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `HEAD /v1.0/{vault_id}`: existence probe. 204 means the vault is
/// there, 404 that it is not; both are answers, not failures.
#[derive(Debug, Clone)]
pub struct ExistsRequest {
    pub vault_id: String,
}

impl ApiRequest for ExistsRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!("/v1.0/{}", self.vault_id))?;
        Ok(client.head(url))
    }
}
