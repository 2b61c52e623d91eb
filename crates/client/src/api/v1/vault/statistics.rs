use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `GET /v1.0/{vault_id}`: vault statistics as a JSON body.
#[derive(Debug, Clone)]
pub struct StatisticsRequest {
    pub vault_id: String,
}

impl ApiRequest for StatisticsRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!("/v1.0/{}", self.vault_id))?;
        Ok(client.get(url))
    }
}
