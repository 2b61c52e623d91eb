use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `POST /v1.0/{vault_id}/files`: create an empty file resource.
/// Success is 201 with the new file's id in the `x-file-id` header and
/// its resource path in `location`.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub vault_id: String,
}

impl ApiRequest for CreateRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!("/v1.0/{}/files", self.vault_id))?;
        Ok(client.post(url))
    }
}
