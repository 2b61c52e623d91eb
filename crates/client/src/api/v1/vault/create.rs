use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// `PUT /v1.0/{vault_id}`: create a vault. Success is 201.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub vault_id: String,
}

impl ApiRequest for CreateRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!("/v1.0/{}", self.vault_id))?;
        Ok(client.put(url))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builds_vault_url() {
        let base = Url::parse("http://deuce.test").unwrap();
        let client = Client::new();
        let request = CreateRequest {
            vault_id: "vault-a".into(),
        }
        .build_request(&base, &client)
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().as_str(), "http://deuce.test/v1.0/vault-a");
    }
}
