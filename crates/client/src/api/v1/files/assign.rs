use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::api::client::{ApiError, ApiRequest};

/// One validated `(block, offset)` pair in an assignment request, with
/// the block's size as known locally.
#[derive(Debug, Clone, Serialize)]
pub struct BlockAssignment {
    pub id: String,
    pub offset: u64,
    pub size: u64,
}

#[derive(Serialize)]
struct AssignBody {
    blocks: Vec<BlockAssignment>,
}

/// `POST /v1.0/{vault_id}/files/{file_id}`: commit a set of block
/// assignments to a file. Success is 200 with a JSON array of block
/// ids the server still needs uploaded.
#[derive(Debug, Clone)]
pub struct AssignRequest {
    pub vault_id: String,
    pub file_id: String,
    pub blocks: Vec<BlockAssignment>,
}

impl ApiRequest for AssignRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = base_url.join(&format!(
            "/v1.0/{}/files/{}",
            self.vault_id, self.file_id
        ))?;
        Ok(client.post(url).json(&AssignBody {
            blocks: self.blocks,
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_body_shape() {
        let body = AssignBody {
            blocks: vec![BlockAssignment {
                id: "74bdda817d796333e9fe359e283d5643ee1a1397".into(),
                offset: 100,
                size: 42,
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "blocks": [{
                    "id": "74bdda817d796333e9fe359e283d5643ee1a1397",
                    "offset": 100,
                    "size": 42
                }]
            })
        );
    }
}
