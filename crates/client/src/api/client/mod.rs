#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::DeuceClient;
pub use error::ApiError;

use reqwest::{Client, RequestBuilder};
use url::Url;

/// One wire operation against the Deuce API.
///
/// Implementations hold the path and query parameters of a single
/// operation and turn themselves into the request for its URL
/// template. Response interpretation stays with [`DeuceClient`]: most
/// of the protocol answers through status codes, headers, or raw
/// bytes rather than JSON bodies.
pub trait ApiRequest {
    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}
