//! Request definitions for the `/v1.0` wire protocol, one module per
//! operation.

pub mod blocks;
pub mod files;
pub mod storage;
pub mod vault;

use url::Url;

/// Append pagination parameters in the protocol's fixed order: marker
/// first, then limit, each omitted when absent. The URL is left
/// untouched when neither is set.
pub(crate) fn append_page_params(url: &mut Url, marker: Option<&str>, limit: Option<u32>) {
    if marker.is_none() && limit.is_none() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    if let Some(marker) = marker {
        pairs.append_pair("marker", marker);
    }
    if let Some(limit) = limit {
        pairs.append_pair("limit", &limit.to_string());
    }
}
