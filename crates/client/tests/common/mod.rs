//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use url::Url;

use deuce_client::prelude::*;

pub const PROJECT_ID: &str = "tenant-101010";
pub const AUTH_TOKEN: &str = "test-auth-token";
pub const VAULT_NAME: &str = "vault-a";

/// Opt-in request logging for debugging a failing suite:
/// `RUST_LOG=deuce_client=debug cargo test`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client pointed at a mock server, authenticated with a preshared
/// token.
pub fn client_for(server_url: &str) -> DeuceClient {
    init_tracing();
    let authenticator = Arc::new(PresharedAuthenticator::new(PROJECT_ID, AUTH_TOKEN));
    let url = Url::parse(server_url).expect("mock server url");
    DeuceClient::new(authenticator, &url).expect("client construction")
}

pub fn vault() -> Vault {
    Vault::new(PROJECT_ID, VAULT_NAME).expect("test vault")
}

/// A block built from content, so its id is the real SHA-1 of `data`.
pub fn content_block(data: &[u8]) -> Block {
    Block::from_content(PROJECT_ID, VAULT_NAME, Bytes::copy_from_slice(data))
        .expect("content block")
}

pub fn block_id_for(data: &[u8]) -> String {
    content_block_id(data)
}

pub fn storage_id_for(block_id: &str) -> String {
    format!("{block_id}_{}", uuid::Uuid::new_v4())
}

pub fn file_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
