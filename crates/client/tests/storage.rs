//! Integration tests for storage-block operations.

mod common;

use mockito::{Matcher, Server};
use reqwest::StatusCode;

use deuce_client::prelude::*;

use common::{block_id_for, client_for, storage_id_for, vault, PROJECT_ID, VAULT_NAME};

#[tokio::test]
async fn test_get_block_storage_list_tracks_stubs() -> anyhow::Result<()> {
    let first = storage_id_for(&block_id_for(b"first"));
    let second = storage_id_for(&block_id_for(b"second"));

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1.0/vault-a/storage/blocks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&vec![&first, &second])?)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut vault = vault();

    let ids = client
        .get_block_storage_list(&mut vault, None, None)
        .await?;

    assert_eq!(ids, vec![first.clone(), second.clone()]);
    for id in [&first, &second] {
        let block = vault.storage_blocks().get(id)?.expect("tracked block");
        assert_eq!(block.storage_id(), Some(id.as_str()));
        assert_eq!(block.block_id(), None);
    }
    Ok(())
}

#[tokio::test]
async fn test_get_block_storage_list_pagination_params() -> anyhow::Result<()> {
    let marker = storage_id_for(&block_id_for(b"marker"));

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/vault-a/storage/blocks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("marker".into(), marker.clone()),
            Matcher::UrlEncoded("limit".into(), "25".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut vault = vault();

    client
        .get_block_storage_list(&mut vault, Some(&marker), Some(25))
        .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_head_block_storage_populates_block() -> anyhow::Result<()> {
    let block_id = block_id_for(b"stored content");
    let storage_id = storage_id_for(&block_id);
    let mut block = Block::new(PROJECT_ID, VAULT_NAME, None, Some(storage_id.clone()))?;

    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "HEAD",
            format!("/v1.0/vault-a/storage/blocks/{storage_id}").as_str(),
        )
        .with_status(204)
        .with_header("X-Block-ID", &block_id)
        .with_header("X-Storage-ID", &storage_id)
        .with_header("X-Block-Reference-Count", "3")
        .with_header("X-Ref-Modified", "1420070400")
        .with_header("X-Block-Size", "14")
        .with_header("X-Block-Orphaned", "false")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    client.head_block_storage(&vault, &mut block).await?;

    mock.assert_async().await;
    assert_eq!(block.block_id(), Some(block_id.as_str()));
    assert_eq!(block.storage_id(), Some(storage_id.as_str()));
    assert_eq!(block.ref_count(), Some(3));
    assert_eq!(block.ref_modified(), Some(1_420_070_400));
    assert_eq!(block.block_size(), Some(14));
    assert_eq!(block.block_orphaned(), Orphaned::No);
    Ok(())
}

#[tokio::test]
async fn test_head_block_storage_not_found() {
    let storage_id = storage_id_for(&block_id_for(b"gone"));
    let mut block = Block::new(PROJECT_ID, VAULT_NAME, None, Some(storage_id.clone())).unwrap();

    let mut server = Server::new_async().await;
    server
        .mock(
            "HEAD",
            format!("/v1.0/vault-a/storage/blocks/{storage_id}").as_str(),
        )
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    let err = client
        .head_block_storage(&vault, &mut block)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::HttpStatus(StatusCode::NOT_FOUND, _)
    ));
    // nothing was learned; the tri-state stays undecided
    assert_eq!(block.block_orphaned(), Orphaned::Indeterminate);
}

#[tokio::test]
async fn test_storage_ops_require_storage_id() {
    let block_only = Block::new(
        PROJECT_ID,
        VAULT_NAME,
        Some(block_id_for(b"metadata only")),
        None,
    )
    .unwrap();

    let client = client_for("http://127.0.0.1:1");
    let vault = vault();

    let err = client
        .delete_block_storage(&vault, &block_only)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingStorageId));
}

#[tokio::test]
async fn test_delete_block_storage() -> anyhow::Result<()> {
    let storage_id = storage_id_for(&block_id_for(b"doomed"));
    let block = Block::new(PROJECT_ID, VAULT_NAME, None, Some(storage_id.clone()))?;

    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "DELETE",
            format!("/v1.0/vault-a/storage/blocks/{storage_id}").as_str(),
        )
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    client.delete_block_storage(&vault, &block).await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_download_block_storage_data() -> anyhow::Result<()> {
    let payload = b"stored content";
    let block_id = block_id_for(payload);
    let storage_id = storage_id_for(&block_id);
    let mut block = Block::new(PROJECT_ID, VAULT_NAME, None, Some(storage_id.clone()))?;

    let mut server = Server::new_async().await;
    server
        .mock(
            "GET",
            format!("/v1.0/vault-a/storage/blocks/{storage_id}").as_str(),
        )
        .with_status(200)
        .with_header("X-Block-ID", &block_id)
        .with_header("X-Block-Reference-Count", "1")
        .with_header("X-Block-Size", &payload.len().to_string())
        .with_body(&payload[..])
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    client
        .download_block_storage_data(&vault, &mut block)
        .await?;

    assert_eq!(block.data().map(|d| d.as_ref()), Some(&payload[..]));
    assert_eq!(block.block_id(), Some(block_id.as_str()));
    assert_eq!(block.ref_count(), Some(1));
    assert_eq!(block.block_size(), Some(payload.len() as u64));
    Ok(())
}
