//! Integration tests for metadata block operations.

mod common;

use mockito::{Matcher, Server};
use reqwest::StatusCode;

use deuce_client::prelude::*;

use common::{block_id_for, client_for, content_block, vault};

#[tokio::test]
async fn test_get_block_list_tracks_stubs() -> anyhow::Result<()> {
    let first = block_id_for(b"first");
    let second = block_id_for(b"second");

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1.0/vault-a/blocks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&vec![&first, &second])?)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut vault = vault();

    let ids = client.get_block_list(&mut vault, None, None).await?;

    assert_eq!(ids, vec![first.clone(), second.clone()]);
    for id in [&first, &second] {
        let block = vault.blocks().get(id)?.expect("tracked block");
        assert_eq!(block.block_id(), Some(id.as_str()));
        assert_eq!(block.data(), None);
    }
    Ok(())
}

#[tokio::test]
async fn test_get_block_list_pagination_params() -> anyhow::Result<()> {
    let marker = block_id_for(b"marker");

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/vault-a/blocks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("marker".into(), marker.clone()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut vault = vault();

    let ids = client
        .get_block_list(&mut vault, Some(&marker), Some(10))
        .await?;

    mock.assert_async().await;
    assert!(ids.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_block_list_rejects_bad_marker() {
    let client = client_for("http://127.0.0.1:1");
    let mut vault = vault();

    let err = client
        .get_block_list(&mut vault, Some("not-a-block-id"), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::Block(_))
    ));
}

#[tokio::test]
async fn test_upload_block() -> anyhow::Result<()> {
    let block = content_block(b"block content");
    let block_id = block.block_id().unwrap().to_string();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", format!("/v1.0/vault-a/blocks/{block_id}").as_str())
        .match_header("content-type", "application/octet-stream")
        .match_body("block content")
        .with_status(201)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    client.upload_block(&vault, &block).await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_upload_block_failure_carries_status_and_body() {
    let block = content_block(b"block content");
    let block_id = block.block_id().unwrap().to_string();

    let mut server = Server::new_async().await;
    server
        .mock("PUT", format!("/v1.0/vault-a/blocks/{block_id}").as_str())
        .with_status(404)
        .with_body("mock failure")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    let err = client.upload_block(&vault, &block).await.unwrap_err();
    match err {
        ApiError::HttpStatus(status, body) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "mock failure");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_block_requires_content_id() {
    let storage_only = Block::new(
        common::PROJECT_ID,
        common::VAULT_NAME,
        None,
        Some(common::storage_id_for(&block_id_for(b"x"))),
    )
    .unwrap();

    let client = client_for("http://127.0.0.1:1");
    let vault = vault();

    let err = client.upload_block(&vault, &storage_only).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingBlockId));
}

#[tokio::test]
async fn test_download_block() -> anyhow::Result<()> {
    let block_id = block_id_for(b"round trip payload");
    // a block known only by id; the server is the source of truth
    let mut fetched = Block::new(
        common::PROJECT_ID,
        common::VAULT_NAME,
        Some(block_id.clone()),
        None,
    )?;

    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/v1.0/vault-a/blocks/{block_id}").as_str())
        .with_status(200)
        .with_body("round trip payload")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let vault = vault();

    client.download_block(&vault, &mut fetched).await?;
    assert_eq!(
        fetched.data().map(|d| d.as_ref()),
        Some(&b"round trip payload"[..])
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_block_leaves_local_state() -> anyhow::Result<()> {
    let block = content_block(b"to delete");
    let block_id = block.block_id().unwrap().to_string();

    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "DELETE",
            format!("/v1.0/vault-a/blocks/{block_id}").as_str(),
        )
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut vault = vault();
    vault.blocks_mut().insert(&block_id, block.clone())?;

    client.delete_block(&vault, &block).await?;

    mock.assert_async().await;
    // the server-side delete does not touch the local collection
    assert!(vault.blocks().contains(&block_id));
    Ok(())
}
