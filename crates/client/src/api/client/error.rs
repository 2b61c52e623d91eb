use reqwest::StatusCode;

use common::prelude::{BlockError, FileError, ValidationError};

use crate::auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("response is missing the {0} header")]
    MissingHeader(&'static str),
    #[error("header {0} is not valid: {1}")]
    InvalidHeader(&'static str, String),

    // local bookkeeping failures, raised before any request is sent
    #[error("file {file_id} is not tracked by vault {vault_id}")]
    UnknownFile { vault_id: String, file_id: String },
    #[error("no blocks to assign")]
    EmptyBlockList,
    #[error("block {0} is not registered with the vault")]
    BlockNotInVault(String),
    #[error("block {0} is not part of the file")]
    BlockNotInFile(String),
    #[error("offset {0} has no block assigned in the file")]
    OffsetNotAssigned(u64),
    #[error("offset {offset} is assigned to block {assigned}, not block {requested}")]
    OffsetMismatch {
        offset: u64,
        assigned: String,
        requested: String,
    },
    #[error("block has no content block id")]
    MissingBlockId,
    #[error("block has no storage id")]
    MissingStorageId,

    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error(transparent)]
    File(#[from] FileError),
}
