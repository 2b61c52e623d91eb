//! Deuce domain objects
//!
//! The types here mirror the service's storage hierarchy:
//!
//! - **[`Project`]**: a tenant-scoped collection of vaults
//! - **[`Vault`]**: a named container tracking files, metadata blocks,
//!   and storage blocks, plus its server-confirmed lifecycle status
//! - **[`File`]**: an ordered composition of blocks at byte offsets
//! - **[`Block`]**: one content-addressed chunk, known by its SHA-1
//!   content hash, its server-assigned storage id, or both
//!
//! The collection types ([`Blocks`], [`StorageBlocks`], [`Files`])
//! validate key format on every keyed access. All of this is plain
//! in-memory state: the remote client populates and mutates it from
//! server responses, and a vault can be snapshotted to JSON and
//! reloaded without talking to the server.
//!
//! None of these types are synchronized; a vault and everything under
//! it belong to a single caller at a time.

mod block;
mod blocks;
mod file;
mod files;
mod project;
mod vault;

pub use block::{content_block_id, Block, BlockError, Orphaned};
pub use blocks::{Blocks, StorageBlocks};
pub use file::{File, FileError};
pub use files::Files;
pub use project::{Project, ProjectError};
pub use vault::{Vault, VaultStatus};
