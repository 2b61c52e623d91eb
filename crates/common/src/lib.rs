/**
 * Client-side representation of the Deuce storage
 *  hierarchy: projects own vaults, vaults track
 *  files and content-addressed blocks, files map
 *  byte offsets to block ids.
 * Nothing here talks to the network; the client
 *  crate mutates these types from server responses.
 */
pub mod api;
/**
 * Identifier format checks shared by every
 *  collection and every remote operation.
 */
pub mod validation;

pub mod prelude {
    pub use crate::api::{
        content_block_id, Block, BlockError, Blocks, File, FileError, Files, Orphaned, Project,
        ProjectError, StorageBlocks, Vault, VaultStatus,
    };
    pub use crate::validation::ValidationError;
}
