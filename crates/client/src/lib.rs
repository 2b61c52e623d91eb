/**
 * HTTP REST client for the Deuce API: the
 *  DeuceClient, its error type, and the
 *  per-operation request definitions.
 */
pub mod api;
/**
 * Authentication interface consumed by the client.
 *  Any token source satisfying the contract can
 *  back a DeuceClient; a preshared-token
 *  implementation ships for tests and
 *  pre-authenticated use.
 */
pub mod auth;

pub mod prelude {
    pub use crate::api::client::{ApiError, ApiRequest, DeuceClient};
    pub use crate::auth::{AuthError, Authenticator, PresharedAuthenticator};
    pub use common::prelude::*;
}
