//! Opaque identifiers handed out to GraphQL clients.
//! See: https://relay.dev/graphql/connections.htm#sec-Cursor
//! See: https://graphql.org/learn/global-object-identification/

pub mod cursor;
pub mod global_id;

pub(self) mod self_prelude {
    pub use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    pub use thiserror::Error;
}

pub use cursor::*;
pub use global_id::*;
