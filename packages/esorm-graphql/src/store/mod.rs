//! The document-store surface that generated resolvers talk to.

pub mod memory;
pub mod model;
pub mod model_schema;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use indexmap::IndexMap;
    pub use serde::{Deserialize, Serialize};
}

pub use memory::*;
pub use model::*;
pub use model_schema::*;
