//! # esorm-graphql-lib
//!
//! `esorm-graphql-lib` is a collection of utilities used by the `esorm-graphql-*` services.

pub mod config;
pub mod defaults;
pub mod models;
pub mod utils;
