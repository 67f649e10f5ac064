pub mod api;
pub mod cli;
pub(crate) mod commands;
mod uses;
