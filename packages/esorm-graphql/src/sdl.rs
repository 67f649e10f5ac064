use crate::self_prelude::*;
use async_graphql::dynamic::Schema;
use graphql_parser::{parse_schema, Style};

#[extension_trait]
pub impl PrettySdl for Schema {
    /// SDL of the schema, normalised by `graphql-parser`.
    fn pretty_sdl(&self) -> String {
        let sdl = self.sdl();
        match parse_schema::<&str>(&sdl) {
            Ok(document) => document.format(&Style::default()),
            Err(_) => sdl.clone(),
        }
    }
}
