use super::self_prelude::*;

#[extension_trait]
pub impl RootTypeRef for TypeRef {
    const QUERY: &'static str = "Query";
    const MUTATION: &'static str = "Mutation";
}
