//! Utilities for `async_graphql::dynamic`

use super::self_prelude::*;

#[extension_trait]
pub impl<'a> ResolverContextUtil<'a> for ResolverContext<'a> {
    fn parent<T: 'static>(&self) -> async_graphql::Result<&T> {
        self.parent_value.try_downcast_ref::<T>().map_err(|_| {
            async_graphql::Error::new(format!(
                "failed to downcast parent value to {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// All arguments given to the field, as JSON.
    fn args_json(&self) -> async_graphql::Result<serde_json::Map<String, JsonValue>> {
        let mut args = serde_json::Map::new();
        for (name, value) in self.args.iter() {
            args.insert(name.to_string(), value.deserialize::<JsonValue>()?);
        }
        Ok(args)
    }
}
