use super::self_prelude::*;

/// A Relay global identifier split back into its type name and local ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalId {
    pub type_name: String,
    pub id: String,
}

#[derive(Debug, Error)]
pub enum GlobalIdError {
    #[error("Global ID is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Global ID is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Global ID is missing its type separator: {0:?}")]
    MissingSeparator(String),
}

/// Build the externally-facing ID for a record of the given type.
pub fn to_global_id(type_name: &str, id: &str) -> String {
    BASE64.encode(format!("{type_name}:{id}"))
}

/// Split a global ID produced by [`to_global_id`].
///
/// The type name ends at the first `:`; the local ID keeps any further colons.
pub fn from_global_id(global_id: &str) -> Result<GlobalId, GlobalIdError> {
    let raw = String::from_utf8(BASE64.decode(global_id)?)?;
    match raw.split_once(':') {
        Some((type_name, id)) => Ok(GlobalId {
            type_name: type_name.to_string(),
            id: id.to_string(),
        }),
        None => Err(GlobalIdError::MissingSeparator(raw)),
    }
}
