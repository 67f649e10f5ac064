pub const GRAPHQL_API_HOST: &str = "127.0.0.1";
pub const GRAPHQL_API_PORT: &str = "29987";

pub const MAX_BODY_SIZE: usize = 5242880; // 5MB in bytes

pub const LOG_LEVEL: &str = "info";
pub const VERBOSE_LOGGING: bool = false;
