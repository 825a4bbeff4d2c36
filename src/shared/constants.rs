/// Default page size for city listings
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Storage key under which the client pipeline persists its bearer token
pub const TOKEN_STORAGE_KEY: &str = "api_token_dev";
