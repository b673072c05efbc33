pub mod query;
pub mod token_cache;
