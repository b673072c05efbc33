use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Revoked session token ids (`jti`). Entries only need to outlive the
/// access-token TTL; the cache TTL is set well past any configured value.
pub static REVOKED_TOKENS: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86_400)) // 24h
        .build()
});

/// Mark a session token as logged out.
pub async fn revoke(jti: &str) {
    REVOKED_TOKENS.insert(jti.to_owned(), true).await;
    log::info!("session token revoked");
}

/// Check whether a token id was revoked by logout.
pub async fn is_revoked(jti: &str) -> bool {
    REVOKED_TOKENS.get(jti).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn revoked_tokens_are_remembered() {
        assert!(!is_revoked("jti-fresh").await);
        revoke("jti-gone").await;
        assert!(is_revoked("jti-gone").await);
        assert!(!is_revoked("jti-fresh").await);
    }
}
