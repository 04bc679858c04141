//! Checks `RedisSessionStore` against a running Redis.
//!
//! Run with: cargo test -p session_store --test redis_store_test -- --ignored
//!
//! Prerequisites: Redis reachable at `REDIS_URL`.

use deadpool_redis::redis::AsyncCommands;
use session_store::{
    create_pool, RedisPool, RedisSessionStore, SessionId, SessionStore, UserId,
    SESSION_TTL_SECONDS,
};

async fn pool() -> RedisPool {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    create_pool(&url).await.expect("redis pool")
}

#[tokio::test]
#[ignore = "requires Redis at REDIS_URL"]
async fn test_session_lifecycle() {
    let pool = pool().await;
    let store = RedisSessionStore::new(pool.clone());
    let user = UserId::new("u1");

    let id = store.create(&user).await.expect("session created");
    assert_eq!(store.user_id(&id).await.expect("lookup"), Some(user));

    let mut conn = pool.get().await.expect("connection");
    let ttl: i64 = conn.ttl(format!("session:{}", id)).await.expect("ttl");
    assert!(ttl > 0 && ttl as u64 <= SESSION_TTL_SECONDS);

    store.destroy(&id).await.expect("destroyed");
    assert_eq!(store.user_id(&id).await.expect("lookup"), None);

    // ending a session twice is harmless
    store.destroy(&id).await.expect("destroyed again");
}

#[tokio::test]
#[ignore = "requires Redis at REDIS_URL"]
async fn test_unknown_session_has_no_user() {
    let store = RedisSessionStore::new(pool().await);
    let id = SessionId::generate();

    assert_eq!(store.user_id(&id).await.expect("lookup"), None);
}
