//! Session store adapters.
//!
//! - `InMemorySessionStore` - Process-local, for testing and development
//! - `RedisSessionStore` - Redis-backed, for production multi-server

mod in_memory;
mod redis_store;
mod token;

pub use in_memory::InMemorySessionStore;
pub use redis_store::RedisSessionStore;
