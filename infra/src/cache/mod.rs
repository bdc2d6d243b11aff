//! Redis client used by the login rate limiter

pub mod redis_client;


pub use redis_client::RedisClient;
