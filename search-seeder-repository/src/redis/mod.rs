//! Redis implementation of the username set store.

mod username_set;

pub use username_set::RedisUsernameSet;
