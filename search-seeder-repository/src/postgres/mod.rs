//! PostgreSQL implementations of the relational sources.
//!
//! Posts and user profiles live in two separate databases; each source owns
//! its own `PgPool`.

mod connection;
mod post_reader;
mod username_reader;

pub use connection::connect;
pub use post_reader::PostgresPostSource;
pub use username_reader::PostgresUsernameSource;
