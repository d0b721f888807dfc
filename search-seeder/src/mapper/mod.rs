//! Mapper module for the search seeder.
//!
//! Transforms relational post records into search documents.

mod post_mapper;

pub use post_mapper::PostMapper;
