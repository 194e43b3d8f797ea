pub mod account;
pub mod comments;
pub mod destinations;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod trips;
