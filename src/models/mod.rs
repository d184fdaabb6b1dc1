pub mod listing;
pub mod metadata;
pub mod review;
pub mod user;
