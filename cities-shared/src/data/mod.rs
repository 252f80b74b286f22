pub mod comment_repository;
pub mod offer_repository;
pub mod repositories;
pub mod user_repository;
