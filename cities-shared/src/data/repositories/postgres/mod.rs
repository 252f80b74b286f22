pub mod comment_repository;
pub mod offer_repository;
pub mod user_repository;

pub use comment_repository::PostgresCommentRepository;
pub use offer_repository::PostgresOfferRepository;
pub use user_repository::PostgresUserRepository;
