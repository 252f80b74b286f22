pub mod comment_service;
pub mod import_service;
pub mod offer_service;
pub mod user_service;
