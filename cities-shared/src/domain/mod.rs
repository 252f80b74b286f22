pub mod city;
pub mod comment;
pub mod error;
pub mod offer;
pub mod user;
