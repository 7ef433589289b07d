pub mod admin;
pub mod auth;
pub mod domain;
pub mod error;
pub mod models;
pub mod protocol;
pub mod stores;
pub mod student;
pub mod teacher;
pub mod utils;
