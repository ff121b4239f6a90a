pub mod jwt;
pub mod minio;
pub mod password;
pub mod logger;
pub mod error;
pub mod json;
pub mod identifier;
pub mod date;
pub mod extract;
