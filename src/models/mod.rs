pub mod admin;
pub mod response;
