pub mod health;
pub mod home;
pub mod logout;
pub mod security_headers;
pub mod workspace;
