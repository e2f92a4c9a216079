pub mod auth;
pub mod client;
pub mod deploy;
pub mod projects;
