//! QuickOps client library
//!
//! Registers projects, deploys them to a VM or Kubernetes through the
//! QuickOps backend, and follows the resulting build.

pub mod app;
pub mod authn;
pub mod cache;
pub mod components;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod forms;
pub mod http;
pub mod logs;
pub mod notify;
pub mod pages;
pub mod routes;
pub mod storage;
pub mod utils;
pub mod workers;
