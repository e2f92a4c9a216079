//! Page controllers. Each one drives the backend through the shared
//! [`AppContext`](crate::app::state::AppContext) and reports to a notifier.

pub mod auth;
pub mod detail;
pub mod form;
pub mod projects;
