//! Wire models for the QuickOps backend API

pub mod models;
