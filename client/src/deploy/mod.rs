//! Deployment status handling

pub mod fsm;
pub mod status;
