pub mod options;
pub mod shell;
pub mod state;
