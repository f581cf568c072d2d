pub mod code_input;
pub mod common;
pub mod error;
pub mod layout;
