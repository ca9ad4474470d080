//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod chat;
pub mod status;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use chat::*;
pub use status::*;
pub use transactions::*;
