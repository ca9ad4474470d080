//! Insight Engine - rule-based financial insights
//!
//! The engine is a pure function over a snapshot of transactions and budgets.
//! It produces an income/expense summary, the budgets that were overrun, and a
//! short list of textual tips. The responder turns those insights into a reply
//! to a free-text question.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{analyze, respond};
//!
//! let snapshot = db.snapshot()?;
//! let insights = analyze(&snapshot.transactions, &snapshot.budgets);
//! println!("{}", respond("how am I doing?", &insights));
//! ```

pub mod engine;
pub mod responder;
pub mod types;

pub use engine::{analyze, category_totals, find_overruns, summarize, top_expense, CategoryTotals};
pub use responder::{default_reply, matched_topics, reply, respond, Route, Topic, ROUTES};
pub use types::{ChatReply, Insights, Overrun, Summary};
