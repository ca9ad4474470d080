//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};

/// Income, expense and net over the analyzed transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of positive amounts
    pub income: f64,
    /// Sum of absolute values of non-positive amounts
    pub expense: f64,
    /// income - expense
    pub net: f64,
}

impl Summary {
    /// (income - expense) / income floored at zero, when both sides are positive
    pub fn savings_rate(&self) -> Option<f64> {
        if self.income > 0.0 && self.expense > 0.0 {
            Some(((self.income - self.expense) / self.income).max(0.0))
        } else {
            None
        }
    }
}

/// A budget whose category spent more than its ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overrun {
    /// Category as written on the budget
    pub category: String,
    pub spent: f64,
    pub budget: f64,
}

impl Overrun {
    pub fn excess(&self) -> f64 {
        self.spent - self.budget
    }
}

/// Output of one analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insights {
    pub summary: Summary,
    pub overs: Vec<Overrun>,
    pub tips: Vec<String>,
}

impl Insights {
    pub fn savings_rate(&self) -> Option<f64> {
        self.summary.savings_rate()
    }
}

/// A routed answer to a user question, with the insights it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub insights: Insights,
}
