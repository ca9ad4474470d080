//! Insight Engine - rule-based summary, overrun detection and tips

use std::collections::HashMap;

use crate::models::{Budget, Transaction};

use super::types::{Insights, Overrun, Summary};

/// Signed totals keyed by lowercased category, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the running total of `category`
    pub fn add(&mut self, category: String, amount: f64) {
        match self.index.get(&category) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(category.clone(), self.entries.len());
                self.entries.push((category, amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    /// Categories in the order they first appeared
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(category, total)| (category.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split amounts into income (positive) and expense (magnitude of the rest)
pub fn summarize(transactions: &[Transaction]) -> Summary {
    // Folding from +0.0 keeps an empty side from formatting as "-0.00"
    let income = transactions
        .iter()
        .filter(|tx| tx.is_income())
        .fold(0.0_f64, |acc, tx| acc + tx.amount);
    let expense = transactions
        .iter()
        .filter(|tx| !tx.is_income())
        .fold(0.0_f64, |acc, tx| acc - tx.amount);

    Summary {
        income,
        expense,
        net: income - expense,
    }
}

/// Sum signed amounts per lowercased category
pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for tx in transactions {
        totals.add(tx.category.to_lowercase(), tx.amount);
    }
    totals
}

/// Budgets whose matching category spent more than the budgeted amount, in budget order
pub fn find_overruns(totals: &CategoryTotals, budgets: &[Budget]) -> Vec<Overrun> {
    budgets
        .iter()
        .filter_map(|budget| {
            let key = budget.category.to_lowercase();
            let spent = totals
                .get(&key)
                .filter(|total| *total < 0.0)
                .map_or(0.0, |total| 0.0 - total);

            (spent > budget.amount).then(|| Overrun {
                category: budget.category.clone(),
                spent,
                budget: budget.amount,
            })
        })
        .collect()
}

/// Category with the largest expense magnitude
///
/// Only a strictly larger magnitude replaces the current leader, so ties go to
/// the category seen first.
pub fn top_expense(totals: &CategoryTotals) -> Option<(&str, f64)> {
    let mut top: Option<(&str, f64)> = None;
    for (category, total) in totals.iter() {
        let magnitude = -total;
        if total < 0.0 && magnitude > top.map_or(0.0, |(_, max)| max) {
            top = Some((category, magnitude));
        }
    }
    top
}

fn build_tips(summary: &Summary, overs: &[Overrun], totals: &CategoryTotals) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(rate) = summary.savings_rate() {
        tips.push(format!(
            "Your savings rate is {:.0}%. Aim for 20%+ where possible.",
            rate * 100.0
        ));
    }

    for over in overs {
        tips.push(format!(
            "You're over budget in {} by ${:.2}. Consider reducing spend or increasing the budget.",
            over.category,
            over.excess()
        ));
    }

    // A blank category can lead but never gets a tip
    if let Some((category, magnitude)) = top_expense(totals).filter(|(c, _)| !c.is_empty()) {
        tips.push(format!(
            "Largest expense category is {} at ${:.2}. See if there are ways to trim this.",
            category, magnitude
        ));
    }

    tips
}

/// Analyze transactions against budgets
///
/// Total over its input: there is no failure path.
pub fn analyze(transactions: &[Transaction], budgets: &[Budget]) -> Insights {
    let summary = summarize(transactions);
    let totals = category_totals(transactions);
    let overs = find_overruns(&totals, budgets);
    let tips = build_tips(&summary, &overs, &totals);

    tracing::debug!(
        transactions = transactions.len(),
        budgets = budgets.len(),
        categories = totals.len(),
        overruns = overs.len(),
        tips = tips.len(),
        "Insight analysis complete"
    );

    Insights {
        summary,
        overs,
        tips,
    }
}
