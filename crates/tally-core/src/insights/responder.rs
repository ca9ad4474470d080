//! Query Responder - routes a free-text question to canned insight replies
//!
//! Routing is keyword substring membership against the lowercased query. Routes
//! are checked in table order and every match contributes its sentences, so the
//! reply reads summary, then budgets, then tips.

use super::types::{ChatReply, Insights, Summary};

/// What a route answers about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Summary,
    Budget,
    Tips,
}

/// A keyword set paired with the sentences it produces
pub struct Route {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
    render: fn(&Insights) -> Vec<String>,
}

impl Route {
    pub fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|keyword| query.contains(keyword))
    }

    pub fn render(&self, insights: &Insights) -> Vec<String> {
        (self.render)(insights)
    }
}

/// Routes in reply order
pub const ROUTES: [Route; 3] = [
    Route {
        topic: Topic::Summary,
        keywords: &["summary", "overview", "how am i doing", "net"],
        render: render_summary,
    },
    Route {
        topic: Topic::Budget,
        keywords: &["budget", "over budget", "overspent", "overspending"],
        render: render_budgets,
    },
    Route {
        topic: Topic::Tips,
        keywords: &["tip", "save", "improve", "advice"],
        render: render_tips,
    },
];

fn render_summary(insights: &Insights) -> Vec<String> {
    let s = &insights.summary;
    vec![format!(
        "Here's your overview: Income ${:.2}, Expenses ${:.2}, Net ${:.2}.",
        s.income, s.expense, s.net
    )]
}

fn render_budgets(insights: &Insights) -> Vec<String> {
    if insights.overs.is_empty() {
        return vec!["You're within all budgets based on current data.".to_string()];
    }
    insights
        .overs
        .iter()
        .map(|o| {
            format!(
                "Over budget in {}: spent ${:.2} vs budget ${:.2}.",
                o.category, o.spent, o.budget
            )
        })
        .collect()
}

fn render_tips(insights: &Insights) -> Vec<String> {
    if insights.tips.is_empty() {
        return vec!["Keep tracking your spending to build trends.".to_string()];
    }
    insights.tips.clone()
}

/// Reply used when no route matches
pub fn default_reply(summary: &Summary) -> String {
    format!(
        "I can summarize your finances, track budgets, and give tips. \
         Currently: income ${:.2}, expenses ${:.2}. Ask 'show budget' or 'give tips'.",
        summary.income, summary.expense
    )
}

/// Topics a query touches, in reply order
pub fn matched_topics(query: &str) -> Vec<Topic> {
    let query = query.to_lowercase();
    ROUTES
        .iter()
        .filter(|route| route.matches(&query))
        .map(|route| route.topic)
        .collect()
}

/// Build the reply text for a query
pub fn respond(query: &str, insights: &Insights) -> String {
    let query = query.to_lowercase();

    let parts: Vec<String> = ROUTES
        .iter()
        .filter(|route| route.matches(&query))
        .flat_map(|route| route.render(insights))
        .collect();

    if parts.is_empty() {
        default_reply(&insights.summary)
    } else {
        parts.join(" ")
    }
}

/// Answer a query and carry the insights along
pub fn reply(query: &str, insights: Insights) -> ChatReply {
    ChatReply {
        reply: respond(query, &insights),
        insights,
    }
}
