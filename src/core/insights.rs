use std::collections::HashSet;

use crate::core::lexicon::{RuleTable, DEFAULT_TABLES};

/// Maximum number of insights shown on a Play Board
pub const MAX_INSIGHTS: usize = 3;

/// Needs that have a parent-facing insight sentence
pub const NEED_LABELS: [(&str, &str); 5] = [
    ("accessible-storage", "Consider accessible storage solutions"),
    ("fine-motor-mark-making", "Support fine motor development with mark-making tools"),
    ("gross-motor-climb", "Provide climbing and gross motor opportunities"),
    ("nurturing-dolls", "Introduce nurturing play with dolls"),
    ("building-foundations", "Offer building and construction toys"),
];

pub fn need_label(need: &str) -> Option<&'static str> {
    NEED_LABELS
        .iter()
        .find(|(id, _)| *id == need)
        .map(|(_, label)| *label)
}

/// Distinct needs of every rule whose condition is among `tags`, in rule order
pub fn needs_from_rules(rules: &RuleTable, tags: &[String]) -> Vec<String> {
    let tags: HashSet<&str> = tags.iter().map(String::as_str).collect();
    let mut needs: Vec<String> = Vec::new();

    for rule in rules.iter().filter(|r| tags.contains(r.condition.as_str())) {
        if !needs.contains(&rule.need) {
            needs.push(rule.need.clone());
        }
    }

    needs
}

/// Up to three insight sentences for the matched needs, in rule order
pub fn insights_from_rules(rules: &RuleTable, tags: &[String]) -> Vec<String> {
    let mut insights: Vec<String> = Vec::new();

    for need in needs_from_rules(rules, tags) {
        if let Some(label) = need_label(&need) {
            if !insights.iter().any(|i| i == label) {
                insights.push(label.to_string());
            }
        }
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

/// Insights for a child's condition tags using the embedded rules
pub fn compute_insights(tags: &[String]) -> Vec<String> {
    insights_from_rules(&DEFAULT_TABLES.rules, tags)
}

/// Needs for a child's condition tags using the embedded rules
pub fn compute_needs(tags: &[String]) -> Vec<String> {
    needs_from_rules(&DEFAULT_TABLES.rules, tags)
}
