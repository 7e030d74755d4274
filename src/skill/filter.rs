use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::node::{Category, MAX_SCORE, SkillNode};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFilter {
    pub hidden_categories: BTreeSet<Category>,
    pub min_score: f32,
    pub max_score: f32,
    pub updated_within_days: Option<u32>,
    pub search: String,
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self {
            hidden_categories: BTreeSet::new(),
            min_score: 0.0,
            max_score: MAX_SCORE,
            updated_within_days: None,
            search: String::new(),
        }
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl NodeFilter {
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn shows_category(&self, category: Category) -> bool {
        !self.hidden_categories.contains(&category)
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.hidden_categories.remove(&category) {
            self.hidden_categories.insert(category);
        }
    }

    pub fn apply(&self, nodes: &[SkillNode], now: DateTime<Utc>) -> Vec<SkillNode> {
        let matcher = SkimMatcherV2::default();
        let query = self.search.trim();
        let cutoff = self
            .updated_within_days
            .map(|days| now - Duration::days(i64::from(days)));
        let (low, high) = if self.min_score <= self.max_score {
            (self.min_score, self.max_score)
        } else {
            (self.max_score, self.min_score)
        };

        nodes
            .iter()
            .filter(|node| self.shows_category(node.category))
            .filter(|node| node.score >= low && node.score <= high)
            .filter(|node| match cutoff {
                Some(cutoff) => node
                    .last_updated
                    .is_some_and(|last_updated| last_updated >= cutoff),
                None => true,
            })
            .filter(|node| {
                query.is_empty() || fuzzy_match_score(&matcher, &node.name, query).is_some()
            })
            .cloned()
            .collect()
    }
}
