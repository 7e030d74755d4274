use chrono::{DateTime, Duration, Utc};

use crate::util::stable_pair;

use super::node::{Category, SkillNode};

const SAMPLE_SKILLS: &[(&str, Category)] = &[
    ("Rust", Category::Technical),
    ("System design", Category::Technical),
    ("SQL", Category::Technical),
    ("TypeScript", Category::Technical),
    ("Communication", Category::SoftSkills),
    ("Mentoring", Category::SoftSkills),
    ("Negotiation", Category::SoftSkills),
    ("Technical writing", Category::AdditionalSkills),
    ("Public speaking", Category::AdditionalSkills),
    ("Shipped v2 launch", Category::Achievements),
    ("Conference talk", Category::Achievements),
    ("Open source maintainer", Category::Achievements),
    ("Distributed systems course", Category::Learning),
    ("Compilers reading group", Category::Learning),
];

pub fn sample_nodes(count: usize, now: DateTime<Utc>) -> Vec<SkillNode> {
    (0..count)
        .map(|index| {
            let (name, category) = SAMPLE_SKILLS[index % SAMPLE_SKILLS.len()];
            let round = index / SAMPLE_SKILLS.len();
            let id = format!("skill-{index}");
            let name = if round == 0 {
                name.to_owned()
            } else {
                format!("{name} {}", round + 1)
            };

            let (a, b) = stable_pair(&id);
            let score = ((a + 1.0) * 50.0).clamp(0.0, 100.0).round();
            let xp = ((b + 1.0) * 250.0).round();
            let age_days = ((a * b).abs() * 400.0) as i64;

            SkillNode::new(id, name, category, score, xp)
                .with_last_updated(now - Duration::days(age_days))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_is_deterministic_with_unique_ids() {
        let now = Utc::now();
        let first = sample_nodes(40, now);
        let second = sample_nodes(40, now);

        assert_eq!(first, second);
        let ids = first.iter().map(|node| node.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn sample_values_are_in_range() {
        for node in sample_nodes(30, Utc::now()) {
            assert!((0.0..=100.0).contains(&node.score), "{}", node.score);
            assert!(node.xp >= 0.0);
            assert_eq!(node.clone().sanitized(), node);
        }
    }
}
