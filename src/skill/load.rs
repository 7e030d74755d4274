use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{info, warn};

use super::node::SkillNode;

pub fn load_nodes(path: &Path) -> Result<Vec<SkillNode>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read node file {}", path.display()))?;
    let nodes = parse_nodes(&raw)
        .with_context(|| format!("failed to parse node file {}", path.display()))?;

    info!(path = %path.display(), count = nodes.len(), "loaded skill nodes");
    Ok(nodes)
}

pub fn parse_nodes(raw: &str) -> Result<Vec<SkillNode>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in node file")?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("nodes") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(anyhow!("`nodes` must be an array")),
            None => return Err(anyhow!("node file object has no `nodes` array")),
        },
        _ => return Err(anyhow!("unexpected JSON type in node file")),
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut nodes = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let node = serde_json::from_value::<SkillNode>(entry)
            .with_context(|| format!("invalid node at index {index}"))?;

        if !seen.insert(node.id.clone()) {
            warn!(id = %node.id, index, "duplicate node id; keeping the first record");
            continue;
        }

        nodes.push(node.sanitized());
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::Category;

    #[test]
    fn parses_bare_array() {
        let raw = r#"[
            {"id": "rust", "name": "Rust", "category": "technical", "score": 82, "xp": 340},
            {"id": "talk", "name": "Public speaking", "category": "soft_skills", "score": 45, "xp": 60}
        ]"#;
        let nodes = parse_nodes(raw).expect("valid array");

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "rust");
        assert_eq!(nodes[1].category, Category::SoftSkills);
        assert_eq!(nodes[1].xp, 60.0);
    }

    #[test]
    fn parses_wrapped_object_and_sanitizes() {
        let raw = r#"{"version": 2, "nodes": [
            {"id": "a", "name": "A", "category": "Learning", "score": 180, "xp": -4}
        ]}"#;
        let nodes = parse_nodes(raw).expect("valid wrapper");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].score, 100.0);
        assert_eq!(nodes[0].xp, 0.0);
    }

    #[test]
    fn drops_duplicate_ids_keeping_first() {
        let raw = r#"[
            {"id": "a", "name": "First", "category": "technical"},
            {"id": "a", "name": "Second", "category": "technical"}
        ]"#;
        let nodes = parse_nodes(raw).expect("valid array");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "First");
        assert_eq!(nodes[0].score, 0.0);
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(parse_nodes("not json").is_err());
        assert!(parse_nodes("42").is_err());
        assert!(parse_nodes(r#"{"items": []}"#).is_err());
        assert!(parse_nodes(r#"[{"id": "a", "name": "A", "category": "cooking"}]"#).is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_nodes("[]").expect("empty list").is_empty());
    }
}
