use serde_json::Value;
use std::collections::HashSet;

use super::models::{Tag, TagNode};

const SLUG_MAX_LEN: usize = 50;

/// Pick a display name: `lang`, then Spanish, then English, then the first
/// non-empty translation.
fn resolve_name(name: &Value, lang: &str) -> String {
    match name {
        Value::String(s) => s.clone(),
        Value::Object(map) => [lang, "es", "en"]
            .iter()
            .filter_map(|l| map.get(*l).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .or_else(|| {
                map.values()
                    .filter_map(Value::as_str)
                    .find(|s| !s.is_empty())
            })
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn walk(
    nodes: &[TagNode],
    parent: Option<i64>,
    lang: &str,
    seen: &mut HashSet<i64>,
    out: &mut Vec<Tag>,
) {
    for node in nodes {
        if seen.insert(node.id) {
            out.push(Tag {
                id: node.id,
                name: resolve_name(&node.name, lang),
                parent_id: node.parent_id.or(parent),
            });
        }
        walk(&node.children, Some(node.id), lang, seen, out);
    }
}

/// Flatten a tag tree depth first, each parent before its descendants.
///
/// A child without an explicit parent inherits the enclosing node's id; an
/// id seen twice keeps its first occurrence.
pub fn flatten_tags(nodes: &[TagNode], lang: &str) -> Vec<Tag> {
    let mut out = Vec::new();
    walk(nodes, None, lang, &mut HashSet::new(), &mut out);
    out
}

/// Find a tag by numeric id, or else by case-insensitive exact name.
pub fn find_tag<'a>(tags: &'a [Tag], query: &str) -> Option<&'a Tag> {
    let query = query.trim();
    if let Ok(id) = query.trim_start_matches('#').parse::<i64>() {
        if let Some(tag) = tags.iter().find(|t| t.id == id) {
            return Some(tag);
        }
    }
    let lowered = query.to_lowercase();
    tags.iter().find(|t| t.name.to_lowercase() == lowered)
}

/// Internal name derived from a display name.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .take(SLUG_MAX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::models::TagsResponse;

    fn nodes(raw: &str) -> Vec<TagNode> {
        serde_json::from_str::<TagsResponse>(raw)
            .unwrap()
            .into_nodes()
    }

    #[test]
    fn flattens_depth_first_with_inherited_parents() {
        let tree = nodes(
            r#"[
                {"id":1,"name":"Lengua","children":[
                    {"id":2,"name":"Gramática","children":[{"id":3,"name":"Verbos"}]},
                    {"id":4,"name":"Ortografía","parent_id":9}
                ]},
                {"id":5,"name":"Mates"}
            ]"#,
        );
        let flat = flatten_tags(&tree, "es");
        let ids: Vec<i64> = flat.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(flat[0].parent_id, None);
        assert_eq!(flat[1].parent_id, Some(1));
        assert_eq!(flat[2].parent_id, Some(2));
        assert_eq!(flat[3].parent_id, Some(9));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let tree = nodes(r#"[{"id":1,"name":"A","children":[{"id":2,"name":"B"}]},{"id":2,"name":"C"}]"#);
        let flat = flatten_tags(&tree, "es");
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1].name, "B");
    }

    #[test]
    fn multilingual_names_fall_back_in_order() {
        let tree = nodes(
            r#"[
                {"id":1,"name":{"es":"Hola","en":"Hello"}},
                {"id":2,"name":{"es":"","en":"Only English"}},
                {"id":3,"name":{"zh":"你好"}},
                {"id":4,"name":{"es":"Hola","en":"Hello"}}
            ]"#,
        );
        let names: Vec<String> = flatten_tags(&tree, "en").into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Hello", "Only English", "你好", "Hello"]);
        assert_eq!(flatten_tags(&tree, "es")[0].name, "Hola");
    }

    #[test]
    fn find_tag_prefers_id_then_name() {
        let tags = vec![
            Tag { id: 7, name: "12".into(), parent_id: None },
            Tag { id: 12, name: "Verbos".into(), parent_id: None },
        ];
        assert_eq!(find_tag(&tags, "12").map(|t| t.id), Some(12));
        assert_eq!(find_tag(&tags, "#7").map(|t| t.id), Some(7));
        assert_eq!(find_tag(&tags, "verbos").map(|t| t.id), Some(12));
        assert!(find_tag(&tags, "verb").is_none());
    }

    #[test]
    fn slugify_keeps_ascii_and_hyphens() {
        assert_eq!(slugify("Unidad 3 Los Verbos!"), "unidad-3-los-verbos");
        assert_eq!(slugify("Acción"), "accin");
        assert_eq!(slugify(&"a".repeat(80)).len(), 50);
    }
}
