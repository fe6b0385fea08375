//! The rewrite rule table and recursive tree walk.

use serde_yaml::{Mapping, Value};

use crate::duration;

/// What a matched rule does to its key/value pair.
enum Action {
    /// Remove the pair from the mapping.
    Drop,
    /// Replace the value, keeping the key.
    Replace(fn(&Value) -> Value),
}

/// One row of the rewrite table: a key name, a predicate on the value, and
/// the action to take when both match.
struct Rule {
    key: &'static str,
    matches: fn(&Value) -> bool,
    action: Action,
}

/// The ordered rewrite table. Each key/value pair in a mapping is tested
/// top to bottom and the first matching row wins; pairs matching no row
/// recurse instead. New rewrites are new rows, not new match arms.
static RULES: &[Rule] = &[
    Rule {
        key: "timeout",
        matches: is_string,
        action: Action::Replace(normalize_timeout),
    },
    Rule {
        key: "kind",
        matches: is_task,
        action: Action::Drop,
    },
    Rule {
        key: "type",
        matches: is_string_type,
        action: Action::Drop,
    },
    Rule {
        key: "apiVersion",
        matches: is_v1_api_version,
        action: Action::Replace(rewrite_api_version),
    },
    Rule {
        key: "metadata",
        matches: is_empty_mapping,
        action: Action::Drop,
    },
    Rule {
        key: "computeResources",
        matches: is_empty_mapping,
        action: Action::Drop,
    },
    Rule {
        key: "spec",
        matches: is_null,
        action: Action::Drop,
    },
    Rule {
        key: "name",
        matches: is_empty_string,
        action: Action::Drop,
    },
    Rule {
        key: "value",
        matches: is_string,
        action: Action::Replace(parse_embedded_json),
    },
];

fn is_string(value: &Value) -> bool {
    value.is_string()
}

fn is_task(value: &Value) -> bool {
    value.as_str() == Some("Task")
}

fn is_string_type(value: &Value) -> bool {
    value.as_str() == Some("string")
}

fn is_v1_api_version(value: &Value) -> bool {
    value.as_str() == Some("tekton.dev/v1")
}

fn is_empty_mapping(value: &Value) -> bool {
    value.as_mapping().is_some_and(Mapping::is_empty)
}

fn is_null(value: &Value) -> bool {
    value.is_null()
}

fn is_empty_string(value: &Value) -> bool {
    value.as_str() == Some("")
}

fn normalize_timeout(value: &Value) -> Value {
    match value.as_str() {
        Some(s) => Value::String(duration::normalize(s)),
        None => value.clone(),
    }
}

fn rewrite_api_version(_value: &Value) -> Value {
    Value::String("tekton.dev/v1beta1".to_string())
}

fn parse_embedded_json(value: &Value) -> Value {
    match value.as_str().and_then(try_parse_json) {
        Some(parsed) => parsed,
        None => value.clone(),
    }
}

/// Attempts to read a string as JSON and convert the result to a YAML value.
/// Returns `None` when the string is not valid JSON; the caller keeps the
/// original string in that case rather than surfacing a failure.
fn try_parse_json(raw: &str) -> Option<Value> {
    let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;
    serde_yaml::to_value(parsed).ok()
}

/// Rebuilds a document, applying the rule table at every mapping node.
///
/// Sequences are rewritten elementwise in order; scalars pass through
/// unchanged.
pub fn walk(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(walk_mapping(map)),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(walk).collect()),
        other => other.clone(),
    }
}

fn walk_mapping(map: &Mapping) -> Mapping {
    let mut out = Mapping::new();
    for (key, value) in map {
        let rule = key
            .as_str()
            .and_then(|name| RULES.iter().find(|r| r.key == name && (r.matches)(value)));
        match rule.map(|r| &r.action) {
            Some(Action::Drop) => {}
            Some(Action::Replace(replace)) => {
                out.insert(key.clone(), replace(value));
            }
            None => {
                out.insert(key.clone(), walk(value));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(input: &str) -> Value {
        serde_yaml::from_str(input).expect("test document parses")
    }

    #[test]
    fn test_timeout_strings_are_normalized() {
        let out = walk(&doc("timeout: 15m0s\n"));
        assert_eq!(out, doc("timeout: 15m\n"));
    }

    #[test]
    fn test_non_string_timeout_is_kept() {
        let out = walk(&doc("timeout: 900\n"));
        assert_eq!(out, doc("timeout: 900\n"));
    }

    #[test]
    fn test_task_kind_is_dropped_but_siblings_survive() {
        let out = walk(&doc("kind: Task\nother: 1\n"));
        assert_eq!(out, doc("other: 1\n"));
    }

    #[test]
    fn test_other_kinds_are_kept() {
        let out = walk(&doc("kind: Pipeline\n"));
        assert_eq!(out, doc("kind: Pipeline\n"));
    }

    #[test]
    fn test_string_type_is_dropped() {
        let out = walk(&doc("type: string\n"));
        assert_eq!(out, doc("{}\n"));
    }

    #[test]
    fn test_api_version_rewrite_is_exact_match() {
        let out = walk(&doc("apiVersion: tekton.dev/v1\n"));
        assert_eq!(out, doc("apiVersion: tekton.dev/v1beta1\n"));

        let unchanged = walk(&doc("apiVersion: tekton.dev/v1beta1\n"));
        assert_eq!(unchanged, doc("apiVersion: tekton.dev/v1beta1\n"));
    }

    #[test]
    fn test_empty_mappings_and_null_spec_are_dropped() {
        let out = walk(&doc(
            "metadata: {}\ncomputeResources: {}\nspec: null\nname: ''\nkept: ok\n",
        ));
        assert_eq!(out, doc("kept: ok\n"));
    }

    #[test]
    fn test_non_empty_metadata_is_kept() {
        let out = walk(&doc("metadata:\n  owner: x\n"));
        assert_eq!(out, doc("metadata:\n  owner: x\n"));
    }

    #[test]
    fn test_value_parses_embedded_json() {
        assert_eq!(walk(&doc("value: '42'\n")), doc("value: 42\n"));
        assert_eq!(
            walk(&doc("value: '{\"a\":1}'\n")),
            doc("value:\n  a: 1\n")
        );
        assert_eq!(walk(&doc("value: 'true'\n")), doc("value: true\n"));
    }

    #[test]
    fn test_value_keeps_non_json_strings() {
        assert_eq!(walk(&doc("value: not json\n")), doc("value: not json\n"));
    }

    #[test]
    fn test_rules_apply_inside_sequences_and_nesting() {
        let out = walk(&doc(
            "spec:\n\
             \x20 tasks:\n\
             \x20 - kind: Task\n\
             \x20   timeout: 1h0m0s\n\
             \x20 - params:\n\
             \x20   - name: p\n\
             \x20     value: '[1,2]'\n",
        ));
        assert_eq!(
            out,
            doc(
                "spec:\n\
                 \x20 tasks:\n\
                 \x20 - timeout: 1h\n\
                 \x20 - params:\n\
                 \x20   - name: p\n\
                 \x20     value:\n\
                 \x20     - 1\n\
                 \x20     - 2\n"
            )
        );
    }

    #[test]
    fn test_sequence_order_and_length_preserved() {
        let out = walk(&doc("items:\n- a\n- b\n- c\n"));
        assert_eq!(out, doc("items:\n- a\n- b\n- c\n"));
    }
}
