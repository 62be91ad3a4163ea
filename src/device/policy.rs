//! Forwarding policy wire structs.
//!
//! A policy is an ordered list of rules evaluated first-match. Each rule
//! pairs match conditions (host equality, host suffix, path segments) with a
//! single forward-to-pool action. Boolean match flags serialize only when
//! set, matching the device schema.

use serde::Serialize;

fn is_false(v: &bool) -> bool {
    !*v
}

/// A named, partition-qualified container of forwarding rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub controls: Vec<String>,
    pub legacy: bool,
    pub name: String,
    pub partition: String,
    pub requires: Vec<String>,
    pub rules: Vec<Rule>,
    pub strategy: String,
}

/// One conditions → action mapping, one per route URI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Original URI; sort key only, never emitted.
    #[serde(skip)]
    pub full_uri: String,

    pub actions: Vec<Action>,
    pub conditions: Vec<Condition>,
    pub name: String,
    pub ordinal: usize,
}

/// Forwarding action naming the target pool by `/partition/name` path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(skip_serializing_if = "is_false")]
    pub forward: bool,
    pub name: String,
    pub pool: String,
    #[serde(skip_serializing_if = "is_false")]
    pub request: bool,
}

/// One match condition; flags select the operand and the comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(skip_serializing_if = "is_false")]
    pub equals: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ends_with: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub host: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub http_host: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub http_uri: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub path_segment: bool,
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub request: bool,
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_flags_omitted() {
        let condition = Condition {
            equals: true,
            host: true,
            http_host: true,
            index: 0,
            name: "0".into(),
            request: true,
            values: vec!["foo.example.com".into()],
            ..Default::default()
        };

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["equals"], true);
        assert_eq!(value["httpHost"], true);
        assert!(value.get("endsWith").is_none());
        assert!(value.get("pathSegment").is_none());
        assert!(value.get("httpUri").is_none());
    }

    #[test]
    fn test_rule_sort_key_not_emitted() {
        let rule = Rule {
            full_uri: "foo.example.com/api".into(),
            actions: vec![Action {
                forward: true,
                name: "0".into(),
                pool: "/cf/foo-abc".into(),
                request: true,
            }],
            conditions: vec![],
            name: "foo-abc".into(),
            ordinal: 0,
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert!(value.get("fullUri").is_none());
        assert!(value.get("full_uri").is_none());
        assert_eq!(value["actions"][0]["pool"], "/cf/foo-abc");
        assert_eq!(value["ordinal"], 0);
    }
}
