//! Policy assembly: sorted rules, ordinals, and name-reference lists.

use std::collections::HashMap;

use crate::config::RouterConfig;
use crate::controller::CF_ROUTING_POLICY_NAME;
use crate::device::{NameRef, Policy, Rule};

/// Assemble the routing policy from the two rule classes.
///
/// Exact rules come first with ordinals from 0; wildcard rules follow with
/// ordinals from `pool_count`, which keeps every wildcard ordinal strictly
/// above every exact one regardless of population. Both classes sort in
/// reverse-lexicographic order of their full URI so longer, more specific
/// URIs win under the first-match strategy.
pub fn make_route_policy(
    config: &RouterConfig,
    rules: &HashMap<String, Rule>,
    wildcard_rules: &HashMap<String, Rule>,
    pool_count: usize,
) -> Policy {
    let sort_class = |class: &HashMap<String, Rule>, base: usize| -> Vec<Rule> {
        let mut sorted: Vec<Rule> = class.values().cloned().collect();
        sorted.sort_by(|a, b| b.full_uri.cmp(&a.full_uri));
        for (i, rule) in sorted.iter_mut().enumerate() {
            rule.ordinal = base + i;
        }
        sorted
    };

    let mut all = sort_class(rules, 0);
    all.extend(sort_class(wildcard_rules, pool_count));

    let policy = Policy {
        controls: vec!["forwarding".to_string()],
        legacy: true,
        name: CF_ROUTING_POLICY_NAME.to_string(),
        partition: config.bigip.partitions[0].clone(),
        requires: vec!["http".to_string()],
        rules: all,
        strategy: "/Common/first-match".to_string(),
    };

    tracing::debug!(name = %policy.name, rules = policy.rules.len(), "policy assembled");
    policy
}

/// Parse `/partition/name` references, skipping malformed entries.
pub fn parse_name_list(names: &[String]) -> Vec<NameRef> {
    let mut refs = Vec::new();
    for raw in names {
        let trimmed = raw.strip_prefix('/').unwrap_or(raw);
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() == 2 {
            refs.push(NameRef {
                name: parts[1].to_string(),
                partition: parts[0].to_string(),
            });
        } else {
            tracing::warn!(
                name = %raw,
                "skipping name, need format /[partition]/[name]"
            );
        }
    }
    refs
}

/// Policies applied to the routing virtual servers, in evaluation order:
/// pre-routing, the generated routing policy, post-routing.
pub fn make_virtual_policy_list(config: &RouterConfig) -> Vec<NameRef> {
    let mut refs = parse_name_list(&config.bigip.policies.pre_routing);
    refs.push(NameRef {
        name: CF_ROUTING_POLICY_NAME.to_string(),
        partition: config.bigip.partitions[0].clone(),
    });
    refs.extend(parse_name_list(&config.bigip.policies.post_routing));
    refs
}
