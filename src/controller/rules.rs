//! Rule builder: route URI → match conditions + forwarding action.

use thiserror::Error;
use url::Url;

use crate::controller::work::PoolData;
use crate::device::{Action, Condition, Rule};

/// Errors that can occur while building a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The normalized URI did not parse.
    #[error("failed to parse uri: {0}")]
    Parse(#[from] url::ParseError),

    /// The URI parsed but carries no host to match on.
    #[error("uri has no host component")]
    MissingHost,
}

/// Build the forwarding rule for a pool.
///
/// The URI is prefixed with a placeholder scheme so the parser accepts it,
/// and a single trailing slash is dropped. Wildcard pools match on host
/// suffix; exact pools match host equality plus one condition per path
/// segment.
pub fn make_route_rule(partition: &str, pool: &PoolData) -> Result<Rule, RuleError> {
    let normalized = format!("scheme://{}", pool.uri);
    let normalized = normalized.strip_suffix('/').unwrap_or(&normalized);
    let parsed = Url::parse(normalized)?;

    let host = parsed.host_str().ok_or(RuleError::MissingHost)?;
    let host = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let mut conditions = Vec::new();
    if pool.wildcard {
        conditions.push(Condition {
            ends_with: true,
            host: true,
            http_host: true,
            index: 0,
            name: "0".to_string(),
            request: true,
            values: vec![host],
            ..Default::default()
        });
    } else {
        conditions.push(Condition {
            equals: true,
            host: true,
            http_host: true,
            index: 0,
            name: "0".to_string(),
            request: true,
            values: vec![host],
            ..Default::default()
        });

        let path = parsed.path();
        if !path.is_empty() {
            for (i, segment) in path.trim_start_matches('/').split('/').enumerate() {
                conditions.push(Condition {
                    equals: true,
                    http_uri: true,
                    path_segment: true,
                    index: i + 1,
                    name: (i + 1).to_string(),
                    request: true,
                    values: vec![segment.to_string()],
                    ..Default::default()
                });
            }
        }
    }

    let action = Action {
        forward: true,
        name: "0".to_string(),
        pool: format!("/{}/{}", partition, pool.name),
        request: true,
    };

    let rule = Rule {
        full_uri: pool.uri.clone(),
        actions: vec![action],
        conditions,
        name: pool.name.clone(),
        ordinal: 0,
    };

    tracing::debug!(name = %rule.name, uri = %rule.full_uri, "rule created");
    Ok(rule)
}
