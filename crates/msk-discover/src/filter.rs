use regex::Regex;
use tracing::trace;

use msk_model::{ClusterIdentity, ClusterInfo, Tags};

use crate::errors::FilterError;

/// Selects which clusters take part in discovery.
///
/// A cluster qualifies when its name matches `name_pattern` (unanchored search)
/// and at least one of `tag_conditions` holds. Absent pattern or no tag conditions always pass.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub name_pattern: Option<Regex>,
    pub tag_conditions: Tags,
}

impl FilterSpec {
    /// Build a filter from a raw pattern; an empty pattern matches every name.
    pub fn new(pattern: &str, tag_conditions: Tags) -> Result<Self, FilterError> {
        let name_pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(Self {
            name_pattern,
            tag_conditions,
        })
    }

    pub fn matches(&self, cluster: &ClusterIdentity) -> bool {
        self.name_matches(&cluster.name) && self.tags_match(&cluster.tags)
    }

    /// Keep the qualifying clusters, preserving enumeration order.
    pub fn apply(&self, clusters: Vec<ClusterInfo>) -> Vec<ClusterInfo> {
        clusters
            .into_iter()
            .filter(|c| {
                let keep = self.matches(&c.identity);
                if !keep {
                    trace!(cluster = %c.name(), "cluster filtered out");
                }
                keep
            })
            .collect()
    }

    fn name_matches(&self, name: &str) -> bool {
        self.name_pattern
            .as_ref()
            .is_none_or(|re| re.is_match(name))
    }

    // OR across conditions.
    fn tags_match(&self, tags: &Tags) -> bool {
        if self.tag_conditions.is_empty() {
            return true;
        }
        self.tag_conditions
            .iter()
            .any(|(key, want)| tags.get(key) == Some(want))
    }
}

/// Parse a `key=value` tag condition. The value may itself contain `=`.
pub fn parse_tag_condition(raw: &str) -> Result<(String, String), FilterError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(FilterError::InvalidTag(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use msk_model::MonitoringCapability;

    use super::*;

    fn cluster(name: &str, tags: &[(&str, &str)]) -> ClusterInfo {
        let identity = tags.iter().fold(
            ClusterIdentity::new(name, format!("arn:::{name}")),
            |id, (k, v)| id.with_tag(*k, *v),
        );
        ClusterInfo::new(identity, MonitoringCapability::new(true, true))
    }

    fn names(clusters: &[ClusterInfo]) -> Vec<&str> {
        clusters.iter().map(|c| c.name()).collect()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_filter_is_identity() {
        let clusters = vec![
            cluster("zeta", &[]),
            cluster("alpha", &[("env", "prod")]),
            cluster("mid", &[]),
        ];
        let out = FilterSpec::default().apply(clusters.clone());
        assert_eq!(out, clusters);
    }

    #[test]
    fn empty_pattern_string_matches_everything() {
        let filter = FilterSpec::new("", Tags::new()).unwrap();
        assert!(filter.name_pattern.is_none());
        assert!(filter.matches(&ClusterIdentity::new("anything", "arn")));
    }

    #[test]
    fn name_pattern_is_unanchored() {
        let filter = FilterSpec::new("test", Tags::new()).unwrap();
        let out = filter.apply(vec![
            cluster("test-cluster", &[]),
            cluster("second-test-cluster", &[]),
            cluster("filtered-cluster", &[]),
        ]);
        assert_eq!(names(&out), vec!["test-cluster", "second-test-cluster"]);
    }

    #[test]
    fn anchored_pattern_is_honoured() {
        let filter = FilterSpec::new("^test", Tags::new()).unwrap();
        let out = filter.apply(vec![
            cluster("test-cluster", &[]),
            cluster("second-test-cluster", &[]),
        ]);
        assert_eq!(names(&out), vec!["test-cluster"]);
    }

    #[test]
    fn tag_conditions_are_or_semantics() {
        let filter = FilterSpec::new(
            "",
            tags(&[("Environment", "test"), ("SomeOther", "tag")]),
        )
        .unwrap();

        let out = filter.apply(vec![
            cluster(
                "test-cluster",
                &[("Environment", "test"), ("SomeOther", "DifferentTag")],
            ),
            cluster(
                "second-test-cluster",
                &[("Environment", "staging"), ("SomeOther", "tag")],
            ),
            cluster("filtered-cluster", &[]),
        ]);
        assert_eq!(names(&out), vec!["test-cluster", "second-test-cluster"]);
    }

    #[test]
    fn tag_value_must_match_exactly() {
        let filter = FilterSpec::new("", tags(&[("env", "prod")])).unwrap();
        assert!(!filter.matches(&ClusterIdentity::new("a", "arn").with_tag("env", "production")));
        assert!(!filter.matches(&ClusterIdentity::new("a", "arn").with_tag("ENV", "prod")));
        assert!(filter.matches(&ClusterIdentity::new("a", "arn").with_tag("env", "prod")));
    }

    #[test]
    fn name_and_tags_must_both_pass() {
        let filter = FilterSpec::new("orders", tags(&[("env", "prod")])).unwrap();
        assert!(filter.matches(&ClusterIdentity::new("orders-eu", "arn").with_tag("env", "prod")));
        assert!(!filter.matches(&ClusterIdentity::new("orders-eu", "arn").with_tag("env", "dev")));
        assert!(!filter.matches(&ClusterIdentity::new("billing", "arn").with_tag("env", "prod")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = FilterSpec::new("(unclosed", Tags::new()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern(_)));
    }

    #[test]
    fn parse_tag_condition_variants() {
        assert_eq!(
            parse_tag_condition("env=prod").unwrap(),
            ("env".to_string(), "prod".to_string())
        );
        assert_eq!(
            parse_tag_condition("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_tag_condition("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_tag_condition("novalue").is_err());
        assert!(parse_tag_condition("=value").is_err());
    }
}
