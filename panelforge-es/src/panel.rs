//! Top-level Elasticsearch query fragment for one panel target.

use serde::Serialize;

use crate::group_by::GroupBy;
use crate::metrics::QueryMetric;

/// Ref id used when the caller does not pick one.
pub const DEFAULT_REF_ID: &str = "A";

/// Query type sentinel used when no real query engine is configured.
pub const DEFAULT_QUERY_TYPE: &str = "randomWalk";

/// Time field the query editor defaults to.
pub const DEFAULT_TIME_FIELD: &str = "@timestamp";

/// The complete query-editor fragment for one Elasticsearch panel target.
///
/// Group-bys are authored as `group_bys` and serialized under the wire key
/// `bucketAggs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticQuery {
    ref_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    query: String,
    query_type: String,
    time_field: String,
    metrics: Vec<QueryMetric>,
    #[serde(rename = "bucketAggs")]
    group_bys: Vec<GroupBy>,
    hide: bool,
}

impl ElasticQuery {
    pub fn builder() -> ElasticQueryBuilder {
        ElasticQueryBuilder::new()
    }

    /// Panel-level identifier of the whole query (distinct from the
    /// per-aggregation ids).
    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn metrics(&self) -> &[QueryMetric] {
        &self.metrics
    }

    pub fn group_bys(&self) -> &[GroupBy] {
        &self.group_bys
    }
}

/// Builder for [`ElasticQuery`].
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ElasticQueryBuilder {
    ref_id: String,
    alias: Option<String>,
    query: String,
    query_type: String,
    time_field: String,
    metrics: Vec<QueryMetric>,
    group_bys: Vec<GroupBy>,
    hide: bool,
}

impl Default for ElasticQueryBuilder {
    fn default() -> Self {
        Self {
            ref_id: DEFAULT_REF_ID.to_string(),
            alias: None,
            query: String::new(),
            query_type: DEFAULT_QUERY_TYPE.to_string(),
            time_field: DEFAULT_TIME_FIELD.to_string(),
            metrics: Vec::new(),
            group_bys: Vec::new(),
            hide: false,
        }
    }
}

impl ElasticQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = query_type.into();
        self
    }

    pub fn time_field(mut self, time_field: impl Into<String>) -> Self {
        self.time_field = time_field.into();
        self
    }

    /// Finished metric collection, in append order.
    pub fn metrics(mut self, metrics: Vec<QueryMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Finished group-by collection, in append order.
    pub fn group_bys(mut self, group_bys: Vec<GroupBy>) -> Self {
        self.group_bys = group_bys;
        self
    }

    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    pub fn build(self) -> ElasticQuery {
        tracing::debug!(
            ref_id = %self.ref_id,
            metrics = self.metrics.len(),
            group_bys = self.group_bys.len(),
            "assembled elastic query fragment"
        );
        ElasticQuery {
            ref_id: self.ref_id,
            alias: self.alias,
            query: self.query,
            query_type: self.query_type,
            time_field: self.time_field,
            metrics: self.metrics,
            group_bys: self.group_bys,
            hide: self.hide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let v = serde_json::to_value(ElasticQueryBuilder::new().build()).unwrap();
        assert_eq!(
            v,
            json!({
                "refId": "A",
                "query": "",
                "queryType": "randomWalk",
                "timeField": "@timestamp",
                "metrics": [],
                "bucketAggs": [],
                "hide": false
            })
        );
    }

    #[test]
    fn test_alias_omitted_when_unset() {
        let v = serde_json::to_value(ElasticQueryBuilder::new().build()).unwrap();
        assert!(!v.as_object().unwrap().contains_key("alias"));
    }

    #[test]
    fn test_alias_present_when_set() {
        let v =
            serde_json::to_value(ElasticQueryBuilder::new().alias("errors").build()).unwrap();
        assert_eq!(v["alias"], "errors");
    }

    #[test]
    fn test_overrides() {
        let query = ElasticQueryBuilder::new()
            .ref_id("B")
            .query("status:500")
            .query_type("lucene")
            .time_field("@timestamp_second")
            .hide(true)
            .build();
        let v = serde_json::to_value(&query).unwrap();
        assert_eq!(v["refId"], "B");
        assert_eq!(v["query"], "status:500");
        assert_eq!(v["queryType"], "lucene");
        assert_eq!(v["timeField"], "@timestamp_second");
        assert_eq!(v["hide"], true);
    }
}
