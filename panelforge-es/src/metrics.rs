//! Query metrics: the numeric-series aggregations of a panel query.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::id::{resolve_entry_id, MetricIdGenerator};
use crate::settings::{BucketScriptSettings, EsSettings};

/// Metric aggregation types understood by the query editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Avg,
    Sum,
    Max,
    Min,
    Cardinality,
    #[default]
    Count,
    Derivative,
    BucketScript,
}

/// Named reference from a `bucket_script` metric to another metric's id.
///
/// Referential integrity is the caller's responsibility; nothing checks
/// that `pipeline_agg` names an existing metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineVariable {
    pub name: String,
    #[serde(rename = "pipelineAgg")]
    pub pipeline_agg: String,
}

impl PipelineVariable {
    pub fn new(name: impl Into<String>, pipeline_agg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pipeline_agg: pipeline_agg.into(),
        }
    }
}

/// One metric aggregation, immutable once appended to a collection.
#[derive(Debug, Clone, Serialize)]
pub struct QueryMetric {
    pub(crate) id: String,
    #[serde(rename = "type")]
    metric_type: MetricType,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    // Always on the wire, empty today.
    meta: Map<String, Value>,
    settings: EsSettings,
    hide: bool,
    #[serde(rename = "pipelineVariables", skip_serializing_if = "Vec::is_empty")]
    pipeline_variables: Vec<PipelineVariable>,
}

impl QueryMetric {
    /// Collection-unique reference id, e.g. for pipeline variables.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }
}

/// Draft of a single metric, resolved into a [`QueryMetric`] when appended
/// through [`MetricsBuilder::metric`].
#[derive(Debug, Clone, Default)]
#[must_use = "drafts do nothing until appended to a MetricsBuilder"]
pub struct MetricDraft {
    id: Option<String>,
    metric_type: MetricType,
    field: Option<String>,
    hide: bool,
    settings: EsSettings,
    pipeline_variables: Vec<PipelineVariable>,
}

impl MetricDraft {
    pub fn new(metric_type: MetricType) -> Self {
        Self {
            metric_type,
            ..Self::default()
        }
    }

    /// Explicit id, used verbatim instead of an auto-generated one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    pub fn settings(mut self, settings: impl Into<EsSettings>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Turn this draft into a `bucket_script` metric in one step: sets the
    /// type and replaces the settings with the script.
    pub fn bucket_script(mut self, script: impl Into<String>) -> Self {
        self.metric_type = MetricType::BucketScript;
        self.settings = EsSettings::BucketScript(BucketScriptSettings::new(script));
        self
    }

    /// Append a pipeline variable; order is preserved on the wire.
    pub fn pipeline_variable(
        mut self,
        name: impl Into<String>,
        pipeline_agg: impl Into<String>,
    ) -> Self {
        self.pipeline_variables
            .push(PipelineVariable::new(name, pipeline_agg));
        self
    }
}

/// Accumulates metrics in append order, assigning each a collection-unique
/// id as it lands.
#[derive(Debug, Default)]
pub struct MetricsBuilder {
    metrics: Vec<QueryMetric>,
    ids: MetricIdGenerator,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self {
            metrics: Vec::new(),
            ids: MetricIdGenerator::new(),
        }
    }

    /// Append one metric from a draft.
    pub fn metric(&mut self, draft: MetricDraft) -> &mut Self {
        let existing = &self.metrics;
        let id = resolve_entry_id(&mut self.ids, draft.id, |candidate| {
            existing.iter().any(|m| m.id == candidate)
        });
        self.metrics.push(QueryMetric {
            id,
            metric_type: draft.metric_type,
            field: draft.field,
            meta: Map::new(),
            settings: draft.settings,
            hide: draft.hide,
            pipeline_variables: draft.pipeline_variables,
        });
        self
    }

    pub fn average(&mut self, field: impl Into<String>, hide: bool) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Avg).field(field).hide(hide))
    }

    pub fn sum(&mut self, field: impl Into<String>, hide: bool) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Sum).field(field).hide(hide))
    }

    pub fn max(&mut self, field: impl Into<String>) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Max).field(field))
    }

    pub fn min(&mut self, field: impl Into<String>) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Min).field(field))
    }

    pub fn cardinality(&mut self, field: impl Into<String>) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Cardinality).field(field))
    }

    pub fn count(&mut self) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Count))
    }

    pub fn derivative(&mut self, field: impl Into<String>) -> &mut Self {
        self.metric(MetricDraft::new(MetricType::Derivative).field(field))
    }

    /// Freeze the collection in append order.
    pub fn build(self) -> Vec<QueryMetric> {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auto_ids_are_sequential() {
        let mut builder = MetricsBuilder::new();
        builder.max("a").min("b").count();
        let metrics = builder.build();
        let ids: Vec<&str> = metrics.iter().map(|m| m.id()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_auto_id_skips_explicitly_taken_ids() {
        let mut builder = MetricsBuilder::new();
        builder
            .metric(MetricDraft::new(MetricType::Max).id("1").field("a"))
            .metric(MetricDraft::new(MetricType::Min).id("2").field("b"))
            .max("c");
        let metrics = builder.build();
        assert_eq!(metrics[2].id(), "3");
    }

    #[test]
    fn test_gaps_from_out_of_order_explicit_ids_are_not_filled() {
        let mut builder = MetricsBuilder::new();
        builder
            .metric(MetricDraft::new(MetricType::Max).id("5").field("a"))
            .max("b")
            .max("c");
        let ids: Vec<String> = builder.build().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["5", "1", "2"]);
    }

    #[test]
    fn test_duplicate_explicit_ids_are_accepted() {
        let mut builder = MetricsBuilder::new();
        builder
            .metric(MetricDraft::new(MetricType::Max).id("1").field("a"))
            .metric(MetricDraft::new(MetricType::Min).id("1").field("b"));
        let metrics = builder.build();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].id(), "1");
        assert_eq!(metrics[1].id(), "1");
    }

    #[test]
    fn test_shortcuts_set_type_and_field() {
        let mut builder = MetricsBuilder::new();
        builder.average("latency", true).cardinality("host");
        let metrics = builder.build();
        assert_eq!(metrics[0].metric_type(), MetricType::Avg);
        assert_eq!(metrics[1].metric_type(), MetricType::Cardinality);
    }

    #[test]
    fn test_count_has_no_field() {
        let mut builder = MetricsBuilder::new();
        builder.count();
        let v = serde_json::to_value(&builder.build()[0]).unwrap();
        assert!(!v.as_object().unwrap().contains_key("field"));
        assert_eq!(v["type"], "count");
    }

    #[test]
    fn test_metric_wire_shape() {
        let mut builder = MetricsBuilder::new();
        builder.max("value_numeric");
        let v = serde_json::to_value(&builder.build()[0]).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "1",
                "type": "max",
                "field": "value_numeric",
                "meta": {},
                "settings": {},
                "hide": false
            })
        );
    }

    #[test]
    fn test_pipeline_variables_omitted_when_empty() {
        let mut builder = MetricsBuilder::new();
        builder.max("a");
        let v = serde_json::to_value(&builder.build()[0]).unwrap();
        assert!(!v.as_object().unwrap().contains_key("pipelineVariables"));
    }

    #[test]
    fn test_bucket_script_draft() {
        let mut builder = MetricsBuilder::new();
        builder.metric(
            MetricDraft::default()
                .pipeline_variable("var1", "2")
                .bucket_script("params.var1 * 2"),
        );
        let v = serde_json::to_value(&builder.build()[0]).unwrap();
        assert_eq!(v["type"], "bucket_script");
        assert_eq!(v["settings"], json!({"script": "params.var1 * 2"}));
        assert_eq!(
            v["pipelineVariables"],
            json!([{"name": "var1", "pipelineAgg": "2"}])
        );
        assert!(!v.as_object().unwrap().contains_key("field"));
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let mut builder = MetricsBuilder::new();
        builder.derivative("1");
        let metric = &builder.build()[0];
        let first = serde_json::to_string(metric).unwrap();
        let second = serde_json::to_string(metric).unwrap();
        assert_eq!(first, second);
    }
}
