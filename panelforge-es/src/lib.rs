//! Elasticsearch query-editor model for Panelforge dashboards
//!
//! This crate builds the JSON fragment a dashboard's Elasticsearch
//! query-editor panel expects: metric aggregations, nested group-by
//! buckets, pipeline variables, and the per-aggregation-type settings
//! object.
//!
//! Metrics and group-bys are appended through collection builders that
//! assign each entry a deterministic, collection-unique reference id; the
//! finished collections are bundled into an [`ElasticQuery`] and rendered
//! with [`ToWire`], which omits unset fields from the output entirely.
//!
//! # Building a fragment
//!
//! ```
//! use panelforge_es::{ElasticQueryBuilder, GroupBysBuilder, MetricsBuilder, ToWire};
//!
//! let mut metrics = MetricsBuilder::new();
//! metrics.average("latency_ms", false);
//!
//! let mut group_bys = GroupBysBuilder::new();
//! group_bys.date_histogram("@timestamp");
//!
//! let query = ElasticQueryBuilder::new()
//!     .query("status:200")
//!     .metrics(metrics.build())
//!     .group_bys(group_bys.build())
//!     .build();
//!
//! let fragment = query.to_wire().unwrap();
//! assert_eq!(fragment["refId"], "A");
//! assert_eq!(fragment["metrics"][0]["id"], "1");
//! ```
//!
//! # Supported aggregations
//!
//! Metrics: `avg`, `sum`, `max`, `min`, `cardinality`, `count`,
//! `derivative`, `bucket_script`.
//!
//! Group-bys: `date_histogram`, `terms`.

pub mod error;
pub mod group_by;
pub mod metrics;
pub mod panel;
pub mod settings;
pub mod wire;

mod id;

pub use error::Error;
pub use group_by::{GroupBy, GroupByDraft, GroupBysBuilder, GroupByType};
pub use metrics::{MetricDraft, MetricType, MetricsBuilder, PipelineVariable, QueryMetric};
pub use panel::{ElasticQuery, ElasticQueryBuilder};
pub use settings::{BucketScriptSettings, DateHistogramSettings, EsSettings, TermsSettings};
pub use wire::ToWire;

/// Result type for query-editor model operations
pub type Result<T> = std::result::Result<T, Error>;
