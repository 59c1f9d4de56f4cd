//! Per-aggregation-type settings variants.
//!
//! Each aggregation type carries a different subset of settings. The
//! variants collapse into one wire-compatible settings object that only
//! ever contains the fields legal for the constructing type.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Interval sentinel the query editor treats as "auto" bucketing.
pub const AUTO_INTERVAL: &str = "1m";

/// Settings attached to a metric or group-by aggregation.
///
/// The discriminant decides which fields exist; a field outside a variant's
/// arm can never leak into the wire object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EsSettings {
    /// No settings; serializes as `{}`.
    #[default]
    Empty,
    /// Settings for `date_histogram` buckets.
    DateHistogram(DateHistogramSettings),
    /// Settings for `terms` buckets.
    Terms(TermsSettings),
    /// Settings for `bucket_script` pipeline metrics.
    BucketScript(BucketScriptSettings),
}

/// `date_histogram` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateHistogramSettings {
    pub min_doc_count: Option<String>,
    pub trim_edges: Option<String>,
    pub interval: Option<String>,
    /// Carried on the variant but not part of the settings payload the
    /// query editor reads.
    pub timezone: Option<String>,
}

impl Default for DateHistogramSettings {
    fn default() -> Self {
        Self {
            min_doc_count: Some("0".to_string()),
            trim_edges: Some("0".to_string()),
            interval: Some(AUTO_INTERVAL.to_string()),
            timezone: Some("utc".to_string()),
        }
    }
}

/// `terms` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsSettings {
    pub min_doc_count: Option<String>,
    pub size: Option<String>,
    pub order: Option<String>,
    pub order_by: Option<String>,
    /// Bucket to collect documents that are missing the field. No default.
    pub missing: Option<String>,
}

impl Default for TermsSettings {
    fn default() -> Self {
        Self {
            min_doc_count: Some("1".to_string()),
            size: Some("10".to_string()),
            order: Some("desc".to_string()),
            order_by: Some("_term".to_string()),
            missing: None,
        }
    }
}

/// `bucket_script` settings. Carries the script and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BucketScriptSettings {
    pub script: String,
}

impl BucketScriptSettings {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl From<DateHistogramSettings> for EsSettings {
    fn from(settings: DateHistogramSettings) -> Self {
        EsSettings::DateHistogram(settings)
    }
}

impl From<TermsSettings> for EsSettings {
    fn from(settings: TermsSettings) -> Self {
        EsSettings::Terms(settings)
    }
}

impl From<BucketScriptSettings> for EsSettings {
    fn from(settings: BucketScriptSettings) -> Self {
        EsSettings::BucketScript(settings)
    }
}

impl Serialize for EsSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            EsSettings::Empty => {}
            EsSettings::DateHistogram(s) => {
                if let Some(v) = &s.min_doc_count {
                    map.serialize_entry("min_doc_count", v)?;
                }
                if let Some(v) = &s.trim_edges {
                    map.serialize_entry("trimEdges", v)?;
                }
                if let Some(v) = &s.interval {
                    map.serialize_entry("interval", v)?;
                }
                // timezone stays off the wire; the editor schema has no key
                // for it.
            }
            EsSettings::Terms(s) => {
                if let Some(v) = &s.min_doc_count {
                    map.serialize_entry("min_doc_count", v)?;
                }
                if let Some(v) = &s.order {
                    map.serialize_entry("order", v)?;
                }
                if let Some(v) = &s.order_by {
                    map.serialize_entry("orderBy", v)?;
                }
                if let Some(v) = &s.size {
                    map.serialize_entry("size", v)?;
                }
                if let Some(v) = &s.missing {
                    map.serialize_entry("missing", v)?;
                }
            }
            EsSettings::BucketScript(s) => {
                map.serialize_entry("script", &s.script)?;
            }
        }
        map.end()
    }
}
