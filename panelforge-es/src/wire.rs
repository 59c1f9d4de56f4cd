//! Wire-format rendering shared by every entity.

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Renders an entity as the JSON object the query editor consumes.
///
/// An unset optional field is omitted from the output entirely, never
/// emitted as `null` or an empty placeholder. Fixed always-present keys
/// (a metric's `meta`, every entity's `settings`) are emitted even when
/// empty, and ordered sequences keep their append order.
pub trait ToWire: Serialize {
    /// Render this entity to its wire JSON object.
    fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ToWire for crate::settings::EsSettings {}
impl ToWire for crate::metrics::PipelineVariable {}
impl ToWire for crate::metrics::QueryMetric {}
impl ToWire for crate::group_by::GroupBy {}
impl ToWire for crate::panel::ElasticQuery {}
