//! Group-by bucket aggregations: partition results before metrics run.

use serde::Serialize;

use crate::id::{resolve_entry_id, MetricIdGenerator};
use crate::settings::{DateHistogramSettings, EsSettings, TermsSettings};

/// Bucket aggregation types understood by the query editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupByType {
    DateHistogram,
    Terms,
}

/// One bucket aggregation, immutable once appended to a collection.
#[derive(Debug, Clone, Serialize)]
pub struct GroupBy {
    field: String,
    pub(crate) id: String,
    #[serde(rename = "type")]
    group_by_type: GroupByType,
    settings: EsSettings,
}

impl GroupBy {
    /// Collection-unique reference id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group_by_type(&self) -> GroupByType {
        self.group_by_type
    }
}

/// Draft of a single group-by, resolved into a [`GroupBy`] when appended
/// through [`GroupBysBuilder::group_by`].
#[derive(Debug, Clone)]
#[must_use = "drafts do nothing until appended to a GroupBysBuilder"]
pub struct GroupByDraft {
    id: Option<String>,
    field: String,
    group_by_type: GroupByType,
    settings: EsSettings,
}

impl GroupByDraft {
    pub fn new(group_by_type: GroupByType, field: impl Into<String>) -> Self {
        Self {
            id: None,
            field: field.into(),
            group_by_type,
            settings: EsSettings::Empty,
        }
    }

    /// Explicit id, used verbatim instead of an auto-generated one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn settings(mut self, settings: impl Into<EsSettings>) -> Self {
        self.settings = settings.into();
        self
    }
}

/// Accumulates group-bys in append order, assigning each a collection-unique
/// id as it lands.
#[derive(Debug, Default)]
pub struct GroupBysBuilder {
    group_bys: Vec<GroupBy>,
    ids: MetricIdGenerator,
}

impl GroupBysBuilder {
    pub fn new() -> Self {
        Self {
            group_bys: Vec::new(),
            ids: MetricIdGenerator::new(),
        }
    }

    /// Append one group-by from a draft.
    pub fn group_by(&mut self, draft: GroupByDraft) -> &mut Self {
        let existing = &self.group_bys;
        let id = resolve_entry_id(&mut self.ids, draft.id, |candidate| {
            existing.iter().any(|g| g.id == candidate)
        });
        self.group_bys.push(GroupBy {
            field: draft.field,
            id,
            group_by_type: draft.group_by_type,
            settings: draft.settings,
        });
        self
    }

    /// Semantic alias for [`Self::group_by`] when chaining nested buckets.
    pub fn then_by(&mut self, draft: GroupByDraft) -> &mut Self {
        self.group_by(draft)
    }

    /// `date_histogram` bucket with default settings.
    pub fn date_histogram(&mut self, field: impl Into<String>) -> &mut Self {
        self.date_histogram_with(field, DateHistogramSettings::default())
    }

    pub fn date_histogram_with(
        &mut self,
        field: impl Into<String>,
        settings: DateHistogramSettings,
    ) -> &mut Self {
        self.group_by(GroupByDraft::new(GroupByType::DateHistogram, field).settings(settings))
    }

    /// `terms` bucket with default settings.
    pub fn terms(&mut self, field: impl Into<String>) -> &mut Self {
        self.terms_with(field, TermsSettings::default())
    }

    pub fn terms_with(&mut self, field: impl Into<String>, settings: TermsSettings) -> &mut Self {
        self.group_by(GroupByDraft::new(GroupByType::Terms, field).settings(settings))
    }

    /// Freeze the collection in append order.
    pub fn build(self) -> Vec<GroupBy> {
        self.group_bys
    }
}
