//! Per-collection sequential id generation.

/// Produces the never-repeating sequence `"1"`, `"2"`, `"3"`, ... within one
/// collection scope.
///
/// Each collection builder owns exactly one generator, constructed when the
/// builder is; instances are never shared across collections or across
/// distinct queries.
#[derive(Debug, Default)]
pub(crate) struct MetricIdGenerator {
    last: Option<u64>,
}

impl MetricIdGenerator {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    /// Return the next id in the sequence.
    pub(crate) fn next_id(&mut self) -> String {
        let next = self.last.map_or(1, |n| n + 1);
        self.last = Some(next);
        next.to_string()
    }
}

/// Resolve the id for a new collection entry.
///
/// An explicit caller id wins verbatim, with no uniqueness check. Otherwise
/// the generator is drawn monotonically, skipping values already taken in
/// the collection, until an unused one comes out. The generator never resets
/// on collision, so numeric gaps left by out-of-order explicit ids are not
/// filled.
pub(crate) fn resolve_entry_id<F>(
    ids: &mut MetricIdGenerator,
    explicit: Option<String>,
    taken: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    if let Some(id) = explicit {
        return id;
    }
    let mut id = ids.next_id();
    while taken(&id) {
        id = ids.next_id();
    }
    tracing::trace!(id = %id, "assigned generated entry id");
    id
}
