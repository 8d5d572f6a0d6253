use shared::types::ServiceRecord;

/// Every service seen this session, in first-seen order.
///
/// Records are appended only, never reordered or removed. Owned by the display
/// state machine; the ingestion side hands records over by value.
#[derive(Debug, Default)]
pub struct ServiceCollection {
    records: Vec<ServiceRecord>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless a record with the same name (ignoring case) is
    /// already present. The first record seen wins; nothing is merged.
    /// Returns true if the record was appended.
    pub fn insert(&mut self, record: ServiceRecord) -> bool {
        if self.records.iter().any(|existing| existing.same_name(&record)) {
            tracing::debug!("Ignoring duplicate service {}", record.display_name());
            return false;
        }
        self.records.push(record);
        true
    }

    /// Rewrite the width budgets of every known record
    pub fn apply_widths(&mut self, list_width: usize, detail_width: usize) {
        for record in &mut self.records {
            record.list_width = list_width;
            record.detail_width = detail_width;
        }
    }

    pub fn get(&self, index: usize) -> Option<&ServiceRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
