use crate::record::ProductRecord;

/// Records scraped in this session, appended in scrape order
///
/// Starts from whatever `products.json` held, so saving it always writes the
/// complete collection.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ProductRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
