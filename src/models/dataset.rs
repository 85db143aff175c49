use crate::models::TransactionRecord;

/// A snapshot of the transaction file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TransactionRecord>
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    pub fn fraud_records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().filter(|record| record.is_fraud())
    }
}

impl FromIterator<TransactionRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
