use crc32fast::Hasher;
use uuid::Uuid;

/// Source of document-unique node ids
pub trait IdGenerator {
    fn new_id(&mut self) -> String;
}

/// Derive a stable id seed from a document name using CRC32
pub fn get_document_seed(document: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(document.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ids (`<seed>-<n>`), deterministic for a given seed
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    seed: String,
    count: u32,
}

impl SequentialIdGenerator {
    pub fn new(document: &str) -> Self {
        Self::from_seed(get_document_seed(document))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Continue the sequence past every `<seed>-<n>` already in `existing`
    pub fn resume<'a>(
        seed: impl Into<String>,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let seed = seed.into();
        let prefix = format!("{}-", seed);
        let count = existing
            .into_iter()
            .filter_map(|id| id.strip_prefix(&prefix)?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Self { seed, count }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

/// Random v4 uuids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
