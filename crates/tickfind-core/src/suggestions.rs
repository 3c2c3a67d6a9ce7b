use std::collections::VecDeque;

use crate::NormalizedRecord;

const DEFAULT_RECENT_CAPACITY: usize = 5;

/// Local records shown before a search starts.
///
/// `popular` is a fixed sample. `recent` starts from a sample and is then
/// maintained most-recent-first as the user picks rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    recent: VecDeque<NormalizedRecord>,
    popular: Vec<NormalizedRecord>,
    capacity: usize,
}

impl Default for SuggestionSet {
    fn default() -> Self {
        Self::sample()
    }
}

impl SuggestionSet {
    pub fn new(
        recent: Vec<NormalizedRecord>,
        popular: Vec<NormalizedRecord>,
        capacity: usize,
    ) -> Self {
        let mut recent: VecDeque<_> = recent.into();
        recent.truncate(capacity);
        Self {
            recent,
            popular,
            capacity,
        }
    }

    pub fn sample() -> Self {
        Self::new(
            vec![
                NormalizedRecord::new("AAPL", "Apple Inc.", "NASDAQ"),
                NormalizedRecord::new("TSLA", "Tesla, Inc.", "NASDAQ"),
                NormalizedRecord::new("SPY", "SPDR S&P 500 ETF Trust", "NYSE"),
            ],
            vec![
                NormalizedRecord::new("NVDA", "NVIDIA Corporation", "NASDAQ"),
                NormalizedRecord::new("MSFT", "Microsoft Corporation", "NASDAQ"),
                NormalizedRecord::new("AMZN", "Amazon.com, Inc.", "NASDAQ"),
                NormalizedRecord::new("JPM", "JPMorgan Chase & Co.", "NYSE"),
                NormalizedRecord::new("KO", "The Coca-Cola Company", "NYSE"),
            ],
            DEFAULT_RECENT_CAPACITY,
        )
    }

    pub fn recent(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.recent.iter()
    }

    pub fn popular(&self) -> &[NormalizedRecord] {
        &self.popular
    }

    /// Move `record` to the front of the recent list.
    pub fn remember(&mut self, record: NormalizedRecord) {
        self.recent.retain(|existing| existing.symbol != record.symbol);
        self.recent.push_front(record);
        self.recent.truncate(self.capacity);
    }
}
