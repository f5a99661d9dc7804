use moka::sync::Cache;
use tickerview_series::PriceSeries;

/// Parsed series memoized by request key (the full request URL).
pub trait SeriesCache: Send + Sync {
    fn get(&self, key: &str) -> Option<PriceSeries>;
    fn put(&self, key: String, series: PriceSeries);
}

/// Process-lifetime cache: no capacity bound, no expiry.
pub struct MemoryCache {
    entries: Cache<String, PriceSeries>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesCache for MemoryCache {
    fn get(&self, key: &str) -> Option<PriceSeries> {
        self.entries.get(key)
    }

    fn put(&self, key: String, series: PriceSeries) {
        self.entries.insert(key, series);
    }
}
