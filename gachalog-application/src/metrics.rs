use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    queries: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    load_failures: AtomicU64,
    evictions: AtomicU64,
    uploads: AtomicU64,
    upload_rejections: AtomicU64,
}

impl Metrics {
    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evictions(&self, count: usize) {
        self.evictions.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_upload(&self) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upload_rejected(&self) {
        self.upload_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let queries = self.queries.load(Ordering::Relaxed);
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let failures = self.load_failures.load(Ordering::Relaxed);
        let evictions = self.evictions.load(Ordering::Relaxed);
        let uploads = self.uploads.load(Ordering::Relaxed);
        let rejections = self.upload_rejections.load(Ordering::Relaxed);

        format!(
            "# TYPE gachalog_queries_total counter\n\
gachalog_queries_total {}\n\
# TYPE gachalog_cache_hits_total counter\n\
gachalog_cache_hits_total {}\n\
# TYPE gachalog_cache_misses_total counter\n\
gachalog_cache_misses_total {}\n\
# TYPE gachalog_history_load_failures_total counter\n\
gachalog_history_load_failures_total {}\n\
# TYPE gachalog_cache_evictions_total counter\n\
gachalog_cache_evictions_total {}\n\
# TYPE gachalog_uploads_total counter\n\
gachalog_uploads_total {}\n\
# TYPE gachalog_upload_rejections_total counter\n\
gachalog_upload_rejections_total {}\n",
            queries, hits, misses, failures, evictions, uploads, rejections
        )
    }
}
