//! Prometheus metrics for the asset pipeline.
//!
//! Counts follow the fetch flow: every miss that reaches the origin is one
//! `origin_fetches_total`, every typed failure is one `fetch_faults_total`
//! with its reason label.

use std::sync::OnceLock;

use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::assets::FetchFault;

static GLOBAL: OnceLock<Metrics> = OnceLock::new();

/// Metrics registry for the crate.
pub struct Metrics {
    registry: Registry,

    /// Requests answered from the cache.
    pub cache_hits_total: Counter,

    /// Requests that had to go to the origin.
    pub cache_misses_total: Counter,

    /// Origin fetch attempts.
    pub origin_fetches_total: Counter,

    /// Faulted responses by reason.
    pub fetch_faults_total: CounterVec,
}

impl Metrics {
    /// Create a new registry with all metrics registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cache_hits_total = Counter::new("roflkit_cache_hits_total", "Cache hits")?;
        registry.register(Box::new(cache_hits_total.clone()))?;

        let cache_misses_total = Counter::new("roflkit_cache_misses_total", "Cache misses")?;
        registry.register(Box::new(cache_misses_total.clone()))?;

        let origin_fetches_total =
            Counter::new("roflkit_origin_fetches_total", "Origin fetch attempts")?;
        registry.register(Box::new(origin_fetches_total.clone()))?;

        let fetch_faults_total = CounterVec::new(
            Opts::new("roflkit_fetch_faults_total", "Faulted responses"),
            &["reason"],
        )?;
        registry.register(Box::new(fetch_faults_total.clone()))?;

        Ok(Self {
            registry,
            cache_hits_total,
            cache_misses_total,
            origin_fetches_total,
            fetch_faults_total,
        })
    }

    /// Process-wide registry instance.
    pub fn global() -> &'static Metrics {
        GLOBAL.get_or_init(|| Self::new().expect("metrics registry"))
    }

    /// Count one faulted response.
    pub fn record_fault(&self, reason: FetchFault) {
        self.fetch_faults_total
            .with_label_values(&[reason.tag()])
            .inc();
    }

    /// Export metrics in Prometheus text format.
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// The underlying registry, for embedding into a larger exporter.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.cache_hits_total.inc();
        metrics.record_fault(FetchFault::NotFound);

        let text = metrics.export();
        assert!(text.contains("roflkit_cache_hits_total 1"));
        assert!(text.contains("reason=\"not_found\""));
    }

    #[test]
    fn test_global_is_shared() {
        let a = Metrics::global() as *const Metrics;
        let b = Metrics::global() as *const Metrics;
        assert_eq!(a, b);
    }
}
