#![allow(dead_code)]

use postdraft::{Generator, TrendDigest, TrendSource};
use postdraft_sdk::{sdk_test::MockLanguageModel, LanguageModel, LanguageModelRegistry};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub const TRENDS: &str = "Workshop SaaS raises Series B\nConnected cars get OTA diagnostics";

/// Returns a fixed digest and counts how often it was asked.
pub struct CountingTrendSource {
    calls: AtomicUsize,
}

impl CountingTrendSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TrendSource for CountingTrendSource {
    async fn fetch_trends(&self) -> TrendDigest {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TrendDigest::new(TRENDS)
    }
}

pub fn generator_with(
    model: Option<&Arc<MockLanguageModel>>,
    trends: &Arc<CountingTrendSource>,
) -> Generator {
    let registry = match model {
        Some(model) => {
            let model: Arc<dyn LanguageModel> = model.clone();
            LanguageModelRegistry::with_models(vec![model])
        }
        None => LanguageModelRegistry::with_models(Vec::new()),
    };
    let trend_source: Arc<dyn TrendSource> = trends.clone();
    Generator::new(registry, trend_source)
}
