use super::ExchangeRecord;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

#[async_trait]
pub trait MetricsExporter: Send + Sync {
    async fn export_metrics(
        &self,
        record: ExchangeRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn name(&self) -> &str;
}

pub struct MetricsRegistry {
    exporters: Arc<RwLock<Vec<Box<dyn MetricsExporter>>>>,
    debug_mode: bool,
}

impl MetricsRegistry {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            exporters: Arc::new(RwLock::new(Vec::new())),
            debug_mode,
        }
    }

    pub async fn register_exporter(&self, exporter: Box<dyn MetricsExporter>) {
        let mut exporters = self.exporters.write().await;
        info!("Registering metrics exporter: {}", exporter.name());
        exporters.push(exporter);
    }

    /// Hands the record to every exporter. Export failures are logged, never returned.
    pub async fn record_exchange(&self, record: ExchangeRecord) {
        if self.debug_mode {
            debug!("Exchange record: {:#?}", record);
        }

        let exporters = self.exporters.read().await;
        for exporter in exporters.iter() {
            if let Err(e) = exporter.export_metrics(record.clone()).await {
                error!("Failed to export metrics to {}: {}", exporter.name(), e);
            }
        }
    }
}
