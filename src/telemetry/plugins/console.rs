use crate::telemetry::{metrics::MetricsExporter, ExchangeRecord};
use async_trait::async_trait;

/// Prints each exchange as pretty JSON. Registered when `SIMULATOR_DEBUG=true`.
pub struct ConsolePlugin;

impl ConsolePlugin {
    pub fn new() -> Self {
        ConsolePlugin
    }
}

impl Default for ConsolePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsExporter for ConsolePlugin {
    async fn export_metrics(
        &self,
        record: ExchangeRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("Exchange:\n{}", serde_json::to_string_pretty(&record)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
