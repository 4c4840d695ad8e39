use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use stk_config::StockroomConfig;
use stk_core::identity::UserDirectory;
use stk_server::TokenTable;
use stk_store::AssetService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<AssetService>,
    pub tokens: Arc<TokenTable>,
    pub config: StockroomConfig,
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Open the catalog under `data_dir`, rebuilding it from the trail unless
    /// `storage.trail` is off.
    pub fn init(data_dir: PathBuf, config: StockroomConfig) -> anyhow::Result<Self> {
        let tokens = Arc::new(TokenTable::from_config(&config.auth));

        let service = if config.storage.trail {
            let (service, report) = AssetService::open(&data_dir).with_context(|| {
                format!("failed to rebuild catalog from {}", data_dir.display())
            })?;
            tracing::debug!(
                operations = report.operations_replayed,
                categories = report.categories,
                assets = report.assets,
                duration_ms = report.duration_ms,
                "catalog rebuilt"
            );
            service
        } else {
            tracing::warn!("storage.trail is disabled; changes are lost when stk exits");
            AssetService::in_memory()
        };

        let users: Arc<dyn UserDirectory> = tokens.clone();
        Ok(Self {
            service: Arc::new(service.with_users(users)),
            tokens,
            config,
            data_dir,
        })
    }
}
