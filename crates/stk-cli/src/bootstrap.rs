use std::path::PathBuf;

use stk_config::StockroomConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, reading `.env` first.
pub fn load_config() -> anyhow::Result<StockroomConfig> {
    StockroomConfig::load_with_dotenv().map_err(anyhow::Error::from)
}

/// `--data-dir` wins over `storage.data_dir`.
#[must_use]
pub fn resolve_data_dir(flags: &GlobalFlags, config: &StockroomConfig) -> PathBuf {
    flags
        .data_dir
        .as_deref()
        .map_or_else(|| config.storage.data_dir_path(), PathBuf::from)
}
