use meridian_application::config::Config;
use meridian_domain::repositories::price_data::{PriceDataRepository, PriceSource};
use meridian_domain::value_objects::date_window::DateWindow;
use meridian_infrastructure::market_data::FilesystemPriceDataRepository;
use std::sync::Arc;

pub type SharedRepo = Arc<dyn PriceDataRepository + Send + Sync>;

/// Read-only state shared by every handler. The price file itself is loaded
/// per request.
pub struct AppState {
    pub source: PriceSource,
    pub window: DateWindow,
    pub repo: SharedRepo,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Arc<Self>, String> {
        Self::with_repo(config, Arc::new(FilesystemPriceDataRepository::new()))
    }

    pub fn with_repo(config: &Config, repo: SharedRepo) -> Result<Arc<Self>, String> {
        let source = config.price_source()?;
        let window = config.window()?;
        Ok(Arc::new(Self {
            source,
            window,
            repo,
        }))
    }
}
