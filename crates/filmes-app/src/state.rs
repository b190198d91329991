use std::sync::Arc;

use filmes_dal::Pool;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner { pool, app_config }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

struct AppStateInner {
    pool: Pool,
    app_config: AppConfig,
}

pub struct AppConfig {
    /// Maximum number of records returned by list
    pub list_limit: usize,
}
