use std::sync::Arc;

use anyhow::Context;
use ff_auth::{AuthContext, guard, open_store};
use ff_client::ApiClient;
use ff_config::FfConfig;
use ff_core::Route;

/// Everything a command handler needs.
#[derive(Debug)]
pub struct AppContext {
    pub config: FfConfig,
    pub auth: Arc<AuthContext>,
    pub client: ApiClient,
}

impl AppContext {
    pub fn init(config: FfConfig) -> anyhow::Result<Self> {
        let store = open_store(&config.auth).context("failed to open credential store")?;
        let auth = Arc::new(AuthContext::hydrate(store));
        let client =
            ApiClient::new(&config.api, Arc::clone(&auth)).context("failed to build API client")?;
        Ok(Self {
            config,
            auth,
            client,
        })
    }

    /// Resolve `route` through the guard and refuse to continue if the user
    /// would be sent elsewhere.
    pub fn enter(&self, route: Route) -> anyhow::Result<()> {
        let landed = guard(route, &self.auth.state());
        if landed == route {
            return Ok(());
        }
        tracing::debug!(requested = %route, %landed, "route guarded");
        Err(anyhow::anyhow!(refusal(route, landed)))
    }
}

fn refusal(requested: Route, landed: Route) -> String {
    match landed {
        Route::Login => format!("{requested} needs a logged-in user; run `ff auth login`"),
        Route::WelcomePage => {
            format!("{requested} is available after you finish the test; run `ff test`")
        }
        Route::Dashboard | Route::Test | Route::Recommendations => {
            format!("already logged in; continue at {landed}")
        }
        other => format!("{requested} is not available; continue at {other}"),
    }
}
