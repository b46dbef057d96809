//! Application state - one explicitly constructed context per host.

use std::sync::Arc;

use anyhow::{Context, Result};
use atrium_media::{MediaClient, MediaMenu};
use atrium_sdk::menu::MenuNode;
use atrium_sdk::transport::Transport;
use tracing::info;

use crate::config::Config;
use crate::http::HttpTransport;
use crate::menu::{MenuRegistry, RouteTable, base_menu};

/// Shared application state.
///
/// Cheap to clone; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    menus: MenuRegistry,
    routes: RouteTable,
    media: MediaClient,
}

impl AppState {
    /// Build state talking to the backend over HTTP.
    pub fn new(config: &Config) -> Result<Self> {
        let transport =
            HttpTransport::new(config).context("failed to create backend HTTP client")?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build state over any transport (tests pass a mock here).
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let mut menus = MenuRegistry::new();
        menus.register(Arc::new(MediaMenu::new(config.menu_injection)), 0);

        let mut routes = RouteTable::new();
        routes.register("media", atrium_media::routes::routes());

        info!(
            contributors = menus.len(),
            routes = routes.len(),
            policy = %config.menu_injection,
            "plugins registered"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config: config.clone(),
                menus,
                routes,
                media: MediaClient::new(transport),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn menus(&self) -> &MenuRegistry {
        &self.inner.menus
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn media(&self) -> &MediaClient {
        &self.inner.media
    }

    /// Build a named menu from its base tree.
    pub fn build_menu(&self, menu_name: &str) -> MenuNode {
        self.inner.menus.build(menu_name, base_menu(menu_name))
    }
}
