//! Application state - shared across all commands.

use std::sync::Arc;

use anyhow::Context;

use storefront_core::ports::{Confirmer, ForumApi, Notifier, ProductApi, Session, SessionStore};
use storefront_core::view::{ForumFeed, ProductListView};
use storefront_infra::{
    ApiClient, FileSessionStore, HttpForumApi, HttpProductApi, InMemorySessionStore,
};

use crate::config::AppConfig;
use crate::console::{ConsoleNotifier, Terminal, TerminalConfirmer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub notifier: Arc<dyn Notifier>,
    pub terminal: Arc<Terminal>,
    pub forum: Arc<dyn ForumApi>,
    pub products: Arc<dyn ProductApi>,
    pub page_limit: u32,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Using session file");
                Arc::new(FileSessionStore::new(path))
            }
            None => {
                tracing::warn!("No config directory - session will not outlive this process");
                Arc::new(InMemorySessionStore::new())
            }
        };
        let session = Session::new(store);
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

        let client = Arc::new(
            ApiClient::new(&config.http_client_config(), session.clone(), notifier.clone())
                .context("failed to build API client")?,
        );

        Ok(Self {
            session,
            notifier,
            terminal: Arc::new(Terminal::new()),
            forum: Arc::new(HttpForumApi::new(client.clone())),
            products: Arc::new(HttpProductApi::new(client)),
            page_limit: config.page_limit,
        })
    }

    pub fn feed(&self) -> ForumFeed {
        ForumFeed::new(self.forum.clone())
    }

    pub fn product_view(&self, limit: Option<u32>, assume_yes: bool) -> ProductListView {
        let confirmer: Arc<dyn Confirmer> =
            Arc::new(TerminalConfirmer::new(self.terminal.clone(), assume_yes));
        ProductListView::new(
            self.products.clone(),
            self.session.clone(),
            self.notifier.clone(),
            confirmer,
            limit.unwrap_or(self.page_limit),
        )
    }
}
