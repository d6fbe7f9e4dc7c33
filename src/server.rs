//! HTTP surface over the resolution engine.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::command::resolver::CommandResolver;
use crate::error::{CoreError, CoreResult};
use crate::llm::interpreter::Interpreter;
use crate::storage::traits::{CommandStore, HistoryStore};

pub mod commands;
pub mod error;
pub mod resolve;

pub(crate) struct ServerState {
    pub(crate) resolver: CommandResolver,
    pub(crate) commands: Arc<dyn CommandStore>,
    pub(crate) history: Arc<dyn HistoryStore>,
}

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Bind and start serving in a background task. The callers' stores
    /// and interpreter are shared with the resolver.
    pub async fn bind(
        addr: &str,
        commands: Arc<dyn CommandStore>,
        history: Arc<dyn HistoryStore>,
        interpreter: Arc<dyn Interpreter>,
    ) -> CoreResult<Self> {
        let resolver = CommandResolver::new(commands.clone(), interpreter);
        let state = Arc::new(ServerState {
            resolver,
            commands,
            history,
        });

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = router(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> CoreResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| CoreError::Internal("failed to send shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/command", post(resolve::submit))
        .route(
            "/api/history",
            get(resolve::history).delete(resolve::clear_history),
        )
        .route(
            "/api/custom-commands",
            post(commands::create).get(commands::list),
        )
        .route(
            "/api/custom-commands/:id",
            get(commands::get)
                .put(commands::update)
                .patch(commands::patch)
                .delete(commands::delete),
        )
        .with_state(state)
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub(crate) fn test_state(
    store: Arc<crate::storage::memory::MemoryStore>,
    interpreter: Arc<dyn Interpreter>,
) -> Arc<ServerState> {
    let commands: Arc<dyn CommandStore> = store.clone();
    let history: Arc<dyn HistoryStore> = store;
    Arc::new(ServerState {
        resolver: CommandResolver::new(commands.clone(), interpreter),
        commands,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::LlmInterpreter;
    use crate::llm::settings::{LlmSettings, DEFAULT_TIMEOUT_SECS};
    use crate::storage::memory::MemoryStore;

    fn unconfigured_interpreter() -> Arc<LlmInterpreter> {
        Arc::new(
            LlmInterpreter::new(LlmSettings {
                base_url: "http://127.0.0.1:1".to_string(),
                api_key: None,
                model: "test".to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn bind_picks_a_port_and_shuts_down() {
        let store = Arc::new(MemoryStore::new());
        let mut server = Server::bind(
            "127.0.0.1:0",
            store.clone(),
            store,
            unconfigured_interpreter(),
        )
        .await
        .expect("bind");

        assert_ne!(server.addr().port(), 0);
        server.shutdown().expect("shutdown");
        // A second shutdown is a no-op.
        server.shutdown().expect("second shutdown");
    }
}
