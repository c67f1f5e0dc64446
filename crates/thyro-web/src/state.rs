use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinError;

use crate::session::Session;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `action` against the session on a blocking thread.
    ///
    /// Session actions make blocking HTTP calls. Holding the lock for the
    /// whole action serialises them.
    pub async fn run<F, T>(&self, action: F) -> Result<T, JoinError>
    where
        F: FnOnce(&mut Session) -> T + Send + 'static,
        T: Send + 'static,
    {
        let session = Arc::clone(&self.session);
        tokio::task::spawn_blocking(move || {
            let mut session = session.blocking_lock();
            action(&mut session)
        })
        .await
    }
}
