use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use futures_util::stream::{self, Stream};
use log::debug;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;

/// Path of the event stream the injected client subscribes to
pub const LIVERELOAD_PATH: &str = "/__livereload";

/// Fans a reload signal out to every connected browser
#[derive(Clone)]
pub struct LiveReload {
    tx: broadcast::Sender<()>,
}

impl Default for LiveReload {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveReload {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        LiveReload { tx }
    }

    /// Tell connected browsers to reload; returns how many were notified
    pub fn trigger(&self) -> usize {
        match self.tx.send(()) {
            Ok(receivers) => {
                debug!("Reloading {} browser(s)", receivers);
                receivers
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

/// Stream one `reload` event per signal until the sender goes away
pub fn reload_events(rx: broadcast::Receiver<()>) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    return Some((Ok(Event::default().data("reload")), rx));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

async fn livereload_stream(
    State(livereload): State<LiveReload>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(reload_events(livereload.subscribe())).keep_alive(KeepAlive::default())
}

/// Create the router serving the event stream.
///
/// The stream lives on its own port, so cross-origin requests are allowed.
pub fn create_livereload_handler(livereload: LiveReload) -> Router {
    Router::new()
        .route(LIVERELOAD_PATH, get(livereload_stream))
        .layer(CorsLayer::permissive())
        .with_state(livereload)
}
