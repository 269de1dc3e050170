//! Server-Sent Events keep-alive channel on the RPC path.
//!
//! The server never pushes anything besides an initial `info` event; the
//! stream only exists so SSE clients can hold a connection open. Keep-alive
//! comments go out every 15 seconds.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::json;
use tracing::info;

pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);
const KEEP_ALIVE_TEXT: &str = "keep-alive";

/// SSE event stream that logs when the client goes away.
pub struct ConnectionEvents {
    inner: BoxStream<'static, Result<Event, Infallible>>,
    _guard: DisconnectGuard,
}

impl Stream for ConnectionEvents {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// Dropped together with the response body, i.e. on disconnect.
struct DisconnectGuard;

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        info!("SSE client disconnected.");
    }
}

/// The `info` event sent right after the connection opens.
pub fn connected_event() -> Event {
    Event::default()
        .event("info")
        .data(json!({"message": "SSE connection established"}).to_string())
}

/// Build the SSE response.
pub fn keep_alive_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client connected.");

    let events = stream::once(async { Ok(connected_event()) })
        .chain(stream::pending())
        .boxed();

    Sse::new(ConnectionEvents {
        inner: events,
        _guard: DisconnectGuard,
    })
    .keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text(KEEP_ALIVE_TEXT),
    )
}
