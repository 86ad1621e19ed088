//! Server-Sent Events handler for store notices

use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use serde_json::Value;
use shelfwise_core::Notice;
use std::convert::Infallible;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE endpoint. A failed start-up load is replayed first, then every notice
/// emitted after the client connects.
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (load_notice, rx) = {
        let store = state.store.read().await;
        (store.load_notice().cloned(), store.subscribe())
    };

    let event_stream = notice_stream(load_notice, rx).map(|notice| {
        Ok::<_, Infallible>(
            Event::default()
                .event(notice.kind())
                .data(notice_payload(&notice).to_string()),
        )
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

/// Notices raised while the store was opened
pub async fn list_notices(State(state): State<AppState>) -> Json<Vec<Value>> {
    let store = state.store.read().await;
    Json(store.load_notice().map(notice_payload).into_iter().collect())
}

/// `load_notice` (if any) followed by live notices; lagged receivers skip
/// what they missed
fn notice_stream(
    load_notice: Option<Notice>,
    rx: broadcast::Receiver<Notice>,
) -> impl Stream<Item = Notice> {
    let live = BroadcastStream::new(rx).filter_map(|result| result.ok());
    tokio_stream::iter(load_notice).chain(live)
}

fn notice_payload(notice: &Notice) -> Value {
    serde_json::json!({
        "notice": notice,
        "title": notice.title(),
        "message": notice.message(),
        "error": notice.is_error(),
    })
}
