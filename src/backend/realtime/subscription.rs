/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/realtime` endpoint, the REST counterpart of the GraphQL subscriptions.
 *
 * # Channel Filtering
 *
 * Clients pick channels with the `channels` query parameter:
 * - `?channels=changePost,deletePost` - both channels
 * - `?channels=deletePost` - deletions only
 * - No parameter - every channel
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - When the client disconnects the stream is dropped, which closes the
 *   gateway connection and releases its bus subscriptions
 * - There is no resume; a reconnecting client only sees new events
 */

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{stream, StreamExt};
use tokio_stream::Stream;

use crate::backend::error::BackendError;
use crate::backend::realtime::gateway::SubscriptionGateway;
use crate::shared::event::Channel;

/// Parse a comma-separated channel list
///
/// An absent or blank list selects every channel; an unknown name is an error.
pub fn parse_channels(raw: Option<&str>) -> Result<Vec<Channel>, BackendError> {
    let names: Vec<&str> = raw
        .map(|list| list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if names.is_empty() {
        return Ok(Channel::ALL.to_vec());
    }

    names
        .into_iter()
        .map(|name| {
            Channel::parse(name)
                .ok_or_else(|| BackendError::invalid_field("channels", format!("Unknown channel: {}", name)))
        })
        .collect()
}

/// Handle real-time subscription (GET /realtime)
///
/// # Errors
///
/// * `422 Unprocessable Entity` - If an unknown channel is requested
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: changePost
/// data: {"post":{...},"action":"create","userId":"..."}
///
/// event: deletePost
/// data: {"id":"..."}
/// ```
pub async fn handle_realtime_subscription(
    State(gateway): State<SubscriptionGateway>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, BackendError> {
    let channels = parse_channels(query.get("channels").map(String::as_str))?;
    let connection = gateway.open(&channels);
    tracing::info!("[Realtime] SSE connection {} subscribed", connection.id());

    let stream = stream::unfold(connection, |mut connection| async move {
        loop {
            let message = connection.next().await?;
            let data = match message.payload_json() {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                    continue;
                }
            };

            let event = Event::default().event(message.channel().name()).data(data);
            return Some((Ok(event), connection));
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
