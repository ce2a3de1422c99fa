//! Action execution against a remote source.

use super::{handle_event, Action, AppState, Event};
use crate::domain::Result;
use crate::fetch::dispatch;
use crate::map::MapSurface;
use crate::remote::RemoteSource;
use std::collections::VecDeque;

/// Handles `event`, then executes the resulting actions until none remain.
///
/// Remote requests are dispatched one at a time and their responses are fed back as
/// [`Event::Fetch`]. Returns `false` once an action closed the view.
///
/// # Errors
///
/// Returns any error produced by [`handle_event`].
pub async fn process_event<S: MapSurface>(
    state: &mut AppState<S>,
    source: &dyn RemoteSource,
    event: Event,
) -> Result<bool> {
    let mut queue = VecDeque::from([event]);
    let mut open = true;

    while let Some(event) = queue.pop_front() {
        let (should_render, actions) = handle_event(state, &event)?;
        tracing::debug!(action_count = actions.len(), should_render, "event handled");

        for action in actions {
            match action {
                Action::PostToRemote(request) => {
                    let response = dispatch(source, request).await;
                    queue.push_back(Event::Fetch(response));
                }
                Action::CloseView => {
                    tracing::debug!("view closed");
                    open = false;
                }
            }
        }
    }

    Ok(open)
}
