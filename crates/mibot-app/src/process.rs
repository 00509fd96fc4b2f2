//! Message processing: drive a message (and its follow-ups) through the
//! TEA update function and hand resulting actions to the runtime.

use tokio::sync::mpsc;

use mibot_api::ApiClient;

use crate::actions::{handle_action, PollerSet};
use crate::handler;
use crate::message::Message;
use crate::settings::Settings;
use crate::state::AppState;

/// Process a message through the TEA update function.
///
/// Follow-up messages are processed in the same call, depth-first, so a key
/// press that expands into a command intent settles before the next event
/// is read. Actions are performed in the order the handlers emitted them.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    pollers: &mut PollerSet,
    client: &ApiClient,
    settings: &Settings,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        for action in result.actions {
            handle_action(action, client, msg_tx, pollers, settings);
        }

        msg = result.message;
    }
}
