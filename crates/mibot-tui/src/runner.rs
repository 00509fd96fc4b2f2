//! Main event loop: terminal in, messages through the update function,
//! frames out.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use mibot_api::ApiClient;
use mibot_app::actions::PollerSet;
use mibot_app::message::Message;
use mibot_app::process::process_message;
use mibot_app::state::{AppState, ConsolePhase};
use mibot_app::Settings;
use mibot_core::prelude::*;

use crate::{event, render, terminal};

/// Housekeeping tick (notice expiry); also bounds render latency.
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Run the console until the operator quits.
///
/// `robot_ip` is the optional manual override pushed to the backend before
/// discovery.
pub async fn run(settings: Settings, robot_ip: Option<String>) -> Result<()> {
    let client = ApiClient::new(&settings.base_url, settings.request_timeout())?;

    terminal::install_panic_hook();
    let mut terminal = ratatui::init();

    // Dedicated thread for blocking keyboard reads; it outlives emergency
    // reloads so keystrokes are never dropped between sessions.
    let (key_tx, key_rx) = mpsc::channel::<Message>(64);
    std::thread::spawn(move || event::read_loop(key_tx));

    let result = run_sessions(&mut terminal, client, settings, robot_ip, key_rx).await;

    ratatui::restore();
    result
}

/// One "session" is a full model lifetime: bootstrap, event loop, teardown.
/// An emergency reload ends the session and starts a fresh one, which is
/// what revalidates the emergency state from the backend.
async fn run_sessions(
    terminal: &mut ratatui::DefaultTerminal,
    client: ApiClient,
    settings: Settings,
    robot_ip: Option<String>,
    mut key_rx: mpsc::Receiver<Message>,
) -> Result<()> {
    loop {
        let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(256);
        let mut pollers = PollerSet::new();
        let mut state = AppState::new();
        state.notice_ttl = settings.notice_ttl();

        process_message(
            &mut state,
            Message::Bootstrap {
                robot_ip: robot_ip.clone(),
            },
            &msg_tx,
            &mut pollers,
            &client,
            &settings,
        );

        let mut ticker = tokio::time::interval(TICK_PERIOD);
        let phase = loop {
            terminal
                .draw(|frame| render::draw(frame, &state))
                .map_err(|e| Error::terminal(e.to_string()))?;

            let message = tokio::select! {
                Some(msg) = msg_rx.recv() => msg,
                key = key_rx.recv() => match key {
                    Some(msg) => msg,
                    // Keyboard thread died; nothing left to drive the UI.
                    None => break ConsolePhase::Quitting,
                },
                _ = ticker.tick() => Message::Tick,
            };

            process_message(
                &mut state,
                message,
                &msg_tx,
                &mut pollers,
                &client,
                &settings,
            );

            match state.phase {
                ConsolePhase::Running => {}
                phase => break phase,
            }
        };

        pollers.stop_all();

        match phase {
            ConsolePhase::ReloadRequested => {
                info!("rebuilding console state after emergency reload");
                continue;
            }
            _ => return Ok(()),
        }
    }
}
