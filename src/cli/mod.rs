//! # CLI Module
//!
//! The interactive side of MusicBud: one `session` runs the whole lifecycle
//! of a connection to Spotify.
//!
//! ```text
//! client id ──► authorize URL ──► browser ──► /callback ──► token exchange
//!                                                              │
//!               prompt ◄── render ◄── enrich ◄── liked songs ◄─┘
//!                 │
//!                 └── search / sort / order / source / playlist / album / show
//! ```
//!
//! - [`app`] - the session controller, [`App`]
//! - [`events`] - the [`Event`] enum and parsing of typed commands
//!
//! Nothing typed at the prompt can end the process by failing: errors are
//! shown and the prompt comes back.

pub mod app;
pub mod events;

use std::{
    io::{self, Write},
    net::SocketAddr,
    str::FromStr,
    sync::Arc,
    time::Instant,
};

use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

pub use app::{App, LoadTicket, resolve_selection};
pub use events::{Event, HELP};

use crate::{
    config, error, info,
    management::LocalStore,
    server::start_api_server,
    spotify::{Endpoints, auth},
    types::CallbackState,
    view::TerminalView,
    warning,
};

/// Line reader over stdin.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        Prompt {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `question` and reads one line. `None` on end of input.
    pub async fn ask(&mut self, question: &str) -> Option<String> {
        print!("{}", question);
        let _ = io::stdout().flush();

        match self.lines.next_line().await {
            Ok(line) => line.map(|l| l.trim().to_string()),
            Err(e) => {
                warning!("Cannot read input: {}", e);
                None
            }
        }
    }
}

/// Runs an interactive session until the user quits.
///
/// The client id is taken from `client_id`, then `SPOTIFY_API_AUTH_CLIENT_ID`,
/// then the one remembered from the last run, and asked for otherwise.
pub async fn session(client_id: Option<String>) {
    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let callback_state: CallbackState = Arc::new(Mutex::new(None));
    let server_state = Arc::clone(&callback_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let mut prompt = Prompt::new();
    let mut app = App::new(TerminalView::new(), LocalStore::new(), Endpoints::from_env());

    let mut client_id = match client_id.or_else(config::spotify_client_id) {
        Some(id) => Some(id),
        None => app.saved_client_id().await,
    };

    while !app.is_authorized() {
        let id = match client_id.take() {
            Some(id) => id,
            None => match prompt.ask("Spotify Client ID: ").await {
                Some(id) => id,
                None => return,
            },
        };

        if let Some(url) = app.authenticate(&id).await {
            open_browser(&url);

            match auth::wait_for_callback(Arc::clone(&callback_state), config::callback_timeout())
                .await
            {
                Some(outcome) => app.handle_callback(outcome).await,
                None => warning!("No authorization received in time."),
            }
        }

        if app.is_authorized() {
            break;
        }

        match prompt.ask("Try again? [Y/n] ").await {
            Some(answer) if answer.is_empty() || answer.eq_ignore_ascii_case("y") => {
                client_id = Some(id).filter(|id| !id.trim().is_empty());
            }
            _ => return,
        }
    }

    run_prompt(&mut app, &mut prompt).await;
}

/// Reads commands until `quit` or end of input.
async fn run_prompt(app: &mut App<TerminalView>, prompt: &mut Prompt) {
    loop {
        let question = format!(
            "musicbud [{source}{sort}]{alert}> ",
            alert = if app.visible_error(Instant::now()).is_some() { " !" } else { "" },
            source = app.source(),
            sort = app
                .library()
                .sort_field()
                .map(|field| format!(" · {} {}", field, app.library().direction().arrow()))
                .unwrap_or_default()
        );

        let Some(line) = prompt.ask(&question).await else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        match line.parse::<Event>() {
            Ok(Event::Help) => println!("{}", HELP),
            Ok(event) => {
                if !app.dispatch(event).await {
                    break;
                }
            }
            Err(e) => warning!("{}", e),
        }
    }

    info!("Bye.");
}

fn open_browser(url: &str) {
    info!("Opening Spotify authorization in your browser...");
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}
