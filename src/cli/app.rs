use std::time::Instant;

use reqwest::Client;

use crate::{
    AppError, Res,
    cli::events::Event,
    management::{LocalStore, Session},
    spotify::{Endpoints, auth, library::LibraryFetcher},
    types::{CallbackOutcome, EnrichedTrack, SelectorOption, Source, SourceKind},
    view::{LibraryView, Notice, SortField, StatusKind, View},
    warning,
};

/// Identifies one load; only the most recent one may replace the library.
///
/// The prompt dispatches one event at a time, so its own loads never
/// overlap. The ticket matters to callers that fetch on their own and hand
/// the result in later through [`App::apply_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The top-level controller of a session.
///
/// Owns the [`Session`], the persisted store, the fetcher, the library view
/// state and a [`View`]. Input arrives as [`Event`]s through [`App::dispatch`].
pub struct App<V: View> {
    view: V,
    store: LocalStore,
    fetcher: LibraryFetcher,
    session: Option<Session>,
    library: LibraryView,
    source: SourceKind,
    selected: Option<String>,
    playlists: Vec<SelectorOption>,
    albums: Vec<SelectorOption>,
    generation: u64,
    status: Option<Notice>,
    error: Option<Notice>,
}

impl<V: View> App<V> {
    pub fn new(view: V, store: LocalStore, endpoints: Endpoints) -> Self {
        App {
            view,
            store,
            fetcher: LibraryFetcher::new(Client::new(), endpoints),
            session: None,
            library: LibraryView::new(),
            source: SourceKind::Liked,
            selected: None,
            playlists: Vec::new(),
            albums: Vec::new(),
            generation: 0,
            status: None,
            error: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authorized(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_authorized)
    }

    pub fn library(&self) -> &LibraryView {
        &self.library
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Id of the playlist or album currently shown, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// The client id remembered from an earlier run.
    pub async fn saved_client_id(&self) -> Option<String> {
        match self.store.client_id().await {
            Ok(client_id) => client_id,
            Err(e) => {
                warning!("Cannot read the saved client id: {}", e);
                None
            }
        }
    }

    /// The authorization status; it stays until replaced.
    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    /// The last general error, unless it has been dismissed by `now`.
    pub fn visible_error(&self, now: Instant) -> Option<&Notice> {
        self.error
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
    }

    /// Prepares the authorization redirect for `client_id` and returns the
    /// URL to send the user to. Failures are reported to the view.
    pub async fn authenticate(&mut self, client_id: &str) -> Option<String> {
        match auth::begin_authorization(&self.store, self.fetcher.endpoints(), client_id).await {
            Ok(request) => {
                self.session = Some(request.session);
                Some(request.url)
            }
            Err(AppError::Validation(message)) => {
                self.report_error(message);
                None
            }
            Err(e) => {
                self.report_error(format!("Authentication setup failed: {}", e));
                None
            }
        }
    }

    /// Reacts to the outcome of the authorization redirect.
    ///
    /// A successful exchange shows the library and starts loading liked
    /// songs right away.
    pub async fn handle_callback(&mut self, outcome: CallbackOutcome) {
        match outcome {
            CallbackOutcome::Cancelled(error) => {
                self.set_status(format!("Authorization cancelled: {}", error), StatusKind::Error);
            }
            CallbackOutcome::Code(code) => {
                self.set_status("Getting access token...".to_string(), StatusKind::Loading);

                match self.complete_authorization(&code).await {
                    Ok(()) => {
                        self.set_status("Connected successfully!".to_string(), StatusKind::Success);
                        self.view.show_library();
                        self.source = SourceKind::Liked;
                        self.load(Source::Liked).await;
                    }
                    Err(e) => {
                        self.set_status(format!("Authentication failed: {}", e), StatusKind::Error);
                    }
                }
            }
        }
    }

    async fn complete_authorization(&mut self, code: &str) -> Res<()> {
        let mut session = match self.session.take() {
            Some(session) => session,
            None => match self.store.client_id().await? {
                Some(client_id) => Session::new(client_id),
                None => return Err(AppError::Session("Client ID not found".to_string())),
            },
        };

        let result = auth::complete_authorization(
            self.fetcher.client(),
            &self.store,
            self.fetcher.endpoints(),
            &mut session,
            code,
        )
        .await;

        self.session = Some(session);
        result
    }

    /// Handles one event. Returns `false` once the session should end.
    pub async fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::Search(term) => self.set_search_term(&term),
            Event::Sort(field) => self.set_sort_field(field),
            Event::ToggleSortDirection => self.toggle_sort_direction(),
            Event::SwitchSource(kind) => self.switch_source(kind).await,
            Event::SelectPlaylist(selection) => self.select_playlist(&selection).await,
            Event::SelectAlbum(selection) => self.select_album(&selection).await,
            Event::ShowDetail(position) => self.show_detail(position),
            Event::CloseDetail => self.close_detail(),
            Event::List => self.render(),
            Event::Help => {}
            Event::Quit => return false,
        }

        true
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.library.set_search_term(term);
        self.render();
    }

    pub fn set_sort_field(&mut self, field: Option<SortField>) {
        self.library.set_sort_field(field);
        self.render();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.library.toggle_sort_direction();
        self.render();
    }

    pub fn show_detail(&mut self, position: usize) {
        let detail = match position.checked_sub(1) {
            Some(index) => self.library.show_detail(index).cloned(),
            None => None,
        };

        match detail {
            Some(detail) => self.view.show_detail(&detail),
            None => self.report_error(format!("No track at position {}", position)),
        }
    }

    pub fn close_detail(&mut self) {
        self.library.close_detail();
        self.view.close_detail();
    }

    pub fn render(&mut self) {
        let cards = self.library.cards();
        self.view.render_tracks(&cards);
    }

    /// Liked songs load immediately; playlists and albums first list what
    /// can be picked.
    pub async fn switch_source(&mut self, kind: SourceKind) {
        self.source = kind;
        self.selected = None;

        match kind {
            SourceKind::Liked => self.load(Source::Liked).await,
            SourceKind::Playlists => self.load_playlists().await,
            SourceKind::Albums => self.load_albums().await,
        }
    }

    pub async fn select_playlist(&mut self, selection: &str) {
        let Some(id) = resolve_selection(&self.playlists, selection) else {
            self.report_error(format!("No playlist matches '{}'", selection.trim()));
            return;
        };

        self.source = SourceKind::Playlists;
        self.selected = Some(id.clone());
        self.load(Source::Playlist(id)).await;
    }

    pub async fn select_album(&mut self, selection: &str) {
        let Some(id) = resolve_selection(&self.albums, selection) else {
            self.report_error(format!("No album matches '{}'", selection.trim()));
            return;
        };

        self.source = SourceKind::Albums;
        self.selected = Some(id.clone());
        self.load(Source::Album(id)).await;
    }

    async fn load_playlists(&mut self) {
        let result = match self.authorized_session() {
            Ok(session) => self.fetcher.playlists(session).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(playlists) => {
                self.playlists = playlists
                    .into_iter()
                    .map(|p| SelectorOption {
                        id: p.id,
                        label: p.name,
                    })
                    .collect();
                self.view.show_playlist_options(&self.playlists);
            }
            Err(e) => self.report_error(format!("Failed to load playlists: {}", e)),
        }
    }

    async fn load_albums(&mut self) {
        let result = match self.authorized_session() {
            Ok(session) => self.fetcher.albums(session).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(albums) => {
                self.albums = albums
                    .into_iter()
                    .filter_map(|album| {
                        let id = album.id.filter(|id| !id.is_empty())?;
                        let artist = album
                            .artists
                            .first()
                            .map(|a| a.name.as_str())
                            .unwrap_or("Unknown Artist");
                        Some(SelectorOption {
                            label: format!("{} - {}", album.name, artist),
                            id,
                        })
                    })
                    .collect();
                self.view.show_album_options(&self.albums);
            }
            Err(e) => self.report_error(format!("Failed to load albums: {}", e)),
        }
    }

    /// Fetches and enriches `source`, then replaces the library with it.
    ///
    /// On failure the previous tracks stay as they were.
    pub async fn load(&mut self, source: Source) {
        let ticket = self.start_load();

        self.view.show_loading(true);
        let result = self.fetch_enriched(&source).await;
        self.view.show_loading(false);

        match result {
            Ok(tracks) => {
                self.apply_load(ticket, tracks);
            }
            Err(e) => {
                self.report_error(format!("Failed to load {}: {}", source.label(), e));
            }
        }
    }

    /// Hands out the ticket for a new load, superseding all earlier ones.
    pub fn start_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Installs the result of a load unless a newer load has started since.
    pub fn apply_load(&mut self, ticket: LoadTicket, tracks: Vec<EnrichedTrack>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        self.library.replace_tracks(tracks);
        self.render();
        true
    }

    async fn fetch_enriched(&self, source: &Source) -> Res<Vec<EnrichedTrack>> {
        let session = self.authorized_session()?;
        let tracks = self.fetcher.load_source(session, source).await?;
        self.fetcher.enrich(session, tracks).await
    }

    fn authorized_session(&self) -> Res<&Session> {
        match self.session.as_ref() {
            Some(session) if session.is_authorized() => Ok(session),
            _ => Err(AppError::Session("Not connected to Spotify yet".to_string())),
        }
    }

    fn set_status(&mut self, message: String, kind: StatusKind) {
        self.view.show_status(&message, kind);
        self.status = Some(Notice::persistent(message));
    }

    fn report_error(&mut self, message: String) {
        self.view.show_error(&message);
        self.error = Some(Notice::transient(message));
    }
}

/// Picks an option by 1-based position; anything that is not a number is
/// taken as an id, listed or not.
pub fn resolve_selection(options: &[SelectorOption], selection: &str) -> Option<String> {
    let selection = selection.trim();
    if selection.is_empty() {
        return None;
    }

    match selection.parse::<usize>() {
        Ok(position) => position
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|option| option.id.clone()),
        Err(_) => Some(selection.to_string()),
    }
}
