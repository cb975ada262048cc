use reqwest::Client;

use crate::{
    Res,
    management::Session,
    spotify::{Endpoints, get_json},
    types::{Album, Paging, Playlist, SavedAlbum, Source, Track, TrackItem},
};

/// Page size of every collection request.
pub const PAGE_LIMIT: u32 = 50;

/// Reads a user's tracks, playlists and albums from the Web API.
#[derive(Debug, Clone)]
pub struct LibraryFetcher {
    client: Client,
    endpoints: Endpoints,
}

impl LibraryFetcher {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        LibraryFetcher { client, endpoints }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Retrieves the full track list of `source`.
    pub async fn load_source(&self, session: &Session, source: &Source) -> Res<Vec<Track>> {
        match source {
            Source::Liked => self.saved_tracks(session).await,
            Source::Playlist(id) => self.playlist_tracks(session, id).await,
            Source::Album(id) => self.album_tracks(session, id).await,
        }
    }

    /// Every saved ("liked") track, following `next` until exhausted.
    pub async fn saved_tracks(&self, session: &Session) -> Res<Vec<Track>> {
        let url = format!(
            "{uri}?limit={limit}",
            uri = self.endpoints.api("/me/tracks"),
            limit = PAGE_LIMIT
        );
        let items = self
            .collect_pages(session, url, "Failed to fetch liked songs")
            .await?;

        Ok(items.into_iter().filter_map(|item| item.track).collect())
    }

    /// Every track of a playlist.
    ///
    /// Removed entries come back with a `null` track and local files without
    /// an id; both are dropped.
    pub async fn playlist_tracks(&self, session: &Session, playlist_id: &str) -> Res<Vec<Track>> {
        let url = format!(
            "{uri}?limit={limit}",
            uri = self
                .endpoints
                .api(&format!("/playlists/{id}/tracks", id = playlist_id)),
            limit = PAGE_LIMIT
        );
        let items = self
            .collect_pages(session, url, "Failed to fetch playlist tracks")
            .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| track.track_id().is_some())
            .collect())
    }

    /// Tracks of an album. Only the first page is read, so albums with
    /// more than 50 tracks are cut off.
    pub async fn album_tracks(&self, session: &Session, album_id: &str) -> Res<Vec<Track>> {
        let url = format!(
            "{uri}?limit={limit}",
            uri = self
                .endpoints
                .api(&format!("/albums/{id}/tracks", id = album_id)),
            limit = PAGE_LIMIT
        );
        let page: Paging<Track> = get_json(
            &self.client,
            &url,
            session.bearer()?,
            "Failed to fetch album tracks",
        )
        .await?;

        Ok(page.items)
    }

    /// First page of the user's playlists.
    pub async fn playlists(&self, session: &Session) -> Res<Vec<Playlist>> {
        let url = format!(
            "{uri}?limit={limit}",
            uri = self.endpoints.api("/me/playlists"),
            limit = PAGE_LIMIT
        );
        let page: Paging<Playlist> = get_json(
            &self.client,
            &url,
            session.bearer()?,
            "Failed to fetch playlists",
        )
        .await?;

        Ok(page.items)
    }

    /// First page of the user's saved albums.
    pub async fn albums(&self, session: &Session) -> Res<Vec<Album>> {
        let url = format!(
            "{uri}?limit={limit}",
            uri = self.endpoints.api("/me/albums"),
            limit = PAGE_LIMIT
        );
        let page: Paging<SavedAlbum> = get_json(
            &self.client,
            &url,
            session.bearer()?,
            "Failed to fetch albums",
        )
        .await?;

        Ok(page.items.into_iter().map(|saved| saved.album).collect())
    }

    /// Walks a paginated collection one page at a time.
    async fn collect_pages(
        &self,
        session: &Session,
        first_page: String,
        context: &str,
    ) -> Res<Vec<TrackItem>> {
        let token = session.bearer()?;
        let mut items = Vec::new();
        let mut next = Some(first_page);

        while let Some(url) = next {
            let page: Paging<TrackItem> = get_json(&self.client, &url, token, context).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}
