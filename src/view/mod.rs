//! # View Module
//!
//! Everything the user sees goes through the [`View`] trait. The session
//! controller never prints on its own: it computes cards, details and status
//! messages and hands them to a `View`. [`TerminalView`] renders them as
//! colored lines and tables; tests plug in a recording implementation.
//!
//! - [`library`] - all tracks, the filtered/sorted projection, the open detail
//! - [`card`] - display models for the track list and the detail overlay
//! - [`notice`] - status messages with an optional time-to-live
//! - [`terminal`] - the terminal implementation

pub mod card;
pub mod library;
pub mod notice;
pub mod terminal;

pub use card::{TrackCard, TrackDetail};
pub use library::{LibraryView, SortDirection, SortField};
pub use notice::{ERROR_DISMISS_AFTER, Notice};
pub use terminal::TerminalView;

use crate::types::SelectorOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

/// Output side of a session.
pub trait View {
    /// Authorization status; stays until replaced.
    fn show_status(&mut self, message: &str, kind: StatusKind);

    /// A general error; dismissed after [`ERROR_DISMISS_AFTER`].
    fn show_error(&mut self, message: &str);

    fn show_loading(&mut self, loading: bool);

    /// Switches from the authorization screen to the library.
    fn show_library(&mut self);

    fn show_playlist_options(&mut self, options: &[SelectorOption]);

    fn show_album_options(&mut self, options: &[SelectorOption]);

    fn render_tracks(&mut self, cards: &[TrackCard]);

    fn show_detail(&mut self, detail: &TrackDetail);

    fn close_detail(&mut self);
}
