use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    info, success,
    types::{OptionTableRow, SelectorOption},
    view::{StatusKind, TrackCard, TrackDetail, View},
    warning,
};

/// Renders a session as colored status lines, a spinner and tables.
#[derive(Default)]
pub struct TerminalView {
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_options(&self, title: &str, options: &[SelectorOption]) {
        if options.is_empty() {
            info!("No {} found.", title);
            return;
        }

        let rows: Vec<OptionTableRow> = options
            .iter()
            .enumerate()
            .map(|(i, option)| OptionTableRow {
                position: i + 1,
                name: option.label.clone(),
            })
            .collect();

        println!("{}\n{}\n", title.bold(), Table::new(rows));
    }
}

impl View for TerminalView {
    fn show_status(&mut self, message: &str, kind: StatusKind) {
        match kind {
            StatusKind::Loading => info!("{}", message),
            StatusKind::Success => success!("{}", message),
            StatusKind::Error => warning!("{}", message),
        }
    }

    fn show_error(&mut self, message: &str) {
        warning!("{}", message);
    }

    fn show_loading(&mut self, loading: bool) {
        if !loading {
            if let Some(pb) = self.spinner.take() {
                pb.finish_and_clear();
            }
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_message("Loading tracks...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        self.spinner = Some(pb);
    }

    fn show_library(&mut self) {
        info!("Library ready. Type `help` to list commands.");
    }

    fn show_playlist_options(&mut self, options: &[SelectorOption]) {
        self.print_options("Playlists", options);
        if !options.is_empty() {
            info!("Pick one with `playlist <number>`.");
        }
    }

    fn show_album_options(&mut self, options: &[SelectorOption]) {
        self.print_options("Albums", options);
        if !options.is_empty() {
            info!("Pick one with `album <number>`.");
        }
    }

    fn render_tracks(&mut self, cards: &[TrackCard]) {
        if cards.is_empty() {
            info!("No tracks to show.");
            return;
        }

        let rows = cards
            .iter()
            .enumerate()
            .map(|(i, card)| card.table_row(i + 1))
            .collect::<Vec<_>>();

        println!("{}", Table::new(rows));
        info!("{} tracks", cards.len());
    }

    fn show_detail(&mut self, detail: &TrackDetail) {
        println!(
            "{}\n{}\n",
            detail.name.bold(),
            Table::new(detail.table_rows())
        );
    }

    fn close_detail(&mut self) {
        info!("Detail closed.");
    }
}
