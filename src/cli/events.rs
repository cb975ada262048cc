use std::str::FromStr;

use crate::{types::SourceKind, view::SortField};

/// Everything a user can ask of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Search(String),
    /// `None` restores the loaded order.
    Sort(Option<SortField>),
    ToggleSortDirection,
    SwitchSource(SourceKind),
    SelectPlaylist(String),
    SelectAlbum(String),
    /// 1-based position in the current list.
    ShowDetail(usize),
    CloseDetail,
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search [term]                  filter by track, artist or album (no term clears)
  sort <field>                   name, artist, album, release_date, tempo, energy, danceability, none
  order                          toggle ascending / descending
  source <liked|playlists|albums>
  liked | playlists | albums     shortcuts for `source`
  playlist <number|id>           load a playlist from the list
  album <number|id>              load an album from the list
  show <number>                  open track details
  close                          close track details
  list                           show the current tracks again
  help                           this text
  quit                           leave the session";

impl FromStr for Event {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "search" | "s" | "/" => Ok(Event::Search(argument.to_string())),
            "sort" => {
                if argument.is_empty() {
                    return Err("sort needs a field, e.g. `sort tempo`".to_string());
                }
                match argument.to_ascii_lowercase().as_str() {
                    "none" | "default" | "off" => Ok(Event::Sort(None)),
                    other => other.parse::<SortField>().map(|f| Event::Sort(Some(f))),
                }
            }
            "order" | "reverse" => Ok(Event::ToggleSortDirection),
            "source" => argument.parse::<SourceKind>().map(Event::SwitchSource),
            "liked" | "playlists" | "albums" => command.parse::<SourceKind>().map(Event::SwitchSource),
            "playlist" => non_empty(argument, "playlist").map(Event::SelectPlaylist),
            "album" => non_empty(argument, "album").map(Event::SelectAlbum),
            "show" | "detail" => argument
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Event::ShowDetail)
                .ok_or_else(|| "show needs a track number, e.g. `show 3`".to_string()),
            "close" => Ok(Event::CloseDetail),
            "list" | "ls" => Ok(Event::List),
            "help" | "?" => Ok(Event::Help),
            "quit" | "exit" | "q" => Ok(Event::Quit),
            "" => Err("type `help` to list commands".to_string()),
            other => Err(format!("unknown command '{}', type `help`", other)),
        }
    }
}

fn non_empty(argument: &str, command: &str) -> Result<String, String> {
    if argument.is_empty() {
        return Err(format!(
            "{command} needs a number or an id, e.g. `{command} 2`",
            command = command
        ));
    }
    Ok(argument.to_string())
}
