//! Plain terminal view.
//!
//! Renders each controller state as text and drives the fetch protocol the
//! screens follow: trigger a fetch whenever the state is Initial, and reset
//! the controller after an Error while retries remain.

use crate::api::{CharacterDetail, CharacterSummary, DetailPayload, ListPayload};
use crate::error::AppResult;
use crate::state::{DetailFetchController, FetchState, ListFetchController, StateSubscription};
use crate::utils::dates::{format_timestamp, readable_date};
use std::io::{self, Write};

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

/// Writes rendered states to any `Write` sink.
///
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        TerminalView { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_list(&mut self, state: &FetchState<ListPayload>) -> io::Result<()> {
        match state {
            FetchState::Initial => writeln!(self.out, "No characters loaded yet."),
            FetchState::Loading => writeln!(self.out, "Loading characters..."),
            FetchState::Success(Some(characters)) if !characters.is_empty() => {
                writeln!(self.out, "{} characters:", characters.len())?;
                for character in characters {
                    match character {
                        Some(character) => self.render_summary(character)?,
                        None => writeln!(self.out, "{:>5}  {}", "-", UNKNOWN)?,
                    }
                }
                Ok(())
            }
            FetchState::Success(_) => writeln!(self.out, "No characters found."),
            FetchState::Error(message) => writeln!(self.out, "Error: {}", message),
        }
    }

    fn render_summary(&mut self, character: &CharacterSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "{:>5}  {} ({})",
            or_unknown(&character.id),
            or_unknown(&character.name),
            or_unknown(&character.species)
        )
    }

    pub fn render_detail(&mut self, state: &FetchState<DetailPayload>) -> io::Result<()> {
        match state {
            FetchState::Initial => writeln!(self.out, "No character selected."),
            FetchState::Loading => writeln!(self.out, "Loading character..."),
            FetchState::Success(Some(character)) => self.render_character(character),
            FetchState::Success(None) => writeln!(self.out, "Character not found."),
            FetchState::Error(message) => writeln!(self.out, "Error: {}", message),
        }
    }

    fn render_character(&mut self, character: &CharacterDetail) -> io::Result<()> {
        let place = |p: &Option<crate::api::Place>| {
            p.as_ref()
                .and_then(|p| p.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        let created = match character.created.as_deref() {
            Some(raw) => match (readable_date(raw), format_timestamp(raw)) {
                (Some(date), Some(timestamp)) => format!("{} ({})", date, timestamp),
                _ => raw.to_string(),
            },
            None => UNKNOWN.to_string(),
        };

        writeln!(self.out, "{}", or_unknown(&character.name))?;
        writeln!(self.out, "  Species:  {}", or_unknown(&character.species))?;
        if let Some(kind) = character.kind.as_deref().filter(|k| !k.is_empty()) {
            writeln!(self.out, "  Type:     {}", kind)?;
        }
        writeln!(self.out, "  Status:   {}", or_unknown(&character.status))?;
        writeln!(self.out, "  Gender:   {}", or_unknown(&character.gender))?;
        writeln!(self.out, "  Origin:   {}", place(&character.origin))?;
        writeln!(self.out, "  Location: {}", place(&character.location))?;
        writeln!(self.out, "  Created:  {}", created)?;
        writeln!(self.out, "  Episodes: {}", character.episode.len())?;
        for episode in &character.episode {
            writeln!(
                self.out,
                "    {}  {}",
                or_unknown(&episode.code),
                or_unknown(&episode.name)
            )?;
        }
        Ok(())
    }

    pub fn render_retry(&mut self, remaining: usize) -> io::Result<()> {
        writeln!(self.out, "Retrying ({} left)...", remaining)
    }
}

/// Follow a controller until it settles on a result the view keeps showing.
/// Returns `None` if the controller went away first.
///
async fn drive<T, W, R>(
    mut states: StateSubscription<T>,
    view: &mut TerminalView<W>,
    mut retries: usize,
    trigger: impl Fn() -> bool,
    reset: impl Fn(),
    mut render: R,
) -> AppResult<Option<FetchState<T>>>
where
    T: Clone,
    W: Write,
    R: FnMut(&mut TerminalView<W>, &FetchState<T>) -> io::Result<()>,
{
    while let Some(state) = states.next().await {
        render(&mut *view, &state)?;
        if state.is_initial() {
            trigger();
        } else if state.is_terminal() {
            match state {
                FetchState::Error(_) if retries > 0 => {
                    retries -= 1;
                    view.render_retry(retries)?;
                    reset();
                }
                settled => return Ok(Some(settled)),
            }
        }
    }
    Ok(None)
}

/// Show the character list, retrying after errors up to `retries` times.
///
pub async fn show_list<W: Write>(
    controller: &ListFetchController,
    view: &mut TerminalView<W>,
    retries: usize,
) -> AppResult<Option<FetchState<ListPayload>>> {
    drive(
        controller.subscribe(),
        view,
        retries,
        || controller.trigger_fetch(),
        || controller.reload(),
        |view, state| view.render_list(state),
    )
    .await
}

/// Show one character, retrying after errors up to `retries` times.
///
pub async fn show_detail<W: Write>(
    controller: &DetailFetchController,
    id: &str,
    view: &mut TerminalView<W>,
    retries: usize,
) -> AppResult<Option<FetchState<DetailPayload>>> {
    drive(
        controller.subscribe(),
        view,
        retries,
        || controller.trigger_fetch(id),
        || controller.clear(),
        |view, state| view.render_detail(state),
    )
    .await
}
