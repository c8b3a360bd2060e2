use std::time::Duration;

use iced::widget::{button, center, column, container, row, rule, text, text_input};
use iced::{Alignment, Element, Length, Task};

use yuna_core::models::CatalogEntry;

use crate::app;
use crate::cover_cache::CoverCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::toast::ToastKind;
use crate::widgets;

/// Quiet period after the last keystroke before a query is issued.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Error text shown inline when the catalog is unreachable.
const SEARCH_FAILED: &str = "Failed to fetch anime data.";

// ── State ─────────────────────────────────────────────────────────

/// Catalog search screen state.
pub struct Search {
    query: String,
    /// Debounce generation. Bumped on every keystroke; doubles as the
    /// request sequence so stale timers and stale responses are both
    /// discarded.
    seq: u64,
    results: Vec<CatalogEntry>,
    loading: bool,
    error: Option<String>,
    searched: bool,
}

// ── Messages ──────────────────────────────────────────────────────

/// Messages handled by the Search screen.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    ClearQuery,
    /// The debounce timer for generation `seq` matured.
    DebounceElapsed(u64),
    /// The catalog responded to the query issued at generation `seq`.
    ResultsLoaded(u64, Result<Vec<CatalogEntry>, String>),
    AddToList(usize),
    AddedToList(Result<String, String>),
}

// ── Implementation ────────────────────────────────────────────────

impl Search {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            seq: 0,
            results: Vec::new(),
            loading: false,
            error: None,
            searched: false,
        }
    }

    /// Current search query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[CatalogEntry] {
        &self.results
    }

    /// True when the query issued at generation `seq` is still the one
    /// the screen is waiting for.
    pub fn awaiting(&self, seq: u64) -> bool {
        self.loading && seq == self.seq
    }

    /// Handle a search message, returning an Action for the app router.
    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::QueryChanged(query) => {
                self.query = query;
                self.seq = self.seq.wrapping_add(1);

                if self.query.trim().is_empty() {
                    // Empty query: clear results without touching the network.
                    self.results.clear();
                    self.error = None;
                    self.loading = false;
                    self.searched = false;
                    return Action::None;
                }

                let seq = self.seq;
                Action::RunTask(Task::perform(
                    async { tokio::time::sleep(DEBOUNCE_DELAY).await },
                    move |_| app::Message::Search(Message::DebounceElapsed(seq)),
                ))
            }
            Message::ClearQuery => self.update(Message::QueryChanged(String::new())),
            Message::DebounceElapsed(seq) => {
                // A newer keystroke superseded this timer.
                if seq == self.seq {
                    self.loading = true;
                    self.error = None;
                }
                // The catalog call itself is spawned by app.rs.
                Action::None
            }
            Message::ResultsLoaded(seq, result) => {
                if seq != self.seq {
                    // Late response from a superseded query.
                    return Action::None;
                }
                self.loading = false;
                self.searched = true;
                match result {
                    Ok(results) => {
                        self.results = results;
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("catalog search failed: {e}");
                        self.error = Some(SEARCH_FAILED.into());
                        self.results.clear();
                    }
                }
                Action::None
            }
            Message::AddToList(_idx) => {
                // Handled by app.rs, which holds the session and store.
                Action::None
            }
            Message::AddedToList(result) => match result {
                Ok(title) => Action::ShowToast(
                    format!("{title} added to your list!"),
                    ToastKind::Success,
                ),
                Err(e) => {
                    Action::ShowToast(format!("Failed to add anime: {e}"), ToastKind::Error)
                }
            },
        }
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, covers: &'a CoverCache) -> Element<'a, Message> {
        let search_icon = lucide_icons::iced::icon_search()
            .size(style::TEXT_BASE)
            .color(cs.on_surface_variant);

        let search_input = text_input("Search for anime...", &self.query)
            .on_input(Message::QueryChanged)
            .size(style::TEXT_BASE)
            .padding([style::SPACE_XS, style::SPACE_SM])
            .width(Length::Fill)
            .style(theme::text_input_borderless(cs));

        let mut search_bar = row![search_icon, search_input]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);

        if !self.query.is_empty() {
            let clear_size = style::TEXT_SM + style::SPACE_XS * 2.0;
            let clear_btn = button(
                container(
                    lucide_icons::iced::icon_x()
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                )
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            )
            .on_press(Message::ClearQuery)
            .padding(0)
            .width(Length::Fixed(clear_size))
            .height(Length::Fixed(clear_size))
            .style(theme::icon_button(cs));
            search_bar = search_bar.push(clear_btn);
        }

        let header = container(
            container(search_bar)
                .style(theme::search_bar(cs))
                .padding([style::SPACE_SM, style::SPACE_MD])
                .width(Length::Fill),
        )
        .padding([style::SPACE_SM, style::SPACE_LG]);

        let body: Element<'_, Message> = if self.loading {
            centered_note(cs, "Loading...")
        } else if let Some(err) = &self.error {
            container(
                text(err.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.error)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            )
            .padding(style::SPACE_3XL)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into()
        } else if !self.searched {
            search_prompt(cs)
        } else if self.results.is_empty() {
            centered_note(cs, "No results found.")
        } else {
            let items: Vec<Element<'a, Message>> = self
                .results
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    widgets::search_row(cs, covers, entry, Message::AddToList(idx))
                })
                .collect();

            widgets::styled_scrollable(
                column(items)
                    .spacing(style::SPACE_XXS)
                    .padding([style::SPACE_XS, style::SPACE_LG]),
            )
            .height(Length::Fill)
            .into()
        };

        container(column![header, rule::horizontal(1), body].width(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Placeholder shown before the first query: icon beside the heading,
/// hint underneath.
fn search_prompt<'a>(cs: &ColorScheme) -> Element<'a, Message> {
    center(
        column![
            row![
                lucide_icons::iced::icon_search()
                    .size(style::TEXT_XL)
                    .color(cs.on_surface_variant),
                text("Search Anime")
                    .size(style::TEXT_XL)
                    .font(style::FONT_HEADING)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_TIGHT),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
            text("Results appear as you type.")
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
        ]
        .spacing(style::SPACE_SM)
        .align_x(Alignment::Center),
    )
    .into()
}

fn centered_note<'a>(cs: &ColorScheme, note: &'a str) -> Element<'a, Message> {
    container(
        text(note)
            .size(style::TEXT_SM)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE),
    )
    .padding(style::SPACE_3XL)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            title: title.into(),
            image_url: None,
        }
    }

    #[test]
    fn test_empty_query_clears_without_scheduling() {
        let mut search = Search::new();
        assert!(matches!(
            search.update(Message::QueryChanged("naruto".into())),
            Action::RunTask(_)
        ));

        let action = search.update(Message::QueryChanged(String::new()));
        assert!(matches!(action, Action::None));
        assert!(search.results.is_empty());
        assert!(!search.loading);
    }

    #[test]
    fn test_superseded_timer_does_not_mature() {
        let mut search = Search::new();
        search.update(Message::QueryChanged("nar".into()));
        let stale_seq = search.seq;
        search.update(Message::QueryChanged("naruto".into()));

        search.update(Message::DebounceElapsed(stale_seq));
        assert!(!search.awaiting(stale_seq));
        assert!(!search.loading);

        search.update(Message::DebounceElapsed(search.seq));
        assert!(search.loading);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut search = Search::new();
        search.update(Message::QueryChanged("one".into()));
        let stale_seq = search.seq;
        search.update(Message::QueryChanged("one piece".into()));
        search.update(Message::DebounceElapsed(search.seq));

        // A late response from the superseded query must not land.
        search.update(Message::ResultsLoaded(
            stale_seq,
            Ok(vec![entry("999", "Wrong Show")]),
        ));
        assert!(search.results.is_empty());
        assert!(search.loading);

        search.update(Message::ResultsLoaded(
            search.seq,
            Ok(vec![entry("21", "One Piece")]),
        ));
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].title, "One Piece");
        assert!(!search.loading);
    }

    #[test]
    fn test_failure_clears_results_and_sets_error() {
        let mut search = Search::new();
        search.update(Message::QueryChanged("naruto".into()));
        let seq = search.seq;
        search.update(Message::DebounceElapsed(seq));
        search.update(Message::ResultsLoaded(seq, Ok(vec![entry("20", "Naruto")])));
        assert_eq!(search.results.len(), 1);

        search.update(Message::QueryChanged("naruto shippuden".into()));
        let seq = search.seq;
        search.update(Message::DebounceElapsed(seq));
        search.update(Message::ResultsLoaded(seq, Err("connection refused".into())));
        assert!(search.results.is_empty());
        assert_eq!(search.error.as_deref(), Some(SEARCH_FAILED));
    }

    #[test]
    fn test_add_feedback_becomes_a_toast() {
        let mut search = Search::new();
        let action = search.update(Message::AddedToList(Ok("Naruto".into())));
        assert!(matches!(action, Action::ShowToast(msg, ToastKind::Success)
            if msg == "Naruto added to your list!"));

        let action = search.update(Message::AddedToList(Err("denied".into())));
        assert!(matches!(action, Action::ShowToast(_, ToastKind::Error)));
    }
}
