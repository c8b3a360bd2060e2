use iced::widget::{button, center, column, container, pick_list, row, rule, text, text_input};
use iced::{Alignment, Element, Length, Task};

use yuna_api::store::ListStoreClient;
use yuna_core::models::{EntryUpdate, ListEntry, WatchStatus};
use yuna_core::session::Session;

use crate::app;
use crate::cover_cache::CoverCache;
use crate::screen::{Action, ModalKind};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::toast::ToastKind;
use crate::widgets;

/// Error text shown inline when the list subscription fails.
const LIST_FAILED: &str = "Failed to fetch anime list.";

/// Store access for the signed-in user, passed explicitly into every
/// update so no mutation can reach the store without a session.
#[derive(Clone)]
pub struct StoreContext {
    pub store: ListStoreClient,
    pub session: Session,
}

impl StoreContext {
    fn uid(&self) -> &str {
        &self.session.user.uid
    }
}

// ── State ─────────────────────────────────────────────────────────

/// Personal list screen state.
pub struct MyList {
    pub entries: Vec<ListEntry>,
    error: Option<String>,
    loaded: bool,
    selected: Option<String>,
    episode_input: String,
    notes_input: String,
}

// ── Messages ──────────────────────────────────────────────────────

/// Messages handled by the My List screen.
#[derive(Debug, Clone)]
pub enum Message {
    /// A push from the list subscription, or the result of a one-shot
    /// reload after a write.
    ListChanged(Result<Vec<ListEntry>, String>),
    EntrySelected(String),
    CloseDetail,
    StatusChanged(String, WatchStatus),
    EpisodeChanged(String, u32),
    EpisodeInputChanged(String),
    EpisodeInputSubmitted,
    NotesInputChanged(String),
    NotesInputSubmitted,
    RequestDelete(String),
    ConfirmDelete(String),
    CancelModal,
    UpdateDone(Result<(), String>),
    DeleteDone(Result<(), String>),
}

// ── Implementation ────────────────────────────────────────────────

impl MyList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            loaded: false,
            selected: None,
            episode_input: String::new(),
            notes_input: String::new(),
        }
    }

    /// Drop all user-bound state. Called when the session ends or the
    /// user changes.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.error = None;
        self.loaded = false;
        self.selected = None;
        self.episode_input.clear();
        self.notes_input.clear();
    }

    /// One-shot reload of the list. Used on navigation and after writes
    /// so edits show up ahead of the next subscription push.
    pub fn refresh(&self, ctx: Option<&StoreContext>) -> Action {
        let Some(ctx) = ctx else {
            return Action::None;
        };
        let store = ctx.store.clone();
        let session = ctx.session.clone();
        let uid = ctx.uid().to_string();
        Action::RunTask(Task::perform(
            async move {
                store
                    .list(&session, &uid)
                    .await
                    .map_err(|e| e.to_string())
            },
            |r| app::Message::MyList(Message::ListChanged(r)),
        ))
    }

    fn selected_entry(&self) -> Option<&ListEntry> {
        let doc_id = self.selected.as_deref()?;
        self.entries.iter().find(|e| e.doc_id == doc_id)
    }

    /// Re-sync the edit buffers to the selected entry.
    fn sync_inputs(&mut self) {
        if let Some(entry) = self.selected_entry() {
            self.episode_input = entry.episodes_watched.to_string();
            self.notes_input = entry.notes.clone();
        }
    }

    /// Handle a message, returning an Action for the app router.
    ///
    /// `ctx` is `None` when no user is signed in; every mutation then
    /// fails the authentication guard without a store call.
    pub fn update(&mut self, msg: Message, ctx: Option<&StoreContext>) -> Action {
        match msg {
            Message::ListChanged(Ok(entries)) => {
                self.entries = entries;
                self.loaded = true;
                self.error = None;
                if self.selected_entry().is_none() {
                    self.selected = None;
                }
                self.sync_inputs();
                Action::None
            }
            Message::ListChanged(Err(e)) => {
                tracing::warn!("list subscription failed: {e}");
                self.error = Some(LIST_FAILED.into());
                self.entries.clear();
                self.selected = None;
                self.loaded = true;
                Action::None
            }
            Message::EntrySelected(doc_id) => {
                self.selected = Some(doc_id);
                self.sync_inputs();
                Action::None
            }
            Message::CloseDetail => {
                self.selected = None;
                Action::None
            }
            Message::StatusChanged(doc_id, status) => {
                self.spawn_update(ctx, doc_id, EntryUpdate::status(status))
            }
            Message::EpisodeChanged(doc_id, episodes) => {
                self.episode_input = episodes.to_string();
                self.spawn_update(ctx, doc_id, EntryUpdate::episodes(episodes))
            }
            Message::EpisodeInputChanged(value) => {
                self.episode_input = value;
                Action::None
            }
            Message::EpisodeInputSubmitted => {
                if let Some(doc_id) = self.selected.clone() {
                    let episodes = self.episode_input.parse::<u32>().unwrap_or(0);
                    self.episode_input = episodes.to_string();
                    return self.update(Message::EpisodeChanged(doc_id, episodes), ctx);
                }
                Action::None
            }
            Message::NotesInputChanged(value) => {
                self.notes_input = value;
                Action::None
            }
            Message::NotesInputSubmitted => {
                if let Some(doc_id) = self.selected.clone() {
                    let notes = self.notes_input.clone();
                    return self.spawn_update(ctx, doc_id, EntryUpdate::notes(notes));
                }
                Action::None
            }
            Message::RequestDelete(doc_id) => {
                let title = self
                    .entries
                    .iter()
                    .find(|e| e.doc_id == doc_id)
                    .map(|e| e.title.clone())
                    .unwrap_or_else(|| "this anime".into());
                Action::ShowModal(ModalKind::ConfirmDelete { doc_id, title })
            }
            Message::ConfirmDelete(doc_id) => {
                let Some(ctx) = ctx else {
                    return not_signed_in();
                };
                if self.selected.as_deref() == Some(doc_id.as_str()) {
                    self.selected = None;
                }
                let store = ctx.store.clone();
                let session = ctx.session.clone();
                Action::RunTask(Task::perform(
                    async move {
                        store
                            .delete(&session, &doc_id)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    |r| app::Message::MyList(Message::DeleteDone(r)),
                ))
            }
            Message::CancelModal => Action::DismissModal,
            Message::UpdateDone(Ok(())) => self.refresh(ctx),
            Message::UpdateDone(Err(e)) => {
                Action::ShowToast(format!("Failed to update anime: {e}"), ToastKind::Error)
            }
            Message::DeleteDone(Ok(())) => self.refresh(ctx),
            Message::DeleteDone(Err(e)) => {
                Action::ShowToast(format!("Failed to delete anime: {e}"), ToastKind::Error)
            }
        }
    }

    fn spawn_update(
        &self,
        ctx: Option<&StoreContext>,
        doc_id: String,
        update: EntryUpdate,
    ) -> Action {
        let Some(ctx) = ctx else {
            return not_signed_in();
        };
        let store = ctx.store.clone();
        let session = ctx.session.clone();
        Action::RunTask(Task::perform(
            async move {
                store
                    .update(&session, &doc_id, &update)
                    .await
                    .map_err(|e| e.to_string())
            },
            |r| app::Message::MyList(Message::UpdateDone(r)),
        ))
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, covers: &'a CoverCache) -> Element<'a, Message> {
        let header = container(
            text("My Anime List")
                .size(style::TEXT_XL)
                .font(style::FONT_HEADING)
                .line_height(style::LINE_HEIGHT_TIGHT),
        )
        .padding([style::SPACE_MD, style::SPACE_LG]);

        let body: Element<'_, Message> = if let Some(err) = &self.error {
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
        } else if !self.loaded {
            container(
                text("Loading...")
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_LOOSE),
            )
            .padding(style::SPACE_3XL)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into()
        } else if self.entries.is_empty() {
            center(
                column![
                    text("No anime in your list yet.")
                        .size(style::TEXT_LG)
                        .font(style::FONT_HEADING)
                        .color(cs.on_surface_variant)
                        .line_height(style::LINE_HEIGHT_TIGHT),
                    text("Add shows from the Search page.")
                        .size(style::TEXT_SM)
                        .color(cs.outline)
                        .line_height(style::LINE_HEIGHT_LOOSE),
                ]
                .spacing(style::SPACE_XS)
                .align_x(Alignment::Center),
            )
            .into()
        } else {
            let items: Vec<Element<'a, Message>> = self
                .entries
                .iter()
                .map(|entry| {
                    let selected = self.selected.as_deref() == Some(entry.doc_id.as_str());
                    widgets::list_row(
                        cs,
                        covers,
                        entry,
                        selected,
                        Message::EntrySelected(entry.doc_id.clone()),
                    )
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

        let content = column![header, rule::horizontal(1), body]
            .width(Length::Fill)
            .height(Length::Fill);

        if let Some(entry) = self.selected_entry() {
            let detail = self.detail_panel(cs, covers, entry);
            return row![
                container(content).width(Length::FillPortion(3)),
                rule::vertical(1),
                container(detail)
                    .width(Length::FillPortion(2))
                    .height(Length::Fill),
            ]
            .height(Length::Fill)
            .into();
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Edit panel for the selected entry: status, episodes, notes, delete.
    fn detail_panel<'a>(
        &'a self,
        cs: &'a ColorScheme,
        covers: &'a CoverCache,
        entry: &'a ListEntry,
    ) -> Element<'a, Message> {
        let doc_id = entry.doc_id.clone();

        let close_btn = button(
            lucide_icons::iced::icon_x()
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant),
        )
        .on_press(Message::CloseDetail)
        .padding(style::SPACE_XXS)
        .style(theme::icon_button(cs));

        let cover = widgets::rounded_cover(
            cs,
            covers,
            &entry.catalog_id,
            style::COVER_WIDTH,
            style::COVER_HEIGHT,
        );

        let title = text(entry.title.as_str())
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT);

        let status_doc_id = doc_id.clone();
        let status_picker = pick_list(WatchStatus::ALL, Some(entry.status), move |status| {
            Message::StatusChanged(status_doc_id.clone(), status)
        })
        .text_size(style::INPUT_FONT_SIZE)
        .padding(style::INPUT_PADDING)
        .style(theme::pick_list_style(cs))
        .menu_style(theme::pick_list_menu_style(cs));

        let episode_control = self.episode_control(cs, entry);

        let notes_input = text_input("Add notes...", &self.notes_input)
            .on_input(Message::NotesInputChanged)
            .on_submit(Message::NotesInputSubmitted)
            .size(style::INPUT_FONT_SIZE)
            .padding(style::INPUT_PADDING)
            .width(Length::Fill)
            .style(theme::text_input_style(cs));

        let delete_btn = button(
            row![
                lucide_icons::iced::icon_trash().size(style::TEXT_SM),
                text("Delete").size(style::TEXT_SM),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .padding([style::SPACE_SM, style::SPACE_XL])
        .on_press(Message::RequestDelete(doc_id))
        .style(theme::danger_button(cs));

        let panel = column![
            row![
                iced::widget::Space::new().width(Length::Fill),
                close_btn,
            ],
            cover,
            title,
            labeled(cs, "Status", status_picker.into()),
            labeled(cs, "Episodes watched", episode_control),
            labeled(cs, "Notes", notes_input.into()),
            delete_btn,
        ]
        .spacing(style::SPACE_LG)
        .padding(style::SPACE_LG);

        widgets::styled_scrollable(panel).height(Length::Fill).into()
    }

    /// Episode counter: a committed-on-Enter input trailed by -/+
    /// buttons. The decrement disables at zero.
    fn episode_control<'a>(
        &'a self,
        cs: &ColorScheme,
        entry: &'a ListEntry,
    ) -> Element<'a, Message> {
        let doc_id = &entry.doc_id;
        let btn_size = style::INPUT_HEIGHT;

        let count_input = text_input("0", &self.episode_input)
            .on_input(Message::EpisodeInputChanged)
            .on_submit(Message::EpisodeInputSubmitted)
            .size(style::INPUT_FONT_SIZE)
            .padding(style::INPUT_PADDING)
            .width(Length::Fixed(style::INPUT_EPISODE_WIDTH))
            .style(theme::text_input_style(cs));

        let step_button = |icon: iced::widget::Text<'static>, msg: Option<Message>| {
            button(container(icon.size(style::TEXT_SM)).center(Length::Fill))
                .width(Length::Fixed(btn_size))
                .height(Length::Fixed(btn_size))
                .padding(0)
                .on_press_maybe(msg)
                .style(theme::stepper_button(cs))
        };

        let decrement = (entry.episodes_watched > 0)
            .then(|| Message::EpisodeChanged(doc_id.clone(), entry.episodes_watched - 1));
        let increment = Message::EpisodeChanged(doc_id.clone(), entry.episodes_watched + 1);

        row![
            count_input,
            step_button(lucide_icons::iced::icon_minus(), decrement),
            step_button(lucide_icons::iced::icon_plus(), Some(increment)),
        ]
        .spacing(style::SPACE_XS)
        .align_y(Alignment::Center)
        .into()
    }
}

/// Field label stacked over its control.
fn labeled<'a>(
    cs: &ColorScheme,
    label: &'a str,
    control: Element<'a, Message>,
) -> Element<'a, Message> {
    column![
        text(label)
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE),
        control,
    ]
    .spacing(style::SPACE_XS)
    .into()
}

fn not_signed_in() -> Action {
    Action::ShowToast("Not signed in.".into(), ToastKind::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(doc_id: &str, title: &str) -> ListEntry {
        ListEntry {
            doc_id: doc_id.into(),
            user_id: "user-1".into(),
            catalog_id: "20".into(),
            title: title.into(),
            image_url: String::new(),
            status: WatchStatus::NotWatched,
            episodes_watched: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_signed_out_mutation_is_guarded() {
        let mut list = MyList::new();
        list.update(Message::ListChanged(Ok(vec![entry("d1", "Naruto")])), None);

        // No session context: every mutation fails the guard and never
        // produces a store task.
        let action = list.update(
            Message::StatusChanged("d1".into(), WatchStatus::Completed),
            None,
        );
        assert!(matches!(action, Action::ShowToast(_, ToastKind::Error)));

        let action = list.update(Message::EpisodeChanged("d1".into(), 3), None);
        assert!(matches!(action, Action::ShowToast(_, ToastKind::Error)));

        let action = list.update(Message::ConfirmDelete("d1".into()), None);
        assert!(matches!(action, Action::ShowToast(_, ToastKind::Error)));
    }

    #[test]
    fn test_subscription_error_replaces_data() {
        let mut list = MyList::new();
        list.update(Message::ListChanged(Ok(vec![entry("d1", "Naruto")])), None);
        assert_eq!(list.entries.len(), 1);

        list.update(Message::ListChanged(Err("listener failed".into())), None);
        assert!(list.entries.is_empty());
        assert_eq!(list.error.as_deref(), Some(LIST_FAILED));
    }

    #[test]
    fn test_selection_follows_deliveries() {
        let mut list = MyList::new();
        list.update(
            Message::ListChanged(Ok(vec![entry("d1", "Naruto"), entry("d2", "Bleach")])),
            None,
        );
        list.update(Message::EntrySelected("d2".into()), None);
        assert_eq!(list.selected.as_deref(), Some("d2"));

        // The selected entry disappeared from a later push.
        list.update(Message::ListChanged(Ok(vec![entry("d1", "Naruto")])), None);
        assert!(list.selected.is_none());
    }

    #[test]
    fn test_episode_submit_normalizes_garbage() {
        let mut list = MyList::new();
        list.update(Message::ListChanged(Ok(vec![entry("d1", "Naruto")])), None);
        list.update(Message::EntrySelected("d1".into()), None);

        list.update(Message::EpisodeInputChanged("abc".into()), None);
        // Guarded (no ctx), but the buffer is still normalized.
        list.update(Message::EpisodeInputSubmitted, None);
        assert_eq!(list.episode_input, "0");
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let mut list = MyList::new();
        list.update(Message::ListChanged(Ok(vec![entry("d1", "Naruto")])), None);

        let action = list.update(Message::RequestDelete("d1".into()), None);
        assert!(matches!(
            action,
            Action::ShowModal(ModalKind::ConfirmDelete { ref doc_id, ref title })
                if doc_id == "d1" && title == "Naruto"
        ));

        assert!(matches!(
            list.update(Message::CancelModal, None),
            Action::DismissModal
        ));
    }
}
