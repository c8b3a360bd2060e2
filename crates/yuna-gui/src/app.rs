use std::time::Duration;

use iced::widget::{button, center, column, container, row, stack, text};
use iced::window;
use iced::{Alignment, Element, Length, Subscription, Task, Theme};

use yuna_api::catalog::CatalogClient;
use yuna_api::identity::IdentityClient;
use yuna_api::store::ListStoreClient;
use yuna_core::config::ServiceConfig;
use yuna_core::models::{CatalogEntry, ListEntryDraft};
use yuna_core::session::{AuthState, Session};

use crate::cover_cache::{self, CoverCache, CoverState};
use crate::prefs::{Prefs, WindowGeom};
use crate::screen::{my_list, search, sign_in, Action, ModalKind, Page};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::toast::{self, Toast, ToastKind};
use crate::widgets;

/// Application state — slim router that delegates to screens.
pub struct Yuna {
    page: Page,
    // Service adapters
    identity: IdentityClient,
    catalog: CatalogClient,
    store: ListStoreClient,
    // Session
    session: Option<Session>,
    session_loading: bool,
    list_watch: Option<iced::task::Handle>,
    // Screens
    sign_in: sign_in::SignIn,
    search: search::Search,
    my_list: my_list::MyList,
    // App-level chrome
    cs: ColorScheme,
    cover_cache: CoverCache,
    toasts: Vec<Toast>,
    next_toast_id: u64,
    modal_state: Option<ModalKind>,
    status_message: String,
    prefs: Prefs,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(Page),
    SessionChanged(AuthState),
    SignOutPressed,
    CoverLoaded {
        catalog_id: String,
        result: Result<std::path::PathBuf, String>,
    },
    ToastDismissed(u64),
    WindowEvent(window::Event),
    SignIn(sign_in::Message),
    Search(search::Message),
    MyList(my_list::Message),
}

impl Yuna {
    pub fn new() -> (Self, Task<Message>) {
        let config = ServiceConfig::from_env();
        let identity = IdentityClient::new(&config);
        let store = ListStoreClient::new(&config);
        let catalog = CatalogClient::new();
        let prefs = Prefs::load();

        let app = Self {
            page: Page::default(),
            identity,
            catalog,
            store,
            session: None,
            session_loading: true,
            list_watch: None,
            sign_in: sign_in::SignIn::new(prefs.last_email.clone()),
            search: search::Search::new(),
            my_list: my_list::MyList::new(),
            cs: theme::scheme(theme::detect_mode()),
            cover_cache: CoverCache::default(),
            toasts: Vec::new(),
            next_toast_id: 0,
            modal_state: None,
            status_message: "Ready".into(),
            prefs,
        };

        // Long-lived session subscription; lives for the whole app.
        let session_task = Task::run(app.identity.watch(), Message::SessionChanged);
        (app, session_task)
    }

    pub fn title(&self) -> String {
        String::from("Yuna")
    }

    pub fn theme(&self) -> Theme {
        theme::build_theme(&self.cs)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::events().map(|(_id, event)| Message::WindowEvent(event))
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NavigateTo(page) => {
                self.page = page;
                if page == Page::MyList {
                    let ctx = self.store_context();
                    let action = self.my_list.refresh(ctx.as_ref());
                    return self.handle_action(action);
                }
                Task::none()
            }
            Message::SessionChanged(state) => {
                self.session_loading = false;
                match state {
                    AuthState::SignedIn(session) => self.start_session(session),
                    AuthState::SignedOut => {
                        self.end_session();
                        Task::none()
                    }
                }
            }
            Message::SignOutPressed => {
                // Synchronous local clear; the session watcher delivers
                // the transition back to us.
                self.identity.sign_out();
                Task::none()
            }
            Message::CoverLoaded { catalog_id, result } => {
                let state = match result {
                    Ok(path) => CoverState::Loaded(path),
                    Err(_) => CoverState::Failed,
                };
                self.cover_cache.states.insert(catalog_id, state);
                Task::none()
            }
            Message::ToastDismissed(id) => {
                self.toasts.retain(|t| t.id != id);
                Task::none()
            }
            Message::WindowEvent(event) => {
                match event {
                    window::Event::Resized(size) => {
                        let geom = self.prefs.window.get_or_insert_with(WindowGeom::default);
                        geom.width = size.width;
                        geom.height = size.height;
                        self.prefs.save();
                    }
                    window::Event::Moved(pos) => {
                        let geom = self.prefs.window.get_or_insert_with(WindowGeom::default);
                        geom.x = pos.x;
                        geom.y = pos.y;
                        self.prefs.save();
                    }
                    _ => {}
                }
                Task::none()
            }
            Message::SignIn(msg) => {
                let action = self.sign_in.update(msg, &self.identity);
                self.handle_action(action)
            }
            Message::Search(msg) => match &msg {
                search::Message::DebounceElapsed(seq) => {
                    let seq = *seq;
                    let action = self.search.update(msg);
                    let task = self.handle_action(action);
                    if self.search.awaiting(seq) {
                        return Task::batch([task, self.spawn_catalog_search(seq)]);
                    }
                    task
                }
                search::Message::AddToList(idx) => {
                    let idx = *idx;
                    let Some(entry) = self.search.results().get(idx).cloned() else {
                        return Task::none();
                    };
                    // Authentication guard: no session, no store call.
                    let Some(session) = self.session.clone() else {
                        return self.handle_action(Action::ShowToast(
                            "Please sign in to add anime to your list".into(),
                            ToastKind::Error,
                        ));
                    };
                    self.spawn_add_to_list(session, entry)
                }
                search::Message::ResultsLoaded(..) => {
                    let action = self.search.update(msg);
                    let task = self.handle_action(action);
                    let covers: Vec<(String, Option<String>)> = self
                        .search
                        .results()
                        .iter()
                        .map(|r| (r.id.clone(), r.image_url.clone()))
                        .collect();
                    let cover_task = self.batch_request_covers(covers);
                    Task::batch([task, cover_task])
                }
                _ => {
                    let action = self.search.update(msg);
                    self.handle_action(action)
                }
            },
            Message::MyList(msg) => {
                // The dialog's Confirm button lives at the app level;
                // dismiss the modal before the screen fires the delete.
                if matches!(&msg, my_list::Message::ConfirmDelete(_)) {
                    self.modal_state = None;
                }
                let refresh_covers = matches!(&msg, my_list::Message::ListChanged(Ok(_)));

                let ctx = self.store_context();
                let action = self.my_list.update(msg, ctx.as_ref());
                let task = self.handle_action(action);

                if refresh_covers {
                    let covers: Vec<(String, Option<String>)> = self
                        .my_list
                        .entries
                        .iter()
                        .map(|e| {
                            let url =
                                (!e.image_url.is_empty()).then(|| e.image_url.clone());
                            (e.catalog_id.clone(), url)
                        })
                        .collect();
                    let cover_task = self.batch_request_covers(covers);
                    return Task::batch([task, cover_task]);
                }
                task
            }
        }
    }

    // ── Session plumbing ──────────────────────────────────────────

    /// Adopt a new session: remember it and register the list listener.
    fn start_session(&mut self, session: Session) -> Task<Message> {
        self.status_message = format!("Signed in as {}", session.user.display_name());
        if let Some(email) = &session.user.email {
            if self.prefs.last_email.as_deref() != Some(email.as_str()) {
                self.prefs.last_email = Some(email.clone());
                self.prefs.save();
            }
        }
        // A listener bound to a previous identity must not outlive it.
        if let Some(handle) = self.list_watch.take() {
            handle.abort();
        }
        self.my_list.clear();
        self.session = Some(session.clone());

        let stream = self.store.watch(&session, &session.user.uid);
        let (task, handle) = Task::run(stream, |result| {
            Message::MyList(my_list::Message::ListChanged(
                result.map_err(|e| e.to_string()),
            ))
        })
        .abortable();
        self.list_watch = Some(handle);
        task
    }

    /// Tear down the current session and its listener.
    fn end_session(&mut self) {
        self.session = None;
        if let Some(handle) = self.list_watch.take() {
            handle.abort();
        }
        self.my_list.clear();
        self.modal_state = None;
        self.page = Page::Search;
        self.status_message = "Signed out".into();
    }

    fn store_context(&self) -> Option<my_list::StoreContext> {
        self.session.clone().map(|session| my_list::StoreContext {
            store: self.store.clone(),
            session,
        })
    }

    // ── Async spawns ──────────────────────────────────────────────

    /// Issue the catalog query for debounce generation `seq`.
    fn spawn_catalog_search(&self, seq: u64) -> Task<Message> {
        let catalog = self.catalog.clone();
        let query = self.search.query().to_string();
        Task::perform(
            async move { catalog.search(&query).await.map_err(|e| e.to_string()) },
            move |result| Message::Search(search::Message::ResultsLoaded(seq, result)),
        )
    }

    /// Create a list entry for a catalog result under the given session.
    fn spawn_add_to_list(&self, session: Session, entry: CatalogEntry) -> Task<Message> {
        let store = self.store.clone();
        Task::perform(
            async move {
                let draft = ListEntryDraft::from_catalog(&session.user.uid, &entry);
                store
                    .add(&session, &draft)
                    .await
                    .map(|_doc_id| entry.title.clone())
                    .map_err(|e| e.to_string())
            },
            |result| Message::Search(search::Message::AddedToList(result)),
        )
    }

    // ── Action interpretation ─────────────────────────────────────

    /// Interpret an Action returned by a screen.
    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::RunTask(task) => task,
            Action::ShowToast(message, kind) => self.push_toast(message, kind),
            Action::ShowModal(kind) => {
                self.modal_state = Some(kind);
                Task::none()
            }
            Action::DismissModal => {
                self.modal_state = None;
                Task::none()
            }
            Action::SetStatus(message) => {
                self.status_message = message;
                Task::none()
            }
        }
    }

    fn push_toast(&mut self, message: String, kind: ToastKind) -> Task<Message> {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast { id, message, kind });
        Task::perform(
            async { tokio::time::sleep(Duration::from_secs(toast::AUTO_DISMISS_SECS)).await },
            move |_| Message::ToastDismissed(id),
        )
    }

    // ── Covers ────────────────────────────────────────────────────

    /// Batch-request cover downloads for (catalog_id, cover_url) pairs.
    fn batch_request_covers(&mut self, items: Vec<(String, Option<String>)>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = items
            .into_iter()
            .map(|(id, url)| self.request_cover(&id, url.as_deref()))
            .collect();
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    /// Request a cover image download if not already requested.
    fn request_cover(&mut self, catalog_id: &str, cover_url: Option<&str>) -> Task<Message> {
        let Some(url) = cover_url else {
            // No cover URL available — mark as failed so the placeholder renders.
            self.cover_cache
                .states
                .entry(catalog_id.to_string())
                .or_insert(CoverState::Failed);
            return Task::none();
        };
        if self.cover_cache.states.contains_key(catalog_id) {
            return Task::none();
        }
        // Check disk cache first.
        let path = cover_cache::cover_path(catalog_id);
        if path.exists() {
            self.cover_cache
                .states
                .insert(catalog_id.to_string(), CoverState::Loaded(path));
            return Task::none();
        }
        self.cover_cache
            .states
            .insert(catalog_id.to_string(), CoverState::Loading);

        let url = url.to_string();
        let key = catalog_id.to_string();
        let reply_key = key.clone();
        Task::perform(
            async move { cover_cache::fetch_cover(key, url).await },
            move |result| Message::CoverLoaded {
                catalog_id: reply_key.clone(),
                result,
            },
        )
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view(&self) -> Element<'_, Message> {
        let cs = &self.cs;

        if self.session_loading {
            return center(
                text("Loading...")
                    .size(style::TEXT_XL)
                    .font(style::FONT_HEADING)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_TIGHT),
            )
            .into();
        }

        let Some(session) = self.session.clone() else {
            let base = self.sign_in.view(cs).map(Message::SignIn);
            let toasts = toast::toast_overlay(cs, &self.toasts, Message::ToastDismissed);
            return stack![base, toasts].into();
        };

        let page_content: Element<'_, Message> = match self.page {
            Page::Search => self.search.view(cs, &self.cover_cache).map(Message::Search),
            Page::MyList => self.my_list.view(cs, &self.cover_cache).map(Message::MyList),
        };

        let status_bar = container(
            text(&self.status_message)
                .size(style::TEXT_XS)
                .line_height(style::LINE_HEIGHT_LOOSE),
        )
        .style(theme::status_bar(cs))
        .width(Length::Fill)
        .height(Length::Fixed(style::STATUS_BAR_HEIGHT))
        .padding([4.0, style::SPACE_MD]);

        let main: Element<'_, Message> = column![
            self.header_bar(cs, &session),
            row![self.nav_rail(cs), page_content].height(Length::Fill),
            status_bar,
        ]
        .into();

        let main: Element<'_, Message> = if let Some(kind) = &self.modal_state {
            let content = self.build_modal_content(cs, kind);
            widgets::modal(
                main,
                content,
                Message::MyList(my_list::Message::CancelModal),
            )
        } else {
            main
        };

        let toasts = toast::toast_overlay(cs, &self.toasts, Message::ToastDismissed);
        stack![main, toasts].into()
    }

    /// Title plus auth status: who is signed in, and the way out.
    fn header_bar<'a>(&self, cs: &ColorScheme, session: &Session) -> Element<'a, Message> {
        let sign_out = button(text("Sign Out").size(style::TEXT_SM))
            .padding([style::SPACE_XS, style::SPACE_MD])
            .on_press(Message::SignOutPressed)
            .style(theme::ghost_button(cs));

        container(
            row![
                text("Yuna")
                    .size(style::TEXT_LG)
                    .font(style::FONT_HEADING)
                    .line_height(style::LINE_HEIGHT_TIGHT),
                iced::widget::Space::new().width(Length::Fill),
                lucide_icons::iced::icon_user()
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant),
                text(session.user.display_name().to_string())
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_NORMAL),
                sign_out,
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::nav_rail_bg(cs))
        .width(Length::Fill)
        .padding([style::SPACE_SM, style::SPACE_LG])
        .into()
    }

    fn nav_rail<'a>(&'a self, cs: &ColorScheme) -> Element<'a, Message> {
        let nav_item = |icon: iced::widget::Text<'static>, label: &'static str, page: Page| {
            let active = self.page == page;
            button(
                column![
                    icon.size(style::NAV_ICON_SIZE).center(),
                    text(label)
                        .size(style::NAV_LABEL_SIZE)
                        .line_height(style::LINE_HEIGHT_LOOSE)
                        .center(),
                ]
                .align_x(Alignment::Center)
                .spacing(style::SPACE_XXS)
                .width(Length::Fill),
            )
            .width(Length::Fixed(64.0))
            .padding([style::SPACE_SM, style::SPACE_XS])
            .on_press(Message::NavigateTo(page))
            .style(theme::nav_rail_item(active, cs))
        };

        use lucide_icons::iced as icons;

        let rail = column![
            nav_item(icons::icon_search(), "Search", Page::Search),
            nav_item(icons::icon_library(), "My List", Page::MyList),
        ]
        .spacing(style::SPACE_XS)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        container(rail)
            .style(theme::nav_rail_bg(cs))
            .width(Length::Fixed(style::NAV_RAIL_WIDTH))
            .height(Length::Fill)
            .padding(iced::Padding::new(0.0).top(style::SPACE_LG))
            .into()
    }

    fn build_modal_content<'a>(
        &self,
        cs: &ColorScheme,
        kind: &'a ModalKind,
    ) -> Element<'a, Message> {
        match kind {
            ModalKind::ConfirmDelete { doc_id, title } => {
                let confirm_msg =
                    Message::MyList(my_list::Message::ConfirmDelete(doc_id.clone()));
                let cancel_msg = Message::MyList(my_list::Message::CancelModal);

                container(
                    column![
                        text("Are you sure you want to delete this anime?")
                            .size(style::TEXT_LG)
                            .font(style::FONT_HEADING)
                            .line_height(style::LINE_HEIGHT_TIGHT),
                        text(title.as_str())
                            .size(style::TEXT_SM)
                            .color(cs.on_surface_variant)
                            .line_height(style::LINE_HEIGHT_LOOSE),
                        row![
                            button(text("Cancel").size(style::TEXT_SM))
                                .padding([style::SPACE_SM, style::SPACE_XL])
                                .on_press(cancel_msg)
                                .style(theme::ghost_button(cs)),
                            button(text("Delete").size(style::TEXT_SM))
                                .padding([style::SPACE_SM, style::SPACE_XL])
                                .on_press(confirm_msg)
                                .style(theme::danger_button(cs)),
                        ]
                        .spacing(style::SPACE_SM),
                    ]
                    .spacing(style::SPACE_LG),
                )
                .style(theme::dialog_container(cs))
                .padding(style::SPACE_2XL)
                .into()
            }
        }
    }
}
