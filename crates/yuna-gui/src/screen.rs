pub mod my_list;
pub mod search;
pub mod sign_in;

use iced::Task;

use crate::app;
use crate::toast::ToastKind;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Search,
    MyList,
}

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state — the app interprets them in one place.
#[allow(dead_code)]
pub enum Action {
    /// No side-effect.
    None,
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
    /// Show a toast notification.
    ShowToast(String, ToastKind),
    /// Show a modal dialog.
    ShowModal(ModalKind),
    /// Dismiss the current modal.
    DismissModal,
    /// Update the status bar message.
    SetStatus(String),
}

/// What kind of modal is currently shown.
#[derive(Debug, Clone)]
pub enum ModalKind {
    ConfirmDelete { doc_id: String, title: String },
}
