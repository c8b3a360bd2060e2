use iced::widget::{button, center, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Task};

use yuna_api::identity::{AuthError, IdentityClient};

use crate::app;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};

/// Minimum password length enforced before any service call.
const MIN_PASSWORD_LEN: usize = 6;

// ── State ─────────────────────────────────────────────────────────

/// Sign-in screen state. Shown whenever no session is active.
pub struct SignIn {
    email: String,
    password: String,
    error: Option<String>,
    busy: bool,
}

// ── Messages ──────────────────────────────────────────────────────

/// Messages handled by the sign-in screen.
#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    SubmitSignIn,
    SubmitRegister,
    ContinueAsGuest,
    AuthFinished(Result<(), String>),
}

// ── Implementation ────────────────────────────────────────────────

impl SignIn {
    /// `last_email` prefills the email field with the address last used
    /// on this machine.
    pub fn new(last_email: Option<String>) -> Self {
        Self {
            email: last_email.unwrap_or_default(),
            password: String::new(),
            error: None,
            busy: false,
        }
    }

    /// Handle a message, returning an Action for the app router.
    ///
    /// Successful sign-ins are not reported here: the identity client
    /// broadcasts the new session and the app reacts to that.
    pub fn update(&mut self, msg: Message, identity: &IdentityClient) -> Action {
        match msg {
            Message::EmailChanged(email) => {
                self.email = email;
                Action::None
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                Action::None
            }
            Message::SubmitSignIn => {
                if let Some(error) = self.validate() {
                    self.error = Some(error);
                    return Action::None;
                }
                self.begin();
                let identity = identity.clone();
                let email = self.email.trim().to_string();
                let password = self.password.clone();
                Action::RunTask(Task::perform(
                    async move {
                        identity
                            .sign_in(&email, &password)
                            .await
                            .map(|_| ())
                            .map_err(auth_error_text)
                    },
                    |r| app::Message::SignIn(Message::AuthFinished(r)),
                ))
            }
            Message::SubmitRegister => {
                if let Some(error) = self.validate() {
                    self.error = Some(error);
                    return Action::None;
                }
                self.begin();
                let identity = identity.clone();
                let email = self.email.trim().to_string();
                let password = self.password.clone();
                Action::RunTask(Task::perform(
                    async move {
                        identity
                            .create_account(&email, &password)
                            .await
                            .map(|_| ())
                            .map_err(auth_error_text)
                    },
                    |r| app::Message::SignIn(Message::AuthFinished(r)),
                ))
            }
            Message::ContinueAsGuest => {
                self.begin();
                let identity = identity.clone();
                Action::RunTask(Task::perform(
                    async move {
                        identity
                            .sign_in_anonymously()
                            .await
                            .map(|_| ())
                            .map_err(auth_error_text)
                    },
                    |r| app::Message::SignIn(Message::AuthFinished(r)),
                ))
            }
            Message::AuthFinished(result) => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        self.password.clear();
                        self.error = None;
                    }
                    Err(e) => {
                        self.error = Some(e);
                    }
                }
                Action::None
            }
        }
    }

    /// Form-level validation. Returns an error to display, or `None`
    /// when the credentials are worth sending.
    fn validate(&self) -> Option<String> {
        if self.email.trim().is_empty() {
            return Some("Enter your email address.".into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Some(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            ));
        }
        None
    }

    fn begin(&mut self) {
        self.busy = true;
        self.error = None;
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let heading = text("Sign in to your anime list")
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT);

        let sub = text("Use your account, create one, or continue as a guest")
            .size(style::TEXT_SM)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE);

        let email_input = text_input("Email", &self.email)
            .on_input(Message::EmailChanged)
            .size(style::INPUT_FONT_SIZE)
            .padding(style::INPUT_PADDING)
            .style(theme::text_input_style(cs));

        let password_input = text_input("Password", &self.password)
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SubmitSignIn)
            .size(style::INPUT_FONT_SIZE)
            .padding(style::INPUT_PADDING)
            .style(theme::text_input_style(cs));

        let mut form = column![heading, sub, email_input, password_input]
            .spacing(style::SPACE_MD)
            .width(Length::Fixed(style::AUTH_FORM_WIDTH))
            .align_x(Alignment::Center);

        if let Some(error) = &self.error {
            form = form.push(
                text(error.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.error)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
        }

        let idle = !self.busy;
        let buttons = row![
            button(text("Sign In").size(style::TEXT_SM))
                .padding([style::SPACE_SM, style::SPACE_XL])
                .on_press_maybe(idle.then_some(Message::SubmitSignIn))
                .style(theme::primary_button(cs)),
            button(text("Create Account").size(style::TEXT_SM))
                .padding([style::SPACE_SM, style::SPACE_XL])
                .on_press_maybe(idle.then_some(Message::SubmitRegister))
                .style(theme::ghost_button(cs)),
        ]
        .spacing(style::SPACE_SM);

        form = form.push(buttons);
        form = form.push(
            button(text("Continue as guest").size(style::TEXT_SM))
                .padding([style::SPACE_SM, style::SPACE_XL])
                .on_press_maybe(idle.then_some(Message::ContinueAsGuest))
                .style(theme::ghost_button(cs)),
        );

        if self.busy {
            form = form.push(
                text("Signing in...")
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_LOOSE),
            );
        }

        center(container(form).padding(style::SPACE_2XL))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// User-facing text for an authentication error, keeping the service's
/// code visible.
fn auth_error_text(error: AuthError) -> String {
    match error {
        AuthError::Service(failure) => failure.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuna_core::config::ServiceConfig;

    fn identity() -> IdentityClient {
        IdentityClient::new(&ServiceConfig::default())
    }

    #[test]
    fn test_last_email_is_prefilled() {
        let screen = SignIn::new(Some("rin@example.com".into()));
        assert_eq!(screen.email, "rin@example.com");

        let screen = SignIn::new(None);
        assert!(screen.email.is_empty());
    }

    #[test]
    fn test_short_password_is_rejected_without_a_call() {
        let mut screen = SignIn::new(None);
        let identity = identity();
        screen.update(Message::EmailChanged("rin@example.com".into()), &identity);
        screen.update(Message::PasswordChanged("12345".into()), &identity);

        let action = screen.update(Message::SubmitSignIn, &identity);
        assert!(matches!(action, Action::None));
        assert!(screen
            .error
            .as_deref()
            .is_some_and(|e| e.contains("at least 6")));
        assert!(!screen.busy);
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let mut screen = SignIn::new(None);
        let identity = identity();
        screen.update(Message::PasswordChanged("secret-password".into()), &identity);

        let action = screen.update(Message::SubmitRegister, &identity);
        assert!(matches!(action, Action::None));
        assert!(screen.error.is_some());
    }

    #[test]
    fn test_valid_credentials_spawn_a_request() {
        let mut screen = SignIn::new(None);
        let identity = identity();
        screen.update(Message::EmailChanged("rin@example.com".into()), &identity);
        screen.update(Message::PasswordChanged("hunter22".into()), &identity);

        let action = screen.update(Message::SubmitSignIn, &identity);
        assert!(matches!(action, Action::RunTask(_)));
        assert!(screen.busy);
    }

    #[test]
    fn test_failure_is_shown_and_clears_busy() {
        let mut screen = SignIn::new(None);
        let identity = identity();
        screen.begin();

        screen.update(
            Message::AuthFinished(Err("EMAIL_NOT_FOUND: EMAIL_NOT_FOUND".into())),
            &identity,
        );
        assert!(!screen.busy);
        assert!(screen
            .error
            .as_deref()
            .is_some_and(|e| e.contains("EMAIL_NOT_FOUND")));
    }
}
