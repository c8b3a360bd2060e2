use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::{self, ColorScheme};

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn accent(self, cs: &ColorScheme) -> iced::Color {
        match self {
            Self::Success => cs.status_completed,
            Self::Error => cs.error,
            Self::Info => cs.primary,
        }
    }
}

/// A single toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Auto-dismiss delay in seconds.
pub const AUTO_DISMISS_SECS: u64 = 4;

const TOAST_WIDTH: f32 = 300.0;

/// Render the toast overlay: notifications stacked bottom-right, each a
/// card whose border carries the kind's accent color. Newest last, so
/// fresh toasts appear closest to the corner.
pub fn toast_overlay<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    toasts: &'a [Toast],
    on_dismiss: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message> {
    if toasts.is_empty() {
        return iced::widget::Space::new().width(0).height(0).into();
    }

    let cards = toasts.iter().map(|toast| {
        let dismiss = button(
            lucide_icons::iced::icon_x()
                .size(style::TEXT_XS)
                .color(cs.on_surface_variant),
        )
        .on_press(on_dismiss(toast.id))
        .padding(style::SPACE_XXS)
        .style(theme::icon_button(cs));

        container(
            row![
                text(toast.message.as_str())
                    .size(style::TEXT_SM)
                    .line_height(style::LINE_HEIGHT_NORMAL)
                    .width(Length::Fill),
                dismiss,
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::toast_card(cs, toast.kind.accent(cs)))
        .padding([style::SPACE_SM, style::SPACE_MD])
        .width(Length::Fixed(TOAST_WIDTH))
        .into()
    });

    container(
        column(cards)
            .spacing(style::SPACE_XS)
            .align_x(Alignment::End),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(iced::alignment::Horizontal::Right)
    .align_y(iced::alignment::Vertical::Bottom)
    .padding([style::STATUS_BAR_HEIGHT + style::SPACE_SM, style::SPACE_LG])
    .into()
}
