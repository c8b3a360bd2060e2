//! Modal overlay: content centered over a semi-transparent backdrop.
//!
//! Composed from `stack`/`opaque`/`mouse_area`; clicking the backdrop
//! publishes `on_blur` while the dialog itself stays interactive.

use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Background, Color, Element};

/// Backdrop color shared by both appearance variants.
const MODAL_BACKDROP: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.65,
};

/// Wrap `base` with a modal overlay showing `content` over a backdrop.
pub fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Background::Color(MODAL_BACKDROP)),
                ..Default::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
