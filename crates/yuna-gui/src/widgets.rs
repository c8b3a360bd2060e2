pub mod anime_card;
pub mod modal;
pub mod rounded_cover;

pub use anime_card::{list_row, search_row};
pub use modal::modal;
pub use rounded_cover::rounded_cover;

use iced::widget::scrollable;
use iced::Element;

/// A scrollable with consistent direction across the application.
pub fn styled_scrollable<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content).direction(scrollable::Direction::Vertical(
        scrollable::Scrollbar::new().width(6).scroller_width(4).margin(2),
    ))
}
