use iced::widget::{container, image};
use iced::{ContentFit, Element, Length};

use crate::cover_cache::{CoverCache, CoverState};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Cover image at a fixed size, falling back to a placeholder while the
/// download is pending or after it failed.
pub fn rounded_cover<'a, Message: 'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    catalog_id: &str,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    if let Some(CoverState::Loaded(path)) = covers.get(catalog_id) {
        return image(image::Handle::from_path(path))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into();
    }

    container(
        lucide_icons::iced::icon_image()
            .size(style::TEXT_LG)
            .color(cs.outline),
    )
    .width(Length::Fixed(width))
    .height(Length::Fixed(height))
    .center_x(Length::Fixed(width))
    .center_y(Length::Fixed(height))
    .style(theme::cover_placeholder(cs))
    .into()
}
