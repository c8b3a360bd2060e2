use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use yuna_core::models::{CatalogEntry, ListEntry};

use crate::cover_cache::CoverCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// A catalog search result row: cover thumbnail, title, and an Add button.
pub fn search_row<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    entry: &'a CatalogEntry,
    on_add: Message,
) -> Element<'a, Message> {
    let thumb = widgets::rounded_cover(
        cs,
        covers,
        &entry.id,
        style::THUMB_WIDTH,
        style::THUMB_HEIGHT,
    );

    let title = text(entry.title.as_str())
        .size(style::TEXT_BASE)
        .font(style::FONT_HEADING)
        .color(cs.on_surface)
        .line_height(style::LINE_HEIGHT_NORMAL)
        .width(Length::Fill);

    let add_btn = button(
        row![
            lucide_icons::iced::icon_plus().size(style::TEXT_SM),
            text("Add").size(style::TEXT_SM),
        ]
        .spacing(style::SPACE_XS)
        .align_y(Alignment::Center),
    )
    .padding([style::SPACE_XS, style::SPACE_MD])
    .on_press(on_add)
    .style(theme::primary_button(cs));

    container(
        row![thumb, title, add_btn]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
    )
    .padding([style::SPACE_XS, style::SPACE_MD])
    .width(Length::Fill)
    .into()
}

/// A personal-list row: cover, title, notes preview, status badge, and
/// episode count. Clicking selects the entry for editing.
pub fn list_row<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    entry: &'a ListEntry,
    selected: bool,
    on_select: Message,
) -> Element<'a, Message> {
    let thumb = widgets::rounded_cover(
        cs,
        covers,
        &entry.catalog_id,
        style::THUMB_WIDTH,
        style::THUMB_HEIGHT,
    );

    let status_col = theme::status_color(cs, entry.status);

    // Left status accent bar
    let accent = container(text("").size(1))
        .width(Length::Fixed(3.0))
        .height(Length::Fill)
        .style(theme::status_badge(cs, status_col));

    let mut info_col = column![text(entry.title.as_str())
        .size(style::TEXT_BASE)
        .font(style::FONT_HEADING)
        .line_height(style::LINE_HEIGHT_NORMAL)
        .wrapping(iced::widget::text::Wrapping::None)]
    .spacing(style::SPACE_XXS)
    .clip(true);

    if !entry.notes.is_empty() {
        info_col = info_col.push(
            text(entry.notes.as_str())
                .size(style::TEXT_XS)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE)
                .wrapping(iced::widget::text::Wrapping::None),
        );
    }

    let right_col = column![
        container(
            text(entry.status.as_str())
                .size(style::TEXT_XS)
                .color(status_col)
                .line_height(style::LINE_HEIGHT_NORMAL),
        )
        .style(theme::status_badge(cs, status_col))
        .padding([style::SPACE_XXS, style::SPACE_SM]),
        text(format!("Ep {}", entry.episodes_watched))
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE),
    ]
    .spacing(style::SPACE_XXS)
    .align_x(Alignment::End);

    let content = row![accent, thumb, info_col.width(Length::Fill), right_col]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center);

    button(content)
        .width(Length::Fill)
        .padding([style::SPACE_XS, style::SPACE_MD])
        .on_press(on_select)
        .style(theme::list_item(selected, cs))
        .into()
}
