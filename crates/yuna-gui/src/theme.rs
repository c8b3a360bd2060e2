//! Semantic color tokens and style functions.
//!
//! One built-in scheme with dark and light variants; the variant is
//! resolved from the OS appearance at startup. Each style function
//! returns a closure for Iced's `.style()`, capturing the tokens it
//! needs from a `ColorScheme`.

use iced::widget::{button, container, pick_list, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use yuna_core::models::WatchStatus;

use crate::style;

/// Appearance variant, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dark,
    Light,
}

/// Resolve the appearance variant from the OS.
pub fn detect_mode() -> Mode {
    match dark_light::detect() {
        Ok(dark_light::Mode::Light) => Mode::Light,
        _ => Mode::Dark,
    }
}

/// Semantic color tokens for one appearance variant.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,
    pub primary: Color,
    pub primary_hover: Color,
    pub on_primary: Color,
    pub error: Color,
    pub error_hover: Color,
    pub on_error: Color,
    pub status_not_watched: Color,
    pub status_watching: Color,
    pub status_completed: Color,
    pub status_dropped: Color,
}

/// The color scheme for a resolved mode.
pub fn scheme(mode: Mode) -> ColorScheme {
    match mode {
        Mode::Dark => dark(),
        Mode::Light => light(),
    }
}

fn dark() -> ColorScheme {
    ColorScheme {
        surface: Color::from_rgb8(0x14, 0x12, 0x18),
        surface_container_low: Color::from_rgb8(0x1b, 0x19, 0x20),
        surface_container: Color::from_rgb8(0x21, 0x1f, 0x26),
        surface_container_high: Color::from_rgb8(0x2b, 0x29, 0x31),
        surface_bright: Color::from_rgb8(0x39, 0x36, 0x40),
        on_surface: Color::from_rgb8(0xe6, 0xe1, 0xe9),
        on_surface_variant: Color::from_rgb8(0xc9, 0xc4, 0xd0),
        outline: Color::from_rgb8(0x93, 0x8f, 0x99),
        outline_variant: Color::from_rgb8(0x48, 0x45, 0x51),
        primary: Color::from_rgb8(0xcf, 0xbd, 0xfe),
        primary_hover: Color::from_rgb8(0xdd, 0xd0, 0xff),
        on_primary: Color::from_rgb8(0x36, 0x26, 0x5f),
        error: Color::from_rgb8(0xf2, 0xb8, 0xb5),
        error_hover: Color::from_rgb8(0xf7, 0xcc, 0xca),
        on_error: Color::from_rgb8(0x60, 0x14, 0x10),
        status_not_watched: Color::from_rgb8(0x93, 0x8f, 0x99),
        status_watching: Color::from_rgb8(0x8e, 0xc9, 0xff),
        status_completed: Color::from_rgb8(0xa6, 0xd3, 0x9a),
        status_dropped: Color::from_rgb8(0xf2, 0xb8, 0xb5),
    }
}

fn light() -> ColorScheme {
    ColorScheme {
        surface: Color::from_rgb8(0xfd, 0xf8, 0xff),
        surface_container_low: Color::from_rgb8(0xf7, 0xf2, 0xfa),
        surface_container: Color::from_rgb8(0xf1, 0xec, 0xf4),
        surface_container_high: Color::from_rgb8(0xec, 0xe6, 0xee),
        surface_bright: Color::from_rgb8(0xe6, 0xe0, 0xe9),
        on_surface: Color::from_rgb8(0x1c, 0x1b, 0x20),
        on_surface_variant: Color::from_rgb8(0x49, 0x45, 0x4f),
        outline: Color::from_rgb8(0x7a, 0x75, 0x80),
        outline_variant: Color::from_rgb8(0xcb, 0xc4, 0xcf),
        primary: Color::from_rgb8(0x68, 0x54, 0x8e),
        primary_hover: Color::from_rgb8(0x7b, 0x68, 0xa2),
        on_primary: Color::from_rgb8(0xff, 0xff, 0xff),
        error: Color::from_rgb8(0xb3, 0x26, 0x1e),
        error_hover: Color::from_rgb8(0xc4, 0x3c, 0x34),
        on_error: Color::from_rgb8(0xff, 0xff, 0xff),
        status_not_watched: Color::from_rgb8(0x7a, 0x75, 0x80),
        status_watching: Color::from_rgb8(0x2c, 0x63, 0x8f),
        status_completed: Color::from_rgb8(0x3a, 0x6a, 0x2e),
        status_dropped: Color::from_rgb8(0xb3, 0x26, 0x1e),
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        "Yuna",
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.status_completed,
            warning: cs.status_watching,
            danger: cs.error,
        },
    )
}

/// Get the accent color for a watch status.
pub fn status_color(cs: &ColorScheme, status: WatchStatus) -> Color {
    match status {
        WatchStatus::NotWatched => cs.status_not_watched,
        WatchStatus::Watching => cs.status_watching,
        WatchStatus::Completed => cs.status_completed,
        WatchStatus::Dropped => cs.status_dropped,
    }
}

// ── Containers ──────────────────────────────────────────────────────

/// Toast card: elevated surface with the notification kind's accent as
/// its border.
pub fn toast_card(cs: &ColorScheme, accent: Color) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let text = cs.on_surface;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            color: accent,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        shadow: Shadow {
            color: Color {
                a: 0.2,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

/// Status bar container style.
pub fn status_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let text = cs.on_surface_variant;
    let bg = cs.surface_container_low;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Navigation rail background.
pub fn nav_rail_bg(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Search bar container.
pub fn search_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        ..Default::default()
    }
}

/// Status badge behind an entry's watch-status label.
pub fn status_badge(cs: &ColorScheme, accent: Color) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: accent,
            width: 1.0,
            radius: style::RADIUS_SM.into(),
        },
        ..Default::default()
    }
}

/// Cover art placeholder container.
pub fn cover_placeholder(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_SM.into(),
        },
        ..Default::default()
    }
}

/// Dialog container — elevated card for modals.
pub fn dialog_container(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color {
                a: 0.3,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

// ── Buttons ─────────────────────────────────────────────────────────

/// Navigation rail item — icon+label with pill indicator when active.
pub fn nav_rail_item(
    active: bool,
    cs: &ColorScheme,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let on_primary = cs.on_primary;
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (bg, text_color) = if active {
            (Some(Background::Color(primary)), on_primary)
        } else {
            match status {
                button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
                _ => (None, on_surface_variant),
            }
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_LG.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// List item button — card-like with selection highlight.
pub fn list_item(
    selected: bool,
    cs: &ColorScheme,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_container_high = cs.surface_container_high;
    let surface_container = cs.surface_container;
    let outline_variant = cs.outline_variant;
    let primary = cs.primary;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let (bg, border_color) = if selected {
            (Some(Background::Color(surface_container_high)), primary)
        } else {
            match status {
                button::Status::Hovered => {
                    (Some(Background::Color(surface_container)), outline_variant)
                }
                _ => (None, Color::TRANSPARENT),
            }
        };

        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                color: border_color,
                width: if selected { 1.0 } else { 0.0 },
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Primary action button (Sign In, Add, etc.).
pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let on_primary = cs.on_primary;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered | button::Status::Pressed => primary_hover,
            _ => primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_primary,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Danger action button (Delete confirmation).
pub fn danger_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let error = cs.error;
    let error_hover = cs.error_hover;
    let on_error = cs.on_error;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered | button::Status::Pressed => error_hover,
            _ => error,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_error,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Ghost / outlined button — transparent bg, border outline.
pub fn ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline_variant = cs.outline_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Borderless icon button (dismiss, clear, etc.).
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_SM.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Flanking button of the episode stepper.
pub fn stepper_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_container_high = cs.surface_container_high;
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => surface_bright,
            _ => surface_container_high,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_surface,
            border: Border {
                radius: style::RADIUS_SM.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

// ── Inputs ──────────────────────────────────────────────────────────

/// Standard bordered text input.
pub fn text_input_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container_low = cs.surface_container_low;
    let on_surface_variant = cs.on_surface_variant;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let border_color = match status {
            text_input::Status::Focused { .. } => primary,
            text_input::Status::Hovered => outline,
            _ => outline_variant,
        };
        text_input::Style {
            background: Background::Color(surface_container_low),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_SM.into(),
            },
            icon: on_surface_variant,
            placeholder: outline,
            value: on_surface,
            selection: primary,
        }
    }
}

/// Borderless input for the search bar (the bar itself carries the border).
pub fn text_input_borderless(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let on_surface_variant = cs.on_surface_variant;
    let on_surface = cs.on_surface;

    move |_theme, _status| text_input::Style {
        background: Background::Color(Color::TRANSPARENT),
        border: Border::default(),
        icon: on_surface_variant,
        placeholder: outline,
        value: on_surface,
        selection: primary,
    }
}

/// Status picker styling.
pub fn pick_list_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme, pick_list::Status) -> pick_list::Style {
    let surface_container_low = cs.surface_container_low;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let border_color = match status {
            pick_list::Status::Hovered => outline,
            _ => outline_variant,
        };
        pick_list::Style {
            text_color: on_surface,
            placeholder_color: outline,
            handle_color: on_surface_variant,
            background: Background::Color(surface_container_low),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_SM.into(),
            },
        }
    }
}

/// Status picker dropdown menu styling.
pub fn pick_list_menu_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme) -> iced::overlay::menu::Style {
    let surface_container = cs.surface_container;
    let outline_variant = cs.outline_variant;
    let on_surface = cs.on_surface;
    let primary = cs.primary;
    let on_primary = cs.on_primary;

    move |_theme| iced::overlay::menu::Style {
        background: Background::Color(surface_container),
        border: Border {
            color: outline_variant,
            width: 1.0,
            radius: style::RADIUS_SM.into(),
        },
        text_color: on_surface,
        selected_text_color: on_primary,
        selected_background: Background::Color(primary),
    }
}
