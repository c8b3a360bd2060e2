mod app;
mod cover_cache;
mod prefs;
mod screen;
mod style;
mod theme;
mod toast;
mod widgets;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter("yuna=debug")
        .init();

    let prefs = prefs::Prefs::load();

    let mut win = iced::window::Settings {
        size: prefs.window_size(),
        ..Default::default()
    };

    if let Some(pos) = prefs.window_position() {
        win.position = iced::window::Position::Specific(pos);
    } else {
        win.position = iced::window::Position::Centered;
    }

    iced::application(app::Yuna::new, app::Yuna::update, app::Yuna::view)
        .title(app::Yuna::title)
        .subscription(app::Yuna::subscription)
        .theme(app::Yuna::theme)
        .font(lucide_icons::LUCIDE_FONT_BYTES)
        .window(win)
        .run()
}
