mod infographic;
mod itinerary;
mod map;
mod wizard;

use std::ops::Range;

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use lichtrinh_core::catalog::LOADING_MESSAGES;
use lichtrinh_core::wizard::WizardStep;

use crate::app::{App, Screen, ToastKind, ViewMode};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::ALL).title("Lịch trình"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::Wizard(step) => wizard::draw(frame, app, step, *content_area),
        Screen::Loading => draw_loading(frame, app, *content_area),
        Screen::Itinerary => {
            if let Some(detail) = &app.detail {
                match detail.mode {
                    ViewMode::List => itinerary::draw(frame, detail, *content_area),
                    ViewMode::Map => map::draw(frame, detail, &app.map_token, *content_area),
                }
                if let Some(infographic) = &detail.infographic {
                    infographic::draw(frame, infographic, detail.modal_scroll, &app.exporter, area);
                }
            }
        }
        Screen::NotFound { .. } => draw_not_found(frame, *content_area),
    }

    draw_status(frame, app, *status_area);
}

fn header_text(app: &App) -> String {
    match app.screen {
        Screen::Wizard(step) => match step.number() {
            Some(number) => format!("Bước {number}/5"),
            None => "Lên lịch trình du lịch trong 1 phút ✨".to_owned(),
        },
        Screen::Loading => "Đang tạo lịch trình…".to_owned(),
        Screen::Itinerary => app.detail.as_ref().map_or_else(String::new, |detail| {
            format!("{} · {}", detail.itinerary().title, detail.view.stats_line())
        }),
        Screen::NotFound { .. } => "Không tìm thấy lịch trình".to_owned(),
    }
}

fn nav_hint(app: &App) -> &'static str {
    match app.screen {
        Screen::Wizard(WizardStep::Landing) => "Enter bắt đầu · q/Ctrl-C thoát",
        Screen::Wizard(WizardStep::Vibe) => {
            "↑/↓ di chuyển · Space chọn/bỏ · Enter tiếp · Esc quay lại · q thoát"
        }
        Screen::Wizard(WizardStep::Review) => {
            "↑/↓ di chuyển · e sửa · Enter tạo lịch trình · Esc quay lại · q thoát"
        }
        Screen::Wizard(_) => {
            "↑/↓ di chuyển · Space chọn · Enter chọn & tiếp · Esc quay lại · q thoát"
        }
        Screen::Loading => "q/Ctrl-C thoát",
        Screen::NotFound { .. } => "Enter về trang chủ · q thoát",
        Screen::Itinerary => {
            let modal_open = app
                .detail
                .as_ref()
                .is_some_and(|detail| detail.infographic.is_some());
            if modal_open {
                "↑/↓ cuộn · Enter/e tải ảnh · Esc đóng"
            } else {
                concat!(
                    "Tab/←/→ ngày · ↑/↓ chọn · Enter mẹo · m bản đồ · i ảnh · ",
                    "s chia sẻ · b lưu · +/- đánh giá · n tạo mới · q thoát"
                )
            }
        }
    }
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hint = nav_hint(app);

    let (text, style) = match app.toasts.last() {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Success => Color::Green,
                ToastKind::Info => Color::Cyan,
                ToastKind::Error => Color::Red,
            };
            let mut lines = vec![Line::from(toast.title.as_str()).bold()];
            if let Some(description) = &toast.description {
                lines.push(Line::from(description.as_str()));
            }
            (lines, Style::default().fg(color))
        }
        None => (vec![Line::from(hint)], Style::default()),
    };

    let status = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(hint_title(app, hint)),
        )
        .style(style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

// The hint moves into the border title while a toast occupies the body.
fn hint_title<'hint>(app: &App, hint: &'hint str) -> &'hint str {
    if app.toasts.is_empty() { "Trạng thái" } else { hint }
}

fn draw_loading(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let message = app
        .rotator
        .as_ref()
        .map_or_else(
            || LOADING_MESSAGES.first().copied().unwrap_or_default(),
            |rotator| rotator.message(),
        );

    let text = vec![
        Line::from(""),
        Line::from("✈️  Đang lên lịch trình cho bạn")
            .bold()
            .centered(),
        Line::from(""),
        Line::from(message).centered().fg(Color::Green),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_not_found(frame: &mut Frame<'_>, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("😢").centered(),
        Line::from("Không tìm thấy lịch trình").bold().centered(),
        Line::from("Bạn đang được chuyển hướng về trang chủ...")
            .centered(),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// `#rrggbb` to a terminal color; gray when malformed.
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |range: Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(red), Some(green), Some(blue)) if digits.len() == 6 => Color::Rgb(red, green, blue),
        _ => Color::Gray,
    }
}

/// Centered rectangle covering the given share of `area`.
fn centered(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .split(area);
    let Some(row) = vertical.first() else {
        return area;
    };
    let horizontal = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .split(*row);
    horizontal.first().copied().unwrap_or(area)
}

fn clear(frame: &mut Frame<'_>, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use lichtrinh_core::wizard::TripDefaults;

    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(hex_color("#3b82f6"), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(hex_color("nope"), Color::Gray);
        assert_eq!(hex_color("#12345"), Color::Gray);
    }

    #[test]
    fn landing_renders() {
        let app = App::new(TripDefaults::default(), String::new());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Lịch trình"), "header missing");
    }
}
