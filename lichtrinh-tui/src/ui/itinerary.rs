use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use lichtrinh_core::catalog::{ACCENT, Tone};
use lichtrinh_core::format::{format_currency, format_distance, format_duration, format_rating};
use lichtrinh_core::model::Day;
use lichtrinh_core::timeline::{TimelineCard, timeline};
use lichtrinh_core::view::{DayFilter, day_summary};

use super::hex_color;
use crate::app::{Detail, FEEDBACK_OPTIONS, Feedback, ViewMode};

pub(super) fn draw(frame: &mut Frame<'_>, detail: &Detail, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [tabs_area, body_area] = chunks else {
        return;
    };
    draw_tabs(frame, detail, *tabs_area);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(*body_area);

    let body = body_chunks.as_ref();
    let [timeline_area, side_area] = body else {
        return;
    };

    draw_timeline(frame, detail, *timeline_area);
    draw_side_panel(frame, detail, *side_area);
}

/// Day tabs plus the list/map toggle, shared with the map view.
pub(super) fn draw_tabs(frame: &mut Frame<'_>, detail: &Detail, area: Rect) {
    let tabs = detail.tabs();
    let titles = tabs.iter().map(|tab| match tab {
        DayFilter::All => "Tất cả".to_owned(),
        DayFilter::Day(number) => format!("Ngày {number}"),
    });
    let selected = tabs.iter().position(|tab| *tab == detail.filter);
    let mode = match detail.mode {
        ViewMode::List => "📋 Lịch trình",
        ViewMode::Map => "🗺️ Bản đồ",
    };

    let widget = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(mode))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Green));
    frame.render_widget(widget, area);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Blue => Color::Blue,
        Tone::Orange => Color::LightRed,
        Tone::Amber => Color::Yellow,
        Tone::Red => Color::Red,
        Tone::Purple => Color::Magenta,
        Tone::Pink => Color::LightMagenta,
        Tone::Gray => Color::Gray,
    }
}

fn card_item(
    card: &TimelineCard<'_>,
    day: &Day,
    expanded: bool,
    show_day: bool,
) -> ListItem<'static> {
    let mut lines = Vec::new();

    if let Some(travel) = &card.travel {
        let parts: Vec<&str> = [travel.duration.as_deref(), travel.distance.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        lines.push(Line::from(format!("   ↓ 🚗 {}", parts.join(" · "))).fg(Color::DarkGray));
    }
    for warning in card.warnings {
        lines.push(Line::from(format!("   ⚠️ {warning}")).fg(Color::Yellow));
    }

    let mut title = Vec::new();
    if show_day {
        let day_label = format!("N{} ", day.day_number);
        title.push(Span::raw(day_label).fg(Color::DarkGray));
    }
    title.push(Span::raw(format!("{} ", card.time)).bold());
    let name = format!("{} {}", card.category.emoji, card.item.poi.name);
    title.push(Span::raw(name).bold());
    let label = format!("  {}", card.category.label);
    title.push(Span::raw(label).fg(tone_color(card.category.tone)));
    if card.must_try {
        title.push(Span::raw("  🔥 Must try").fg(hex_color(ACCENT)));
    }
    lines.push(Line::from(title));

    let details: Vec<String> = [card.duration.clone(), card.rating.clone()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        lines.push(Line::from(format!("      {}", details.join(" · "))));
    }
    if let Some(notes) = &card.notes {
        lines.push(Line::from(format!("      {notes}")).italic());
    }

    if card.has_tips() {
        if expanded {
            for tip in card.tips {
                lines.push(Line::from(format!("      💡 {tip}")).fg(Color::Green));
            }
        } else {
            lines.push(Line::from("      💡 Enter xem mẹo").fg(Color::DarkGray));
        }
    }

    ListItem::new(lines)
}

fn draw_timeline(frame: &mut Frame<'_>, detail: &Detail, area: Rect) {
    let show_day = detail.filter == DayFilter::All;
    let days = &detail.itinerary().days;

    let items: Vec<ListItem<'static>> = days
        .iter()
        .filter(|day| detail.filter.includes(day.day_number))
        .flat_map(|day| {
            timeline(day).into_iter().map(move |card| {
                let expanded = detail.is_expanded(day.day_number, card.item.order_index);
                card_item(&card, day, expanded, show_day)
            })
        })
        .collect();

    let title = match detail.filter {
        DayFilter::Day(number) => days
            .iter()
            .find(|day| day.day_number == number)
            .map_or_else(
                || format!("Ngày {number}"),
                |day| format!("Ngày {number} · {}", day.theme),
            ),
        DayFilter::All => "Toàn bộ lịch trình".to_owned(),
    };

    if items.is_empty() {
        let empty = Paragraph::new("Ngày này chưa có điểm đến nào.")
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("▌")
        .highlight_style(Style::default().bg(Color::Rgb(0x1f, 0x29, 0x37)));

    let mut state = ListState::default();
    state.select(Some(detail.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn summary_lines(detail: &Detail) -> Vec<Line<'static>> {
    let days: Vec<&Day> = detail
        .itinerary()
        .days
        .iter()
        .filter(|day| detail.filter.includes(day.day_number))
        .collect();

    let mut lines = Vec::new();
    for day in days {
        let summary = day_summary(day);
        lines.push(Line::from(format!("Tổng kết Ngày {}", day.day_number)).bold());
        lines.push(Line::from(format!(
            "  Tổng quãng đường   {}",
            format_distance(summary.distance_km)
        )));
        lines.push(Line::from(format!(
            "  Thời gian di chuyển {}",
            format_duration(summary.travel_minutes)
        )));
        lines.push(Line::from(format!("  Số điểm dừng       {} điểm", summary.stops)));
        lines.push(Line::from(format!(
            "  Chi phí dự kiến    {}/người",
            format_currency(summary.estimated_cost_vnd)
        )));
        if let Some(stay) = &day.accommodation {
            let rating = stay
                .google_rating
                .map(|rating| format!(" ⭐ {}", format_rating(rating)))
                .unwrap_or_default();
            lines.push(Line::from(format!("  🏨 {}{rating}", stay.name)).fg(Color::Magenta));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn feedback_lines(detail: &Detail) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Lịch trình xong rồi nè! 🎉").bold(),
        Line::from("s 📤 Gửi cho nhóm coi · b 💾 Lưu lại"),
        Line::from(""),
    ];

    match detail.feedback {
        None => {
            lines.push(Line::from("Lịch trình ổn không bạn?"));
            lines.push(Line::from("+ 👍 Ổn đó   - 👎 Chưa lắm"));
        }
        Some(Feedback::Good) => {
            lines.push(Line::from("Cảm ơn nha! Chúc đi vui 🎉").fg(Color::Green));
        }
        Some(Feedback::Choosing(cursor)) => {
            lines.push(Line::from("Chỗ nào chưa ổn nè?"));
            for (index, option) in FEEDBACK_OPTIONS.iter().enumerate() {
                let line = if index == cursor {
                    Line::from(format!("> {option}")).fg(Color::Yellow)
                } else {
                    Line::from(format!("  {option}"))
                };
                lines.push(line);
            }
        }
        Some(Feedback::Sent) => {
            lines.push(Line::from("Noted! Mình sẽ cải thiện 🙏").fg(Color::Green));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("n 🔄 Tạo lịch trình khác"));
    lines.push(Line::from("i 🖼️ Xuất ảnh lịch trình"));
    lines.push(
        Line::from("o 📱 Muốn dùng offline khi đi? Tải app (Coming soon)").fg(Color::DarkGray),
    );
    lines
}

fn draw_side_panel(frame: &mut Frame<'_>, detail: &Detail, area: Rect) {
    let mut lines = summary_lines(detail);
    lines.extend(feedback_lines(detail));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Tổng kết"))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}
