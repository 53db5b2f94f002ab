use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use lichtrinh_infographic::layout::{DaySchedule, Side};
use lichtrinh_infographic::{ExportState, Exporter, Infographic};

use super::{centered, clear, hex_color};

pub(super) fn draw(
    frame: &mut Frame<'_>,
    infographic: &Infographic,
    scroll: u16,
    exporter: &Exporter,
    area: Rect,
) {
    let modal = centered(area, 80, 85);
    clear(frame, modal);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(modal);

    let chunks = layout_chunks.as_ref();
    let [preview_area, button_area] = chunks else {
        return;
    };

    let preview = Paragraph::new(preview_lines(infographic))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🖼️ Ảnh lịch trình")
                .style(
                    Style::default()
                        .bg(Color::Rgb(0xf0, 0xfd, 0xf4))
                        .fg(Color::Black),
                ),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(preview, *preview_area);

    let (label, color) = match exporter.state() {
        ExportState::Idle => ("[ e ] 📥 Tải ảnh về máy".to_owned(), Color::Green),
        ExportState::Generating => ("⏳ Đang tạo ảnh...".to_owned(), Color::Yellow),
        ExportState::Failed(message) => (format!("❌ {message} · [ e ] thử lại"), Color::Red),
    };
    let button = Paragraph::new(Line::from(label).bold().centered())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, *button_area);
}

fn preview_lines(infographic: &Infographic) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(cover) = infographic.cover() {
        for title in &cover.title_lines {
            lines.push(Line::from(title.clone()).bold().centered());
        }
        lines.push(Line::from(format!("📍 {}", cover.destination)).centered());
        let counters = cover.counters;
        lines.push(
            Line::from(format!(
                "{} NGÀY   {} ĐIỂM ĐẾN   {} KM",
                counters.days, counters.pois, counters.distance_km
            ))
            .centered(),
        );
        lines.push(Line::from(""));
    }

    if let Some(route) = infographic.route() {
        lines.push(Line::from("LỘ TRÌNH").bold().centered());
        for stop in &route.stops {
            let text = format!(
                "Ngày {} · {} · {} điểm · {} km",
                stop.day_number, stop.theme, stop.stop_count, stop.distance_km
            );
            let line = match stop.side {
                Side::Left => Line::from(format!("● {text}")).left_aligned(),
                Side::Right => Line::from(format!("{text} ●")).right_aligned(),
            };
            lines.push(line);
        }
        lines.push(Line::from(""));
    }

    for day in infographic.day_schedules() {
        lines.extend(day_lines(day));
    }

    if let Some(footer) = infographic.footer() {
        lines.push(Line::from(footer.brand).italic().centered());
        lines.push(Line::from(footer.date.clone()).centered());
    }
    lines
}

fn day_lines(day: &DaySchedule) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("NGÀY {} · {}", day.day_number, day.theme))
            .bold(),
        Line::from(format!("{} điểm · {} km", day.stop_count, day.distance_km)),
    ];

    for section in &day.periods {
        let period = section.period;
        let heading = format!("{} {}", period.emoji(), period.label());
        lines.push(Line::from(heading).bold().fg(hex_color(period.color())));
        for entry in &section.entries {
            let extras: Vec<&str> = [entry.duration.as_deref(), entry.rating.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            lines.push(Line::from(format!(
                "  {} {} {}  {}",
                entry.time,
                entry.emoji,
                entry.name,
                extras.join(" · ")
            )));
            if let Some(tip) = &entry.tip {
                lines.push(Line::from(format!("      💡 {tip}")).italic());
            }
        }
    }

    if let Some(stay) = &day.accommodation {
        let rating = stay.rating.as_deref().unwrap_or_default();
        lines.push(Line::from(format!("🏨 {} {rating} · {}", stay.name, stay.budget_level)));
    }
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use lichtrinh_core::model::Itinerary;

    use super::*;

    #[test]
    fn preview_mirrors_blocks() {
        let itinerary: Itinerary = serde_json::from_str(include_str!(
            "../../../testdata/itinerary.json"
        ))
        .expect("sample itinerary");
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        let infographic = Infographic::layout(&itinerary, date);

        let text: Vec<String> = preview_lines(&infographic)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(text.iter().any(|line| line == "3 NGÀY   12 ĐIỂM ĐẾN   313 KM"));
        assert!(text.iter().any(|line| line.starts_with("NGÀY 3")));
        assert_eq!(text.last().map(String::as_str), Some("16/10/2026"));
    }
}
