use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Block, Borders, Paragraph, Wrap,
        canvas::{self, Canvas, Context, Points},
    },
};

use lichtrinh_core::map::{Bounds, MapScene};

use super::{hex_color, itinerary::draw_tabs};
use crate::app::Detail;

const PADDING: f64 = 0.15;

pub(super) fn draw(frame: &mut Frame<'_>, detail: &Detail, token: &str, area: Rect) {
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
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(*body_area);

    let body = body_chunks.as_ref();
    let [map_area, legend_area] = body else {
        return;
    };

    draw_canvas(frame, &detail.scene, *map_area);

    let legend = Paragraph::new(legend_lines(&detail.scene, token))
        .block(Block::default().borders(Borders::ALL).title("Chú thích"))
        .wrap(Wrap { trim: false });
    frame.render_widget(legend, *legend_area);
}

// Dimmed layers are drawn first so focused routes stay on top.
fn paint(ctx: &mut Context<'_>, scene: &MapScene) {
    for dimmed in [true, false] {
        for route in scene.routes.iter().filter(|route| route.dimmed == dimmed) {
            let color = if route.dimmed {
                Color::DarkGray
            } else {
                hex_color(route.color)
            };
            for pair in route.points.windows(2) {
                if let [from, to] = pair {
                    ctx.draw(&canvas::Line::new(
                        from.longitude,
                        from.latitude,
                        to.longitude,
                        to.latitude,
                        color,
                    ));
                }
            }
        }
        ctx.layer();
    }

    for marker in &scene.markers {
        let color = if marker.dimmed {
            Color::DarkGray
        } else {
            hex_color(marker.color)
        };
        let coords = [(marker.position.longitude, marker.position.latitude)];
        ctx.draw(&Points {
            coords: &coords,
            color,
        });
        if !marker.dimmed {
            ctx.print(
                marker.position.longitude,
                marker.position.latitude,
                Span::raw(marker.number.to_string()).fg(color).bold(),
            );
        }
    }
}

fn draw_canvas(frame: &mut Frame<'_>, scene: &MapScene, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("🗺️ Bản đồ");
    let Some(bounds) = scene.bounds.map(|bounds| bounds.padded(PADDING)) else {
        let empty = Paragraph::new("Chưa có điểm nào để hiển thị.").block(block);
        frame.render_widget(empty, area);
        return;
    };
    let Bounds {
        south,
        west,
        north,
        east,
    } = bounds;

    let map = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(|ctx| paint(ctx, scene));
    frame.render_widget(map, area);
}

fn legend_lines(scene: &MapScene, token: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = scene
        .legend
        .iter()
        .map(|entry| {
            let focused = scene.filter.includes(entry.day_number);
            let color = if focused { hex_color(entry.color) } else { Color::DarkGray };
            Line::from(vec![
                Span::raw("━━ ").fg(color),
                Span::raw(format!("Ngày {}", entry.day_number)),
            ])
        })
        .collect();
    lines.push(Line::from(""));

    for marker in scene.focused_markers() {
        lines.push(Line::from(format!(
            "{:>2}. {} {} {}",
            marker.number, marker.time, marker.category.emoji, marker.name
        )));
    }

    if let Some(url) = scene.static_map_url(token) {
        lines.push(Line::from(""));
        lines.push(Line::from("Ảnh bản đồ:").bold());
        lines.push(Line::from(url).fg(Color::Blue));
    }
    lines
}
