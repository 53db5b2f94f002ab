//! Infographic layout.
//!
//! The infographic is a single column, [`WIDTH`] logical pixels wide, made of
//! stacked blocks: cover, route overview, one schedule per day and a footer.
//! Every block keeps both its semantic content (what the tests and the TUI
//! preview look at) and the positioned primitives the SVG writer serializes.

use std::mem;

use chrono::NaiveDate;

use lichtrinh_core::catalog::{ACCENT, TimeOfDay};
use lichtrinh_core::format::{format_date_vi, format_duration, format_rating, format_time};
use lichtrinh_core::model::{Accommodation, Day, Item, Itinerary};
use lichtrinh_core::view::{
    aggregate_stats, group_by_time_of_day, resolve_category_presentation, sort_items,
};

/// Logical canvas width.
pub const WIDTH: f32 = 430.0;
/// Canvas background.
pub const BACKGROUND: &str = "#f0fdf4";
/// Footer branding.
pub const BRAND: &str = "✦ Travel Companion ✦";

const CENTER_X: f32 = WIDTH / 2.0;
const PADDING_X: f32 = 24.0;
const BLOCK_GAP: f32 = 12.0;
const LINE_HEIGHT: f32 = 1.3;
const COUNTER_COLUMNS: [f32; 3] = [CENTER_X - 110.0, CENTER_X, CENTER_X + 110.0];

const WHITE: &str = "#ffffff";
const INK: &str = "#1a1a1a";
const HEADING: &str = "#333333";
const MUTED: &str = "#888888";
const SOFT: &str = "#666666";
const FAINT: &str = "#aaaaaa";
const DIVIDER: &str = "#dddddd";
const CARD: &str = "#fefcf8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Horizontal text alignment.
pub enum Anchor {
    /// Text starts at `x`.
    Start,
    /// Text is centered on `x`.
    Middle,
    /// Text ends at `x`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Font class.
pub enum Family {
    /// Body text.
    Sans,
    /// Headings.
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Outline of a shape or a line.
pub struct Stroke {
    /// Hex color.
    pub color: &'static str,
    /// Width in logical pixels.
    pub width: f32,
    /// Opacity between 0 and 1.
    pub opacity: f32,
    /// Dash and gap lengths.
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    fn solid(color: &'static str, width: f32) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }

    fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some((on, off));
        self
    }

    fn faded(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Rounded rectangle.
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Corner radius.
    pub radius: f32,
    /// Fill color.
    pub fill: &'static str,
    /// Outline.
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Filled circle.
pub struct Circle {
    /// Center x.
    pub cx: f32,
    /// Center y.
    pub cy: f32,
    /// Radius.
    pub radius: f32,
    /// Fill color.
    pub fill: &'static str,
    /// Outline.
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Straight segment.
pub struct Line {
    /// Start point.
    pub from: (f32, f32),
    /// End point.
    pub to: (f32, f32),
    /// Stroke.
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
/// One line of text.
pub struct TextRun {
    /// Text content, unescaped.
    pub content: String,
    /// Anchor x.
    pub x: f32,
    /// Baseline y.
    pub baseline: f32,
    /// Font size.
    pub size: f32,
    /// CSS font weight.
    pub weight: u16,
    /// Fill color.
    pub color: &'static str,
    /// Fill opacity.
    pub opacity: f32,
    /// Alignment on `x`.
    pub anchor: Anchor,
    /// Font class.
    pub family: Family,
    /// Italic style.
    pub italic: bool,
}

impl TextRun {
    fn new(content: impl Into<String>, x: f32, size: f32) -> Self {
        Self {
            content: content.into(),
            x,
            baseline: 0.0,
            size,
            weight: 400,
            color: INK,
            opacity: 1.0,
            anchor: Anchor::Start,
            family: Family::Sans,
            italic: false,
        }
    }

    fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    fn color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    fn faded(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn centered(mut self) -> Self {
        self.anchor = Anchor::Middle;
        self
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    // Serif italic bold, used for every heading.
    fn heading(self) -> Self {
        let mut run = self.italic().weight(700);
        run.family = Family::Serif;
        run
    }

    fn at(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Drawing primitive in canvas coordinates.
pub enum Element {
    /// Rectangle.
    Rect(Rect),
    /// Circle.
    Circle(Circle),
    /// Segment.
    Line(Line),
    /// Text line.
    Text(TextRun),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Cover counters.
pub struct CoverCounters {
    /// Number of days.
    pub days: u32,
    /// Number of stops over the whole trip.
    pub pois: usize,
    /// Total distance rounded to the kilometre.
    pub distance_km: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Title block.
pub struct Cover {
    /// Wrapped title.
    pub title_lines: Vec<String>,
    /// Destination shown in the badge.
    pub destination: String,
    /// Counters row.
    pub counters: CoverCounters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side of the centerline a route entry sits on.
pub enum Side {
    /// Left of the centerline.
    Left,
    /// Right of the centerline.
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One day on the route overview.
pub struct RouteStop {
    /// Day number.
    pub day_number: u32,
    /// Day theme.
    pub theme: String,
    /// Number of stops.
    pub stop_count: usize,
    /// Day distance rounded to the kilometre.
    pub distance_km: i64,
    /// Placement.
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Zigzag overview of the days.
pub struct RouteOverview {
    /// Days in day-number order.
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One stop in a day schedule.
pub struct ScheduleEntry {
    /// `HH:MM`.
    pub time: String,
    /// Category emoji.
    pub emoji: &'static str,
    /// Place name.
    pub name: String,
    /// Stay duration, absent when zero.
    pub duration: Option<String>,
    /// `⭐ 4.6`, absent without a rating.
    pub rating: Option<String>,
    /// First tip of the place.
    pub tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Non-empty time-of-day group.
pub struct PeriodSection {
    /// Part of the day.
    pub period: TimeOfDay,
    /// Stops in visit order.
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Night stay closing a day schedule.
pub struct AccommodationCard {
    /// Name.
    pub name: String,
    /// `⭐ 4.7`, absent without a rating.
    pub rating: Option<String>,
    /// Capitalized budget tier.
    pub budget_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Schedule of one day.
pub struct DaySchedule {
    /// Day number.
    pub day_number: u32,
    /// Day theme.
    pub theme: String,
    /// Day distance rounded to the kilometre.
    pub distance_km: i64,
    /// Number of stops.
    pub stop_count: usize,
    /// Non-empty groups, morning first.
    pub periods: Vec<PeriodSection>,
    /// Accommodation card, if the day has one.
    pub accommodation: Option<AccommodationCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Closing block.
pub struct Footer {
    /// Static branding.
    pub brand: &'static str,
    /// Export date as `dd/mm/yyyy`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a block shows.
pub enum BlockKind {
    /// Title, destination and counters.
    Cover(Cover),
    /// Day-by-day zigzag.
    RouteOverview(RouteOverview),
    /// Stops of one day.
    DaySchedule(DaySchedule),
    /// Branding and date.
    Footer(Footer),
}

#[derive(Debug, Clone, PartialEq)]
/// Vertical slice of the infographic.
pub struct Block {
    /// Top edge.
    pub y: f32,
    /// Height.
    pub height: f32,
    /// Content.
    pub kind: BlockKind,
    /// Primitives, back to front.
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
/// Laid-out infographic.
pub struct Infographic {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Blocks, top to bottom.
    pub blocks: Vec<Block>,
}

impl Infographic {
    /// Lay out `itinerary` with `export_date` in the footer.
    #[must_use]
    pub fn layout(itinerary: &Itinerary, export_date: NaiveDate) -> Self {
        let mut days: Vec<&Day> = itinerary.days.iter().collect();
        days.sort_by_key(|day| day.day_number);

        let mut blocks = vec![cover_block(itinerary, 0.0)];
        blocks.push(route_block(&days, next_top(&blocks)));
        for day in &days {
            blocks.push(day_block(day, next_top(&blocks)));
        }
        blocks.push(footer_block(export_date, next_top(&blocks)));

        let height = blocks
            .last()
            .map_or(0.0, |block| block.y + block.height);
        Self {
            width: WIDTH,
            height,
            blocks,
        }
    }

    /// Cover content.
    #[must_use]
    pub fn cover(&self) -> Option<&Cover> {
        self.blocks.iter().find_map(|block| match &block.kind {
            BlockKind::Cover(cover) => Some(cover),
            _ => None,
        })
    }

    /// Route overview content.
    #[must_use]
    pub fn route(&self) -> Option<&RouteOverview> {
        self.blocks.iter().find_map(|block| match &block.kind {
            BlockKind::RouteOverview(route) => Some(route),
            _ => None,
        })
    }

    /// Day schedules in day-number order.
    pub fn day_schedules(&self) -> impl Iterator<Item = &DaySchedule> {
        self.blocks.iter().filter_map(|block| match &block.kind {
            BlockKind::DaySchedule(schedule) => Some(schedule),
            _ => None,
        })
    }

    /// Footer content.
    #[must_use]
    pub fn footer(&self) -> Option<&Footer> {
        self.blocks.iter().find_map(|block| match &block.kind {
            BlockKind::Footer(footer) => Some(footer),
            _ => None,
        })
    }

    /// Canvas size in physical pixels at `scale`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "canvas sizes are small positive values"
    )]
    pub fn pixel_size(&self, scale: f32) -> (u32, u32) {
        (
            (self.width * scale).ceil() as u32,
            (self.height * scale).ceil() as u32,
        )
    }
}

fn next_top(blocks: &[Block]) -> f32 {
    blocks
        .last()
        .map_or(0.0, |block| block.y + block.height + BLOCK_GAP)
}

// Vertical cursor over a block being laid out.
struct Section {
    top: f32,
    cursor: f32,
    elements: Vec<Element>,
}

impl Section {
    fn new(top: f32, padding: f32) -> Self {
        Self {
            top,
            cursor: top + padding,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    fn text(&mut self, run: TextRun) {
        self.push(Element::Text(run));
    }

    // One line of text below the cursor.
    fn line(&mut self, run: TextRun, gap: f32) {
        let size = run.size;
        self.text(run.at(self.cursor + size));
        self.cursor += size * LINE_HEIGHT + gap;
    }

    fn lines(&mut self, lines: &[String], style: impl Fn(String) -> TextRun) {
        for line in lines {
            self.line(style(line.clone()), 0.0);
        }
    }

    // Centered rounded label.
    fn pill(&mut self, label: &str, fill: &'static str) {
        let width = text_width(label, 12.0) + 28.0;
        self.push(Element::Rect(Rect {
            x: CENTER_X - width / 2.0,
            y: self.cursor,
            width,
            height: 26.0,
            radius: 13.0,
            fill,
            stroke: None,
        }));
        self.text(
            TextRun::new(label, CENTER_X, 12.0)
                .weight(700)
                .color(WHITE)
                .centered()
                .at(self.cursor + 17.0),
        );
        self.cursor += 26.0;
    }

    fn finish(mut self, padding: f32, background: Option<&'static str>, kind: BlockKind) -> Block {
        let height = self.cursor + padding - self.top;
        if let Some(fill) = background {
            self.elements.insert(
                0,
                Element::Rect(Rect {
                    x: 0.0,
                    y: self.top,
                    width: WIDTH,
                    height,
                    radius: 0.0,
                    fill,
                    stroke: None,
                }),
            );
        }
        Block {
            y: self.top,
            height,
            kind,
            elements: self.elements,
        }
    }
}

fn cover_block(itinerary: &Itinerary, top: f32) -> Block {
    let stats = aggregate_stats(itinerary);
    let counters = CoverCounters {
        days: itinerary.num_days,
        pois: stats.total_pois,
        distance_km: round_km(itinerary.total_distance_km),
    };
    let title_lines = wrap(&itinerary.title, 26.0, WIDTH - 2.0 * PADDING_X);

    let mut section = Section::new(top, 32.0);
    section.line(
        TextRun::new("✦ LỊCH TRÌNH CHI TIẾT ✦", CENTER_X, 12.0)
            .weight(600)
            .color(ACCENT)
            .centered(),
        8.0,
    );
    section.lines(&title_lines, |line| {
        TextRun::new(line, CENTER_X, 26.0)
            .heading()
            .color(INK)
            .centered()
    });
    section.cursor += 16.0;

    let badge = format!("📍 {}", itinerary.destination_name);
    let badge_width = text_width(&badge, 14.0) + 32.0;
    section.push(Element::Rect(Rect {
        x: CENTER_X - badge_width / 2.0,
        y: section.cursor,
        width: badge_width,
        height: 30.0,
        radius: 15.0,
        fill: ACCENT,
        stroke: None,
    }));
    section.text(
        TextRun::new(badge, CENTER_X, 14.0)
            .weight(600)
            .color(WHITE)
            .centered()
            .at(section.cursor + 20.0),
    );
    section.cursor += 30.0 + 24.0;

    let values = [
        (counters.days.to_string(), "Ngày"),
        (counters.pois.to_string(), "Điểm đến"),
        (counters.distance_km.to_string(), "Km"),
    ];
    for (x, (value, label)) in COUNTER_COLUMNS.into_iter().zip(values) {
        section.text(
            TextRun::new(value, x, 26.0)
                .heading()
                .color(ACCENT)
                .centered()
                .at(section.cursor + 26.0),
        );
        section.text(
            TextRun::new(label, x, 12.0)
                .color(SOFT)
                .centered()
                .at(section.cursor + 46.0),
        );
    }
    for x in [CENTER_X - 55.0, CENTER_X + 55.0] {
        section.push(Element::Line(Line {
            from: (x, section.cursor + 4.0),
            to: (x, section.cursor + 48.0),
            stroke: Stroke::solid(DIVIDER, 1.0),
        }));
    }
    section.cursor += 50.0;

    let kind = BlockKind::Cover(Cover {
        title_lines,
        destination: itinerary.destination_name.clone(),
        counters,
    });
    section.finish(32.0, None, kind)
}

fn route_block(days: &[&Day], top: f32) -> Block {
    let mut section = Section::new(top, 24.0);
    section.line(TextRun::new("🧭", CENTER_X, 18.0).centered(), 4.0);
    section.line(
        TextRun::new("Tổng quan hành trình", CENTER_X, 22.0)
            .heading()
            .color(INK)
            .centered(),
        20.0,
    );

    let spine_top = section.cursor;
    section.pill("🚩 Bắt đầu", ACCENT);
    section.cursor += 20.0;

    let mut stops = Vec::with_capacity(days.len());
    for (index, day) in days.iter().enumerate() {
        let side = if index % 2 == 0 { Side::Left } else { Side::Right };
        let stop = RouteStop {
            day_number: day.day_number,
            theme: day.theme.clone(),
            stop_count: day.items.len(),
            distance_km: round_km(day.distance_km),
            side,
        };
        route_row(&mut section, &stop);
        stops.push(stop);
    }

    section.cursor += 4.0;
    section.pill("🏁 Kết thúc", HEADING);
    let spine_bottom = section.cursor;

    section.elements.insert(
        0,
        Element::Line(Line {
            from: (CENTER_X, spine_top),
            to: (CENTER_X, spine_bottom),
            stroke: Stroke::solid(ACCENT, 2.0).dashed(8.0, 6.0).faded(0.4),
        }),
    );

    section.finish(24.0, Some(WHITE), BlockKind::RouteOverview(RouteOverview { stops }))
}

fn route_row(section: &mut Section, stop: &RouteStop) {
    const RADIUS: f32 = 20.0;
    const CONNECTOR: f32 = 70.0;
    const TEXT_WIDTH: f32 = CENTER_X - RADIUS - 12.0 - PADDING_X;

    let row = section.cursor;
    let center_y = row + RADIUS;
    let (connector, text_x, anchor) = match stop.side {
        Side::Left => (
            (CENTER_X + RADIUS, CENTER_X + RADIUS + CONNECTOR),
            CENTER_X - RADIUS - 12.0,
            Anchor::End,
        ),
        Side::Right => (
            (CENTER_X - RADIUS - CONNECTOR, CENTER_X - RADIUS),
            CENTER_X + RADIUS + 12.0,
            Anchor::Start,
        ),
    };

    section.push(Element::Line(Line {
        from: (connector.0, center_y),
        to: (connector.1, center_y),
        stroke: Stroke::solid(ACCENT, 1.5).dashed(4.0, 4.0).faded(0.4),
    }));
    section.push(Element::Circle(Circle {
        cx: CENTER_X,
        cy: center_y,
        radius: RADIUS,
        fill: ACCENT,
        stroke: Some(Stroke::solid(WHITE, 3.0)),
    }));
    section.text(
        TextRun::new(stop.day_number.to_string(), CENTER_X, 16.0)
            .weight(700)
            .color(WHITE)
            .centered()
            .at(center_y + 6.0),
    );

    section.text(
        TextRun::new(format!("Ngày {}", stop.day_number), text_x, 15.0)
            .heading()
            .color(INK)
            .anchored(anchor)
            .at(row + 14.0),
    );
    section.text(
        TextRun::new(ellipsize(&stop.theme, 11.0, TEXT_WIDTH), text_x, 11.0)
            .color(MUTED)
            .anchored(anchor)
            .at(row + 30.0),
    );
    section.text(
        TextRun::new(
            format!("{} điểm · {} km", stop.stop_count, stop.distance_km),
            text_x,
            10.0,
        )
        .color(FAINT)
        .anchored(anchor)
        .at(row + 44.0),
    );

    section.cursor += 2.0 * RADIUS + 24.0;
}

fn day_block(day: &Day, top: f32) -> Block {
    const HEADER: f32 = 64.0;
    const CONTENT_X: f32 = PADDING_X + 52.0;
    const CONTENT_WIDTH: f32 = WIDTH - CONTENT_X - PADDING_X;

    let mut schedule = DaySchedule {
        day_number: day.day_number,
        theme: day.theme.clone(),
        distance_km: round_km(day.distance_km),
        stop_count: day.items.len(),
        periods: Vec::new(),
        accommodation: day.accommodation.as_ref().map(accommodation_card),
    };

    let mut section = Section::new(top, 0.0);
    section.push(Element::Rect(Rect {
        x: 0.0,
        y: top,
        width: WIDTH,
        height: HEADER,
        radius: 0.0,
        fill: ACCENT,
        stroke: None,
    }));
    section.push(Element::Circle(Circle {
        cx: PADDING_X + 18.0,
        cy: top + HEADER / 2.0,
        radius: 18.0,
        fill: WHITE,
        stroke: None,
    }));
    section.text(
        TextRun::new(day.day_number.to_string(), PADDING_X + 18.0, 16.0)
            .weight(700)
            .color(ACCENT)
            .centered()
            .at(top + HEADER / 2.0 + 6.0),
    );
    let title_x = PADDING_X + 48.0;
    section.text(
        TextRun::new(format!("Ngày {}", day.day_number), title_x, 16.0)
            .heading()
            .color(WHITE)
            .at(top + 28.0),
    );
    section.text(
        TextRun::new(ellipsize(&day.theme, 12.0, WIDTH - title_x - 120.0), title_x, 12.0)
            .color(WHITE)
            .faded(0.85)
            .at(top + 46.0),
    );
    section.text(
        TextRun::new(
            format!("{} km · {} điểm", schedule.distance_km, schedule.stop_count),
            WIDTH - PADDING_X,
            12.0,
        )
        .color(WHITE)
        .faded(0.85)
        .anchored(Anchor::End)
        .at(top + HEADER / 2.0 + 4.0),
    );
    section.cursor = top + HEADER + 16.0;

    for group in group_by_time_of_day(sort_items(day)) {
        if group.items.is_empty() {
            continue;
        }
        section.line(
            TextRun::new(
                format!("{} {}", group.period.emoji(), group.period.label()),
                PADDING_X,
                14.0,
            )
            .heading()
            .color(group.period.color()),
            2.0,
        );
        section.push(Element::Line(Line {
            from: (PADDING_X, section.cursor),
            to: (WIDTH - PADDING_X, section.cursor),
            stroke: Stroke::solid(ACCENT, 2.0).faded(0.125),
        }));
        section.cursor += 10.0;

        let mut entries = Vec::with_capacity(group.items.len());
        for item in group.items {
            let entry = schedule_entry(item);
            section.text(
                TextRun::new(&*entry.time, PADDING_X, 12.0)
                    .weight(600)
                    .color(ACCENT)
                    .at(section.cursor + 13.0),
            );
            let title = wrap(&format!("{} {}", entry.emoji, entry.name), 13.0, CONTENT_WIDTH);
            section.lines(&title, |line| TextRun::new(line, CONTENT_X, 13.0).weight(600));

            let meta: Vec<String> = [
                entry.duration.as_ref().map(|duration| format!("⏱ {duration}")),
                entry.rating.clone(),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !meta.is_empty() {
                section.line(TextRun::new(meta.join("  ·  "), CONTENT_X, 11.0).color(MUTED), 0.0);
            }
            if let Some(tip) = &entry.tip {
                let tip_lines = wrap(&format!("💡 {tip}"), 11.0, CONTENT_WIDTH);
                section.lines(&tip_lines, |line| {
                    TextRun::new(line, CONTENT_X, 11.0).italic().color(SOFT)
                });
            }
            section.cursor += 8.0;
            entries.push(entry);
        }
        section.cursor += 8.0;
        schedule.periods.push(PeriodSection {
            period: group.period,
            entries,
        });
    }

    if let Some(card) = &schedule.accommodation {
        accommodation_block(&mut section, card, CONTENT_WIDTH);
    }

    section.finish(16.0, Some(WHITE), BlockKind::DaySchedule(schedule))
}

fn accommodation_block(section: &mut Section, card: &AccommodationCard, max_width: f32) {
    let card_top = section.cursor;
    let index = section.elements.len();
    section.cursor += 12.0;

    let x = PADDING_X + 14.0;
    section.line(TextRun::new("🏨 Chỗ nghỉ", x, 12.0).heading().color(ACCENT), 2.0);
    let name = wrap(&card.name, 13.0, max_width);
    section.lines(&name, |line| TextRun::new(line, x, 13.0).weight(600));
    let meta: Vec<&str> = card
        .rating
        .as_deref()
        .into_iter()
        .chain([card.budget_level.as_str()])
        .collect();
    section.line(TextRun::new(meta.join("  ·  "), x, 11.0).color(MUTED), 0.0);
    section.cursor += 12.0;

    section.elements.insert(
        index,
        Element::Rect(Rect {
            x: PADDING_X,
            y: card_top,
            width: WIDTH - 2.0 * PADDING_X,
            height: section.cursor - card_top,
            radius: 10.0,
            fill: CARD,
            stroke: Some(Stroke::solid(ACCENT, 1.0).faded(0.19)),
        }),
    );
}

fn footer_block(export_date: NaiveDate, top: f32) -> Block {
    let date = format_date_vi(export_date);
    let mut section = Section::new(top, 20.0);
    section.push(Element::Line(Line {
        from: (PADDING_X, top),
        to: (WIDTH - PADDING_X, top),
        stroke: Stroke::solid(ACCENT, 2.0).faded(0.19),
    }));
    section.line(TextRun::new("Tạo bởi", CENTER_X, 11.0).color("#999999").centered(), 4.0);
    section.line(
        TextRun::new(BRAND, CENTER_X, 16.0)
            .heading()
            .color(ACCENT)
            .centered(),
        4.0,
    );
    section.line(TextRun::new(&*date, CENTER_X, 11.0).color("#bbbbbb").centered(), 0.0);

    section.finish(20.0, None, BlockKind::Footer(Footer { brand: BRAND, date }))
}

fn schedule_entry(item: &Item) -> ScheduleEntry {
    let category = resolve_category_presentation(&item.poi.categories);
    ScheduleEntry {
        time: format_time(&item.visit_time),
        emoji: category.emoji,
        name: item.poi.name.clone(),
        duration: (item.duration_minutes > 0).then(|| format_duration(item.duration_minutes)),
        rating: item
            .poi
            .google_rating
            .map(|rating| format!("⭐ {}", format_rating(rating))),
        tip: item.poi.tips.first().cloned(),
    }
}

fn accommodation_card(accommodation: &Accommodation) -> AccommodationCard {
    AccommodationCard {
        name: accommodation.name.clone(),
        rating: accommodation
            .google_rating
            .map(|rating| format!("⭐ {}", format_rating(rating))),
        budget_level: capitalize(&accommodation.budget_level),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[expect(clippy::cast_possible_truncation, reason = "trip distances fit in i64")]
fn round_km(km: f64) -> i64 {
    km.round() as i64
}

// Advance of one character in ems. No font metrics are available at layout
// time, so this is an estimate tuned for the usual sans faces.
fn char_width(ch: char) -> f32 {
    match ch {
        ' ' => 0.3,
        'A'..='Z' | 'm' | 'w' => 0.68,
        'i' | 'l' | 'j' | '.' | ',' | ':' | '\'' | '|' => 0.28,
        _ if ch.is_ascii() => 0.52,
        _ if u32::from(ch) >= 0x2000 => 1.0,
        _ => 0.56,
    }
}

/// Estimated rendered width of `text` at `size`.
#[must_use]
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_width).sum::<f32>() * size
}

/// Greedy word wrap against the estimated width.
///
/// A single word wider than `max_width` gets a line of its own.
#[must_use]
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width(&candidate, size) > max_width {
            lines.push(mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `text` to fit `max_width`, ending with `…` when shortened.
#[must_use]
pub fn ellipsize(text: &str, size: f32, max_width: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_owned();
    }
    let budget = max_width - text_width("…", size);
    let mut width = 0.0;
    let mut out = String::new();
    for ch in text.chars() {
        width += char_width(ch) * size;
        if width > budget {
            break;
        }
        out.push(ch);
    }
    format!("{}…", out.trim_end())
}
