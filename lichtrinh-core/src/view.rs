//! Render-ready structures derived from an itinerary snapshot.
//!
//! Every function here is pure; renderers call them instead of reading the
//! raw payload so the timeline, the map and the infographic agree.

use std::sync::Arc;

use crate::catalog::{CATEGORY_TABLE, CategoryPresentation, FALLBACK_CATEGORY, TimeOfDay};
use crate::model::{Day, Itinerary, Item};

/// Items of a day in visit order.
///
/// The sort is stable, so duplicated order indexes keep their payload order.
#[must_use]
pub fn sort_items(day: &Day) -> Vec<&Item> {
    let mut items: Vec<&Item> = day.items.iter().collect();
    items.sort_by_key(|item| item.order_index);
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Whole-trip counters.
pub struct TripStats {
    /// Number of scheduled stops.
    pub total_pois: usize,
    /// Stops whose notes mark a meal.
    pub total_food: usize,
}

/// Count stops and meal stops over every day.
#[must_use]
pub fn aggregate_stats(itinerary: &Itinerary) -> TripStats {
    itinerary
        .days
        .iter()
        .flat_map(|day| day.items.iter())
        .fold(TripStats::default(), |mut stats, item| {
            stats.total_pois += 1;
            if item.is_meal() {
                stats.total_food += 1;
            }
            stats
        })
}

/// First tag found in `table` wins, in tag order.
#[must_use]
pub fn resolve_with<S: AsRef<str>>(
    table: &[(&str, CategoryPresentation)],
    categories: &[S],
) -> CategoryPresentation {
    categories
        .iter()
        .find_map(|tag| {
            table
                .iter()
                .find(|(key, _)| *key == tag.as_ref())
                .map(|(_, presentation)| *presentation)
        })
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Presentation for a category list using the built-in table.
#[must_use]
pub fn resolve_category_presentation<S: AsRef<str>>(categories: &[S]) -> CategoryPresentation {
    resolve_with(CATEGORY_TABLE, categories)
}

/// Hour of a `HH:MM:SS` string, `None` when it cannot be read.
#[must_use]
pub fn visit_hour(visit_time: &str) -> Option<u32> {
    let (hour, _) = visit_time.trim().split_once(':')?;
    hour.parse::<u32>().ok().filter(|hour| *hour < 24)
}

/// Bucket of a visit; unreadable times fall into the evening.
#[must_use]
pub fn time_of_day(visit_time: &str) -> TimeOfDay {
    visit_hour(visit_time).map_or(TimeOfDay::Evening, TimeOfDay::from_hour)
}

#[derive(Debug, Clone, PartialEq)]
/// Items of one part of the day, in input order.
pub struct TimeGroup<'a> {
    /// Bucket.
    pub period: TimeOfDay,
    /// Items falling into the bucket.
    pub items: Vec<&'a Item>,
}

/// Split items into morning, afternoon and evening, always in that order.
///
/// Empty buckets are kept; renderers skip them.
#[must_use]
pub fn group_by_time_of_day<'a, I>(items: I) -> Vec<TimeGroup<'a>>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut groups: Vec<TimeGroup<'a>> = TimeOfDay::ALL
        .iter()
        .map(|period| TimeGroup {
            period: *period,
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let period = time_of_day(&item.visit_time);
        if let Some(group) = groups.iter_mut().find(|group| group.period == period) {
            group.items.push(item);
        }
    }

    groups
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Totals shown under a day's timeline.
pub struct DaySummary {
    /// Distance travelled in km.
    pub distance_km: f64,
    /// Minutes spent moving between stops.
    pub travel_minutes: u32,
    /// Number of stops.
    pub stops: usize,
    /// Sum of average costs in VND.
    pub estimated_cost_vnd: i64,
}

/// Summarize one day.
#[must_use]
pub fn day_summary(day: &Day) -> DaySummary {
    DaySummary {
        distance_km: day.distance_km,
        travel_minutes: day
            .items
            .iter()
            .filter_map(|item| item.travel_time_from_prev_minutes)
            .sum(),
        stops: day.items.len(),
        estimated_cost_vnd: day.items.iter().map(|item| item.poi.avg_cost_vnd).sum(),
    }
}

/// `3 ngày · 12 điểm đến · 4 quán ăn`.
#[must_use]
pub fn stats_line(num_days: u32, stats: TripStats) -> String {
    format!(
        "{num_days} ngày · {} điểm đến · {} quán ăn",
        stats.total_pois, stats.total_food
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which days a view focuses on, keyed by day number.
pub enum DayFilter {
    /// Every day at once.
    All,
    /// A single day.
    Day(u32),
}

impl DayFilter {
    /// Whether `day_number` is in focus.
    #[must_use]
    pub fn includes(self, day_number: u32) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(active) => active == day_number,
        }
    }
}

/// An itinerary snapshot together with its trip counters.
///
/// The counters are computed once per snapshot; [`ItineraryView::refresh`]
/// only recomputes when handed a different snapshot.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    itinerary: Arc<Itinerary>,
    stats: TripStats,
}

impl ItineraryView {
    /// Derive the view for a snapshot.
    #[must_use]
    pub fn new(itinerary: Arc<Itinerary>) -> Self {
        let stats = aggregate_stats(&itinerary);
        Self { itinerary, stats }
    }

    /// Underlying payload.
    #[must_use]
    pub fn itinerary(&self) -> &Arc<Itinerary> {
        &self.itinerary
    }

    /// Trip counters.
    #[must_use]
    pub fn stats(&self) -> TripStats {
        self.stats
    }

    /// Header line for the detail view.
    #[must_use]
    pub fn stats_line(&self) -> String {
        stats_line(self.itinerary.num_days, self.stats)
    }

    /// Day numbers in payload order.
    #[must_use]
    pub fn day_numbers(&self) -> Vec<u32> {
        self.itinerary.days.iter().map(|day| day.day_number).collect()
    }
}
