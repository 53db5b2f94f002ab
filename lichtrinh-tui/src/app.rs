use std::collections::HashSet;
use std::iter;
use std::path::PathBuf;
use std::ptr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use lichtrinh_core::catalog::{
    BUDGET_OPTIONS, COMPANION_OPTIONS, DURATION_OPTIONS, LOADING_MESSAGES, MAX_VIBES, VIBE_OPTIONS,
};
use lichtrinh_core::map::MapScene;
use lichtrinh_core::model::{Itinerary, ItineraryId};
use lichtrinh_core::ports::PortError;
use lichtrinh_core::request::GenerateItineraryRequest;
use lichtrinh_core::timeline::{TimelineCard, timeline};
use lichtrinh_core::view::{DayFilter, ItineraryView};
use lichtrinh_core::wizard::{TripDefaults, TripSelections, WizardStep};
use lichtrinh_infographic::{ExportError, Exporter, Infographic};

use crate::rotator::Rotator;

pub(crate) const TOAST_TTL: Duration = Duration::from_secs(4);
pub(crate) const NOT_FOUND_REDIRECT: Duration = Duration::from_secs(3);
pub(crate) const ROTATE_EVERY: Duration = Duration::from_millis(1800);

pub(crate) const FEEDBACK_OPTIONS: [&str; 4] =
    ["Dày lịch quá", "Thiếu chỗ ăn", "Muốn thêm điểm", "Khác"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Wizard(WizardStep),
    Loading,
    Itinerary,
    NotFound { redirect_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub expires_at: Instant,
}

/// Results reported back to the UI task.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Generated {
        ticket: u64,
        result: Result<Itinerary, PortError>,
    },
    Fetched {
        ticket: u64,
        result: Result<Itinerary, PortError>,
    },
    Exported(Result<PathBuf, ExportError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Generate,
    Fetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    ticket: u64,
    kind: RequestKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    List,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feedback {
    Good,
    /// Picking what went wrong; holds the option cursor.
    Choosing(usize),
    Sent,
}

/// State of the itinerary detail screen.
pub(crate) struct Detail {
    pub view: ItineraryView,
    pub filter: DayFilter,
    pub mode: ViewMode,
    pub scene: MapScene,
    pub selected: usize,
    /// `(day_number, order_index)` of cards showing their tips.
    pub expanded: HashSet<(u32, i32)>,
    pub feedback: Option<Feedback>,
    pub infographic: Option<Infographic>,
    pub modal_scroll: u16,
}

impl Detail {
    pub(crate) fn new(itinerary: Arc<Itinerary>) -> Self {
        let view = ItineraryView::new(itinerary);
        let filter = view
            .day_numbers()
            .first()
            .map_or(DayFilter::All, |day| DayFilter::Day(*day));
        let scene = MapScene::build(&view.itinerary().days, filter);
        Self {
            view,
            filter,
            mode: ViewMode::List,
            scene,
            selected: 0,
            expanded: HashSet::new(),
            feedback: None,
            infographic: None,
            modal_scroll: 0,
        }
    }

    pub(crate) fn itinerary(&self) -> &Arc<Itinerary> {
        self.view.itinerary()
    }

    /// `All` first, then one tab per day.
    pub(crate) fn tabs(&self) -> Vec<DayFilter> {
        iter::once(DayFilter::All)
            .chain(self.view.day_numbers().into_iter().map(DayFilter::Day))
            .collect()
    }

    pub(crate) fn set_filter(&mut self, filter: DayFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.scene = MapScene::build(&self.view.itinerary().days, filter);
        self.selected = 0;
    }

    pub(crate) fn cycle_tab(&mut self, forward: bool) {
        let tabs = self.tabs();
        let current = tabs.iter().position(|tab| *tab == self.filter).unwrap_or(0);
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            current.checked_sub(1).unwrap_or(tabs.len() - 1)
        };
        if let Some(filter) = tabs.get(next) {
            self.set_filter(*filter);
        }
    }

    /// Cards of the days in focus, in day then visit order.
    pub(crate) fn visible_cards(&self) -> Vec<TimelineCard<'_>> {
        self.view
            .itinerary()
            .days
            .iter()
            .filter(|day| self.filter.includes(day.day_number))
            .flat_map(timeline)
            .collect()
    }

    pub(crate) fn move_selection(&mut self, down: bool) {
        let count = self.visible_cards().len();
        if down {
            if self.selected + 1 < count {
                self.selected += 1;
            }
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Show or hide the tips of the selected card.
    pub(crate) fn toggle_tips(&mut self) {
        let key = self
            .visible_cards()
            .get(self.selected)
            .filter(|card| card.has_tips())
            .and_then(|card| {
                self.view
                    .itinerary()
                    .days
                    .iter()
                    .find(|day| day.items.iter().any(|item| ptr::eq(item, card.item)))
                    .map(|day| (day.day_number, card.item.order_index))
            });
        let Some(key) = key else {
            return;
        };
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    pub(crate) fn is_expanded(&self, day_number: u32, order_index: i32) -> bool {
        self.expanded.contains(&(day_number, order_index))
    }
}

pub(crate) struct App {
    pub screen: Screen,
    pub selections: TripSelections,
    pub defaults: TripDefaults,
    pub cursor: usize,
    pub detail: Option<Detail>,
    pub toasts: Vec<Toast>,
    pub exporter: Exporter,
    pub rotator: Option<Rotator>,
    pub map_token: String,
    /// The current itinerary was opened by id rather than generated.
    pub deep_linked: bool,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl App {
    pub(crate) fn new(defaults: TripDefaults, map_token: String) -> Self {
        Self {
            screen: Screen::Wizard(WizardStep::Landing),
            selections: TripSelections::default(),
            defaults,
            cursor: 0,
            detail: None,
            toasts: Vec::new(),
            exporter: Exporter::default(),
            rotator: None,
            map_token,
            deep_linked: false,
            pending: None,
            next_ticket: 0,
        }
    }

    pub(crate) fn toast(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
    ) {
        self.toasts.push(Toast {
            kind,
            title: title.into(),
            description,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    // ----- wizard -----

    pub(crate) fn go_to(&mut self, step: WizardStep) {
        debug!(screen = step.name(), "wizard navigation");
        self.screen = Screen::Wizard(step);
        self.cursor = self.selected_position(step).unwrap_or(0);
    }

    fn selected_position(&self, step: WizardStep) -> Option<usize> {
        match step {
            WizardStep::Duration => {
                let code = self.selections.duration.as_deref()?;
                DURATION_OPTIONS
                    .iter()
                    .position(|option| option.code == code)
            }
            WizardStep::Companion => {
                let code = self.selections.companion.as_deref()?;
                COMPANION_OPTIONS
                    .iter()
                    .position(|option| option.code == code)
            }
            WizardStep::Budget => {
                let code = self.selections.budget.as_deref()?;
                BUDGET_OPTIONS.iter().position(|option| option.code == code)
            }
            WizardStep::Landing | WizardStep::Vibe | WizardStep::Review => None,
        }
    }

    /// Number of rows the cursor moves over on `step`.
    pub(crate) fn option_count(step: WizardStep) -> usize {
        match step {
            WizardStep::Landing => 0,
            WizardStep::Duration => DURATION_OPTIONS.len(),
            WizardStep::Companion => COMPANION_OPTIONS.len(),
            WizardStep::Vibe => VIBE_OPTIONS.len(),
            WizardStep::Budget => BUDGET_OPTIONS.len(),
            // Editable rows of the summary.
            WizardStep::Review => 4,
        }
    }

    pub(crate) fn move_cursor(&mut self, down: bool) {
        let Screen::Wizard(step) = self.screen else {
            return;
        };
        let count = Self::option_count(step);
        if down {
            if self.cursor + 1 < count {
                self.cursor += 1;
            }
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Apply the option under the cursor to the selection record.
    pub(crate) fn choose(&mut self) {
        let Screen::Wizard(step) = self.screen else {
            return;
        };
        match step {
            WizardStep::Duration => {
                if let Some(option) = DURATION_OPTIONS.get(self.cursor) {
                    self.selections.duration = Some(option.code.to_owned());
                }
            }
            WizardStep::Companion => {
                if let Some(option) = COMPANION_OPTIONS.get(self.cursor) {
                    self.selections.companion = Some(option.code.to_owned());
                }
            }
            WizardStep::Vibe => {
                if let Some(option) = VIBE_OPTIONS.get(self.cursor)
                    && !self.selections.toggle_vibe(option.code)
                {
                    self.toast(
                        ToastKind::Info,
                        format!("Chọn tối đa {MAX_VIBES} vibe thôi nha"),
                        None,
                    );
                }
            }
            WizardStep::Budget => {
                if let Some(option) = BUDGET_OPTIONS.get(self.cursor) {
                    self.selections.budget = Some(option.code.to_owned());
                }
            }
            WizardStep::Review => {
                let rows = self.selections.summary(&self.defaults);
                if let Some(edit) = rows.get(self.cursor).and_then(|row| row.edit_step) {
                    self.go_to(edit);
                }
            }
            WizardStep::Landing => self.go_to(WizardStep::Duration),
        }
    }

    /// Move to the next step when the current answer allows it.
    pub(crate) fn advance(&mut self) -> bool {
        let Screen::Wizard(step) = self.screen else {
            return false;
        };
        if !self.selections.can_continue(step) {
            return false;
        }
        match step.next() {
            Some(next) => {
                self.go_to(next);
                true
            }
            None => false,
        }
    }

    pub(crate) fn back(&mut self) {
        if let Screen::Wizard(step) = self.screen
            && let Some(previous) = step.previous()
        {
            self.go_to(previous);
        }
    }

    // ----- requests -----

    fn issue(&mut self, kind: RequestKind) -> u64 {
        self.next_ticket += 1;
        self.pending = Some(Pending {
            ticket: self.next_ticket,
            kind,
        });
        self.screen = Screen::Loading;
        self.rotator = Some(Rotator::start(ROTATE_EVERY, LOADING_MESSAGES.len()));
        self.next_ticket
    }

    /// Ticket and body of a generation request, or `None` when one is
    /// already in flight or the answers are incomplete.
    pub(crate) fn begin_generate(
        &mut self,
        start_date: NaiveDate,
    ) -> Option<(u64, GenerateItineraryRequest)> {
        if self.pending.is_some() {
            debug!("generation already in flight");
            return None;
        }
        match self.selections.to_request(&self.defaults, start_date) {
            Ok(request) => {
                let ticket = self.issue(RequestKind::Generate);
                info!(ticket, "generation requested");
                Some((ticket, request))
            }
            Err(err) => {
                warn!(error = %err, "incomplete selections");
                self.toast(ToastKind::Error, "Bạn chưa chọn đủ thông tin", Some(err.to_string()));
                None
            }
        }
    }

    pub(crate) fn begin_fetch(&mut self, id: &ItineraryId) -> u64 {
        self.deep_linked = true;
        let ticket = self.issue(RequestKind::Fetch);
        info!(ticket, %id, "itinerary requested");
        ticket
    }

    fn settle(&mut self, ticket: u64, kind: RequestKind) -> bool {
        if self.pending != Some(Pending { ticket, kind }) {
            debug!(ticket, ?kind, "ignoring superseded result");
            return false;
        }
        self.pending = None;
        self.rotator = None;
        true
    }

    pub(crate) fn apply(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Generated { ticket, result } => {
                if !self.settle(ticket, RequestKind::Generate) {
                    return;
                }
                match result {
                    Ok(itinerary) => self.open(itinerary),
                    Err(err) => {
                        error!(error = %err, "generation failed");
                        self.toast(
                            ToastKind::Error,
                            "Không tạo được lịch trình 😢",
                            Some(err.to_string()),
                        );
                        self.go_to(WizardStep::Review);
                    }
                }
            }
            AppEvent::Fetched { ticket, result } => {
                if !self.settle(ticket, RequestKind::Fetch) {
                    return;
                }
                match result {
                    Ok(itinerary) => self.open(itinerary),
                    Err(err) => {
                        let description = if err.is_not_found() {
                            "Vui lòng kiểm tra lại đường dẫn".to_owned()
                        } else {
                            err.to_string()
                        };
                        warn!(error = %err, "itinerary unavailable");
                        self.toast(
                            ToastKind::Error,
                            "Không tìm thấy lịch trình 😢",
                            Some(description),
                        );
                        self.screen = Screen::NotFound {
                            redirect_at: now + NOT_FOUND_REDIRECT,
                        };
                    }
                }
            }
            AppEvent::Exported(result) => {
                self.exporter.complete(&result);
                match result {
                    Ok(path) => self.toast(
                        ToastKind::Success,
                        "Đã lưu ảnh lịch trình!",
                        Some(path.display().to_string()),
                    ),
                    Err(err) => {
                        error!(error = %err, "infographic export failed");
                        let description = Some(err.to_string());
                        self.toast(ToastKind::Error, "Không xuất được ảnh 😢", description);
                    }
                }
            }
        }
    }

    /// Expire toasts and run the not-found redirect.
    pub(crate) fn tick(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
        if let Screen::NotFound { redirect_at } = self.screen
            && now >= redirect_at
        {
            self.deep_linked = false;
            self.go_to(WizardStep::Landing);
        }
    }

    fn open(&mut self, itinerary: Itinerary) {
        info!(id = %itinerary.id, days = itinerary.days.len(), "itinerary ready");
        self.detail = Some(Detail::new(Arc::new(itinerary)));
        self.screen = Screen::Itinerary;
    }

    // ----- detail actions -----

    /// Leave the detail view for a fresh wizard run.
    pub(crate) fn create_new(&mut self) {
        self.detail = None;
        let target = if self.deep_linked {
            WizardStep::Landing
        } else {
            WizardStep::Review
        };
        self.deep_linked = false;
        self.go_to(target);
    }

    pub(crate) fn share(&mut self) {
        let Some(detail) = &self.detail else {
            return;
        };
        let link = format!("lichtrinh --itinerary {}", detail.itinerary().id);
        self.toast(ToastKind::Success, "Đã copy link!", Some(link));
    }

    pub(crate) fn save(&mut self) {
        self.toast(
            ToastKind::Info,
            "Tính năng đang phát triển!",
            Some("Chức năng lưu lịch trình sẽ có trong phiên bản tiếp theo".to_owned()),
        );
    }

    pub(crate) fn offline(&mut self) {
        self.toast(ToastKind::Info, "App đang phát triển, follow mình nha!", None);
    }

    pub(crate) fn feedback_good(&mut self) {
        if let Some(detail) = &mut self.detail
            && detail.feedback.is_none()
        {
            detail.feedback = Some(Feedback::Good);
            self.toast(ToastKind::Success, "Cảm ơn nha! Chúc đi vui 🎉", None);
        }
    }

    pub(crate) fn feedback_bad(&mut self) {
        if let Some(detail) = &mut self.detail
            && detail.feedback.is_none()
        {
            detail.feedback = Some(Feedback::Choosing(0));
        }
    }

    pub(crate) fn feedback_option(&mut self) {
        let Some(detail) = &mut self.detail else {
            return;
        };
        let Some(Feedback::Choosing(index)) = detail.feedback else {
            return;
        };
        detail.feedback = Some(Feedback::Sent);
        info!(option = FEEDBACK_OPTIONS.get(index).copied().unwrap_or_default(), "feedback");
        self.toast(ToastKind::Success, "Noted! Mình sẽ cải thiện 🙏", None);
    }

    pub(crate) fn open_infographic(&mut self, export_date: NaiveDate) {
        if let Some(detail) = &mut self.detail {
            detail.infographic = Some(Infographic::layout(detail.itinerary(), export_date));
            detail.modal_scroll = 0;
        }
    }

    pub(crate) fn close_infographic(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.infographic = None;
        }
    }

    /// Snapshot to export, or `None` while an export is running.
    pub(crate) fn begin_export(&mut self) -> Option<Arc<Itinerary>> {
        let itinerary = Arc::clone(self.detail.as_ref()?.itinerary());
        if !self.exporter.begin() {
            debug!("export already running");
            return None;
        }
        info!(id = %itinerary.id, "export started");
        Some(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use lichtrinh_infographic::RasterError;

    use super::*;

    fn sample_itinerary() -> Itinerary {
        serde_json::from_str(include_str!("../../testdata/itinerary.json"))
            .expect("sample itinerary")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 5).expect("date")
    }

    fn answered() -> App {
        let mut app = App::new(TripDefaults::default(), String::new());
        app.selections = TripSelections {
            duration: Some("3d2n".to_owned()),
            companion: Some("friends".to_owned()),
            vibes: vec!["adventure".to_owned()],
            budget: Some("comfortable".to_owned()),
        };
        app.go_to(WizardStep::Review);
        app
    }

    fn not_found() -> PortError {
        PortError::NotFound(ItineraryId("missing".to_owned()))
    }

    #[tokio::test]
    async fn generation_opens_detail() {
        let mut app = answered();
        let (ticket, request) = app.begin_generate(date()).expect("request");
        assert_eq!(request.num_days, 3);
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.rotator.is_some());

        app.apply(
            AppEvent::Generated {
                ticket,
                result: Ok(sample_itinerary()),
            },
            Instant::now(),
        );
        assert_eq!(app.screen, Screen::Itinerary);
        assert!(app.rotator.is_none());
        let detail = app.detail.as_ref().expect("detail");
        assert_eq!(detail.view.stats_line(), "3 ngày · 12 điểm đến · 4 quán ăn");
    }

    #[tokio::test]
    async fn second_generation_is_refused_while_pending() {
        let mut app = answered();
        assert!(app.begin_generate(date()).is_some());
        assert!(app.begin_generate(date()).is_none());
    }

    #[tokio::test]
    async fn failed_generation_returns_to_review() {
        let mut app = answered();
        let (ticket, _) = app.begin_generate(date()).expect("request");
        app.apply(
            AppEvent::Generated {
                ticket,
                result: Err(PortError::Api {
                    status: 500,
                    body: "boom".to_owned(),
                }),
            },
            Instant::now(),
        );
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Review));
        let toast = app.toasts.last().expect("toast");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.description.as_deref(), Some("API error 500: boom"));
    }

    #[test]
    fn incomplete_selection_is_a_toast() {
        let mut app = App::new(TripDefaults::default(), String::new());
        assert!(app.begin_generate(date()).is_none());
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Landing));
        assert_eq!(app.toasts.len(), 1);
    }

    #[tokio::test]
    async fn stale_results_are_ignored() {
        let mut app = App::new(TripDefaults::default(), String::new());
        let first = app.begin_fetch(&ItineraryId("it-1".to_owned()));
        // Superseded before the first answer arrives.
        app.settle(first, RequestKind::Fetch);
        let second = app.begin_fetch(&ItineraryId("it-42".to_owned()));

        app.apply(
            AppEvent::Fetched {
                ticket: first,
                result: Err(not_found()),
            },
            Instant::now(),
        );
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.toasts.is_empty());

        app.apply(
            AppEvent::Fetched {
                ticket: second,
                result: Ok(sample_itinerary()),
            },
            Instant::now(),
        );
        assert_eq!(app.screen, Screen::Itinerary);
    }

    #[tokio::test]
    async fn not_found_redirects_after_delay() {
        let mut app = App::new(TripDefaults::default(), String::new());
        let ticket = app.begin_fetch(&ItineraryId("missing".to_owned()));
        let now = Instant::now();
        app.apply(
            AppEvent::Fetched {
                ticket,
                result: Err(not_found()),
            },
            now,
        );
        assert_eq!(
            app.screen,
            Screen::NotFound {
                redirect_at: now + NOT_FOUND_REDIRECT
            }
        );
        assert_eq!(
            app.toasts.last().and_then(|toast| toast.description.as_deref()),
            Some("Vui lòng kiểm tra lại đường dẫn")
        );

        app.tick(now + Duration::from_secs(2));
        assert!(matches!(app.screen, Screen::NotFound { .. }));
        app.tick(now + NOT_FOUND_REDIRECT);
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Landing));
    }

    #[test]
    fn toasts_expire() {
        let mut app = App::new(TripDefaults::default(), String::new());
        app.save();
        let expires_at = app.toasts.first().map(|toast| toast.expires_at).expect("toast");
        app.tick(expires_at - Duration::from_millis(1));
        assert_eq!(app.toasts.len(), 1);
        app.tick(expires_at);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn create_new_target_depends_on_origin() {
        let mut app = answered();
        app.open(sample_itinerary());
        app.create_new();
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Review));
        assert!(app.detail.is_none());

        app.deep_linked = true;
        app.open(sample_itinerary());
        app.create_new();
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Landing));
    }

    #[test]
    fn export_trigger_reenables_after_failure() {
        let mut app = answered();
        app.open(sample_itinerary());
        app.open_infographic(date());

        let snapshot = app.begin_export().expect("export starts");
        assert_eq!(snapshot.id.0, "it-42");
        assert!(!app.exporter.is_enabled());
        assert!(app.begin_export().is_none());

        app.apply(
            AppEvent::Exported(Err(ExportError::Raster(RasterError::Encode("boom".to_owned())))),
            Instant::now(),
        );
        assert!(app.exporter.is_enabled());
        let detail = app.detail.as_ref().expect("detail");
        assert!(detail.infographic.is_some(), "modal stays open");
        assert_eq!(app.toasts.last().map(|toast| toast.kind), Some(ToastKind::Error));
    }

    #[test]
    fn vibe_limit_shows_toast() {
        let mut app = App::new(TripDefaults::default(), String::new());
        app.go_to(WizardStep::Vibe);
        for index in 0..=MAX_VIBES {
            app.cursor = index;
            app.choose();
        }
        assert_eq!(app.selections.vibes.len(), MAX_VIBES);
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn wizard_requires_answers_to_advance() {
        let mut app = App::new(TripDefaults::default(), String::new());
        app.choose();
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Duration));
        assert!(!app.advance());

        app.cursor = 1;
        app.choose();
        assert!(app.advance());
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Companion));

        app.back();
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Duration));
        assert_eq!(app.cursor, 1, "cursor returns to the chosen option");
    }

    #[test]
    fn review_row_jumps_to_its_step() {
        let mut app = answered();
        app.cursor = 2;
        app.choose();
        assert_eq!(app.screen, Screen::Wizard(WizardStep::Vibe));
    }

    #[test]
    fn day_tabs_cycle_and_rebuild_scene() {
        let mut detail = Detail::new(Arc::new(sample_itinerary()));
        assert_eq!(detail.filter, DayFilter::Day(1));
        assert_eq!(detail.visible_cards().len(), 4);

        detail.cycle_tab(true);
        assert_eq!(detail.filter, DayFilter::Day(2));
        assert_eq!(detail.scene.filter, DayFilter::Day(2));

        detail.cycle_tab(true);
        detail.cycle_tab(true);
        assert_eq!(detail.filter, DayFilter::All);
        assert_eq!(detail.visible_cards().len(), 12);

        detail.cycle_tab(false);
        assert_eq!(detail.filter, DayFilter::Day(3));
    }

    #[test]
    fn tips_toggle_on_selected_card() {
        let mut detail = Detail::new(Arc::new(sample_itinerary()));
        // Second stop of day 1 is the pass, which has tips.
        detail.move_selection(true);
        detail.toggle_tips();
        assert!(detail.is_expanded(1, 2));
        detail.toggle_tips();
        assert!(!detail.is_expanded(1, 2));

        // Lunch stop without tips.
        detail.move_selection(true);
        detail.toggle_tips();
        assert!(detail.expanded.is_empty());
    }

    #[test]
    fn feedback_flow() {
        let mut app = answered();
        app.open(sample_itinerary());
        app.feedback_bad();
        app.feedback_option();
        let detail = app.detail.as_ref().expect("detail");
        assert_eq!(detail.feedback, Some(Feedback::Sent));
        assert_eq!(
            app.toasts.last().map(|toast| toast.title.as_str()),
            Some("Noted! Mình sẽ cải thiện 🙏")
        );
    }
}
