//! Selection record collected by the trip wizard and its mapping to a
//! generation request.

use chrono::NaiveDate;

use crate::catalog::{
    MAX_VIBES, budget_option, companion_option, duration_option, vibe_option,
};
use crate::request::{GenerateItineraryRequest, Pace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Wizard screens before the loading screen.
pub enum WizardStep {
    /// Welcome screen.
    Landing,
    /// Step 1: trip length.
    Duration,
    /// Step 2: companions.
    Companion,
    /// Step 3: vibes.
    Vibe,
    /// Step 4: budget.
    Budget,
    /// Step 5: review and create.
    Review,
}

impl WizardStep {
    /// Following screen, `None` after the review.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::Landing => Some(WizardStep::Duration),
            WizardStep::Duration => Some(WizardStep::Companion),
            WizardStep::Companion => Some(WizardStep::Vibe),
            WizardStep::Vibe => Some(WizardStep::Budget),
            WizardStep::Budget => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    /// Preceding screen, `None` on the landing screen.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Landing => None,
            WizardStep::Duration => Some(WizardStep::Landing),
            WizardStep::Companion => Some(WizardStep::Duration),
            WizardStep::Vibe => Some(WizardStep::Companion),
            WizardStep::Budget => Some(WizardStep::Vibe),
            WizardStep::Review => Some(WizardStep::Budget),
        }
    }

    /// Step number out of five, `None` on the landing screen.
    #[must_use]
    pub fn number(self) -> Option<u8> {
        match self {
            WizardStep::Landing => None,
            WizardStep::Duration => Some(1),
            WizardStep::Companion => Some(2),
            WizardStep::Vibe => Some(3),
            WizardStep::Budget => Some(4),
            WizardStep::Review => Some(5),
        }
    }

    /// Screen name used in logs: `landing`, `step1` … `step5`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WizardStep::Landing => "landing",
            WizardStep::Duration => "step1",
            WizardStep::Companion => "step2",
            WizardStep::Vibe => "step3",
            WizardStep::Budget => "step4",
            WizardStep::Review => "step5",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Reasons a selection record cannot be turned into a request.
pub enum SelectionError {
    /// A required answer is missing.
    #[error("Missing selection for {0}")]
    Missing(&'static str),
    /// A code is not in the option catalog.
    #[error("Unknown {field} code: {code}")]
    UnknownCode {
        /// Field name.
        field: &'static str,
        /// Offending code.
        code: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Trip parameters not asked by the wizard.
pub struct TripDefaults {
    /// Destination identifier.
    pub destination_id: String,
    /// Departure province identifier.
    pub departure_province_id: String,
    /// Departure label shown on the review screen.
    pub departure_name: String,
    /// Density sent with every request.
    pub pace: Option<Pace>,
    /// Keep one accommodation for the whole trip.
    pub keep_same_accommodation: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Row of the review screen.
pub struct SummaryRow {
    /// Row label.
    pub label: &'static str,
    /// Chosen value, empty when unanswered.
    pub value: String,
    /// Screen that edits the row, `None` for read-only rows.
    pub edit_step: Option<WizardStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Answers collected so far.
pub struct TripSelections {
    /// Duration code.
    pub duration: Option<String>,
    /// Companion code.
    pub companion: Option<String>,
    /// Up to [`MAX_VIBES`] vibe codes in selection order.
    pub vibes: Vec<String>,
    /// Budget code.
    pub budget: Option<String>,
}

impl TripSelections {
    /// Add or remove a vibe; returns false when the limit blocks adding.
    pub fn toggle_vibe(&mut self, code: &str) -> bool {
        if let Some(position) = self.vibes.iter().position(|vibe| vibe == code) {
            self.vibes.remove(position);
            return true;
        }
        if self.vibes.len() >= MAX_VIBES {
            return false;
        }
        self.vibes.push(code.to_owned());
        true
    }

    /// Whether the answer for `step` allows moving on.
    #[must_use]
    pub fn can_continue(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Landing => true,
            WizardStep::Duration => self.duration.is_some(),
            WizardStep::Companion => self.companion.is_some(),
            WizardStep::Vibe => !self.vibes.is_empty(),
            WizardStep::Budget => self.budget.is_some(),
            WizardStep::Review => self.is_complete(),
        }
    }

    /// Whether every step has been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.duration.is_some()
            && self.companion.is_some()
            && !self.vibes.is_empty()
            && self.budget.is_some()
    }

    /// Rows of the review screen.
    #[must_use]
    pub fn summary(&self, defaults: &TripDefaults) -> Vec<SummaryRow> {
        let duration = self
            .duration
            .as_deref()
            .and_then(duration_option)
            .map(|option| option.label.to_owned());
        let companion = self
            .companion
            .as_deref()
            .and_then(companion_option)
            .map(|option| option.label.to_owned());
        let vibes = self
            .vibes
            .iter()
            .filter_map(|code| vibe_option(code))
            .map(|option| option.label)
            .collect::<Vec<_>>()
            .join(", ");
        let budget = self
            .budget
            .as_deref()
            .and_then(budget_option)
            .map(|option| option.title.to_owned());

        vec![
            SummaryRow {
                label: "Thời gian",
                value: duration.unwrap_or_default(),
                edit_step: Some(WizardStep::Duration),
            },
            SummaryRow {
                label: "Đi cùng",
                value: companion.unwrap_or_default(),
                edit_step: Some(WizardStep::Companion),
            },
            SummaryRow {
                label: "Vibe",
                value: vibes,
                edit_step: Some(WizardStep::Vibe),
            },
            SummaryRow {
                label: "Budget",
                value: budget.unwrap_or_default(),
                edit_step: Some(WizardStep::Budget),
            },
            SummaryRow {
                label: "Xuất phát",
                value: defaults.departure_name.clone(),
                edit_step: None,
            },
        ]
    }

    /// Build the generation request.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] when an answer is missing or unknown.
    pub fn to_request(
        &self,
        defaults: &TripDefaults,
        start_date: NaiveDate,
    ) -> Result<GenerateItineraryRequest, SelectionError> {
        let duration_code = self
            .duration
            .as_deref()
            .ok_or(SelectionError::Missing("duration"))?;
        let duration = duration_option(duration_code).ok_or_else(|| SelectionError::UnknownCode {
            field: "duration",
            code: duration_code.to_owned(),
        })?;

        let budget_code = self
            .budget
            .as_deref()
            .ok_or(SelectionError::Missing("budget"))?;
        let budget = budget_option(budget_code).ok_or_else(|| SelectionError::UnknownCode {
            field: "budget",
            code: budget_code.to_owned(),
        })?;

        let companion = self
            .companion
            .clone()
            .ok_or(SelectionError::Missing("companion"))?;
        if self.vibes.is_empty() {
            return Err(SelectionError::Missing("vibes"));
        }

        Ok(GenerateItineraryRequest {
            destination_id: defaults.destination_id.clone(),
            departure_province_id: defaults.departure_province_id.clone(),
            num_days: duration.num_days,
            start_date,
            budget_amount: budget.amount,
            pace: defaults.pace,
            companion_codes: Some(vec![companion]),
            vibe_codes: Some(self.vibes.clone()),
            keep_same_accommodation: defaults.keep_same_accommodation,
        })
    }
}
