use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Map,
    Menu,
    Report,
    /// Drawn as an overlay on top of the map.
    Success,
}

impl Screen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Menu => "menu",
            Self::Report => "report",
            Self::Success => "success",
        }
    }

    #[must_use]
    pub const fn is_overlay(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    LightsIssue,
    DirtyStation,
    Vandalism,
    TurnstileBroken,
    MapSignageBroken,
}

impl IssueType {
    /// Dropdown order.
    pub const ALL: [Self; 5] = [
        Self::LightsIssue,
        Self::DirtyStation,
        Self::Vandalism,
        Self::TurnstileBroken,
        Self::MapSignageBroken,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LightsIssue => "Lights Issue",
            Self::DirtyStation => "Dirty Station",
            Self::Vandalism => "Vandalism",
            Self::TurnstileBroken => "Turnstile Broken",
            Self::MapSignageBroken => "Map/Signage Broken",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssueType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|issue| issue.label() == s)
            .ok_or_else(|| FlowError::UnknownIssueType(s.to_string()))
    }
}

/// In-progress report. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IssueReport {
    pub issue: Option<IssueType>,
    pub other_details: String,
}

impl IssueReport {
    /// A report needs a category or some free text; either one is enough.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.issue.is_some() || !self.other_details.is_empty()
    }

    pub fn clear(&mut self) {
        self.issue = None;
        self.other_details.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTab {
    Home,
    Saved,
    Plus,
}

impl NavTab {
    pub const ALL: [Self; 3] = [Self::Home, Self::Saved, Self::Plus];

    /// `Saved` has no screen behind it yet.
    #[must_use]
    pub const fn destination(self) -> Option<Screen> {
        match self {
            Self::Home => Some(Screen::Map),
            Self::Saved => None,
            Self::Plus => Some(Screen::Menu),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEntry {
    TrafficSettings,
    ShareLocation,
    OfflineMaps,
    ReportIssue,
    Settings,
    HelpAndSupport,
}

impl MenuEntry {
    pub const ALL: [Self; 6] = [
        Self::TrafficSettings,
        Self::ShareLocation,
        Self::OfflineMaps,
        Self::ReportIssue,
        Self::Settings,
        Self::HelpAndSupport,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TrafficSettings => "Traffic Settings",
            Self::ShareLocation => "Share Location",
            Self::OfflineMaps => "Offline Maps",
            Self::ReportIssue => "Report Issue",
            Self::Settings => "Settings",
            Self::HelpAndSupport => "Help & Support",
        }
    }

    #[must_use]
    pub const fn destination(self) -> Option<Screen> {
        match self {
            Self::ReportIssue => Some(Screen::Report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Model {
    pub screen: Screen,
    pub draft: IssueReport,
    pub is_issue_dropdown_open: bool,
    pub is_details_field_focused: bool,
    pub is_submitting: bool,
    pub pending_submission: Option<SubmissionId>,
    next_submission_id: u64,
}

impl Model {
    /// Shared by the submit button and the submit handler.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.screen == Screen::Report && self.draft.is_submittable() && !self.is_submitting
    }

    /// Moves to `target`. `Success` is only reachable through a completed
    /// submission and only left through `reset_flow`.
    pub fn navigate(&mut self, target: Screen) -> Result<(), FlowError> {
        if target == Screen::Success {
            return Err(FlowError::SuccessRequiresSubmission);
        }
        if self.screen == Screen::Success {
            return Err(FlowError::SuccessRequiresReset(target));
        }
        self.screen = target;
        Ok(())
    }

    pub fn select_issue(&mut self, issue: IssueType) {
        self.draft.issue = Some(issue);
        self.is_issue_dropdown_open = false;
    }

    pub fn toggle_issue_dropdown(&mut self) {
        self.is_issue_dropdown_open = !self.is_issue_dropdown_open;
    }

    pub fn set_other_details(&mut self, text: String) {
        self.draft.other_details = text;
    }

    pub fn set_details_focus(&mut self, focused: bool) {
        self.is_details_field_focused = focused;
    }

    pub fn begin_submission(&mut self) -> Result<SubmissionId, FlowError> {
        if self.screen != Screen::Report {
            return Err(FlowError::NotOnReportScreen(self.screen));
        }
        if self.is_submitting {
            return Err(FlowError::AlreadySubmitting);
        }
        if !self.draft.is_submittable() {
            return Err(FlowError::EmptyReport);
        }

        self.next_submission_id += 1;
        let id = SubmissionId(self.next_submission_id);
        self.pending_submission = Some(id);
        self.is_submitting = true;
        Ok(id)
    }

    pub fn complete_submission(&mut self, id: SubmissionId) -> Result<(), FlowError> {
        if self.pending_submission != Some(id) {
            return Err(FlowError::StaleSubmission(id));
        }
        self.pending_submission = None;
        self.is_submitting = false;
        self.screen = Screen::Success;
        Ok(())
    }

    /// Drops the pending submission, if any, and returns its id so the
    /// timer can be cancelled.
    pub fn abandon_submission(&mut self) -> Option<SubmissionId> {
        self.is_submitting = false;
        self.pending_submission.take()
    }

    /// Back to the map with an empty draft. The focus flag is left alone;
    /// it is not observable outside the report form.
    pub fn reset_flow(&mut self) -> Option<SubmissionId> {
        self.screen = Screen::Map;
        self.draft.clear();
        self.is_issue_dropdown_open = false;
        self.abandon_submission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_on_report() -> Model {
        let mut model = Model::default();
        model.navigate(Screen::Menu).unwrap();
        model.navigate(Screen::Report).unwrap();
        model
    }

    #[test]
    fn default_model_starts_on_map_with_empty_draft() {
        let model = Model::default();
        assert_eq!(model.screen, Screen::Map);
        assert_eq!(model.draft, IssueReport::default());
        assert!(!model.is_issue_dropdown_open);
        assert!(!model.is_details_field_focused);
        assert!(!model.is_submitting);
        assert_eq!(model.pending_submission, None);
    }

    #[test]
    fn navigate_rejects_success() {
        let mut model = model_on_report();
        let before = model.clone();
        assert!(matches!(
            model.navigate(Screen::Success),
            Err(FlowError::SuccessRequiresSubmission)
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn success_is_only_left_through_reset() {
        let mut model = model_on_report();
        model.set_other_details("Broken light".into());
        let id = model.begin_submission().unwrap();
        model.complete_submission(id).unwrap();

        let before = model.clone();
        for target in [Screen::Map, Screen::Menu, Screen::Report] {
            assert!(matches!(
                model.navigate(target),
                Err(FlowError::SuccessRequiresReset(t)) if t == target
            ));
            assert_eq!(model, before);
        }

        model.reset_flow();
        assert_eq!(model.screen, Screen::Map);
        assert_eq!(model.draft, IssueReport::default());
    }

    #[test]
    fn select_issue_closes_dropdown() {
        let mut model = model_on_report();
        model.toggle_issue_dropdown();
        assert!(model.is_issue_dropdown_open);

        model.select_issue(IssueType::Vandalism);
        assert_eq!(model.draft.issue, Some(IssueType::Vandalism));
        assert!(!model.is_issue_dropdown_open);
    }

    #[test]
    fn other_details_are_stored_verbatim() {
        let mut model = model_on_report();
        let text = "  Escalator on the north side \n stopped  ".to_string();
        model.set_other_details(text.clone());
        assert_eq!(model.draft.other_details, text);
    }

    #[test]
    fn focus_does_not_affect_eligibility() {
        let mut model = model_on_report();
        model.set_details_focus(true);
        assert!(!model.can_submit());
        model.set_details_focus(false);
        model.set_other_details("x".into());
        assert!(model.can_submit());
    }

    #[test]
    fn empty_draft_cannot_be_submitted() {
        let mut model = model_on_report();
        let before = model.clone();
        assert!(matches!(model.begin_submission(), Err(FlowError::EmptyReport)));
        assert_eq!(model, before);
    }

    #[test]
    fn submission_requires_report_screen() {
        let mut model = model_on_report();
        model.set_other_details("Broken light".into());
        model.navigate(Screen::Menu).unwrap();
        assert!(!model.can_submit());

        let before = model.clone();
        assert!(matches!(
            model.begin_submission(),
            Err(FlowError::NotOnReportScreen(Screen::Menu))
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn whitespace_details_count_as_content() {
        let mut model = model_on_report();
        model.set_other_details(" ".into());
        assert!(model.can_submit());
    }

    #[test]
    fn second_submission_is_rejected_while_pending() {
        let mut model = model_on_report();
        model.select_issue(IssueType::LightsIssue);
        let first = model.begin_submission().unwrap();
        assert!(!model.can_submit());
        assert!(matches!(
            model.begin_submission(),
            Err(FlowError::AlreadySubmitting)
        ));
        assert_eq!(model.pending_submission, Some(first));
    }

    #[test]
    fn submission_ids_are_unique() {
        let mut model = model_on_report();
        model.select_issue(IssueType::DirtyStation);
        let first = model.begin_submission().unwrap();
        model.abandon_submission();
        let second = model.begin_submission().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn completion_moves_to_success() {
        let mut model = model_on_report();
        model.set_other_details("Broken light".into());
        let id = model.begin_submission().unwrap();
        assert!(model.is_submitting);

        model.complete_submission(id).unwrap();
        assert_eq!(model.screen, Screen::Success);
        assert!(!model.is_submitting);
        assert_eq!(model.pending_submission, None);
    }

    #[test]
    fn stale_completion_is_rejected() {
        let mut model = model_on_report();
        model.set_other_details("Broken light".into());
        let id = model.begin_submission().unwrap();
        assert_eq!(model.abandon_submission(), Some(id));
        model.navigate(Screen::Menu).unwrap();

        let before = model.clone();
        assert!(matches!(
            model.complete_submission(id),
            Err(FlowError::StaleSubmission(stale)) if stale == id
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn reset_clears_draft_but_keeps_focus_flag() {
        let mut model = model_on_report();
        model.select_issue(IssueType::TurnstileBroken);
        model.set_other_details("Gate 3".into());
        model.toggle_issue_dropdown();
        model.set_details_focus(true);

        assert_eq!(model.reset_flow(), None);
        assert_eq!(model.screen, Screen::Map);
        assert_eq!(model.draft, IssueReport::default());
        assert!(!model.is_issue_dropdown_open);
        assert!(model.is_details_field_focused);
    }

    #[test]
    fn reset_returns_pending_submission() {
        let mut model = model_on_report();
        model.set_other_details("Gate 3".into());
        let id = model.begin_submission().unwrap();
        assert_eq!(model.reset_flow(), Some(id));
        assert!(!model.is_submitting);
    }

    #[test]
    fn issue_labels_parse_back() {
        for issue in IssueType::ALL {
            assert_eq!(issue.label().parse::<IssueType>().unwrap(), issue);
        }
        assert!(matches!(
            "Flooding".parse::<IssueType>(),
            Err(FlowError::UnknownIssueType(label)) if label == "Flooding"
        ));
    }

    #[test]
    fn only_home_and_plus_tabs_navigate() {
        assert_eq!(NavTab::Home.destination(), Some(Screen::Map));
        assert_eq!(NavTab::Plus.destination(), Some(Screen::Menu));
        assert_eq!(NavTab::Saved.destination(), None);
    }

    #[test]
    fn only_report_issue_menu_entry_navigates() {
        for entry in MenuEntry::ALL {
            let expected = (entry == MenuEntry::ReportIssue).then_some(Screen::Report);
            assert_eq!(entry.destination(), expected);
        }
    }
}
