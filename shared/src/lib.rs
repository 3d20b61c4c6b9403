// lib.rs - Shared core for the transit issue reporter

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod event;
pub mod model;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{IssueReport, IssueType, MenuEntry, Model, NavTab, Screen, SubmissionId};

/// Stand-in for the network round trip of a report submission.
pub const SUBMISSION_DELAY_MS: u64 = 1200;

pub const STATION_NAME: &str = "Clark/Lake Station";
pub const STATION_AREA: &str = "Downtown Chicago Loop";
pub const MAP_TARGET_LABEL: &str = "Target";

pub const MENU_TITLE: &str = "More Options";

pub const REPORT_TITLE: &str = "Report Issue";
pub const ISSUE_FIELD_LABEL: &str = "Issue Type";
pub const ISSUE_PLACEHOLDER: &str = "Select an issue...";
pub const DETAILS_FIELD_LABEL: &str = "Other Details";
pub const DETAILS_PLACEHOLDER: &str = "Describe the issue...";
pub const DONE_LABEL: &str = "Done";
pub const SUBMIT_LABEL: &str = "Report";
pub const SUBMITTING_LABEL: &str = "Sending...";

pub const SUCCESS_TITLE: &str = "Issue Reported";
pub const SUCCESS_MESSAGE: &str = "Thanks for helping keep Chicago moving.";
pub const SUCCESS_BUTTON_LABEL: &str = "Ok";

/// Guarded conditions of the screen flow. These are never shown to the
/// user; a rejected operation leaves the model untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("report has neither an issue type nor details")]
    EmptyReport,

    #[error("reports can only be submitted from the report form, not {0}")]
    NotOnReportScreen(Screen),

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("the success screen is only reachable by submitting a report")]
    SuccessRequiresSubmission,

    #[error("the success screen must be dismissed before moving to {0}")]
    SuccessRequiresReset(Screen),

    #[error("{0} is no longer pending")]
    StaleSubmission(SubmissionId),

    #[error("unknown issue type: {0:?}")]
    UnknownIssueType(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapView {
    pub station_name: String,
    pub station_area: String,
    pub target_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuEntryView {
    pub entry: MenuEntry,
    pub label: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub entries: Vec<MenuEntryView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueOptionView {
    pub issue: IssueType,
    pub label: String,
    pub is_selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportView {
    pub title: String,
    pub issue_field_label: String,
    /// Selected issue label, or the placeholder.
    pub issue_text: String,
    pub selected_issue: Option<IssueType>,
    pub is_dropdown_open: bool,
    /// Empty while the dropdown is closed.
    pub issue_options: Vec<IssueOptionView>,
    pub details_field_label: String,
    pub other_details: String,
    pub details_placeholder: String,
    pub show_done_button: bool,
    pub done_label: String,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub is_submitting: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessView {
    pub title: String,
    pub message: String,
    pub button_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BottomNavView {
    pub tabs: Vec<NavTab>,
    pub active: NavTab,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    Map {
        map: MapView,
    },
    Menu {
        menu: MenuView,
    },
    Report {
        report: ReportView,
    },
    Success {
        map: MapView,
        overlay: SuccessView,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: Screen,
    pub state: ViewState,
    pub bottom_nav: Option<BottomNavView>,
    pub can_submit: bool,
}

pub mod app {
    use super::*;
    use crate::capabilities::DelayOutput;

    #[derive(Default)]
    pub struct App;

    impl App {
        fn navigate(model: &mut Model, caps: &Capabilities, target: Screen) {
            if let Err(e) = model.navigate(target) {
                tracing::warn!(error = %e, target = target.as_str(), "navigation rejected");
                return;
            }

            if target != Screen::Report {
                if let Some(id) = model.abandon_submission() {
                    tracing::info!(%id, screen = target.as_str(), "submission abandoned");
                    caps.delay.cancel(id);
                }
            }

            caps.render.render();
        }

        fn map_view() -> MapView {
            MapView {
                station_name: STATION_NAME.into(),
                station_area: STATION_AREA.into(),
                target_label: MAP_TARGET_LABEL.into(),
            }
        }

        fn menu_view() -> MenuView {
            MenuView {
                title: MENU_TITLE.into(),
                entries: MenuEntry::ALL
                    .into_iter()
                    .map(|entry| MenuEntryView {
                        entry,
                        label: entry.label().into(),
                        enabled: entry.destination().is_some(),
                    })
                    .collect(),
            }
        }

        fn report_view(model: &Model) -> ReportView {
            let selected = model.draft.issue;

            let issue_options = if model.is_issue_dropdown_open {
                IssueType::ALL
                    .into_iter()
                    .map(|issue| IssueOptionView {
                        issue,
                        label: issue.label().into(),
                        is_selected: selected == Some(issue),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            ReportView {
                title: REPORT_TITLE.into(),
                issue_field_label: ISSUE_FIELD_LABEL.into(),
                issue_text: selected.map_or(ISSUE_PLACEHOLDER, IssueType::label).into(),
                selected_issue: selected,
                is_dropdown_open: model.is_issue_dropdown_open,
                issue_options,
                details_field_label: DETAILS_FIELD_LABEL.into(),
                other_details: model.draft.other_details.clone(),
                details_placeholder: DETAILS_PLACEHOLDER.into(),
                show_done_button: model.is_details_field_focused,
                done_label: DONE_LABEL.into(),
                submit_enabled: model.can_submit(),
                submit_label: if model.is_submitting {
                    SUBMITTING_LABEL
                } else {
                    SUBMIT_LABEL
                }
                .into(),
                is_submitting: model.is_submitting,
            }
        }

        /// Hidden on the report form and under the success overlay.
        fn bottom_nav(screen: Screen) -> Option<BottomNavView> {
            let active = match screen {
                Screen::Map => NavTab::Home,
                Screen::Menu => NavTab::Plus,
                Screen::Report | Screen::Success => return None,
            };

            Some(BottomNavView {
                tabs: NavTab::ALL.to_vec(),
                active,
            })
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            tracing::debug!(
                event = event.name(),
                user = event.is_user_initiated(),
                screen = model.screen.as_str(),
                "update"
            );

            match event {
                Event::Noop => {}

                Event::Navigate { target } => Self::navigate(model, caps, target),

                Event::BottomNavTapped { tab } => match tab.destination() {
                    Some(target) => Self::navigate(model, caps, target),
                    None => tracing::debug!(?tab, "tab has no destination"),
                },

                Event::MenuEntrySelected { entry } => match entry.destination() {
                    Some(target) => Self::navigate(model, caps, target),
                    None => tracing::debug!(?entry, "menu entry has no destination"),
                },

                Event::IssueDropdownToggled => {
                    model.toggle_issue_dropdown();
                    caps.render.render();
                }

                Event::IssueTypeSelected { issue } => {
                    model.select_issue(issue);
                    caps.render.render();
                }

                Event::OtherDetailsChanged { text } => {
                    model.set_other_details(text);
                    caps.render.render();
                }

                Event::DetailsFocusChanged { focused } => {
                    model.set_details_focus(focused);
                    caps.render.render();
                }

                Event::SubmitRequested => match model.begin_submission() {
                    Ok(id) => {
                        tracing::debug!(%id, delay_ms = SUBMISSION_DELAY_MS, "submission scheduled");
                        caps.delay.start(id, SUBMISSION_DELAY_MS, move |output| {
                            Event::SubmissionTimerFired { id, output }
                        });
                        caps.render.render();
                    }
                    Err(e) => tracing::debug!(error = %e, "submit ignored"),
                },

                Event::SubmissionTimerFired {
                    id,
                    output: DelayOutput::Elapsed,
                } => match model.complete_submission(id) {
                    Ok(()) => {
                        tracing::info!(
                            %id,
                            issue = ?model.draft.issue,
                            has_details = !model.draft.other_details.is_empty(),
                            "issue report submitted"
                        );
                        caps.render.render();
                    }
                    Err(e) => tracing::debug!(error = %e, "completion ignored"),
                },

                Event::SubmissionTimerFired {
                    id,
                    output: DelayOutput::Cancelled,
                } => {
                    tracing::debug!(%id, "submission timer cancelled");
                }

                Event::ResetRequested => {
                    if let Some(id) = model.reset_flow() {
                        caps.delay.cancel(id);
                    }
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let state = match model.screen {
                Screen::Map => ViewState::Map {
                    map: Self::map_view(),
                },
                Screen::Menu => ViewState::Menu {
                    menu: Self::menu_view(),
                },
                Screen::Report => ViewState::Report {
                    report: Self::report_view(model),
                },
                Screen::Success => ViewState::Success {
                    map: Self::map_view(),
                    overlay: SuccessView {
                        title: SUCCESS_TITLE.into(),
                        message: SUCCESS_MESSAGE.into(),
                        button_label: SUCCESS_BUTTON_LABEL.into(),
                    },
                },
            };

            ViewModel {
                screen: model.screen,
                state,
                bottom_nav: Self::bottom_nav(model.screen),
                can_submit: model.can_submit(),
            }
        }
    }
}
