use serde::{Deserialize, Serialize};

use crate::capabilities::DelayOutput;
use crate::model::{IssueType, MenuEntry, NavTab, Screen, SubmissionId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub enum Event {
    #[default]
    Noop,

    // Navigation
    Navigate {
        target: Screen,
    },
    BottomNavTapped {
        tab: NavTab,
    },
    MenuEntrySelected {
        entry: MenuEntry,
    },

    // Report form
    IssueDropdownToggled,
    IssueTypeSelected {
        issue: IssueType,
    },
    OtherDetailsChanged {
        text: String,
    },
    DetailsFocusChanged {
        focused: bool,
    },
    SubmitRequested,

    // Success overlay
    ResetRequested,

    // Capability responses
    #[serde(skip)]
    SubmissionTimerFired {
        id: SubmissionId,
        output: DelayOutput,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Navigate { .. } => "navigate",
            Self::BottomNavTapped { .. } => "bottom_nav_tapped",
            Self::MenuEntrySelected { .. } => "menu_entry_selected",
            Self::IssueDropdownToggled => "issue_dropdown_toggled",
            Self::IssueTypeSelected { .. } => "issue_type_selected",
            Self::OtherDetailsChanged { .. } => "other_details_changed",
            Self::DetailsFocusChanged { .. } => "details_focus_changed",
            Self::SubmitRequested => "submit_requested",
            Self::ResetRequested => "reset_requested",
            Self::SubmissionTimerFired { .. } => "submission_timer_fired",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(self, Self::Noop | Self::SubmissionTimerFired { .. })
    }
}
