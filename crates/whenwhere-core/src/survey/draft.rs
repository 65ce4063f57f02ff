//! Mutable survey state across the four survey pages.

use super::model::{
    FormCompletionLikelihood, GroupSize, SurveyResponses, TimeMatchValue, WhatMattersMore,
};
use crate::experience::ExperienceKind;

/// Number of survey pages (ranking, pain point, value questions, open
/// feedback).
pub const SURVEY_PAGE_COUNT: usize = 4;

/// Maximum participant-selectable pain level.
pub const MAX_PAIN_LEVEL: u8 = 10;

/// In-progress survey answers plus nested page navigation.
///
/// Back/forward movement here is the one place the flow is not strictly
/// forward; it is confined to the survey component and never leaves the
/// Survey step. `finish` consumes the draft, after which the answers
/// are immutable.
#[derive(Debug, Clone, Default)]
pub struct SurveyDraft {
    page: usize,
    ranking: Vec<ExperienceKind>,
    interface_why: String,
    pain_level: u8,
    time_match_value: Option<TimeMatchValue>,
    what_matters_more: Option<WhatMattersMore>,
    form_completion_likelihood: Option<FormCompletionLikelihood>,
    group_size: Option<GroupSize>,
    additional_thoughts: String,
}

impl SurveyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based current page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page == SURVEY_PAGE_COUNT - 1
    }

    /// Moves forward one page, clamped to the last page.
    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.page += 1;
        }
    }

    /// Moves back one page, clamped to the first page.
    pub fn back_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Toggles a kind in the preference ranking.
    ///
    /// Selecting an already-ranked kind removes it; otherwise it is
    /// appended, capped at 3 entries (adding beyond the cap is a silent
    /// no-op).
    pub fn toggle_ranking(&mut self, kind: ExperienceKind) {
        if let Some(position) = self.ranking.iter().position(|k| *k == kind) {
            self.ranking.remove(position);
        } else if self.ranking.len() < 3 {
            self.ranking.push(kind);
        }
    }

    /// Current ranking, favorite first.
    pub fn ranking(&self) -> &[ExperienceKind] {
        &self.ranking
    }

    pub fn set_interface_why(&mut self, text: impl Into<String>) {
        self.interface_why = text.into();
    }

    /// Sets the pain level; values above 10 are ignored.
    pub fn set_pain_level(&mut self, level: u8) {
        if level <= MAX_PAIN_LEVEL {
            self.pain_level = level;
        }
    }

    pub fn pain_level(&self) -> u8 {
        self.pain_level
    }

    pub fn set_time_match_value(&mut self, value: TimeMatchValue) {
        self.time_match_value = Some(value);
    }

    pub fn set_what_matters_more(&mut self, value: WhatMattersMore) {
        self.what_matters_more = Some(value);
    }

    pub fn set_form_completion_likelihood(&mut self, value: FormCompletionLikelihood) {
        self.form_completion_likelihood = Some(value);
    }

    pub fn set_group_size(&mut self, value: GroupSize) {
        self.group_size = Some(value);
    }

    pub fn set_additional_thoughts(&mut self, text: impl Into<String>) {
        self.additional_thoughts = text.into();
    }

    /// Freezes the draft into an immutable response set.
    pub fn finish(self) -> SurveyResponses {
        SurveyResponses {
            interface_ranking: self.ranking,
            interface_why: self.interface_why,
            pain_level: self.pain_level,
            time_match_value: self.time_match_value,
            what_matters_more: self.what_matters_more,
            form_completion_likelihood: self.form_completion_likelihood,
            group_size: self.group_size,
            additional_thoughts: self.additional_thoughts,
        }
    }
}
