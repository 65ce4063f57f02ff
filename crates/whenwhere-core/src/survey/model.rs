//! Survey response model and enumerated answer choices.
//!
//! The answer enums carry the exact participant-facing copy as labels;
//! the serialized form is the snake_case tag, so copy edits never break
//! previously collected records.

use crate::experience::ExperienceKind;
use serde::{Deserialize, Serialize};

/// "If a tool ONLY helped find a time everyone's free (no restaurant
/// suggestions), would that be useful?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMatchValue {
    TimeIsHardestPart,
    WantRestaurantHelpToo,
    NeedFullPackage,
    CanFigureTimingAlone,
}

impl TimeMatchValue {
    pub const ALL: [TimeMatchValue; 4] = [
        TimeMatchValue::TimeIsHardestPart,
        TimeMatchValue::WantRestaurantHelpToo,
        TimeMatchValue::NeedFullPackage,
        TimeMatchValue::CanFigureTimingAlone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeMatchValue::TimeIsHardestPart => "Yes — finding a time is the hardest part",
            TimeMatchValue::WantRestaurantHelpToo => {
                "Somewhat — but I'd want restaurant help too"
            }
            TimeMatchValue::NeedFullPackage => "Not really — I need the full package",
            TimeMatchValue::CanFigureTimingAlone => "No — I can figure out timing on my own",
        }
    }
}

/// "What matters MORE when planning group meals?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhatMattersMore {
    FindingTime,
    RestaurantRecommendations,
    BothEqually,
    Neither,
}

impl WhatMattersMore {
    pub const ALL: [WhatMattersMore; 4] = [
        WhatMattersMore::FindingTime,
        WhatMattersMore::RestaurantRecommendations,
        WhatMattersMore::BothEqually,
        WhatMattersMore::Neither,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WhatMattersMore::FindingTime => "Finding a time that works for everyone",
            WhatMattersMore::RestaurantRecommendations => {
                "Getting great restaurant recommendations"
            }
            WhatMattersMore::BothEqually => "Both equally",
            WhatMattersMore::Neither => "Neither — I just text my friends",
        }
    }
}

/// "If a friend sent you a link to fill out a quick dining preferences
/// form, how likely would you fill it out?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormCompletionLikelihood {
    Definitely,
    Probably,
    Maybe,
    Unlikely,
}

impl FormCompletionLikelihood {
    pub const ALL: [FormCompletionLikelihood; 4] = [
        FormCompletionLikelihood::Definitely,
        FormCompletionLikelihood::Probably,
        FormCompletionLikelihood::Maybe,
        FormCompletionLikelihood::Unlikely,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormCompletionLikelihood::Definitely => "Definitely — if it's quick",
            FormCompletionLikelihood::Probably => "Probably — depends on how long it takes",
            FormCompletionLikelihood::Maybe => "Maybe — I'd need convincing",
            FormCompletionLikelihood::Unlikely => "Unlikely — I'd rather just text",
        }
    }
}

/// "What group size do you usually coordinate dining for?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSize {
    Two,
    ThreeToFour,
    FiveToSix,
    SevenPlus,
}

impl GroupSize {
    pub const ALL: [GroupSize; 4] = [
        GroupSize::Two,
        GroupSize::ThreeToFour,
        GroupSize::FiveToSix,
        GroupSize::SevenPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GroupSize::Two => "2 people (date/1-on-1)",
            GroupSize::ThreeToFour => "3-4 people",
            GroupSize::FiveToSix => "5-6 people",
            GroupSize::SevenPlus => "7+ people",
        }
    }
}

/// Completed follow-up survey answers.
///
/// Built incrementally by [`SurveyDraft`](super::SurveyDraft) across
/// four pages; immutable once handed to the response aggregator.
/// Unanswered single-choice questions stay `None`; free-text answers
/// default to empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponses {
    /// Preference ranking: up to 3 distinct kinds, favorite first.
    pub interface_ranking: Vec<ExperienceKind>,
    pub interface_why: String,
    /// 0 means unanswered; participant-selectable values are 1..=10.
    pub pain_level: u8,
    pub time_match_value: Option<TimeMatchValue>,
    pub what_matters_more: Option<WhatMattersMore>,
    pub form_completion_likelihood: Option<FormCompletionLikelihood>,
    pub group_size: Option<GroupSize>,
    pub additional_thoughts: String,
}
