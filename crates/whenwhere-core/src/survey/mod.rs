//! Follow-up survey domain module.
//!
//! - `model`: completed responses and enumerated answer choices
//! - `draft`: in-progress answers with nested page navigation

mod draft;
mod model;

pub use draft::{MAX_PAIN_LEVEL, SURVEY_PAGE_COUNT, SurveyDraft};
pub use model::{
    FormCompletionLikelihood, GroupSize, SurveyResponses, TimeMatchValue, WhatMattersMore,
};
