//! Scripted content models for the three experience runners.
//!
//! Pure data plus a couple of small derivation helpers (time-slot
//! generation); all pacing lives in the runners and the scheduler.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One scripted bot turn in the chat experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompt {
    pub message: String,
    /// Tap-to-answer suggestions shown under the message.
    pub quick_replies: Vec<String>,
    /// Whether a free-text input is offered alongside the quick replies.
    pub free_input: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
}

/// Who is "speaking" in the simulated voice conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Assistant,
    User,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Assistant => "Assistant",
            Speaker::User => "You",
        }
    }
}

/// One transcript line of the voice playback, revealed `delay` after
/// playback start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceLine {
    pub speaker: Speaker,
    pub text: String,
    #[serde(with = "duration_millis")]
    pub delay: Duration,
}

/// A single input on a form section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// What kind of input a form field renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text { placeholder: String },
    LongText { placeholder: String },
    SingleChoice { options: Vec<String> },
    MultiChoice { options: Vec<String> },
    /// Day-of-month toggles for the current month.
    DateGrid,
    /// Time-slot toggles derived from the selected meal types.
    TimeSlots,
}

/// One page of the multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSection {
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<FormField>,
}

/// Intro-screen copy for one experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroCopy {
    pub title: String,
    pub description: String,
    pub detail: String,
}

/// Meal types selectable on the form's timing section. Each maps to the
/// hour range its time slots are generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Brunch,
    Lunch,
    Dinner,
    Drinks,
}

impl MealType {
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::Brunch,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Drinks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Brunch => "Brunch",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Drinks => "Drinks",
        }
    }

    /// Start hour (inclusive) and end hour (exclusive) for slot
    /// generation, in 24-hour time.
    pub fn hour_range(&self) -> (u8, u8) {
        match self {
            MealType::Breakfast => (7, 10),
            MealType::Brunch => (10, 14),
            MealType::Lunch => (11, 15),
            MealType::Dinner => (17, 22),
            MealType::Drinks => (16, 24),
        }
    }
}

/// Generates 15-minute time-slot labels for the selected meals.
///
/// Slots are produced meal by meal in canonical meal order, formatted
/// as 12-hour labels ("7:00 AM", "12:30 PM"), and de-duplicated while
/// preserving first-seen order, matching overlapping meal ranges like
/// lunch and brunch.
pub fn time_slots(selected: &[MealType]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut slots = Vec::new();
    for meal in MealType::ALL {
        if !selected.contains(&meal) {
            continue;
        }
        let (start, end) = meal.hour_range();
        for hour in start..end {
            for minute in [0u8, 15, 30, 45] {
                let display_hour = if hour > 12 { hour - 12 } else { hour };
                let suffix = if hour >= 12 { "PM" } else { "AM" };
                let label = format!("{display_hour}:{minute:02} {suffix}");
                if seen.insert(label.clone()) {
                    slots.push(label);
                }
            }
        }
    }
    slots
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakfast_slots_span_range() {
        let slots = time_slots(&[MealType::Breakfast]);
        assert_eq!(slots.first().map(String::as_str), Some("7:00 AM"));
        assert_eq!(slots.last().map(String::as_str), Some("9:45 AM"));
        // 3 hours at 4 slots per hour.
        assert_eq!(slots.len(), 12);
    }

    #[test]
    fn test_noon_and_afternoon_labels() {
        let slots = time_slots(&[MealType::Brunch]);
        assert!(slots.contains(&"12:00 PM".to_string()));
        assert!(slots.contains(&"1:45 PM".to_string()));
        assert!(slots.contains(&"11:30 AM".to_string()));
    }

    #[test]
    fn test_overlapping_meals_are_deduplicated() {
        // Dinner is 17-22, drinks are 16-24; the overlap appears once.
        let slots = time_slots(&[MealType::Dinner, MealType::Drinks]);
        let unique: std::collections::HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len());
        // Dinner slots come first (canonical order), so the list starts
        // at 5 PM and the drinks-only 4 PM hour follows after.
        assert_eq!(slots.first().map(String::as_str), Some("5:00 PM"));
        assert!(slots.contains(&"4:00 PM".to_string()));
        assert!(slots.contains(&"11:45 PM".to_string()));
    }

    #[test]
    fn test_no_meals_no_slots() {
        assert!(time_slots(&[]).is_empty());
    }
}
