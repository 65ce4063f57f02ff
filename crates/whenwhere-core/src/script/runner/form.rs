//! Multi-step form runner.

use super::RunnerOutcome;
use crate::experience::ExperienceKind;
use crate::script::model::{FormSection, MealType, time_slots};

const NO_PREFERENCE: &str = "No Preference";

/// Drives the three-section preferences form.
///
/// Everything entered here is sample data for the walkthrough and is
/// display-only; none of it feeds the survey. Every path reaches the
/// done affordance on the last section, including an entirely empty
/// form.
#[derive(Debug)]
pub struct FormRunner {
    sections: Vec<FormSection>,
    page: usize,
    pub event_name: String,
    pub your_name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub description: String,
    selected_meals: Vec<MealType>,
    selected_dates: Vec<u8>,
    selected_times: Vec<String>,
    pub neighborhoods: String,
    selected_cuisines: Vec<String>,
    selected_vibes: Vec<String>,
    pub specific_restaurants: String,
    pub price_range: Option<String>,
    pub dietary_restrictions: String,
}

impl FormRunner {
    pub fn new(sections: Vec<FormSection>) -> Self {
        Self {
            sections,
            page: 0,
            event_name: String::new(),
            your_name: String::new(),
            email: String::new(),
            phone: String::new(),
            city: None,
            description: String::new(),
            selected_meals: Vec::new(),
            selected_dates: Vec::new(),
            selected_times: Vec::new(),
            neighborhoods: String::new(),
            selected_cuisines: Vec::new(),
            selected_vibes: Vec::new(),
            specific_restaurants: String::new(),
            price_range: None,
            dietary_restrictions: String::new(),
        }
    }

    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn current_section(&self) -> Option<&FormSection> {
        self.sections.get(self.page)
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.sections.len()
    }

    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.page += 1;
        }
    }

    pub fn back_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn toggle_meal(&mut self, meal: MealType) {
        toggle(&mut self.selected_meals, meal);
    }

    pub fn selected_meals(&self) -> &[MealType] {
        &self.selected_meals
    }

    /// Toggles a day-of-month selection; out-of-range days are ignored.
    pub fn toggle_date(&mut self, day: u8) {
        if (1..=31).contains(&day) {
            toggle(&mut self.selected_dates, day);
        }
    }

    pub fn selected_dates(&self) -> &[u8] {
        &self.selected_dates
    }

    pub fn toggle_time(&mut self, slot: &str) {
        toggle(&mut self.selected_times, slot.to_string());
    }

    pub fn selected_times(&self) -> &[String] {
        &self.selected_times
    }

    /// Time slots offered on the timing section, derived from the
    /// currently selected meal types.
    pub fn available_times(&self) -> Vec<String> {
        time_slots(&self.selected_meals)
    }

    /// Toggles a cuisine. "No Preference" is mutually exclusive with
    /// specific cuisines: picking it clears the rest, and picking a
    /// specific cuisine drops it.
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        toggle_with_no_preference(&mut self.selected_cuisines, cuisine);
    }

    pub fn selected_cuisines(&self) -> &[String] {
        &self.selected_cuisines
    }

    /// Toggles a vibe, with the same "No Preference" exclusivity.
    pub fn toggle_vibe(&mut self, vibe: &str) {
        toggle_with_no_preference(&mut self.selected_vibes, vibe);
    }

    pub fn selected_vibes(&self) -> &[String] {
        &self.selected_vibes
    }

    /// Consumes the runner, signalling completion exactly once.
    pub fn finish(self) -> RunnerOutcome {
        let mut captured = Vec::new();
        for text in [
            self.event_name,
            self.your_name,
            self.neighborhoods,
            self.specific_restaurants,
            self.dietary_restrictions,
        ] {
            if !text.trim().is_empty() {
                captured.push(text);
            }
        }
        RunnerOutcome {
            kind: ExperienceKind::Form,
            captured_answers: captured,
        }
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(position) = items.iter().position(|i| *i == item) {
        items.remove(position);
    } else {
        items.push(item);
    }
}

fn toggle_with_no_preference(items: &mut Vec<String>, option: &str) {
    if option == NO_PREFERENCE {
        items.clear();
        items.push(NO_PREFERENCE.to_string());
        return;
    }
    items.retain(|i| i != NO_PREFERENCE);
    toggle(items, option.to_string());
}
