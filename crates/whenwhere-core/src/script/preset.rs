//! Default scripted content for the three experiences.
//!
//! All dialogue and question copy lives here as configuration-style
//! data; the runners only consume it. Pacing constants for the scripted
//! playback sit alongside the scripts they pace.

use super::model::{
    ChatPrompt, FieldKind, FormField, FormSection, IntroCopy, Speaker, VoiceLine,
};
use crate::experience::ExperienceKind;
use std::time::Duration;

/// Delay before the chatbot's greeting appears.
pub const CHAT_GREETING_DELAY: Duration = Duration::from_millis(1200);

/// Typing-indicator delay range between a reply and the next bot turn.
pub const CHAT_TYPING_DELAY_MS: std::ops::Range<u64> = 800..1600;

/// Pause before the voice demo auto-starts.
pub const VOICE_AUTOSTART_DELAY: Duration = Duration::from_millis(1500);

/// Pause after the last voice line before the done affordance appears.
pub const VOICE_WRAPUP_DELAY: Duration = Duration::from_millis(3000);

fn prompt(
    message: &str,
    quick_replies: &[&str],
    input_placeholder: Option<&str>,
) -> ChatPrompt {
    ChatPrompt {
        message: message.to_string(),
        quick_replies: quick_replies.iter().map(|r| r.to_string()).collect(),
        free_input: input_placeholder.is_some(),
        input_placeholder: input_placeholder.map(|p| p.to_string()),
    }
}

/// The scripted chatbot flow: ten bot turns covering occasion, meal,
/// location, preferences, and a closing impression question.
pub fn chat_script() -> Vec<ChatPrompt> {
    vec![
        prompt(
            "Hey! I'm your When & Where assistant. I'll help you plan the perfect meal with friends. What's the occasion?",
            &["Birthday dinner", "Casual catch-up", "Date night", "Work celebration"],
            Some("Or type your own..."),
        ),
        prompt(
            "Love it! What kind of meal are you thinking?",
            &["Breakfast", "Brunch", "Lunch", "Dinner", "Drinks"],
            None,
        ),
        prompt(
            "Great choice! Which city are you planning this in?",
            &["New York", "Los Angeles", "San Francisco", "Chicago"],
            Some("Type a city..."),
        ),
        prompt(
            "Got it! Any particular neighborhood you'd prefer?",
            &["No preference", "Downtown", "Midtown", "Uptown"],
            Some("Type a neighborhood..."),
        ),
        prompt(
            "What kind of food are you craving? You can pick a few!",
            &["Italian", "Japanese", "Mexican", "Thai", "No preference"],
            None,
        ),
        prompt(
            "What vibe are you going for?",
            &["Casual & chill", "Trendy & cool", "Romantic", "Cozy", "No preference"],
            None,
        ),
        prompt(
            "And what's your budget looking like?",
            &["Budget friendly $", "Moderate $$", "Upscale $$$", "Fine dining $$$$", "No preference"],
            None,
        ),
        prompt(
            "Any dietary restrictions I should know about?",
            &["None", "Vegetarian", "Vegan", "Gluten-free"],
            Some("Type restrictions..."),
        ),
        prompt(
            "Any specific restaurants you've been wanting to try?",
            &["No, surprise me!", "Yes, let me type one"],
            Some("Restaurant name..."),
        ),
        prompt(
            "Awesome, that's everything I need! Now I'd normally ask your friends the same questions and find the perfect match. How did this experience feel?",
            &["Easy & natural", "Pretty good", "Took too long", "Prefer something else"],
            None,
        ),
    ]
}

fn line(speaker: Speaker, text: &str, delay_ms: u64) -> VoiceLine {
    VoiceLine {
        speaker,
        text: text.to_string(),
        delay: Duration::from_millis(delay_ms),
    }
}

/// The simulated voice conversation, with per-line reveal offsets from
/// playback start.
pub fn voice_script() -> Vec<VoiceLine> {
    use Speaker::{Assistant, User};
    vec![
        line(Assistant, "Hi! I'm your When & Where voice assistant. Tell me about the meal you're planning.", 0),
        line(User, "I'm planning a birthday dinner for my friend next weekend.", 3500),
        line(Assistant, "A birthday dinner — how fun! Which city are you in?", 6000),
        line(User, "We're in New York.", 8500),
        line(Assistant, "Great! Any neighborhood preference in New York?", 10500),
        line(User, "Somewhere in the West Village or SoHo would be perfect.", 13000),
        line(Assistant, "Love those areas. What cuisine are you thinking?", 15500),
        line(User, "Italian or Japanese — we're open to either.", 18000),
        line(Assistant, "And what's the vibe? Trendy, cozy, romantic?", 20500),
        line(User, "Trendy but not too loud — we want to be able to talk.", 23000),
        line(Assistant, "Budget-wise, where are you thinking?", 25500),
        line(User, "Moderate to upscale. It's a birthday so we can splurge a little.", 28000),
        line(Assistant, "Any dietary restrictions in the group?", 31000),
        line(User, "One person is gluten-free.", 33000),
        line(Assistant, "Got it! I'll send a quick poll to your friends to find the best time and match a restaurant. You'll hear back soon!", 35000),
    ]
}

/// Cuisine options on the form's preferences section.
pub fn cuisine_options() -> Vec<String> {
    [
        "No Preference", "Italian", "Japanese", "Mexican", "Thai", "Indian",
        "Chinese", "Mediterranean", "American", "French", "Korean", "Vietnamese",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Vibe options on the form's preferences section.
pub fn vibe_options() -> Vec<String> {
    [
        "No Preference", "Romantic", "Trendy", "Casual", "Cozy",
        "Lively", "Upscale", "Outdoor", "Family-friendly",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Price-range options, from "No Preference" through fine dining.
pub fn price_options() -> Vec<String> {
    [
        "No Preference", "Budget Friendly", "Moderate", "Upscale", "Fine Dining",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Cities selectable on the form's details section.
pub fn city_options() -> Vec<String> {
    [
        "New York", "Los Angeles", "San Francisco", "Chicago", "Miami",
        "Austin", "Seattle", "Boston", "Denver", "Portland",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn text_field(label: &str, placeholder: &str, required: bool) -> FormField {
    FormField {
        label: label.to_string(),
        kind: FieldKind::Text {
            placeholder: placeholder.to_string(),
        },
        required,
    }
}

/// The three sections of the multi-step form experience.
pub fn form_sections() -> Vec<FormSection> {
    vec![
        FormSection {
            title: "Event Details".to_string(),
            subtitle: "Tell us about your gathering".to_string(),
            fields: vec![
                text_field("Event Name", "e.g. Sarah's Birthday Dinner", true),
                text_field("Your Name", "First and last name", true),
                text_field("Email", "you@email.com", true),
                text_field("Phone", "(555) 123-4567", true),
                FormField {
                    label: "City".to_string(),
                    kind: FieldKind::SingleChoice {
                        options: city_options(),
                    },
                    required: true,
                },
                FormField {
                    label: "Event Description".to_string(),
                    kind: FieldKind::LongText {
                        placeholder: "Any details your friends should know...".to_string(),
                    },
                    required: false,
                },
            ],
        },
        FormSection {
            title: "Availability & Timing".to_string(),
            subtitle: "When works for you?".to_string(),
            fields: vec![
                FormField {
                    label: "Meal Type".to_string(),
                    kind: FieldKind::MultiChoice {
                        options: super::model::MealType::ALL
                            .iter()
                            .map(|m| m.label().to_string())
                            .collect(),
                    },
                    required: true,
                },
                FormField {
                    label: "Available Dates".to_string(),
                    kind: FieldKind::DateGrid,
                    required: true,
                },
                FormField {
                    label: "Available Times".to_string(),
                    kind: FieldKind::TimeSlots,
                    required: false,
                },
            ],
        },
        FormSection {
            title: "Dining Preferences".to_string(),
            subtitle: "What are you in the mood for?".to_string(),
            fields: vec![
                text_field(
                    "Preferred Neighborhoods",
                    "Type \"no preference\" if open to anywhere",
                    true,
                ),
                FormField {
                    label: "Cuisine Types".to_string(),
                    kind: FieldKind::MultiChoice {
                        options: cuisine_options(),
                    },
                    required: true,
                },
                FormField {
                    label: "Restaurant Vibes".to_string(),
                    kind: FieldKind::MultiChoice {
                        options: vibe_options(),
                    },
                    required: true,
                },
                text_field(
                    "Specific Restaurant Requests",
                    "Any restaurants you'd love to try? Or 'no preference'",
                    false,
                ),
                FormField {
                    label: "Price Range".to_string(),
                    kind: FieldKind::SingleChoice {
                        options: price_options(),
                    },
                    required: true,
                },
                text_field(
                    "Dietary Restrictions",
                    "e.g. vegetarian, gluten-free, nut allergy...",
                    false,
                ),
            ],
        },
    ]
}

/// Intro-screen copy for each experience kind.
pub fn intro_copy(kind: ExperienceKind) -> IntroCopy {
    match kind {
        ExperienceKind::Form => IntroCopy {
            title: "Survey Form".to_string(),
            description: "A step-by-step form where you fill in your dining preferences across multiple screens.".to_string(),
            detail: "Click through the form as if you were actually planning dinner with friends. You don't need to fill in real info — just get a feel for the experience.".to_string(),
        },
        ExperienceKind::Chatbot => IntroCopy {
            title: "Chat Assistant".to_string(),
            description: "A conversational chatbot that asks you about your dining preferences through a text conversation.".to_string(),
            detail: "Chat naturally using the quick-reply buttons or type your own responses. Experience how it feels to plan through conversation.".to_string(),
        },
        ExperienceKind::Voice => IntroCopy {
            title: "Voice Assistant".to_string(),
            description: "A voice-powered assistant you'd speak to about your dining plans — like talking to Siri or Alexa.".to_string(),
            detail: "This is a simulation of what the voice experience would feel like. Watch the demo and imagine speaking your preferences aloud.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_script_has_ten_turns() {
        let script = chat_script();
        assert_eq!(script.len(), 10);
        for turn in &script {
            assert!(!turn.quick_replies.is_empty());
            assert_eq!(turn.free_input, turn.input_placeholder.is_some());
        }
    }

    #[test]
    fn test_voice_script_delays_are_monotonic() {
        let script = voice_script();
        assert_eq!(script.len(), 15);
        for pair in script.windows(2) {
            assert!(pair[0].delay < pair[1].delay);
        }
        assert_eq!(script[0].speaker, Speaker::Assistant);
        assert_eq!(script.last().unwrap().speaker, Speaker::Assistant);
    }

    #[test]
    fn test_form_has_three_sections() {
        let sections = form_sections();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Event Details");
        assert_eq!(sections[2].title, "Dining Preferences");
    }

    #[test]
    fn test_intro_copy_matches_kind_labels() {
        for kind in ExperienceKind::ALL {
            assert_eq!(intro_copy(kind).title, kind.label());
        }
    }
}
