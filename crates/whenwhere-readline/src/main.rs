//! Terminal front end for the When & Where walkthrough.
//!
//! Renders whatever step the session orchestrator says is current:
//! welcome form, three intro + experience pairs in the randomized
//! order, the four-page follow-up survey, and the thanks screen.
//! Scripted pacing comes from the logical scheduler; this front end
//! maps logical delays to real sleeps.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use whenwhere_application::StudyUseCase;
use whenwhere_core::experience::ExperienceKind;
use whenwhere_core::script::preset::{self, VOICE_AUTOSTART_DELAY};
use whenwhere_core::script::{
    ChatRole, ChatRunner, FieldKind, FormRunner, FormSection, LogicalScheduler, MealType,
    RunnerInstance, Speaker, VoiceRunner,
};
use whenwhere_core::session::{Slot, StepState};
use whenwhere_core::survey::{
    FormCompletionLikelihood, GroupSize, MAX_PAIN_LEVEL, SurveyDraft, TimeMatchValue,
    WhatMattersMore,
};
use whenwhere_infrastructure::JsonSubmissionStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = JsonSubmissionStore::at_default_location()
        .context("failed to resolve submissions path")?;
    let mut usecase = StudyUseCase::new(Arc::new(store));
    let mut rng = StdRng::from_entropy();
    usecase.begin_session(&mut rng);

    let mut rl = DefaultEditor::new()?;

    loop {
        match usecase.current_step() {
            StepState::Welcome => run_welcome(&mut rl, &mut usecase)?,
            StepState::Intro { slot } => run_intro(&mut rl, &mut usecase, slot)?,
            StepState::Experience { .. } => {
                run_experience(&mut rl, &mut usecase, &mut rng).await?;
            }
            StepState::Survey => run_survey(&mut rl, &mut usecase).await?,
            StepState::Thanks => {
                render_thanks(&usecase);
                break;
            }
        }
    }

    Ok(())
}

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<String> {
    match rl.readline(prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("{}", "Walkthrough aborted.".yellow());
            bail!("aborted by participant");
        }
        Err(err) => Err(err.into()),
    }
}

/// Parses "1,3,4"-style input into zero-based indices within bounds.
fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
        .collect()
}

fn print_options(options: &[String]) {
    for (index, option) in options.iter().enumerate() {
        println!("  {} {}", format!("{}.", index + 1).bright_black(), option);
    }
}

// ===== Welcome =====

fn run_welcome(rl: &mut DefaultEditor, usecase: &mut StudyUseCase) -> Result<()> {
    println!();
    println!("{}", "=== When & Where ===".bright_magenta().bold());
    println!(
        "{}",
        "A short research walkthrough: you'll try three ways of planning a meal with friends, then answer a quick survey."
            .bright_black()
    );
    println!();

    loop {
        let name = read_line(rl, "Your name: ")?;
        let email = read_line(rl, "Your email: ")?;
        match usecase.submit_identity(&name, &email) {
            Ok(()) => return Ok(()),
            Err(errors) => {
                if let Some(message) = errors.name {
                    println!("{}", message.red());
                }
                if let Some(message) = errors.email {
                    println!("{}", message.red());
                }
            }
        }
    }
}

// ===== Intro =====

fn run_intro(rl: &mut DefaultEditor, usecase: &mut StudyUseCase, slot: Slot) -> Result<()> {
    let Some(kind) = usecase.current_experience() else {
        usecase.start_experience();
        return Ok(());
    };
    let copy = preset::intro_copy(kind);

    println!();
    println!(
        "{}",
        format!("--- Experience {} of 3: {} ---", slot.number(), copy.title)
            .bright_cyan()
            .bold()
    );
    println!("{}", copy.description);
    println!("{}", copy.detail.bright_black());
    println!();
    read_line(rl, "Press Enter to begin... ")?;
    usecase.start_experience();
    Ok(())
}

// ===== Experiences =====

async fn run_experience(
    rl: &mut DefaultEditor,
    usecase: &mut StudyUseCase,
    rng: &mut StdRng,
) -> Result<()> {
    match usecase.runner() {
        Some(RunnerInstance::Chat(chat)) => run_chat(rl, chat, rng).await?,
        Some(RunnerInstance::Voice(voice)) => run_voice(rl, voice).await?,
        Some(RunnerInstance::Form(form)) => run_form(rl, form)?,
        None => {}
    }
    usecase.complete_experience();
    Ok(())
}

fn print_chat_messages(chat: &ChatRunner, printed: &mut usize) {
    for message in &chat.transcript()[*printed..] {
        match message.role {
            ChatRole::Bot => println!("{} {}", "bot:".bright_blue().bold(), message.text),
            ChatRole::User => println!("{} {}", "you:".green().bold(), message.text),
        }
    }
    *printed = chat.transcript().len();
}

/// Sleeps through pending typing delays, applying fired events.
async fn pump_chat(chat: &mut ChatRunner, scheduler: &mut LogicalScheduler, printed: &mut usize) {
    while let Some(due) = scheduler.next_due() {
        println!("{}", "  ...".bright_black());
        tokio::time::sleep(due).await;
        for event in scheduler.advance(due) {
            chat.handle(&event);
        }
        print_chat_messages(chat, printed);
    }
}

async fn run_chat(rl: &mut DefaultEditor, chat: &mut ChatRunner, rng: &mut StdRng) -> Result<()> {
    let mut scheduler = LogicalScheduler::new();
    let mut printed = 0;

    chat.start(&mut scheduler);
    pump_chat(chat, &mut scheduler, &mut printed).await;

    while !chat.is_complete() {
        if let Some(replies) = chat.quick_replies() {
            let replies = replies.to_vec();
            print_options(&replies);
            let prompt = match chat.free_input() {
                Some(placeholder) => format!("Pick a number or type ({placeholder}): "),
                None => "Pick a number: ".to_string(),
            };
            let input = read_line(rl, &prompt)?;
            let reply = match parse_selection(&input, replies.len()).first() {
                Some(&index) => replies[index].clone(),
                None => input,
            };
            chat.reply(&reply, rng, &mut scheduler);
            print_chat_messages(chat, &mut printed);
            pump_chat(chat, &mut scheduler, &mut printed).await;
        }
    }

    println!();
    read_line(rl, "Conversation complete. Press Enter to continue... ")?;
    Ok(())
}

async fn run_voice(rl: &mut DefaultEditor, voice: &mut VoiceRunner) -> Result<()> {
    println!("{}", "The voice demo starts automatically...".bright_black());
    tokio::time::sleep(VOICE_AUTOSTART_DELAY).await;

    let mut scheduler = LogicalScheduler::new();
    let mut printed = 0;
    voice.start(&mut scheduler);

    while let Some(due) = scheduler.next_due() {
        tokio::time::sleep(due).await;
        for event in scheduler.advance(due) {
            voice.handle(&event);
        }
        for line in &voice.visible_lines()[printed..] {
            let speaker = format!("{}:", line.speaker.label());
            match line.speaker {
                Speaker::Assistant => println!("{} {}", speaker.bright_blue().bold(), line.text),
                Speaker::User => println!("{} {}", speaker.green().bold(), line.text),
            }
        }
        printed = voice.visible_lines().len();
    }

    println!();
    read_line(rl, "Demo finished. Press Enter to continue... ")?;
    Ok(())
}

fn run_form(rl: &mut DefaultEditor, form: &mut FormRunner) -> Result<()> {
    loop {
        let Some(section) = form.current_section().cloned() else {
            break;
        };
        render_form_section(rl, form, &section)?;

        if form.is_last_page() {
            read_line(rl, "Form complete. Press Enter to continue... ")?;
            break;
        }
        let input = read_line(rl, "Enter to continue, 'b' to go back: ")?;
        if input.eq_ignore_ascii_case("b") {
            form.back_page();
        } else {
            form.next_page();
        }
    }
    Ok(())
}

fn render_form_section(
    rl: &mut DefaultEditor,
    form: &mut FormRunner,
    section: &FormSection,
) -> Result<()> {
    println!();
    println!("{}", format!("--- {} ---", section.title).bright_cyan().bold());
    println!("{}", section.subtitle.bright_black());

    for field in &section.fields {
        let marker = if field.required { "*" } else { "" };
        match &field.kind {
            FieldKind::Text { placeholder } | FieldKind::LongText { placeholder } => {
                println!();
                println!("{}{} {}", field.label.bold(), marker, format!("({placeholder})").bright_black());
                let value = read_line(rl, "> ")?;
                set_form_text(form, &field.label, value);
            }
            FieldKind::SingleChoice { options } => {
                println!();
                println!("{}{}", field.label.bold(), marker);
                print_options(options);
                let input = read_line(rl, "Pick a number (or Enter to skip): ")?;
                if let Some(&index) = parse_selection(&input, options.len()).first() {
                    set_form_choice(form, &field.label, options[index].clone());
                }
            }
            FieldKind::MultiChoice { options } => {
                println!();
                println!("{}{}", field.label.bold(), marker);
                print_options(options);
                let input = read_line(rl, "Pick numbers, comma-separated: ")?;
                for index in parse_selection(&input, options.len()) {
                    toggle_form_choice(form, &field.label, &options[index]);
                }
            }
            FieldKind::DateGrid => {
                println!();
                println!("{}{} {}", field.label.bold(), marker, "(days of this month)".bright_black());
                let input = read_line(rl, "Pick days 1-31, comma-separated: ")?;
                for day in parse_selection(&input, 31) {
                    form.toggle_date(day as u8 + 1);
                }
            }
            FieldKind::TimeSlots => {
                let slots = form.available_times();
                if slots.is_empty() {
                    println!();
                    println!("{}", "Select a meal type first to see time slots.".bright_black());
                    continue;
                }
                println!();
                println!("{}{}", field.label.bold(), marker);
                print_options(&slots);
                let input = read_line(rl, "Pick numbers, comma-separated: ")?;
                for index in parse_selection(&input, slots.len()) {
                    form.toggle_time(&slots[index]);
                }
            }
        }
    }
    Ok(())
}

fn set_form_text(form: &mut FormRunner, label: &str, value: String) {
    match label {
        "Event Name" => form.event_name = value,
        "Your Name" => form.your_name = value,
        "Email" => form.email = value,
        "Phone" => form.phone = value,
        "Event Description" => form.description = value,
        "Preferred Neighborhoods" => form.neighborhoods = value,
        "Specific Restaurant Requests" => form.specific_restaurants = value,
        "Dietary Restrictions" => form.dietary_restrictions = value,
        _ => {}
    }
}

fn set_form_choice(form: &mut FormRunner, label: &str, value: String) {
    match label {
        "City" => form.city = Some(value),
        "Price Range" => form.price_range = Some(value),
        _ => {}
    }
}

fn toggle_form_choice(form: &mut FormRunner, label: &str, option: &str) {
    match label {
        "Meal Type" => {
            if let Some(meal) = MealType::ALL.iter().find(|m| m.label() == option) {
                form.toggle_meal(*meal);
            }
        }
        "Cuisine Types" => form.toggle_cuisine(option),
        "Restaurant Vibes" => form.toggle_vibe(option),
        _ => {}
    }
}

// ===== Survey =====

async fn run_survey(rl: &mut DefaultEditor, usecase: &mut StudyUseCase) -> Result<()> {
    println!();
    println!("{}", "=== Follow-up Survey ===".bright_magenta().bold());

    let mut draft = SurveyDraft::new();
    loop {
        match draft.page() {
            0 => survey_ranking_page(rl, &mut draft)?,
            1 => survey_pain_page(rl, &mut draft)?,
            2 => survey_value_page(rl, &mut draft)?,
            _ => survey_feedback_page(rl, &mut draft)?,
        }

        if draft.is_last_page() {
            let input = read_line(rl, "Enter to submit, 'b' to go back: ")?;
            if input.eq_ignore_ascii_case("b") {
                draft.back_page();
                continue;
            }
            break;
        }
        let input = read_line(rl, "Enter to continue, 'b' to go back: ")?;
        if input.eq_ignore_ascii_case("b") {
            draft.back_page();
        } else {
            draft.next_page();
        }
    }

    if let Err(error) = usecase.submit_survey(draft.finish()).await {
        tracing::error!(%error, "survey submission failed");
    }
    Ok(())
}

fn survey_ranking_page(rl: &mut DefaultEditor, draft: &mut SurveyDraft) -> Result<()> {
    println!();
    println!("{}", "Rank the interfaces you just tried, favorite first.".bold());
    let labels: Vec<String> = ExperienceKind::ALL.iter().map(|k| k.label().to_string()).collect();
    print_options(&labels);
    let input = read_line(rl, "Pick up to 3 numbers in order, comma-separated: ")?;
    for index in parse_selection(&input, labels.len()) {
        draft.toggle_ranking(ExperienceKind::ALL[index]);
    }
    println!("{}", "Why that order?".bold());
    let why = read_line(rl, "> ")?;
    draft.set_interface_why(why);
    Ok(())
}

fn survey_pain_page(rl: &mut DefaultEditor, draft: &mut SurveyDraft) -> Result<()> {
    println!();
    println!(
        "{}",
        "How painful is coordinating group meals today? (1 = easy, 10 = nightmare)".bold()
    );
    let input = read_line(rl, &format!("1-{MAX_PAIN_LEVEL}: "))?;
    if let Ok(level) = input.parse::<u8>() {
        draft.set_pain_level(level);
    }
    Ok(())
}

fn ask_choice<T: Copy>(
    rl: &mut DefaultEditor,
    question: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
) -> Result<Option<T>> {
    println!();
    println!("{}", question.bold());
    let labels: Vec<String> = options.iter().map(|o| label(o).to_string()).collect();
    print_options(&labels);
    let input = read_line(rl, "Pick a number (or Enter to skip): ")?;
    Ok(parse_selection(&input, options.len())
        .first()
        .map(|&index| options[index]))
}

fn survey_value_page(rl: &mut DefaultEditor, draft: &mut SurveyDraft) -> Result<()> {
    if let Some(value) = ask_choice(
        rl,
        "If a tool ONLY helped find a time everyone's free (no restaurant suggestions), would that be useful?",
        &TimeMatchValue::ALL,
        TimeMatchValue::label,
    )? {
        draft.set_time_match_value(value);
    }
    if let Some(value) = ask_choice(
        rl,
        "What matters MORE when planning group meals?",
        &WhatMattersMore::ALL,
        WhatMattersMore::label,
    )? {
        draft.set_what_matters_more(value);
    }
    if let Some(value) = ask_choice(
        rl,
        "If a friend sent you a link to fill out a quick dining preferences form, how likely would you fill it out?",
        &FormCompletionLikelihood::ALL,
        FormCompletionLikelihood::label,
    )? {
        draft.set_form_completion_likelihood(value);
    }
    if let Some(value) = ask_choice(
        rl,
        "What group size do you usually coordinate dining for?",
        &GroupSize::ALL,
        GroupSize::label,
    )? {
        draft.set_group_size(value);
    }
    Ok(())
}

fn survey_feedback_page(rl: &mut DefaultEditor, draft: &mut SurveyDraft) -> Result<()> {
    println!();
    println!("{}", "Anything else you'd like to share?".bold());
    let thoughts = read_line(rl, "> ")?;
    draft.set_additional_thoughts(thoughts);
    Ok(())
}

// ===== Thanks =====

fn render_thanks(usecase: &StudyUseCase) {
    println!();
    println!("{}", "=== Thank you! ===".bright_green().bold());
    if let Some(identity) = usecase.identity() {
        println!(
            "{}",
            format!(
                "Thanks, {} — your responses are in. We'll reach out to {} if we run a follow-up.",
                identity.name, identity.email
            )
        );
    } else {
        println!("Thanks — your responses are in.");
    }
    println!(
        "{}",
        "You helped us understand how people want to plan meals together.".bright_black()
    );
}
