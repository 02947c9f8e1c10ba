use agenda::api::{CmdMessage, MessageLevel};
use agenda::commands::generate::GenerationReport;
use agenda::config::Settings;
use agenda::model::{Agenda, Teacher};
use colored::Colorize;
use std::collections::BTreeMap;

const EMPTY_MARKER: &str = "—";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_agenda(agenda: &Agenda, values: &BTreeMap<String, String>) {
    if agenda.teachers.is_empty() {
        println!("No teachers yet.");
        return;
    }

    for teacher in &agenda.teachers {
        let delivered = values.get(&teacher.checkbox_key()).map(String::as_str) == Some("true");
        let mark = if delivered { "✓".green() } else { " ".normal() };
        println!(
            "{} {} {}",
            mark,
            teacher.id.yellow(),
            teacher.display_name().bold()
        );
        for subject in &teacher.subjects {
            println!("    {} {}", subject.id.yellow(), subject.display_name());
            for group in &subject.groups {
                println!("        {} {}", group.id.yellow(), group.display_label());
                for day in group.sorted_days() {
                    println!("            {}", day.label.cyan());
                    print_field("Conteúdo", &day.fields.content_id, values);
                    print_field("Atividade", &day.fields.homework_id, values);
                }
            }
        }
    }
}

fn print_field(name: &str, id: &str, values: &BTreeMap<String, String>) {
    let text = values
        .get(id)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty());
    match text {
        Some(text) => println!("                {} {}: {}", id.dimmed(), name, text),
        None => println!(
            "                {} {}: {}",
            id.dimmed(),
            name,
            EMPTY_MARKER.dimmed()
        ),
    }
}

pub(super) fn print_teachers(teachers: &[Teacher]) {
    for teacher in teachers {
        println!("{} {}", teacher.id.yellow(), teacher.display_name());
    }
}

pub(super) fn print_settings(settings: &Settings) {
    for (key, value) in settings.entries() {
        println!("{} = {}", key, value);
    }
}

pub(super) fn print_generation(report: &GenerationReport) {
    for artifact in &report.artifacts {
        println!("  {}", artifact.filename);
    }
    for key in &report.skipped_empty {
        println!("  {} {}", "skipped (no lessons):".dimmed(), key.dimmed());
    }
}
