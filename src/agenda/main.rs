use agenda::api::{AgendaApi, AgendaPaths, ConfigAction, GenerateOptions, MessageLevel};
use agenda::commands::fields::DateSlot;
use agenda::commands::generate::CancelToken;
use agenda::error::{AgendaError, Result};
use agenda::logging;
use agenda::store::fs::FileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

mod args;
mod print;
use args::{Cli, Commands, DateArg, GroupAction, SubjectAction, TeacherAction};
use print::{print_agenda, print_generation, print_messages, print_settings, print_teachers};

const HOME_ENV: &str = "AGENDA_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut api = init_api()?;

    match cli.command {
        Some(Commands::Teacher { action }) => handle_teacher(&mut api, action),
        Some(Commands::Subject { action }) => handle_subject(&mut api, action),
        Some(Commands::Group { action }) => handle_group(&mut api, action),
        Some(Commands::Set { field, text }) => {
            let result = api.set_field(&field, &text)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Date { slot, value }) => {
            let slot = match slot {
                DateArg::Start => DateSlot::Start,
                DateArg::End => DateSlot::End,
            };
            let result = api.set_date(slot, &value)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Show) | None => handle_show(&api),
        Some(Commands::Report) => {
            let result = api.field_report()?;
            for line in &result.report_lines {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Commands::Clear) => {
            let result = api.clear_fields()?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Generate {
            out,
            template,
            skip_failures,
        }) => handle_generate(
            &api,
            GenerateOptions {
                out_dir: out,
                template,
                skip_failures,
            },
        ),
        Some(Commands::Config { key, value }) => handle_config(&api, key, value),
        Some(Commands::Init) => {
            let result = api.init()?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let dirs = ProjectDirs::from("br", "escola", "agenda")
        .ok_or_else(|| AgendaError::Api("Could not determine data dir".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn init_api() -> Result<AgendaApi<FileStore>> {
    let dir = data_dir()?;
    tracing::debug!(data_dir = %dir.display(), "using data directory");
    let store = FileStore::new(dir.clone());
    Ok(AgendaApi::new(store, AgendaPaths::new(dir)))
}

fn handle_teacher(api: &mut AgendaApi<FileStore>, action: TeacherAction) -> Result<()> {
    let result = match action {
        TeacherAction::Add { name } => api.add_teacher(&name)?,
        TeacherAction::Rename { teacher, name } => api.rename_teacher(&teacher, &name)?,
        TeacherAction::Remove { teacher } => api.remove_teacher(&teacher)?,
        TeacherAction::Check { teacher } => api.mark_teacher(&teacher, true)?,
        TeacherAction::Uncheck { teacher } => api.mark_teacher(&teacher, false)?,
        TeacherAction::Missing => {
            let result = api.missing_teachers()?;
            print_teachers(&result.listed_teachers);
            result
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_subject(api: &mut AgendaApi<FileStore>, action: SubjectAction) -> Result<()> {
    let result = match action {
        SubjectAction::Add { teacher, name } => api.add_subject(&teacher, &name)?,
        SubjectAction::Rename {
            teacher,
            subject,
            name,
        } => api.rename_subject(&teacher, &subject, &name)?,
        SubjectAction::Remove { teacher, subject } => api.remove_subject(&teacher, &subject)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_group(api: &mut AgendaApi<FileStore>, action: GroupAction) -> Result<()> {
    let result = match action {
        GroupAction::Add {
            teacher,
            subject,
            label,
            days,
        } => api.add_group(&teacher, &subject, &label, &days)?,
        GroupAction::Rename {
            teacher,
            subject,
            group,
            label,
        } => api.rename_group(&teacher, &subject, &group, &label)?,
        GroupAction::Remove {
            teacher,
            subject,
            group,
        } => api.remove_group(&teacher, &subject, &group)?,
        GroupAction::Day {
            teacher,
            subject,
            group,
            day,
            off,
        } => api.set_group_day(&teacher, &subject, &group, day, !off)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &AgendaApi<FileStore>) -> Result<()> {
    let result = api.show()?;
    if let Some(agenda) = &result.agenda {
        print_agenda(agenda, &result.values);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate(api: &AgendaApi<FileStore>, options: GenerateOptions) -> Result<()> {
    let result = api.generate(&options, &CancelToken::new())?;
    print_messages(&result.messages);
    if let Some(report) = &result.generation {
        print_generation(report);
    }
    Ok(())
}

fn handle_config(
    api: &AgendaApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api.config(action)?;
    if result.has_errors() {
        let errors: Vec<&str> = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .map(|m| m.content.as_str())
            .collect();
        return Err(AgendaError::validation(errors.join("; ")));
    }
    if result.messages.is_empty() {
        if let Some(settings) = &result.settings {
            print_settings(settings);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
