use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{load_agenda, AgendaStore};

const HEADER: &[&str] = &[
    "RELATÓRIO DE CAMPOS DA AGENDA",
    "--------------------------------",
    "Use os códigos entre {{ }} no Word.",
    "",
    "Datas:",
    "- campoData1  | Data inicial | {{campoData1}}",
    "- campoData2  | Data final   | {{campoData2}}",
    "",
];

/// Lists every field id with where it lives in the tree and the placeholder
/// a template would use for it. Days appear in stored order.
pub fn run<S: AgendaStore>(store: &S) -> Result<CmdResult> {
    let agenda = load_agenda(store);
    let mut lines: Vec<String> = HEADER.iter().map(|l| l.to_string()).collect();

    for teacher in &agenda.teachers {
        for subject in &teacher.subjects {
            for group in &subject.groups {
                let path = format!(
                    "{} > {} > {}",
                    teacher.display_name(),
                    subject.display_name(),
                    group.display_label()
                );
                for day in &group.days {
                    for (id, part) in [
                        (&day.fields.content_id, "Conteúdo"),
                        (&day.fields.homework_id, "Atividade"),
                    ] {
                        lines.push(format!(
                            "{} | {} > {} > {} | {{{{{}}}}}",
                            id, path, day.label, part, id
                        ));
                    }
                }
            }
        }
    }

    Ok(CmdResult::default().with_report_lines(lines))
}
