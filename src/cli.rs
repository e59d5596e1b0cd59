use anyhow::{bail, Context, Result};

use crate::api::{ChatApi, HttpClient};
use crate::config::AppConfig;
use crate::model::patient::PatientDraft;

/// Subcommand selected on the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Tui,
    Patients,
    Add(Vec<String>),
    Help,
    Unknown(String),
}

impl Command {
    pub fn parse(args: &[String]) -> Self {
        match args.first().map(String::as_str) {
            None => Command::Tui,
            Some("patients") => Command::Patients,
            Some("add") => Command::Add(args[1..].to_vec()),
            Some("help" | "-h" | "--help") => Command::Help,
            Some(other) => Command::Unknown(other.to_string()),
        }
    }

    /// Help and usage errors print without touching config or the log file.
    pub fn needs_setup(&self) -> bool {
        matches!(self, Command::Tui | Command::Patients | Command::Add(_))
    }
}

fn client(config: &AppConfig) -> HttpClient {
    HttpClient::new(config.base_url(), &config.proxy_origin)
}

/// `medchat patients`: print the patient list.
pub async fn handle_patients(config: &AppConfig) -> Result<()> {
    let patients = client(config).list_patients().await?;
    if patients.is_empty() {
        println!("No patients.");
        return Ok(());
    }
    for patient in patients {
        match &patient.notes {
            Some(notes) => println!("{}  {}  — {notes}", patient.id, patient.label()),
            None => println!("{}  {}", patient.id, patient.label()),
        }
    }
    Ok(())
}

/// `medchat add`: create or update a patient and print the saved record.
pub async fn handle_add(config: &AppConfig, args: &[String]) -> Result<()> {
    let draft = parse_add_args(args)?;
    let patient = client(config).upsert_patient(&draft).await?;
    println!("Saved {}: {}", patient.id, patient.label());
    Ok(())
}

/// Parse `medchat add` arguments into a patient draft.
///
/// Supported forms:
///   medchat add Jane Doe
///   medchat add "Jane Doe" --age 42 --notes "penicillin allergy"
///   medchat add "Jane Doe" --id p1
pub fn parse_add_args(args: &[String]) -> Result<PatientDraft> {
    if args.is_empty() {
        bail!("Usage: medchat add <name> [--age <years>] [--notes <text>] [--id <id>]\n\nExamples:\n  medchat add \"Jane Doe\"\n  medchat add \"Jane Doe\" --age 42 --notes \"penicillin allergy\"");
    }

    let mut name_parts: Vec<String> = Vec::new();
    let mut draft = PatientDraft::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            flag @ ("-a" | "--age" | "-n" | "--notes" | "--id") => {
                i += 1;
                let value = args
                    .get(i)
                    .with_context(|| format!("Missing value for {flag} flag"))?;
                match flag {
                    "-a" | "--age" => {
                        draft.age = Some(
                            value
                                .parse()
                                .with_context(|| format!("Invalid age: {value}"))?,
                        );
                    }
                    "-n" | "--notes" => draft.notes = Some(value.clone()),
                    _ => draft.id = Some(value.clone()),
                }
            }
            _ => name_parts.push(args[i].clone()),
        }
        i += 1;
    }

    draft.name = name_parts.join(" ");
    if draft.name.trim().is_empty() {
        bail!("Patient name cannot be empty");
    }

    Ok(draft)
}

pub fn print_help() {
    println!("medchat — terminal client for the two-agent care assistant\n");
    println!("USAGE:");
    println!("  medchat                 Launch the chat UI");
    println!("  medchat patients        List patients");
    println!("  medchat add <name>      Create or update a patient");
    println!();
    println!("ADD OPTIONS:");
    println!("  -a, --age <years>   Patient age");
    println!("  -n, --notes <text>  Free-text notes");
    println!("      --id <id>       Update the patient with this id");
    println!();
    println!("ENVIRONMENT:");
    println!("  MEDCHAT_BACKEND_URL  Backend origin (default: /api via the dev proxy)");
    println!("  MEDCHAT_LOG          Log filter, e.g. debug");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_dispatch() {
        assert_eq!(Command::parse(&args(&[])), Command::Tui);
        assert_eq!(Command::parse(&args(&["patients"])), Command::Patients);
        assert_eq!(
            Command::parse(&args(&["add", "Jane", "--age", "42"])),
            Command::Add(args(&["Jane", "--age", "42"]))
        );
        assert_eq!(
            Command::parse(&args(&["frobnicate"])),
            Command::Unknown("frobnicate".into())
        );
    }

    #[test]
    fn help_needs_no_setup() {
        for flag in ["help", "-h", "--help"] {
            let command = Command::parse(&args(&[flag]));
            assert_eq!(command, Command::Help);
            assert!(!command.needs_setup());
        }
        assert!(!Command::parse(&args(&["bogus"])).needs_setup());
        assert!(Command::parse(&args(&[])).needs_setup());
        assert!(Command::parse(&args(&["patients"])).needs_setup());
    }

    #[test]
    fn parse_simple_name() {
        let draft = parse_add_args(&args(&["Jane Doe"])).unwrap();
        assert_eq!(draft, PatientDraft::named("Jane Doe"));
    }

    #[test]
    fn parse_multi_word_name() {
        let draft = parse_add_args(&args(&["Jane", "Doe"])).unwrap();
        assert_eq!(draft.name, "Jane Doe");
    }

    #[test]
    fn parse_all_flags() {
        let draft = parse_add_args(&args(&[
            "Jane",
            "--age",
            "42",
            "--notes",
            "penicillin allergy",
            "--id",
            "p1",
        ]))
        .unwrap();
        assert_eq!(draft.name, "Jane");
        assert_eq!(draft.age, Some(42));
        assert_eq!(draft.notes.as_deref(), Some("penicillin allergy"));
        assert_eq!(draft.id.as_deref(), Some("p1"));
    }

    #[test]
    fn parse_short_flags_between_name_words() {
        let draft = parse_add_args(&args(&["Jane", "-a", "7", "Doe", "-n", "asthma"])).unwrap();
        assert_eq!(draft.name, "Jane Doe");
        assert_eq!(draft.age, Some(7));
        assert_eq!(draft.notes.as_deref(), Some("asthma"));
    }

    #[test]
    fn parse_empty_args_fails() {
        assert!(parse_add_args(&args(&[])).is_err());
    }

    #[test]
    fn parse_only_flags_fails() {
        let err = parse_add_args(&args(&["--age", "42"])).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn parse_missing_value_fails() {
        let err = parse_add_args(&args(&["Jane", "--notes"])).unwrap_err();
        assert!(err.to_string().contains("Missing value for --notes"));
    }

    #[test]
    fn parse_bad_age_fails() {
        let err = parse_add_args(&args(&["Jane", "--age", "old"])).unwrap_err();
        assert!(err.to_string().contains("Invalid age"));
    }

    #[test]
    fn parse_unicode_name() {
        let draft = parse_add_args(&args(&["José Müller"])).unwrap();
        assert_eq!(draft.name, "José Müller");
    }
}
