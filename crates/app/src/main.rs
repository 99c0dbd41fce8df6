use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use study_core::model::{SubjectFilter, UserId};
use study_core::quiz::{
    DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION, QuizConfig, seconds_or_default,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://studymate.sqlite3";
const DEFAULT_USER: &str = "local";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUser { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--user <id>] [--seconds <n>] [--questions <n>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>] [--user <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --user {DEFAULT_USER}");
    eprintln!("  --seconds {DEFAULT_SECONDS_PER_QUESTION}");
    eprintln!("  --questions {DEFAULT_QUESTION_COUNT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDYMATE_DB_URL, STUDYMATE_USER_ID, STUDYMATE_QUIZ_SECONDS,");
    eprintln!("  STUDYMATE_QUIZ_QUESTIONS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    user_id: UserId,
    quiz_defaults: QuizConfig,
}

/// Positive question count, falling back to the default for anything else.
fn question_count_or_default(raw: &str) -> usize {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("STUDYMATE_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL.into()), normalize_sqlite_url);
        let mut user = env("STUDYMATE_USER_ID").unwrap_or_else(|| DEFAULT_USER.into());
        let mut seconds = env("STUDYMATE_QUIZ_SECONDS")
            .as_deref()
            .map_or(DEFAULT_SECONDS_PER_QUESTION, seconds_or_default);
        let mut question_count = env("STUDYMATE_QUIZ_QUESTIONS")
            .as_deref()
            .map_or(DEFAULT_QUESTION_COUNT, question_count_or_default);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user" => user = require_value(args, "--user")?,
                "--seconds" => seconds = seconds_or_default(&require_value(args, "--seconds")?),
                "--questions" => {
                    question_count = question_count_or_default(&require_value(args, "--questions")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let user_id = UserId::new(user.clone()).map_err(|_| ArgsError::InvalidUser { raw: user })?;
        let quiz_defaults = QuizConfig::new(SubjectFilter::All, question_count, seconds)
            .unwrap_or_default();

        Ok(Self {
            db_url,
            user_id,
            quiz_defaults,
        })
    }
}

/// Rewrites a database URL to an absolute `sqlite://` path, keeping any
/// query string. In-memory URLs pass through untouched.
fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    if rest.starts_with("file:") {
        return trimmed.to_string();
    }

    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        Clock::system(),
        parsed.user_id.clone(),
        parsed.quiz_defaults.clone(),
    )
    .await?;
    tracing::info!(db = %parsed.db_url, user = %parsed.user_id, ?cmd, "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("StudyMate")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let created = services
                .flashcards()
                .seed_samples(&parsed.user_id)
                .await?;
            println!(
                "seed: created {created} flashcards for {} (db={})",
                parsed.user_id, parsed.db_url
            );
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(%err, "studymate exited with an error");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let args = parse(&[], &[]).unwrap();
        assert!(args.db_url.starts_with("sqlite:///"), "{}", args.db_url);
        assert!(args.db_url.ends_with("/studymate.sqlite3"), "{}", args.db_url);
        assert_eq!(args.user_id.as_str(), DEFAULT_USER);
        assert_eq!(args.quiz_defaults.seconds_per_question(), 15);
        assert_eq!(args.quiz_defaults.question_count(), DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--user", "alice", "--seconds", "30", "--questions", "10"],
            &[("STUDYMATE_USER_ID", "bob"), ("STUDYMATE_QUIZ_SECONDS", "20")],
        )
        .unwrap();
        assert_eq!(args.user_id.as_str(), "alice");
        assert_eq!(args.quiz_defaults.seconds_per_question(), 30);
        assert_eq!(args.quiz_defaults.question_count(), 10);
    }

    #[test]
    fn invalid_quiz_numbers_fall_back_to_defaults() {
        let args = parse(&["--seconds", "soon", "--questions", "0"], &[]).unwrap();
        assert_eq!(args.quiz_defaults.seconds_per_question(), 15);
        assert_eq!(args.quiz_defaults.question_count(), DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn blank_user_and_unknown_flags_are_rejected() {
        assert!(matches!(
            parse(&["--user", "  "], &[]),
            Err(ArgsError::InvalidUser { .. })
        ));
        assert!(matches!(
            parse(&["--deck", "1"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            parse(&["--db"], &[]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/study.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/study.sqlite3"), "{url}");
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".to_string()),
            "sqlite::memory:"
        );
    }

    #[test]
    fn relative_paths_after_the_double_slash_are_resolved() {
        let url = normalize_sqlite_url("sqlite://relative.db?mode=rwc".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("/relative.db?mode=rwc"), "{url}");

        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/study.db".to_string()),
            "sqlite:///tmp/study.db"
        );
    }
}
