mod config;
mod error;

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use config::Config;
use error::CliError;
use exam_gate::{
    constants::headers,
    crypto::ConfigKeyHash,
    types::{
        course::{ConfigKey, Course, KeyKind},
        decision::ExamClientDecision,
        session::SessionData,
        user::UserId,
    },
};
use exam_gate_server::{
    config::Config as ServerConfig,
    policy::ExamClientValidator,
    server::{Interruption, RequestContext, Route},
    ExamGateServer,
};
use exam_gate_token_store_hashmap::{config::Config as TokenStoreConfig, HashmapTokenStore};
use serde::Serialize;
use tracing::{info, Level};
use tracing_appender::{self, non_blocking::WorkerGuard};
use tracing_subscriber::{filter::Targets, prelude::*};

#[derive(Parser)] // Should not derive debug, may contain config keys
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the hash an exam client sends for `url` when configured with `key`.
    Hash {
        #[clap(long)]
        url: String,
        #[clap(long, env = "EXAM_GATE_CONFIG_KEY")]
        key: String,
    },
    /// Run a quiz start request for `url` through the default pipeline and
    /// report the decision as JSON.
    Check {
        /// Path to the CLI config file
        #[clap(long)]
        config: PathBuf,
        /// Path to a course file holding the course's exam keys
        #[clap(long)]
        course: PathBuf,
        #[clap(long)]
        url: String,
        /// Value of the config-key hash header, if the client sent one
        #[clap(long)]
        hash: Option<String>,
        /// Log this user in before the request so session arbitration has a
        /// current token to compare against
        #[clap(long)]
        user: Option<String>,
    },
}

/// Everything `check` found out about a request.
#[derive(Debug, Serialize)]
struct CheckReport {
    course: String,
    configured_keys: Vec<KeyKind>,
    evaluation: ExamClientDecision,
    interruption: Option<Interruption>,
    user_message: Option<String>,
    submission_allowed: bool,
}

#[tokio::main]
pub async fn main() {
    if let Err(e) = run_main().await {
        eprintln!("exam-gate error: {e}");
        std::process::exit(1);
    }
}

pub async fn run_main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Hash { url, key } => {
            let hash = ConfigKeyHash::compute(&url, &ConfigKey::from(key));
            println!("{hash}");
            Ok(())
        }
        Command::Check {
            config,
            course,
            url,
            hash,
            user,
        } => check(config, course, url, hash, user).await,
    }
}

async fn check(
    config: PathBuf,
    course: PathBuf,
    url: String,
    hash: Option<String>,
    user: Option<String>,
) -> Result<(), CliError> {
    let config = Config::from_file(config)?;
    let server_config = ServerConfig::from_file(&config.server)?;

    // We keep `_logging` around for the rest of the program. On drop, this value
    // will ensure that our logs are flushed.
    let _logging = init_logging(&server_config)?;
    info!("Logging config settings: {:?}", server_config.logging);

    let token_store = HashmapTokenStore::new(TokenStoreConfig::from_file(&config.token_store)?);
    let server = ExamGateServer::new(server_config, Arc::new(token_store));
    let course = Course::from_file(&course)?;

    let user = user.map(|user| user.parse::<UserId>()).transpose()?;
    let mut session = SessionData::new();
    if let Some(user) = &user {
        let mut login = RequestContext::new(Route::Login, url.as_str()).with_user(user.clone());
        let _ = server.login_succeeded(&mut login).await?;
        session = login.session;
    }

    let evaluation = ExamClientValidator::evaluate_course(&course.exam_keys, &url, hash.as_deref());
    let configured_keys = course
        .exam_keys
        .accepted_keys()
        .iter()
        .map(|key| key.kind)
        .collect();

    let mut request = RequestContext::new(Route::QuizStart, url.as_str())
        .with_session(session)
        .with_course(course.clone());
    if let Some(user) = user {
        request = request.with_user(user);
    }
    if let Some(hash) = hash {
        request = request.with_header(headers::CONFIG_KEY_HASH, hash);
    }

    let interruption = server.pipeline().run_before_hooks(&mut request).await?;
    let submission_allowed = interruption.is_none()
        && server.generate_submission(&request, false).await.is_ok();

    let report = CheckReport {
        course: course.display_name().to_string(),
        configured_keys,
        evaluation,
        user_message: interruption.as_ref().map(Interruption::user_message),
        interruption,
        submission_allowed,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Object representing our logging. Should be kept around as our logging
/// writers return guards that should live for the lifetime of the program. Do
/// not do anything with the guards. Just make sure they are not dropped!
#[derive(Default)]
struct LoggingGuards {
    _all_layer_guard: Option<WorkerGuard>,
    _exam_gate_layer_guard: Option<WorkerGuard>,
}

/// Initialize our logging with different logging layers:
/// 1) Log messages at the configured level from our exam_gate* crates to
/// standard error.
/// 2) (OPTIONAL) Log all messages (TRACE or higher) from our exam_gate*
/// crates to the path specified by `exam_gate_logs_file_name`.
/// 3) (OPTIONAL) Log all messages (TRACE or higher) from any crate to the path
/// specified by `all_logs_file_name`.
///
/// Returns an object which should be kept around for the lifetime of the
/// program.
fn init_logging(config: &ServerConfig) -> Result<LoggingGuards, CliError> {
    // Stdout is reserved for the report.
    let stdout_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(our_targets_filter(config.logging.stdout_log_level));

    let logging_guards = match &config.logging.log_files {
        Some(file_config) => {
            let (all_logs_dir, all_logs_file) = get_paths(&file_config.all_logs_file_name)?;
            let (exam_gate_logs_dir, exam_gate_logs_file) =
                get_paths(&file_config.exam_gate_logs_file_name)?;

            // This layers logs all events into a file.
            let all_appender = tracing_appender::rolling::hourly(all_logs_dir, all_logs_file);
            let (non_blocking, _all_layer_guard) = tracing_appender::non_blocking(all_appender);
            let all_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking);

            // Log all events generated from exam-gate into a file.
            let exam_gate_appender =
                tracing_appender::rolling::hourly(exam_gate_logs_dir, exam_gate_logs_file);
            let (non_blocking, _exam_gate_layer_guard) =
                tracing_appender::non_blocking(exam_gate_appender);
            let exam_gate_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(our_targets_filter(Level::TRACE));

            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(exam_gate_layer)
                .with(all_layer)
                .init();

            LoggingGuards {
                _all_layer_guard: Some(_all_layer_guard),
                _exam_gate_layer_guard: Some(_exam_gate_layer_guard),
            }
        }
        None => {
            tracing_subscriber::registry().with(stdout_layer).init();

            LoggingGuards::default()
        }
    };

    Ok(logging_guards)
}

/// Return the path directory and the file name. Needed for passing to
/// tracing_appender.
fn get_paths(path: &Path) -> Result<(&Path, &OsStr), CliError> {
    let dir = path
        .parent()
        .ok_or_else(|| CliError::InvalidLogFilePath(path.into()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::InvalidLogFilePath(path.into()))?;
    Ok((dir, file_name))
}

/// Create filters for logging events originating from our exam_gate* crates.
fn our_targets_filter(level: Level) -> Targets {
    Targets::new()
        .with_target("exam_gate_cli", level)
        .with_target("exam_gate_server", level)
        .with_target("exam_gate", level)
        .with_target("exam_gate_token_store_hashmap", level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_subcommand_parses() {
        let cli = Cli::parse_from([
            "exam-gate-cli",
            "hash",
            "--url",
            "https://lms.example.edu/quiz",
            "--key",
            "abc",
        ]);
        match cli.command {
            Command::Hash { url, key } => {
                assert_eq!(url, "https://lms.example.edu/quiz");
                assert_eq!(key, "abc");
            }
            Command::Check { .. } => panic!("expected hash subcommand"),
        }
    }

    #[test]
    fn check_hash_is_optional() {
        let cli = Cli::parse_from([
            "exam-gate-cli",
            "check",
            "--config",
            "dev/config/cli.toml",
            "--course",
            "dev/config/course.toml",
            "--url",
            "https://lms.example.edu/quiz",
        ]);
        match cli.command {
            Command::Check { hash, user, .. } => {
                assert!(hash.is_none());
                assert!(user.is_none());
            }
            Command::Hash { .. } => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn log_paths_need_a_file_name() {
        let (dir, file) = get_paths(Path::new("dev/logs/exam-gate.log")).unwrap();
        assert_eq!(dir, Path::new("dev/logs"));
        assert_eq!(file, "exam-gate.log");

        assert!(matches!(
            get_paths(Path::new("/")),
            Err(CliError::InvalidLogFilePath(_))
        ));
    }
}
