use clap::Parser;
use taskdesk_cli::commands::{cli, tasks};
use taskdesk_cli::render;
use taskdesk_cli::session::Session;
use taskdesk_core::api::{format_error_chain, CliError, LoadOutcome, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", user_message(&e));
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let mut cfg =
        taskdesk_core::config::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    if args.in_memory {
        cfg.storage.enabled = false;
    }
    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        cfg.remote.base_url = url.to_string();
    }
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let mut session = Session::from_config(cfg)?;
    match session.store().load_outcome() {
        LoadOutcome::Recovered { reason } => {
            eprintln!("warning: saved tasks could not be read and were discarded ({reason})")
        }
        LoadOutcome::Unavailable { reason } => {
            eprintln!("warning: task storage is unavailable, changes will not be saved ({reason})")
        }
        _ => {}
    }

    let out = dispatch(args.command, &mut session).await?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(0)
}

async fn dispatch(cmd: cli::Commands, session: &mut Session) -> Result<String, CliError> {
    match cmd {
        cli::Commands::List(list_args) => tasks::handle_list(session, list_args).await,
        cli::Commands::Add(add_args) => tasks::handle_add(session, add_args),
        cli::Commands::Status(status_args) => tasks::handle_status(session, status_args),
        cli::Commands::Edit(edit_args) => tasks::handle_edit(session, edit_args),
        cli::Commands::Rm(id_args) => tasks::handle_rm(session, id_args),
        cli::Commands::Show(id_args) => tasks::handle_show(session, id_args).await,
        cli::Commands::Sync => tasks::handle_sync(session).await,
        cli::Commands::Reload => tasks::handle_reload(session).await,
        cli::Commands::Reset => tasks::handle_reset(session),
    }
}

fn user_message(e: &CliError) -> String {
    match e {
        CliError::Fetch(_) | CliError::Refresh(_) => {
            format!("{}: {}", render::TASKS_ERROR, format_error_chain(e))
        }
        _ => format_error_chain(e),
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: fetch / storage / IO error
    // 30: invalid input
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Fetch(_) | CliError::Refresh(_) => 20,
        CliError::Store(_) | CliError::Io(_) => 20,
        CliError::Form(_) | CliError::Command(_) => 30,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("taskdesk"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "taskdesk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
