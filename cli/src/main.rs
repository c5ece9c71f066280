//! CLI entrypoint for huddle
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use huddle_application::{
    AdviceInput, BackendAdapter, CheckHealthUseCase, ExchangeLogger, RequestRouter, ResponseCache,
    RunAdviceUseCase, SharedCatalog, ToolInvocationExecutor, ToolServicePort,
};
use huddle_domain::{BackendId, LlmRequest, Message};
use huddle_infrastructure::{
    ConfigLoader, ConfigValidationError, FileConfig, JsonRpcToolService, JsonlExchangeLogger,
    MemoryCacheStore, build_backends,
};
use huddle_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const ASK_PROMPT: &str = "You are a fantasy football analyst. Answer concisely and \
use the available league tools when current roster or matchup data would help.";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let _guard = init_logging(cli.verbose, config.logging.file_path())?;

    info!("Starting huddle");

    let issues = config.validate();
    for issue in issues.iter().filter(|issue| !issue.is_error()) {
        warn!("{}", issue.message);
    }
    ConfigValidationError::check(&issues)?;

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `huddle --help` for usage.");
    };

    // === Dependency Injection ===
    let backends = build_backends(&config);
    let tool_service = build_tool_service(&config);
    let router_config = config.to_router_config();

    match command {
        Command::Health => {
            let mut use_case = CheckHealthUseCase::new(backends, router_config.backend_timeout);
            if let Some(service) = tool_service {
                use_case = use_case.with_tool_service(service);
            }
            let report = use_case.execute().await;

            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_health(&report)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
            }
            if !report.is_operational() {
                bail!("No healthy backend available");
            }
        }
        Command::Tools => {
            let catalog = match &tool_service {
                Some(service) => {
                    SharedCatalog::discover(service.as_ref(), router_config.tool_timeout).await
                }
                None => SharedCatalog::default(),
            };
            let snapshot = catalog.snapshot();

            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_tools(&snapshot)),
                OutputFormat::Json => {
                    println!("{}", ConsoleFormatter::format_json(&snapshot.descriptors()))
                }
            }
        }
        Command::Ask { question } => {
            let progress = (!cli.quiet).then(|| Arc::new(progress_reporter(&config)));
            let router = build_router(&config, backends, tool_service, progress.clone()).await;

            let request = LlmRequest::new(vec![
                Message::system(ASK_PROMPT),
                Message::user(question),
            ])
            .with_max_tokens(router.config().max_tokens)
            .with_temperature(router.config().temperature);

            let preferred = cli.backend.as_deref().map(BackendId::from);
            let result = router
                .chat(request, preferred.as_ref(), !cli.no_tools)
                .await;
            if let Some(progress) = &progress {
                progress.finish();
            }
            let response = result?;

            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_response(&response)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&response)),
            }
        }
        Command::Advise {
            kind,
            question,
            context,
        } => {
            let progress = (!cli.quiet).then(|| Arc::new(progress_reporter(&config)));
            let router = build_router(&config, backends, tool_service, progress.clone()).await;

            let mut input = AdviceInput::new(kind, question).with_tools_enabled(!cli.no_tools);
            if let Some(context) = context {
                input = input.with_context(context);
            }
            if let Some(backend) = &cli.backend {
                input = input.with_preferred_backend(backend.as_str());
            }

            let use_case = RunAdviceUseCase::new(Arc::new(router));
            let result = use_case.execute(input).await;
            if let Some(progress) = &progress {
                progress.finish();
            }
            let output = result?;

            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_advice(&output)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&output)),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber. Logs go to stderr, or to `file` when set.
///
/// The returned guard must be held until exit so buffered lines are flushed.
fn init_logging(verbose: u8, file: Option<PathBuf>) -> Result<Option<WorkerGuard>> {
    // -v flags win over RUST_LOG
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_tool_service(config: &FileConfig) -> Option<Arc<dyn ToolServicePort>> {
    if !config.tools.is_active() {
        info!("Tool service not configured; tool rounds disabled");
        return None;
    }
    let rpc_url = config.tools.rpc_url.clone()?;
    let service: Arc<dyn ToolServicePort> = Arc::new(
        JsonRpcToolService::new(rpc_url).with_discovery_url(config.tools.discovery_url.clone()),
    );
    Some(service)
}

fn exchange_logger(config: &FileConfig) -> Option<Arc<dyn ExchangeLogger>> {
    let path = config.logging.exchange_log_path()?;
    let logger: Arc<dyn ExchangeLogger> = Arc::new(JsonlExchangeLogger::new(&path)?);
    Some(logger)
}

fn progress_reporter(config: &FileConfig) -> ProgressReporter {
    match exchange_logger(config) {
        Some(inner) => ProgressReporter::new().with_inner(inner),
        None => ProgressReporter::new(),
    }
}

async fn build_router(
    config: &FileConfig,
    backends: Vec<Arc<dyn BackendAdapter>>,
    tool_service: Option<Arc<dyn ToolServicePort>>,
    progress: Option<Arc<ProgressReporter>>,
) -> RequestRouter {
    let router_config = config.to_router_config();
    let tool_timeout = router_config.tool_timeout;
    let cache_ttl = router_config.cache_ttl;
    let mut router = RequestRouter::new(backends, router_config);

    if let Some(service) = tool_service {
        let catalog = Arc::new(SharedCatalog::discover(service.as_ref(), tool_timeout).await);
        let executor = Arc::new(ToolInvocationExecutor::new(service, tool_timeout));
        router = router.with_tools(catalog, executor);
    }

    if config.cache.enabled {
        let store = Arc::new(MemoryCacheStore::new(config.cache.max_entries));
        router = router.with_cache(ResponseCache::new(store, cache_ttl));
    }

    let logger: Option<Arc<dyn ExchangeLogger>> = match progress {
        Some(progress) => Some(progress as Arc<dyn ExchangeLogger>),
        None => exchange_logger(config),
    };
    if let Some(logger) = logger {
        router = router.with_exchange_logger(logger);
    }

    router
}
