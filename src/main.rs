mod cli;

use cli::{Args, RunOptions};
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vexy::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
use vexy::adapters::outbound::filesystem::FileSystemReader;
use vexy::application::dto::{VexRequest, VexResponse};
use vexy::application::factories::{FormatterFactory, PresenterFactory, SourceFactory};
use vexy::application::use_cases::GenerateVexUseCase;
use vexy::config::{discover_config, load_config_from_path, ConfigFile};
use vexy::ports::outbound::{ProgressReporter, SourceAdapter};
use vexy::shared::error::ExitCode;
use vexy::shared::Result;
use vexy::vex_generation::domain::ToolIdentity;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.debug);

    let outcome = if args.quiet {
        run(args, QuietProgressReporter).await
    } else {
        run(args, StderrProgressReporter::new()).await
    };

    match outcome {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// `-X` forces `vexy=debug`; otherwise `RUST_LOG`, falling back to `warn`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("vexy=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("Error initializing logging: {err:?}");
    }
}

async fn run<PR: ProgressReporter>(args: Args, progress_reporter: PR) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let options = RunOptions::resolve(&args, config.as_ref())?;
    tracing::debug!(
        format = %options.format,
        sources = ?options.sources.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
        timeout = ?options.timeout,
        "resolved run options"
    );

    // Adapters are constructed before the input is read
    let sources = options
        .sources
        .iter()
        .map(|s| SourceFactory::create(&s.key, &s.settings, options.timeout))
        .collect::<Result<Vec<Box<dyn SourceAdapter>>>>()?;
    let formatter = FormatterFactory::create(options.format, options.schema_version);
    let presenter = PresenterFactory::create(options.presenter.clone());

    let use_case = GenerateVexUseCase::new(FileSystemReader::new(), sources, progress_reporter);
    let request = VexRequest::new(options.input.clone(), options.failure_policy);
    let response = use_case.execute(request, ToolIdentity::current()).await?;

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(options.format));
    }
    let formatted_output = formatter.format(&response.document)?;
    presenter.present(&formatted_output)?;

    if !args.quiet {
        report_summary(&response);
    }

    if options.fail_on_vulnerabilities && response.document.has_vulnerabilities() {
        return Ok(ExitCode::VulnerabilitiesDetected);
    }
    Ok(ExitCode::Success)
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => Ok(Some(load_config_from_path(path)?)),
        None => discover_config(Path::new(".")),
    }
}

fn report_summary(response: &VexResponse) {
    for summary in &response.summaries {
        eprintln!(
            "   - {}: {} vulnerability record(s) for {} component(s)",
            summary.source, summary.found, summary.queried
        );
    }
    for failure in &response.failures {
        eprintln!("   - {}: failed ({})", failure.source, failure.message);
    }
    eprintln!(
        "✅ VEX contains {} vulnerability record(s)",
        response.document.vulnerabilities.len()
    );
}
