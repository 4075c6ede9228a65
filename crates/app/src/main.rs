//! bstcheck - BST REST API conformance runner
//!
//! Runs the BST test cases against a BroadView agent:
//! - Reads the agent address from `serverDetails.ini` (or `--url`/`--ip`/`--port`)
//! - Reads step payloads from `testCaseJsonStrings.ini`
//! - Prints the step table and a summary, optionally writes a JSON report
//! - Exits with 0 when every case passes, 1 otherwise

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bstcheck_application::{BstCase, RunSuite, RunSuiteInput};
use bstcheck_domain::AgentEndpoint;
use bstcheck_infrastructure::{
    ConsoleReporter, IniTestData, ReqwestHttpClient, SERVER_DETAILS_FILE, SystemClock,
    TEST_DATA_FILE, load_server_details, write_report,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// BST REST API conformance runner.
#[derive(Parser, Debug)]
#[command(name = "bstcheck", version, about = "Run BST REST conformance cases against a BroadView agent")]
struct Cli {
    /// Directory holding serverDetails.ini and testCaseJsonStrings.ini.
    #[arg(long, value_name = "DIR", default_value = ".")]
    config_dir: PathBuf,

    /// Agent address; overrides serverDetails.ini.
    #[arg(long)]
    ip: Option<String>,

    /// Agent REST port; overrides serverDetails.ini.
    #[arg(long)]
    port: Option<u16>,

    /// Full agent base URL, e.g. http://10.0.0.1:8080/broadview/bst/.
    #[arg(long, conflicts_with_all = ["ip", "port"])]
    url: Option<String>,

    /// Case to run (repeatable); all cases when omitted.
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "BSTCHECK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log requests and flattened request/response bodies.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Write the run report as JSON to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// List the available cases and exit.
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for case in BstCase::all() {
            println!("{:<28} [{}]", case.name(), case.section());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let passed = run(&cli)?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs the selected cases; returns whether all of them passed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let cases = cli
        .cases
        .iter()
        .map(|name| name.parse::<BstCase>())
        .collect::<Result<Vec<_>, _>>()?;
    let endpoint = resolve_endpoint(cli)?;

    let data_path = cli.config_dir.join(TEST_DATA_FILE);
    let data = IniTestData::load(&data_path)
        .with_context(|| format!("cannot load test data from {}", data_path.display()))?;

    let mut client = ReqwestHttpClient::new()?;
    if let Some(token) = &cli.token {
        client = client.with_bearer_token(token.clone());
    }

    tracing::info!(
        agent = %endpoint,
        cases = cases.len(),
        version = env!("CARGO_PKG_VERSION"),
        "bstcheck starting"
    );

    let input = RunSuiteInput::new(endpoint)
        .with_cases(cases)
        .verbose(cli.verbose);
    let mut reporter = ConsoleReporter::stdout();
    let suite = RunSuite::new(Arc::new(client), data, SystemClock::new())
        .execute(&input, &mut reporter);
    reporter.summary(&suite);
    reporter.finish().context("cannot write to standard output")?;

    if let Some(path) = &cli.report {
        write_report(path, &suite)
            .with_context(|| format!("cannot write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(suite.all_passed())
}

/// Endpoint precedence: `--url`, then `--ip`/`--port` over `serverDetails.ini`.
fn resolve_endpoint(cli: &Cli) -> anyhow::Result<AgentEndpoint> {
    if let Some(url) = &cli.url {
        return AgentEndpoint::parse_url(url).with_context(|| format!("invalid --url {url}"));
    }

    let details = load_details(&cli.config_dir.join(SERVER_DETAILS_FILE))?;
    let mut endpoint = details.endpoint();
    if let Some(ip) = &cli.ip {
        endpoint.host.clone_from(ip);
    }
    if let Some(port) = cli.port {
        endpoint.port = port;
    }
    Ok(endpoint)
}

fn load_details(path: &Path) -> anyhow::Result<bstcheck_infrastructure::ServerDetails> {
    load_server_details(path).with_context(|| format!("cannot load {}", path.display()))
}
