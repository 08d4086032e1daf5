//! Test Framework admin console - terminal entry point.
//!
//! Loads configuration and the session from the environment, resolves
//! the access policy once, and dispatches a single subcommand against
//! the backend.

use std::sync::Arc;

use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

use testframe_admin_lib::api::ApiClient;
use testframe_admin_lib::config::Config;
use testframe_admin_lib::notify::TerminalNotifier;
use testframe_admin_lib::policy::{AccessPolicy, display_role};
use testframe_admin_lib::services::{
    ExecutionOrchestrator, MetricsView, ReportGateway, ReportOutcome, RunHistory, SuiteRepository,
};
use testframe_admin_lib::session::SessionContext;

const USAGE: &str = "Usage: testframe-admin <command> [args]

Commands:
  whoami                 Show the current identity and roles
  dashboard              Show dashboard totals for the current role
  suites                 List suites visible under the current scope
  runs                   List test runs
  execute <suite-id>     Trigger execution of a suite
  report <suite-id>      Generate and open a suite report
  export <suite-id>      Download a suite's CSV artifact
  analytics <suite-id>   Show 7-day analytics for a suite
  run-report <run-id>    Generate and open a run report";

// Single-threaded cooperative model: user actions and network
// completions interleave on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, TFA_API_BASE_URL must be set");
            std::process::exit(1);
        }
    };

    // Load the session (token acquisition happens elsewhere; the console
    // only reads the result)
    let session = match SessionContext::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load session: {}", e);
            error!("Set TFA_TOKEN (and optionally TFA_USERNAME, TFA_EMAIL, TFA_ROLES).");
            std::process::exit(1);
        }
    };

    let policy = AccessPolicy::resolve(session.identity());
    let notifier = Arc::new(TerminalNotifier);

    let api = match ApiClient::new(&config, session) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to build API client: {}", e);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let exit_code = match args.first().map(String::as_str) {
        Some("whoami") => whoami(&api, &policy),
        Some("dashboard") => dashboard(&api, &config, &policy, notifier).await,
        Some("suites") => suites(&api, &policy).await,
        Some("runs") => runs(&api).await,
        Some("execute") => match parse_id(args.get(1)) {
            Some(id) => execute(&api, &policy, notifier, id).await,
            None => usage_error("execute requires a numeric suite id"),
        },
        Some("report") => match parse_id(args.get(1)) {
            Some(id) => report(&api, &config, notifier, id).await,
            None => usage_error("report requires a numeric suite id"),
        },
        Some("export") => match parse_id(args.get(1)) {
            Some(id) => export(&api, &config, notifier, id).await,
            None => usage_error("export requires a numeric suite id"),
        },
        Some("analytics") => match parse_id(args.get(1)) {
            Some(id) => analytics(&api, &config, &policy, notifier, id).await,
            None => usage_error("analytics requires a numeric suite id"),
        },
        Some("run-report") => match args.get(1) {
            Some(run_id) => run_report(&api, &config, notifier, run_id).await,
            None => usage_error("run-report requires a run id"),
        },
        _ => {
            eprintln!("{}", USAGE);
            2
        }
    };

    std::process::exit(exit_code);
}

fn parse_id(arg: Option<&String>) -> Option<i64> {
    arg.and_then(|s| s.parse().ok())
}

fn usage_error(message: &str) -> i32 {
    eprintln!("{}\n\n{}", message, USAGE);
    2
}

fn whoami(api: &ApiClient, policy: &AccessPolicy) -> i32 {
    let identity = api.session().identity();
    println!("Username: {}", identity.username);
    println!("Email:    {}", identity.email);
    let roles: Vec<&str> = identity.roles().map(display_role).collect();
    println!("Roles:    {}", roles.join(", "));
    println!("Scope:    {:?}", policy.scope);
    0
}

async fn dashboard(
    api: &ApiClient,
    config: &Config,
    policy: &AccessPolicy,
    notifier: Arc<TerminalNotifier>,
) -> i32 {
    let mut view = MetricsView::new(
        api.clone(),
        policy.clone(),
        config.metrics_error_policy,
        notifier,
    );
    let summary = view.fetch_dashboard_metrics().await;

    println!("{}", policy.dashboard_title);
    println!("  Total Tests: {}", summary.total);
    println!("  Passed:      {}", summary.passed);
    println!("  Failed:      {}", summary.failed);
    println!("  Pass Rate:   {:.1}%", summary.pass_rate);
    if policy.show_admin_panels {
        println!("  Avg Duration:      {:.0}ms", summary.avg_duration_ms);
        println!("  Stability (last 10): {:.1}%", summary.stability);
    }
    0
}

async fn suites(api: &ApiClient, policy: &AccessPolicy) -> i32 {
    let mut repo = SuiteRepository::new(api.clone(), policy.scope);
    repo.refresh().await;
    for suite in repo.suites() {
        println!(
            "{:>6}  {:<30}  {:<9}  {} test cases",
            suite.id,
            suite.name,
            suite.status,
            suite.test_cases.len()
        );
    }
    0
}

async fn runs(api: &ApiClient) -> i32 {
    let mut history = RunHistory::new(api.clone());
    history.refresh().await;
    for run in history.runs() {
        println!(
            "{:<12}  {:<30}  {:?}  {} threads  {}",
            run.id, run.name, run.status, run.parallel_threads, run.created_at
        );
    }
    0
}

async fn execute(
    api: &ApiClient,
    policy: &AccessPolicy,
    notifier: Arc<TerminalNotifier>,
    suite_id: i64,
) -> i32 {
    let mut repo = SuiteRepository::new(api.clone(), policy.scope);
    let orchestrator = ExecutionOrchestrator::new(api.clone(), notifier);
    match orchestrator.execute_suite(suite_id, &mut repo).await {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn report(
    api: &ApiClient,
    config: &Config,
    notifier: Arc<TerminalNotifier>,
    suite_id: i64,
) -> i32 {
    let gateway = ReportGateway::new(api.clone(), notifier, config.download_dir.clone());
    match gateway.generate_report(suite_id).await {
        ReportOutcome::Failed(_) => 1,
        _ => 0,
    }
}

async fn export(
    api: &ApiClient,
    config: &Config,
    notifier: Arc<TerminalNotifier>,
    suite_id: i64,
) -> i32 {
    let gateway = ReportGateway::new(api.clone(), notifier, config.download_dir.clone());
    match gateway.export_csv(suite_id).await {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn analytics(
    api: &ApiClient,
    config: &Config,
    policy: &AccessPolicy,
    notifier: Arc<TerminalNotifier>,
    suite_id: i64,
) -> i32 {
    let mut view = MetricsView::new(
        api.clone(),
        policy.clone(),
        config.metrics_error_policy,
        notifier,
    );
    match view.fetch_suite_analytics(suite_id).await {
        Some(analytics) => {
            let s = &analytics.summary;
            println!("Tests: {} total, {} passed, {} failed", s.total_tests, s.passed, s.failed);
            println!("Pass Rate: {:.1}%", s.pass_rate);
            println!("Avg Duration: {:.0}ms", s.avg_duration_ms);
            println!("Stability: {:.1}%", s.stability);
            println!("Trends:");
            for point in &analytics.trends.data {
                println!("  {}  {:.1}%", point.date, point.pass_rate);
            }
            if analytics.flaky_tests.count > 0 {
                println!("Flaky Tests ({}):", analytics.flaky_tests.count);
                for test in &analytics.flaky_tests.tests {
                    println!(
                        "  {}  {} runs | {} retries | score {:.1}",
                        test.test_name, test.total_runs, test.retry_count, test.flaky_score
                    );
                }
            }
            0
        }
        None => {
            eprintln!("No analytics available for suite {}", suite_id);
            1
        }
    }
}

async fn run_report(
    api: &ApiClient,
    config: &Config,
    notifier: Arc<TerminalNotifier>,
    run_id: &str,
) -> i32 {
    let gateway = ReportGateway::new(api.clone(), notifier, config.download_dir.clone());
    match gateway.open_run_report(run_id).await {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
