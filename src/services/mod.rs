//! Services: the console's operational core on top of the API client.

pub mod execution;
pub mod metrics;
pub mod reports;
pub mod runs;
pub mod suites;
pub mod view_state;

pub use execution::ExecutionOrchestrator;
pub use metrics::{ANALYTICS_WINDOW_DAYS, MetricsView};
pub use reports::{NOT_EXECUTED_MESSAGE, ReportGateway, ReportOutcome, csv_filename, suite_report_url};
pub use runs::RunHistory;
pub use suites::SuiteRepository;
pub use view_state::{FetchSlot, FetchTicket};
