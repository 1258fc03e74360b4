//! Reports module for budgetmgr
//!
//! Provides income/expense summaries over months, years and ranges, CSV
//! export, per-category chart data and budget status.

pub mod budget_status;
pub mod chart;
pub mod period;
pub mod summary;

pub use budget_status::{BudgetStatusReport, BudgetStatusRow};
pub use chart::CategoryBreakdown;
pub use period::{month_bounds, year_bounds, ReportPeriod};
pub use summary::{
    export_summary_csv, monthly_summary, range_summary, summarize, write_summary_csv,
    yearly_summary, Summary,
};
