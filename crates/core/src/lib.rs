// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregation;
mod apply;
mod clock;
mod command;
mod error;
mod export;
mod filter;
mod state;
mod statistics;
mod window;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use aggregation::{
    CategoryAverage, CategoryAverages, DashboardSummary, EmployeeIndex, EmployeeSummary,
    TopPerformer, average_by_category, category_chart, dashboard_summary, employee_summaries,
    overall_average, summarize_employee, top_performer, top_performer_in,
};
pub use apply::apply;
pub use clock::ReportingClock;
pub use command::Command;
pub use error::CoreError;
pub use export::{
    Column, EMPTY_CELL, ExportLayout, ExportTable, ReportSummary, employee_table,
    evaluation_table, report_summary,
};
pub use filter::{
    EmployeeQuery, EvaluationQuery, active_term, available_periods, filter_employees,
    filter_evaluations,
};
pub use state::{Mutation, TransitionResult};
pub use statistics::{RatingDistribution, rating_distribution};
pub use window::TimeWindow;
