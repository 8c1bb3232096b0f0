// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouped averages over evaluations.
//!
//! Every average here is a mean of per-evaluation composite ratings: each
//! evaluation first reduces its own criterion scores, and groups then
//! average those composites. Evaluations with many criteria carry no more
//! weight than evaluations with few.
//!
//! All functions are single-pass over the evaluations plus a finalize pass
//! over the groups, and keep no state between calls.

use crate::clock::ReportingClock;
use crate::window::TimeWindow;
use kpi_domain::{Employee, EmployeeCategory, EmployeeId, Evaluation, Locale, mean};
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;

/// Lookup from employee id to employee record.
///
/// When ids repeat, the first record wins.
#[derive(Debug, Clone)]
pub struct EmployeeIndex<'a> {
    by_id: HashMap<&'a EmployeeId, &'a Employee>,
}

impl<'a> EmployeeIndex<'a> {
    /// Indexes a list of employees.
    #[must_use]
    pub fn new(employees: &'a [Employee]) -> Self {
        let mut by_id = HashMap::with_capacity(employees.len());
        for employee in employees {
            by_id.entry(&employee.id).or_insert(employee);
        }
        Self { by_id }
    }

    /// Resolves an employee reference.
    #[must_use]
    pub fn get(&self, id: &EmployeeId) -> Option<&'a Employee> {
        self.by_id.get(id).copied()
    }
}

/// Running total of composite ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    total: f64,
    count: usize,
}

impl Tally {
    const fn add(&mut self, rating: f64) {
        self.total += rating;
        self.count += 1;
    }

    fn average(self) -> f64 {
        mean(self.total, self.count)
    }
}

/// The winner of a windowed leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TopPerformer<'a> {
    /// The winning employee.
    pub employee: &'a Employee,
    /// Mean composite rating inside the window.
    pub average: f64,
    /// Number of evaluations inside the window.
    pub evaluation_count: usize,
}

/// Selects the employee with the highest mean rating since `boundary`.
///
/// Evaluations dated at or after `boundary` are grouped by employee. A
/// group must average strictly above zero to win. Equal averages go to
/// the lexicographically smallest employee id.
///
/// Returns `None` when no evaluation falls in the window, or when the
/// winning id does not resolve to one of `employees`.
#[must_use]
pub fn top_performer<'a, 'e>(
    employees: &'a [Employee],
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
    boundary: OffsetDateTime,
) -> Option<TopPerformer<'a>> {
    let mut groups: BTreeMap<&'e EmployeeId, Tally> = BTreeMap::new();
    for evaluation in evaluations {
        if evaluation.date >= boundary {
            groups
                .entry(&evaluation.employee_id)
                .or_default()
                .add(evaluation.rating());
        }
    }

    let mut best: Option<(&EmployeeId, f64, usize)> = None;
    for (id, tally) in groups {
        let average = tally.average();
        let best_average = best.map_or(0.0, |(_, avg, _)| avg);
        if average > best_average {
            best = Some((id, average, tally.count));
        }
    }

    let (id, average, evaluation_count) = best?;
    let employee = employees.iter().find(|e| &e.id == id)?;
    Some(TopPerformer {
        employee,
        average,
        evaluation_count,
    })
}

/// Runs [`top_performer`] over a trailing window ending at the clock's "now".
#[must_use]
pub fn top_performer_in<'a, 'e>(
    employees: &'a [Employee],
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
    window: TimeWindow,
    clock: &ReportingClock,
) -> Option<TopPerformer<'a>> {
    top_performer(employees, evaluations, window.boundary(clock))
}

/// Mean rating of one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAverage {
    /// The category.
    pub category: EmployeeCategory,
    /// Mean composite rating, 0.0 when the category has no evaluations.
    pub average: f64,
    /// Number of evaluations counted.
    pub evaluation_count: usize,
}

/// Per-category means as parallel vectors, for charting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryAverages {
    /// Categories in the order they were first encountered.
    pub categories: Vec<EmployeeCategory>,
    /// Mean composite rating of each category.
    pub values: Vec<f64>,
    /// Number of evaluations behind each mean.
    pub counts: Vec<usize>,
}

impl CategoryAverages {
    /// Returns the display label of each category.
    #[must_use]
    pub fn labels(&self, locale: Locale) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.label(locale)).collect()
    }

    /// Returns the entries as records.
    #[must_use]
    pub fn entries(&self) -> Vec<CategoryAverage> {
        self.categories
            .iter()
            .zip(&self.values)
            .zip(&self.counts)
            .map(|((category, average), count)| CategoryAverage {
                category: *category,
                average: *average,
                evaluation_count: *count,
            })
            .collect()
    }

    /// Returns true when no category has any evaluation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Averages every evaluation by the category of its employee.
///
/// Evaluations whose employee does not resolve are left out. Categories
/// appear in the order their first evaluation was seen.
#[must_use]
pub fn average_by_category<'e>(
    employees: &[Employee],
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
) -> CategoryAverages {
    let index = EmployeeIndex::new(employees);
    let mut groups: Vec<(EmployeeCategory, Tally)> = Vec::new();

    for evaluation in evaluations {
        let Some(employee) = index.get(&evaluation.employee_id) else {
            continue;
        };
        let rating = evaluation.rating();
        if let Some((_, tally)) = groups.iter_mut().find(|(c, _)| *c == employee.category) {
            tally.add(rating);
        } else {
            let mut tally = Tally::default();
            tally.add(rating);
            groups.push((employee.category, tally));
        }
    }

    let mut result = CategoryAverages::default();
    for (category, tally) in groups {
        result.categories.push(category);
        result.values.push(tally.average());
        result.counts.push(tally.count);
    }
    result
}

/// Averages evaluations for each charted category, zero-filling empty ones.
///
/// The result always lists [`EmployeeCategory::CHARTED`] in that order.
#[must_use]
pub fn category_chart<'e>(
    employees: &[Employee],
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
) -> Vec<CategoryAverage> {
    let entries = average_by_category(employees, evaluations).entries();
    EmployeeCategory::CHARTED
        .iter()
        .map(|category| {
            entries
                .iter()
                .copied()
                .find(|entry| entry.category == *category)
                .unwrap_or(CategoryAverage {
                    category: *category,
                    average: 0.0,
                    evaluation_count: 0,
                })
        })
        .collect()
}

/// Evaluation count and mean rating of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmployeeSummary {
    /// Number of evaluations.
    pub evaluation_count: usize,
    /// Mean composite rating, 0.0 without evaluations.
    pub average: f64,
}

/// Summarizes the evaluations of a single employee.
#[must_use]
pub fn summarize_employee<'e>(
    employee_id: &EmployeeId,
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
) -> EmployeeSummary {
    let mut tally = Tally::default();
    for evaluation in evaluations {
        if &evaluation.employee_id == employee_id {
            tally.add(evaluation.rating());
        }
    }
    EmployeeSummary {
        evaluation_count: tally.count,
        average: tally.average(),
    }
}

/// Summarizes evaluations for every referenced employee in one pass.
#[must_use]
pub fn employee_summaries<'e>(
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
) -> HashMap<&'e EmployeeId, EmployeeSummary> {
    let mut tallies: HashMap<&'e EmployeeId, Tally> = HashMap::new();
    for evaluation in evaluations {
        tallies
            .entry(&evaluation.employee_id)
            .or_default()
            .add(evaluation.rating());
    }
    tallies
        .into_iter()
        .map(|(id, tally)| {
            (
                id,
                EmployeeSummary {
                    evaluation_count: tally.count,
                    average: tally.average(),
                },
            )
        })
        .collect()
}

/// Mean composite rating over all evaluations, 0.0 when there are none.
#[must_use]
pub fn overall_average<'e>(evaluations: impl IntoIterator<Item = &'e Evaluation>) -> f64 {
    let mut tally = Tally::default();
    for evaluation in evaluations {
        tally.add(evaluation.rating());
    }
    tally.average()
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    /// Number of active employees.
    pub total_employees: usize,
    /// Number of evaluations.
    pub total_evaluations: usize,
    /// Mean composite rating over all evaluations.
    pub average_rating: f64,
    /// Best employee over the last seven days.
    pub employee_of_week: Option<TopPerformer<'a>>,
    /// Best employee over the last calendar month.
    pub employee_of_month: Option<TopPerformer<'a>>,
    /// Evaluations dated in the current calendar month.
    pub completed_this_month: usize,
    /// Employees minus completed evaluations, never below zero.
    pub pending_this_month: usize,
    /// Mean rating of each charted category.
    pub category_chart: Vec<CategoryAverage>,
}

/// Computes the dashboard figures.
///
/// `employees` should already be limited to active employees.
#[must_use]
pub fn dashboard_summary<'a>(
    employees: &'a [Employee],
    evaluations: &[Evaluation],
    clock: &ReportingClock,
) -> DashboardSummary<'a> {
    let current = clock.current_period();
    let completed_this_month = evaluations
        .iter()
        .filter(|evaluation| clock.period_of(evaluation.date) == current)
        .count();

    DashboardSummary {
        total_employees: employees.len(),
        total_evaluations: evaluations.len(),
        average_rating: overall_average(evaluations),
        employee_of_week: top_performer_in(employees, evaluations, TimeWindow::Week, clock),
        employee_of_month: top_performer_in(employees, evaluations, TimeWindow::Month, clock),
        completed_this_month,
        pending_this_month: employees.len().saturating_sub(completed_this_month),
        category_chart: category_chart(employees, evaluations),
    }
}
