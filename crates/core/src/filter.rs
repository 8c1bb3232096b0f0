// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Predicate filters over in-memory record lists.
//!
//! Every criterion is optional and an absent criterion lets every record
//! through. Present criteria are AND-combined. Output keeps input order.
//! Text matching is case-sensitive literal substring matching.

use crate::aggregation::EmployeeIndex;
use kpi_domain::{Employee, EmployeeCategory, EmployeeId, Evaluation, PeriodKey};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Criteria for narrowing an employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    /// Substring of the name or the national id.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<EmployeeCategory>,
}

impl EmployeeQuery {
    /// Returns true when the employee satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        if self.category.is_some_and(|category| employee.category != category) {
            return false;
        }
        search_term(self.search.as_deref()).is_none_or(|term| {
            employee.name.contains(term) || employee.national_id.contains(term)
        })
    }
}

/// Criteria for narrowing an evaluation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationQuery {
    /// Exact employee reference.
    pub employee_id: Option<EmployeeId>,
    /// Earliest evaluation instant, inclusive.
    pub start: Option<OffsetDateTime>,
    /// Latest evaluation instant, inclusive.
    pub end: Option<OffsetDateTime>,
    /// Period key, normalized like stored periods before comparison.
    pub period: Option<String>,
    /// Substring of the employee name, the comments or a string period.
    pub search: Option<String>,
}

impl EvaluationQuery {
    /// Returns true when the evaluation satisfies every present criterion.
    ///
    /// `employees` resolves the employee name for text search.
    #[must_use]
    pub fn matches(&self, evaluation: &Evaluation, employees: &EmployeeIndex<'_>) -> bool {
        if self
            .employee_id
            .as_ref()
            .is_some_and(|id| &evaluation.employee_id != id)
        {
            return false;
        }
        if self.start.is_some_and(|start| evaluation.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| evaluation.date > end) {
            return false;
        }
        if active_term(self.period.as_deref())
            .map(|p| PeriodKey::Canonical(p.to_string()).canonical_key())
            .is_some_and(|key| evaluation.period_key() != key)
        {
            return false;
        }
        if let Some(term) = search_term(self.search.as_deref()) {
            let name_matches = employees
                .get(&evaluation.employee_id)
                .is_some_and(|employee| employee.name.contains(term));
            let comments_match = evaluation
                .comments
                .as_deref()
                .is_some_and(|comments| comments.contains(term));
            let period_matches = evaluation
                .period()
                .raw_text()
                .is_some_and(|raw| raw.contains(term));
            if !name_matches && !comments_match && !period_matches {
                return false;
            }
        }
        true
    }
}

/// Returns the employees matching the query, in input order.
#[must_use]
pub fn filter_employees<'a>(employees: &'a [Employee], query: &EmployeeQuery) -> Vec<&'a Employee> {
    employees.iter().filter(|e| query.matches(e)).collect()
}

/// Returns the evaluations matching the query, in input order.
#[must_use]
pub fn filter_evaluations<'a>(
    evaluations: &'a [Evaluation],
    employees: &[Employee],
    query: &EvaluationQuery,
) -> Vec<&'a Evaluation> {
    let index = EmployeeIndex::new(employees);
    evaluations
        .iter()
        .filter(|e| query.matches(e, &index))
        .collect()
}

/// Returns the distinct non-empty period keys, newest first.
#[must_use]
pub fn available_periods<'e>(evaluations: impl IntoIterator<Item = &'e Evaluation>) -> Vec<String> {
    let keys: BTreeSet<&str> = evaluations
        .into_iter()
        .map(Evaluation::period_key)
        .filter(|key| !key.is_empty())
        .collect();
    keys.into_iter().rev().map(String::from).collect()
}

/// Maps the "no filter" sentinels to `None`.
///
/// An empty string and the literal `"all"` both mean "no filter".
#[must_use]
pub fn active_term(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != "all")
}

/// Free text only skips the empty string; `"all"` is searched literally.
fn search_term(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
