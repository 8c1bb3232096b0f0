// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the KPI evaluation system.
//!
//! Employees, evaluations, operators and sessions are stored in `SQLite`
//! through Diesel. Migrations are embedded and run on every open.
//!
//! ## Storage Rules
//!
//! - Employees are soft-deleted: deactivation clears `is_active`, and the
//!   row stays fetchable by id.
//! - Evaluations are hard-deleted.
//! - Criterion maps, assigned files and period designators are JSON text.
//!   A period is stored in whichever shape it was written and normalized
//!   on read.
//!
//! ## Testing
//!
//! Every `new_in_memory()` call opens its own shared in-memory database,
//! so tests never observe each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use kpi::TransitionResult;
use kpi_domain::{Employee, EmployeeId, Evaluation, EvaluationId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod encoding;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{OperatorData, SessionData};
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

use backend::PersistenceBackend;
use encoding::{employee_rowid, evaluation_rowid};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias naming the only supported backend.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_kpi_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Writes the outcome of a validated command in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or `EvaluationNotFound` when the
    /// transition references a missing record, or an error if the write
    /// fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Retrieves an employee by id, including deactivated ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn get_employee(&mut self, id: &EmployeeId) -> Result<Option<Employee>, PersistenceError> {
        match employee_rowid(id) {
            Some(rowid) => queries::employees::get_employee(&mut self.conn, rowid),
            None => Ok(None),
        }
    }

    /// Lists active employees in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_active_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_active_employees(&mut self.conn)
    }

    // ========================================================================
    // Evaluations
    // ========================================================================

    /// Retrieves an evaluation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn get_evaluation(
        &mut self,
        id: &EvaluationId,
    ) -> Result<Option<Evaluation>, PersistenceError> {
        match evaluation_rowid(id) {
            Some(rowid) => queries::evaluations::get_evaluation(&mut self.conn, rowid),
            None => Ok(None),
        }
    }

    /// Lists every evaluation, newest evaluation date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_evaluations(&mut self) -> Result<Vec<Evaluation>, PersistenceError> {
        queries::evaluations::list_evaluations(&mut self.conn)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Creates a new operator with a bcrypt-hashed password.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The login name, stored uppercase
    /// * `display_name` - The display name
    /// * `password` - The plain text password
    ///
    /// # Errors
    ///
    /// Returns `DuplicateLogin` if the login is taken, or an error if the
    /// insert fails.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, login_name, display_name, password)
    }

    /// Retrieves an operator by login name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Counts all operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_operators(&mut self) -> Result<usize, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    // ========================================================================
    // Session Management
    // ========================================================================

    /// Creates a new session for an operator.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `operator_id` - The operator ID
    /// * `expires_at` - The expiration instant (RFC 3339)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(&mut self.conn, session_token, operator_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }
}
