// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A stored operator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorData {
    pub operator_id: i64,
    /// Login name, normalized to uppercase.
    pub login_name: String,
    pub display_name: String,
    /// Bcrypt hash of the password.
    pub password_hash: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    /// RFC 3339 expiry instant.
    pub expires_at: String,
}
