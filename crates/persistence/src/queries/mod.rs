// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries. Rows are decoded into domain records here.

pub mod employees;
pub mod evaluations;
pub mod operators;
