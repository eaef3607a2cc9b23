// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based capability grants.
//!
//! - [`Permission`]: the closed set of capability tokens
//! - [`RoleCapabilityTable`]: the fixed role → permission mapping and the evaluator
//!   (`has_permission`, `has_any`, `has_all`) over it

mod permission;
mod table;

pub use permission::Permission;
pub use table::RoleCapabilityTable;
