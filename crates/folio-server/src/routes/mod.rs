// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod admin;
pub mod bulk;
pub mod content;
pub mod folders;
pub mod health;
pub mod me;
pub mod uploads;
pub mod users;
