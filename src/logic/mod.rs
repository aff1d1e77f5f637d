// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic for validating and submitting seller registrations.

pub mod cancel;
pub mod hints;
pub mod progress;
pub mod simulator;
pub mod validation;
