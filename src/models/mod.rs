// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain models for fields, uploads, and submission payloads.

pub mod field;
pub mod payload;
pub mod upload;
