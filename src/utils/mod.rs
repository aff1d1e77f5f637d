// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Helpers shared by the upload component.

pub mod hash;

pub use hash::hash_file;
