// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Uploaded permit metadata and the constraints it must satisfy (UI-agnostic).

use std::path::PathBuf;

use serde::Serialize;

use crate::error::UploadRejection;

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for the business permit.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["application/pdf", "image/jpeg", "image/jpg", "image/png"];

/// Metadata for the single file attached to the registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(skip)]
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
    /// SHA-256 digest of the contents or `"unavailable"` on failure.
    pub sha256: String,
}

impl UploadedFile {
    pub fn new(path: PathBuf, name: String, size_bytes: u64, mime: String, sha256: String) -> Self {
        Self {
            path,
            name,
            size_bytes,
            mime,
            sha256,
        }
    }

    /// Size in MiB with two decimals, e.g. `"4.77 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Check type first, then size.
pub fn check_constraints(file: &UploadedFile) -> Result<(), UploadRejection> {
    let mime = file.mime.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(UploadRejection::UnsupportedType { mime });
    }
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge {
            size_bytes: file.size_bytes,
        });
    }
    Ok(())
}
