// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error taxonomy for the registration flow.
//!
//! Every error here is recoverable: its `Display` text is exactly what the
//! user sees inline or in the page-level banner.

use thiserror::Error;

use crate::models::field::FieldId;

/// Why a single field failed validation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FieldIssue {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Form-wide preconditions checked alongside the per-field pass.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FormIssue {
    #[error("Please select at least one product category")]
    NoCategory,
    #[error("Please agree to the Terms and Conditions and Privacy Policy")]
    TermsNotAccepted,
    #[error("Please upload your business permit or valid ID")]
    MissingPermit,
}

/// Reasons a candidate file is refused by the upload handler.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Please select a valid file type (PDF, JPG, PNG)")]
    UnsupportedType { mime: String },
    #[error("File size must be less than 10MB")]
    TooLarge { size_bytes: u64 },
    #[error("Could not read the selected file: {0}")]
    Unreadable(String),
}

/// Anything that can stop a registration attempt.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{issue}")]
    Field { field: FieldId, issue: FieldIssue },
    #[error(transparent)]
    Form(#[from] FormIssue),
    #[error(transparent)]
    Upload(#[from] UploadRejection),
    #[error("{0}")]
    Submission(String),
}

impl RegistrationError {
    /// Form-level and submission errors go to the page banner; field errors stay inline.
    pub fn is_page_level(&self) -> bool {
        !matches!(self, Self::Field { .. })
    }
}
