// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Immutable snapshot of a registration, built once per submission attempt.

use serde::Serialize;
use uuid::Uuid;

use crate::models::upload::UploadedFile;

/// Everything the backend needs to process one seller application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub submission_id: Uuid,
    /// RFC 3339 UTC timestamp.
    pub submitted_at: String,
    pub seller_name: String,
    pub store_name: String,
    pub email_address: String,
    pub contact_number: String,
    pub business_address: String,
    pub business_type: String,
    pub paypal_email: String,
    pub product_categories: Vec<String>,
    pub business_permit: UploadedFile,
    pub agree_terms: bool,
}

impl RegistrationPayload {
    /// Serialized form, as it would be posted to a real endpoint.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
