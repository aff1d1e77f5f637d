// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Form field definitions and the registry handed to the controller.
//! Kept free of UI types so validation and payload building stay testable.

/// Stable identifiers for the fields the seller form knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    SellerName,
    StoreName,
    EmailAddress,
    ContactNumber,
    BusinessAddress,
    BusinessType,
    PaypalEmail,
    AgreeTerms,
    BusinessPermit,
}

impl FieldId {
    /// Form key used in the submitted payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SellerName => "sellerName",
            Self::StoreName => "storeName",
            Self::EmailAddress => "emailAddress",
            Self::ContactNumber => "contactNumber",
            Self::BusinessAddress => "businessAddress",
            Self::BusinessType => "businessType",
            Self::PaypalEmail => "paypalEmail",
            Self::AgreeTerms => "agreeTerms",
            Self::BusinessPermit => "businessPermit",
        }
    }
}

/// One entry in a select field's option list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Input kinds that drive validation and rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Multi-line text; validated like `Text`.
    TextArea,
    Email,
    Tel,
    Select(Vec<SelectOption>),
    Checkbox,
    File,
}

impl FieldKind {
    /// Kinds whose value the user types or picks directly.
    pub fn is_input(&self) -> bool {
        !matches!(self, Self::Checkbox | Self::File)
    }
}

/// Result of the last validation pass on a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// Single field definition plus its current value and validity marker.
///
/// Checkbox values follow the `"on"`/empty convention; the file field holds
/// the selected file name or stays empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub id: FieldId,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
    pub validity: Validity,
    pub error: Option<String>,
}

impl FormField {
    pub fn new(id: FieldId, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            id,
            label: label.to_string(),
            value: String::new(),
            required,
            kind,
            validity: Validity::Unvalidated,
            error: None,
        }
    }

    /// Drop the validity marker and any inline error.
    pub fn clear_marker(&mut self) {
        self.validity = Validity::Unvalidated;
        self.error = None;
    }

    /// Whether the field counts as filled for progress purposes.
    pub fn is_filled(&self) -> bool {
        match self.kind {
            FieldKind::Checkbox => self.value == "on",
            _ => !self.value.trim().is_empty(),
        }
    }
}

/// Ordered collection of fields owned by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: Vec<FormField>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// The standard TECHORA seller form; every field is required.
    pub fn seller_form() -> Self {
        let business_types = vec![
            SelectOption::new("individual", "Individual"),
            SelectOption::new("sole_proprietorship", "Sole Proprietorship"),
            SelectOption::new("partnership", "Partnership"),
            SelectOption::new("corporation", "Corporation"),
            SelectOption::new("llc", "LLC"),
        ];

        Self::new(vec![
            FormField::new(FieldId::SellerName, "Seller name", FieldKind::Text, true),
            FormField::new(FieldId::StoreName, "Store name", FieldKind::Text, true),
            FormField::new(FieldId::EmailAddress, "Email address", FieldKind::Email, true),
            FormField::new(FieldId::ContactNumber, "Contact number", FieldKind::Tel, true),
            FormField::new(
                FieldId::BusinessAddress,
                "Business address",
                FieldKind::TextArea,
                true,
            ),
            FormField::new(
                FieldId::BusinessType,
                "Business type",
                FieldKind::Select(business_types),
                true,
            ),
            FormField::new(FieldId::PaypalEmail, "PayPal email", FieldKind::Email, true),
            FormField::new(
                FieldId::AgreeTerms,
                "I agree to the Terms and Conditions and Privacy Policy",
                FieldKind::Checkbox,
                true,
            ),
            FormField::new(
                FieldId::BusinessPermit,
                "Business permit or valid ID",
                FieldKind::File,
                true,
            ),
        ])
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    pub fn get(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Trimmed value of a field, or empty when the registry lacks it.
    pub fn value(&self, id: FieldId) -> String {
        self.get(id)
            .map(|f| f.value.trim().to_string())
            .unwrap_or_default()
    }

    /// Clear every value and marker, keeping the definitions.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.clear_marker();
        }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::seller_form()
    }
}
