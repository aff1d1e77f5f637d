// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Completion indicator derived from the field registry.

use crate::models::field::FieldRegistry;

/// How much of the required form is filled in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub filled: usize,
    pub total: usize,
}

impl Progress {
    /// Count required fields plus the category group as one unit.
    pub fn compute(registry: &FieldRegistry, has_category: bool) -> Self {
        let required = registry.fields().iter().filter(|f| f.required);
        let filled = required.clone().filter(|f| f.is_filled()).count() + usize::from(has_category);
        Self {
            filled,
            total: required.count() + 1,
        }
    }

    /// Completion in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        self.filled as f32 / self.total as f32
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.filled >= self.total
    }

    pub fn message(&self) -> &'static str {
        if self.is_complete() {
            "All fields completed! Ready to submit."
        } else {
            "Complete all fields to submit your registration"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldId;

    #[test]
    fn empty_form_reports_zero() {
        let progress = Progress::compute(&FieldRegistry::seller_form(), false);
        assert_eq!(progress.filled, 0);
        assert_eq!(progress.total, 10);
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn category_counts_as_one_unit() {
        let mut registry = FieldRegistry::seller_form();
        registry.get_mut(FieldId::SellerName).unwrap().value = "Ada".into();

        let progress = Progress::compute(&registry, true);

        assert_eq!(progress.filled, 2);
        assert_eq!(progress.percent(), 20);
    }

    #[test]
    fn full_form_switches_message() {
        let mut registry = FieldRegistry::seller_form();
        for field in registry.fields_mut() {
            field.value = "on".into();
        }

        let progress = Progress::compute(&registry, true);

        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.message(), "All fields completed! Ready to submit.");
    }
}
