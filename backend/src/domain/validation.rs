//! Field validation for candidate expenses.

use std::collections::HashMap;

use shared::ExpenseDraft;

/// Check a candidate expense before it is handed to the store.
///
/// Returns a map of field name to error message; an empty map means the
/// candidate is valid. Rules are independent and never short-circuit: a
/// candidate missing several fields gets all of its errors in one pass.
/// The note field is always optional. Date parseability is not checked
/// here; unparseable dates degrade at aggregation time instead.
pub fn validate_expense(draft: &ExpenseDraft) -> HashMap<&'static str, String> {
    let mut errors = HashMap::new();

    match draft.amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => {}
        _ => {
            errors.insert("amount", "Amount must be a positive number.".to_string());
        }
    }

    if draft.date.is_empty() {
        errors.insert("date", "Date is required.".to_string());
    }

    if draft.category.is_empty() {
        errors.insert("category", "Category must be selected.".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ExpenseDraft {
        ExpenseDraft {
            id: None,
            amount: Some(12.5),
            date: "2024-09-01".to_string(),
            category: "food".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn valid_candidate_has_no_errors() {
        assert!(validate_expense(&valid_draft()).is_empty());
    }

    #[test]
    fn missing_amount_is_reported() {
        let draft = ExpenseDraft {
            amount: None,
            ..valid_draft()
        };
        let errors = validate_expense(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["amount"], "Amount must be a positive number.");
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in [0.0, -3.5] {
            let draft = ExpenseDraft {
                amount: Some(amount),
                ..valid_draft()
            };
            assert!(validate_expense(&draft).contains_key("amount"));
        }
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let draft = ExpenseDraft {
            amount: Some(f64::NAN),
            ..valid_draft()
        };
        assert!(validate_expense(&draft).contains_key("amount"));
    }

    #[test]
    fn missing_date_is_reported() {
        let draft = ExpenseDraft {
            date: String::new(),
            ..valid_draft()
        };
        let errors = validate_expense(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["date"], "Date is required.");
    }

    #[test]
    fn missing_category_is_reported() {
        let draft = ExpenseDraft {
            category: String::new(),
            ..valid_draft()
        };
        let errors = validate_expense(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["category"], "Category must be selected.");
    }

    #[test]
    fn all_failures_are_reported_together() {
        let errors = validate_expense(&ExpenseDraft::default());
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("amount"));
        assert!(errors.contains_key("date"));
        assert!(errors.contains_key("category"));
    }

    #[test]
    fn note_is_never_validated() {
        let draft = ExpenseDraft {
            note: String::new(),
            ..valid_draft()
        };
        assert!(validate_expense(&draft).is_empty());
    }
}
