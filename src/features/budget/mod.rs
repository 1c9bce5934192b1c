//! Budget tracker: categories, entry checks, and summaries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::{BudgetEntry, BudgetMetadata, BudgetType, NewBudgetEntry};
use crate::core::{parse_date_input, FieldErrors};
use crate::error::StudyError;

/// Categories offered for income entries.
pub const INCOME_CATEGORIES: [&str; 4] = ["Allowance", "Part-time Job", "Scholarship", "Other"];

/// Categories offered for expense entries.
pub const EXPENSE_CATEGORIES: [&str; 5] = ["Food", "Transport", "Books", "Entertainment", "Other"];

/// Categories valid for `kind`.
#[must_use]
pub const fn categories(kind: BudgetType) -> &'static [&'static str] {
    match kind {
        BudgetType::Income => &INCOME_CATEGORIES,
        BudgetType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Match a typed category to its canonical spelling.
#[must_use]
pub fn resolve_category(kind: BudgetType, input: &str) -> Option<&'static str> {
    let input = input.trim();
    categories(kind)
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input))
        .copied()
}

/// Fields of the entry form, as typed.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub budget_type: BudgetType,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: String,
}

impl EntryForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::Validation`] listing every invalid field.
    pub fn into_request(self, today: NaiveDate) -> Result<NewBudgetEntry, StudyError> {
        let mut errors = FieldErrors::new();

        let category = if errors.require("category", "Category", &self.category) {
            let resolved = resolve_category(self.budget_type, &self.category);
            if resolved.is_none() {
                errors.add(
                    "category",
                    format!(
                        "{} category must be one of: {}",
                        self.budget_type,
                        categories(self.budget_type).join(", ")
                    ),
                );
            }
            resolved
        } else {
            None
        };

        if !self.amount.is_finite() || self.amount <= 0.0 {
            errors.add("amount", "Amount must be greater than 0");
        }

        let date = if errors.require("date", "Date", &self.date) {
            let parsed = parse_date_input(&self.date, today);
            if parsed.is_none() {
                errors.add("date", "Date must be a date (YYYY-MM-DD)");
            }
            parsed
        } else {
            None
        };
        errors.into_result()?;

        Ok(NewBudgetEntry {
            budget_type: self.budget_type,
            category: category.unwrap_or_default().to_string(),
            amount: self.amount,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date: date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        })
    }
}

/// Sum of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Totals plus the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    #[serde(flatten)]
    pub totals: BudgetMetadata,
    pub by_category: Vec<CategoryTotal>,
}

impl BudgetSummary {
    /// Use the backend's totals when present, otherwise add up `entries`.
    #[must_use]
    pub fn new(entries: &[BudgetEntry], metadata: Option<BudgetMetadata>) -> Self {
        Self {
            totals: metadata.unwrap_or_else(|| compute_totals(entries)),
            by_category: category_totals(entries),
        }
    }
}

/// Income, expenses, and balance computed from entries.
#[must_use]
pub fn compute_totals(entries: &[BudgetEntry]) -> BudgetMetadata {
    let sum = |kind: BudgetType| {
        entries
            .iter()
            .filter(|e| e.budget_type == kind)
            .map(|e| e.amount)
            .sum::<f64>()
    };
    let total_income = sum(BudgetType::Income);
    let total_expenses = sum(BudgetType::Expense);
    BudgetMetadata {
        total_income,
        total_expenses,
        current_balance: total_income - total_expenses,
        total_entries: entries.len() as u64,
    }
}

/// Amount per category, in the order categories first appear.
#[must_use]
pub fn category_totals(entries: &[BudgetEntry]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for entry in entries {
        match totals.iter_mut().find(|t| t.category == entry.category) {
            Some(total) => total.amount += entry.amount,
            None => totals.push(CategoryTotal {
                category: entry.category.clone(),
                amount: entry.amount,
            }),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: BudgetType, category: &str, amount: f64) -> BudgetEntry {
        BudgetEntry {
            id: String::new(),
            budget_type: kind,
            category: category.to_string(),
            amount,
            description: None,
            date: "2025-03-01".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_category_depends_on_type() {
        assert_eq!(resolve_category(BudgetType::Income, "scholarship"), Some("Scholarship"));
        assert_eq!(resolve_category(BudgetType::Expense, "Scholarship"), None);
        assert_eq!(resolve_category(BudgetType::Expense, " other "), Some("Other"));
    }

    #[test]
    fn test_form_validation() {
        let form = EntryForm {
            budget_type: BudgetType::Expense,
            category: "Allowance".to_string(),
            amount: 0.0,
            description: None,
            date: "not a date".to_string(),
        };
        let Err(StudyError::Validation(errors)) = form.into_request(today()) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);

        let form = EntryForm {
            budget_type: BudgetType::Expense,
            category: "food".to_string(),
            amount: 12.5,
            description: Some("Lunch".to_string()),
            date: "today".to_string(),
        };
        let request = form.into_request(today()).unwrap();
        assert_eq!(request.category, "Food");
        assert_eq!(request.date, "2025-03-12");
    }

    #[test]
    fn test_summary_prefers_server_totals() {
        let entries = vec![entry(BudgetType::Income, "Allowance", 100.0)];
        let server = BudgetMetadata {
            total_income: 500.0,
            total_expenses: 120.0,
            current_balance: 380.0,
            total_entries: 9,
        };
        assert_eq!(BudgetSummary::new(&entries, Some(server)).totals, server);
    }

    #[test]
    fn test_summary_falls_back_to_entries() {
        let entries = vec![
            entry(BudgetType::Income, "Allowance", 200.0),
            entry(BudgetType::Expense, "Food", 30.0),
            entry(BudgetType::Expense, "Books", 45.5),
            entry(BudgetType::Expense, "Food", 20.0),
        ];
        let summary = BudgetSummary::new(&entries, None);
        assert!((summary.totals.current_balance - 104.5).abs() < f64::EPSILON);
        assert_eq!(summary.totals.total_entries, 4);

        let names: Vec<_> = summary.by_category.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["Allowance", "Food", "Books"]);
        assert!((summary.by_category[1].amount - 50.0).abs() < f64::EPSILON);
    }
}
