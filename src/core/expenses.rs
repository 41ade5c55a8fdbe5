use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::{CategorySummary, Expense, ExpenseCandidate, ExpenseCategory, NewExpense};

pub fn validate_expense(candidate: &ExpenseCandidate) -> Result<NewExpense, ValidationError> {
    let date = candidate
        .date
        .ok_or(ValidationError::MissingRequiredField("date"))?;
    let category = candidate
        .category
        .ok_or(ValidationError::MissingRequiredField("category"))?;
    let description = candidate.description.trim();
    if description.is_empty() {
        return Err(ValidationError::MissingRequiredField("description"));
    }
    if candidate.amount <= Decimal::ZERO {
        return Err(ValidationError::MissingRequiredField("amount"));
    }

    Ok(NewExpense {
        date,
        category,
        description: description.to_string(),
        amount: candidate.amount,
    })
}

pub fn total_expenses(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .map(|expense| expense.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Totals per category, in the order of `categories`. Matching is an exact,
/// case-sensitive comparison against the stored category string; categories
/// without any matching expense are left out.
pub fn summarize_by_category(
    expenses: &[Expense],
    categories: &[ExpenseCategory],
) -> Vec<CategorySummary> {
    categories
        .iter()
        .filter_map(|&category| {
            let (total, count) = expenses
                .iter()
                .filter(|expense| expense.category == category.as_str())
                .fold((Decimal::ZERO, 0usize), |(total, count), expense| {
                    (total.saturating_add(expense.amount), count + 1)
                });
            (count > 0).then_some(CategorySummary {
                category,
                total,
                count,
            })
        })
        .collect()
}
