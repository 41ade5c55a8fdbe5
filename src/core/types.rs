use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One accepted income allocation together with the running totals it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub income: Decimal,
    pub free_investment: Decimal,
    pub fixed_income: Decimal,
    pub personal_use: Decimal,
    pub surplus: Decimal,
    pub accumulated_investments: Decimal,
    #[serde(rename = "accumulatedPC")]
    pub accumulated_pc: Decimal,
}

/// Form values for an entry that has not been accepted yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryCandidate {
    pub date: Option<NaiveDate>,
    pub income: Decimal,
    pub free_investment: Decimal,
    pub fixed_income: Decimal,
    pub personal_use: Decimal,
    pub surplus: Decimal,
}

impl EntryCandidate {
    pub fn total_allocated(&self) -> Decimal {
        [self.fixed_income, self.personal_use, self.surplus]
            .into_iter()
            .fold(self.free_investment, Decimal::saturating_add)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStatus {
    FullyAllocated,
    Unallocated,
    OverAllocated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub entry_count: usize,
    pub total_income: Decimal,
    pub accumulated_investments: Decimal,
    #[serde(rename = "accumulatedPC")]
    pub accumulated_pc: Decimal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationBucket {
    FreeInvestment,
    FixedIncome,
    PersonalUse,
    Surplus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub bucket: AllocationBucket,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub accumulated: Decimal,
    pub target: Decimal,
    pub percentage: Decimal,
    pub bar_percentage: Decimal,
    pub on_track: bool,
}

/// Parameters of one compounding run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInputs {
    /// Monthly return in percent, e.g. 0.7 for 0.7%.
    pub return_rate_percent: Decimal,
    pub monthly_contribution: Decimal,
    /// Applied to the first month only.
    pub first_month_contribution: Decimal,
    pub month_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySimulationPoint {
    pub month: String,
    pub initial_value: Decimal,
    pub return_rate: Decimal,
    pub final_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub final_value: Decimal,
    pub total_contributed: Decimal,
    pub total_returns: Decimal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Alimentação")]
    Alimentacao,
    Transporte,
    Lazer,
    #[serde(rename = "Saúde")]
    Saude,
    Moradia,
    #[serde(rename = "Educação")]
    Educacao,
    #[serde(rename = "Vestuário")]
    Vestuario,
    Outros,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Alimentacao,
        ExpenseCategory::Transporte,
        ExpenseCategory::Lazer,
        ExpenseCategory::Saude,
        ExpenseCategory::Moradia,
        ExpenseCategory::Educacao,
        ExpenseCategory::Vestuario,
        ExpenseCategory::Outros,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Alimentacao => "Alimentação",
            ExpenseCategory::Transporte => "Transporte",
            ExpenseCategory::Lazer => "Lazer",
            ExpenseCategory::Saude => "Saúde",
            ExpenseCategory::Moradia => "Moradia",
            ExpenseCategory::Educacao => "Educação",
            ExpenseCategory::Vestuario => "Vestuário",
            ExpenseCategory::Outros => "Outros",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown expense category: {s:?}"))
    }
}

/// Expense record in the shape the remote store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseCandidate {
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub description: String,
    pub amount: Decimal,
}

/// An expense that passed validation and is ready to be sent to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub count: usize,
}
