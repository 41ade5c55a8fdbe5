mod dashboard;
mod engine;
mod error;
mod expenses;
mod ledger;
pub mod parse;
mod types;

pub use dashboard::{allocation_breakdown, goal_progress};
pub use engine::{
    DEFAULT_FIRST_MONTH_CONTRIBUTION, DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_RETURN_RATE_PERCENT,
    default_month_labels, month_over_month_growth, simulate, summarize_simulation,
};
pub use error::{ParseError, ValidationError};
pub use expenses::{summarize_by_category, total_expenses, validate_expense};
pub use ledger::{PC_SHARE, allocation_status, compute_remaining, ledger_totals, submit_entry};
pub use types::{
    AllocationBucket, AllocationSlice, AllocationStatus, CategorySummary, EntryCandidate, Expense,
    ExpenseCandidate, ExpenseCategory, FinancialEntry, GoalProgress, LedgerTotals,
    MonthlySimulationPoint, NewExpense, SimulationInputs, SimulationSummary,
};
