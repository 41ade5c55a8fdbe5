use rust_decimal::Decimal;

use super::types::{AllocationBucket, AllocationSlice, FinancialEntry, GoalProgress};

/// Progress of an accumulated amount towards a savings target. The bar value is
/// capped at 100 while `percentage` is reported as-is, saturating at
/// `Decimal::MAX`/`Decimal::MIN` when the ratio does not fit.
pub fn goal_progress(accumulated: Decimal, target: Decimal) -> GoalProgress {
    let percentage = if target > Decimal::ZERO {
        accumulated
            .checked_div(target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if accumulated.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    } else {
        Decimal::ONE_HUNDRED
    };

    GoalProgress {
        accumulated,
        target,
        percentage,
        bar_percentage: percentage.min(Decimal::ONE_HUNDRED),
        on_track: accumulated >= target,
    }
}

pub fn allocation_breakdown(entry: &FinancialEntry) -> [AllocationSlice; 4] {
    [
        AllocationSlice {
            bucket: AllocationBucket::FreeInvestment,
            value: entry.free_investment,
        },
        AllocationSlice {
            bucket: AllocationBucket::FixedIncome,
            value: entry.fixed_income,
        },
        AllocationSlice {
            bucket: AllocationBucket::PersonalUse,
            value: entry.personal_use,
        },
        AllocationSlice {
            bucket: AllocationBucket::Surplus,
            value: entry.surplus,
        },
    ]
}
