use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::ValidationError;
use super::types::{AllocationStatus, EntryCandidate, FinancialEntry, LedgerTotals};

/// Share of each free investment set aside for the PC fund.
pub const PC_SHARE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Validates `candidate` and derives its running totals from the tail of
/// `ledger`. The ledger itself is left untouched; appending is up to the caller.
///
/// Allocations that do not add up to the income are accepted, see
/// [`compute_remaining`].
pub fn submit_entry(
    candidate: &EntryCandidate,
    ledger: &[FinancialEntry],
) -> Result<FinancialEntry, ValidationError> {
    let Some(date) = candidate.date else {
        return Err(ValidationError::MissingRequiredField("date"));
    };
    if candidate.income <= Decimal::ZERO {
        return Err(ValidationError::MissingRequiredField("income"));
    }

    let (prior_investments, prior_pc) = ledger
        .last()
        .map(|tail| (tail.accumulated_investments, tail.accumulated_pc))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let entry = FinancialEntry {
        id: Uuid::new_v4(),
        date,
        income: candidate.income,
        free_investment: candidate.free_investment,
        fixed_income: candidate.fixed_income,
        personal_use: candidate.personal_use,
        surplus: candidate.surplus,
        accumulated_investments: prior_investments.saturating_add(candidate.free_investment),
        accumulated_pc: prior_pc.saturating_add(candidate.free_investment * PC_SHARE),
    };

    tracing::debug!(
        id = %entry.id,
        position = ledger.len(),
        accumulated_investments = %entry.accumulated_investments,
        "entry accepted"
    );
    Ok(entry)
}

/// Income left over after the four allocation buckets. Negative when over-allocated.
pub fn compute_remaining(candidate: &EntryCandidate) -> Decimal {
    candidate.income.saturating_sub(candidate.total_allocated())
}

pub fn allocation_status(remaining: Decimal) -> AllocationStatus {
    if remaining.is_zero() {
        AllocationStatus::FullyAllocated
    } else if remaining.is_sign_positive() {
        AllocationStatus::Unallocated
    } else {
        AllocationStatus::OverAllocated
    }
}

pub fn ledger_totals(ledger: &[FinancialEntry]) -> LedgerTotals {
    let mut totals = LedgerTotals {
        entry_count: ledger.len(),
        total_income: ledger
            .iter()
            .map(|entry| entry.income)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        ..LedgerTotals::default()
    };
    if let Some(tail) = ledger.last() {
        totals.accumulated_investments = tail.accumulated_investments;
        totals.accumulated_pc = tail.accumulated_pc;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::collection::vec;
    use proptest::prelude::{prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn candidate(free: Decimal) -> EntryCandidate {
        EntryCandidate {
            date: Some(date(2024, 8, 15)),
            income: dec!(901.52),
            free_investment: free,
            fixed_income: dec!(300),
            personal_use: dec!(150),
            surplus: dec!(51.52),
        }
    }

    fn append(ledger: &mut Vec<FinancialEntry>, candidate: &EntryCandidate) {
        let entry = submit_entry(candidate, ledger).expect("valid entry");
        ledger.push(entry);
    }

    #[test]
    fn first_entry_starts_from_zero() {
        let entry = submit_entry(&candidate(dec!(400)), &[]).expect("valid entry");
        assert_eq!(entry.accumulated_investments, dec!(400));
        assert_eq!(entry.accumulated_pc, dec!(100));
        assert_eq!(entry.income, dec!(901.52));
    }

    #[test]
    fn entries_accumulate_from_ledger_tail() {
        let mut ledger = Vec::new();
        append(&mut ledger, &candidate(dec!(400)));
        append(
            &mut ledger,
            &EntryCandidate {
                date: Some(date(2024, 8, 30)),
                income: dec!(1100),
                free_investment: dec!(500),
                fixed_income: dec!(350),
                personal_use: dec!(200),
                surplus: dec!(50),
            },
        );
        append(&mut ledger, &candidate(dec!(400)));

        let accumulated: Vec<_> = ledger.iter().map(|e| e.accumulated_investments).collect();
        let pc: Vec<_> = ledger.iter().map(|e| e.accumulated_pc).collect();
        assert_eq!(accumulated, vec![dec!(400), dec!(900), dec!(1300)]);
        assert_eq!(pc, vec![dec!(100), dec!(225), dec!(325)]);
    }

    #[test]
    fn earlier_dates_are_not_resorted() {
        let mut ledger = Vec::new();
        append(&mut ledger, &candidate(dec!(400)));
        let earlier = EntryCandidate {
            date: Some(date(2020, 1, 1)),
            ..candidate(dec!(100))
        };
        append(&mut ledger, &earlier);

        assert_eq!(ledger[1].date, date(2020, 1, 1));
        assert_eq!(ledger[1].accumulated_investments, dec!(500));
    }

    #[test]
    fn each_entry_gets_a_fresh_id() {
        let first = submit_entry(&candidate(dec!(1)), &[]).expect("valid entry");
        let second = submit_entry(&candidate(dec!(1)), &[]).expect("valid entry");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn missing_date_is_rejected() {
        let c = EntryCandidate {
            date: None,
            ..candidate(dec!(400))
        };
        assert_eq!(
            submit_entry(&c, &[]),
            Err(ValidationError::MissingRequiredField("date"))
        );
    }

    #[test]
    fn non_positive_income_is_rejected() {
        for income in [dec!(0), dec!(-10)] {
            let c = EntryCandidate {
                income,
                ..candidate(dec!(400))
            };
            assert_eq!(
                submit_entry(&c, &[]),
                Err(ValidationError::MissingRequiredField("income"))
            );
        }
    }

    #[test]
    fn over_allocation_is_accepted_and_reported() {
        let c = EntryCandidate {
            date: Some(date(2024, 9, 1)),
            income: dec!(100),
            free_investment: dec!(80),
            fixed_income: dec!(40),
            ..EntryCandidate::default()
        };
        assert!(submit_entry(&c, &[]).is_ok());
        assert_eq!(compute_remaining(&c), dec!(-20));
        assert_eq!(allocation_status(compute_remaining(&c)), AllocationStatus::OverAllocated);
    }

    #[test]
    fn allocation_status_follows_sign() {
        assert_eq!(allocation_status(dec!(0.00)), AllocationStatus::FullyAllocated);
        assert_eq!(allocation_status(dec!(0.01)), AllocationStatus::Unallocated);
        assert_eq!(allocation_status(dec!(-0.01)), AllocationStatus::OverAllocated);
    }

    #[test]
    fn fully_allocated_candidate_has_zero_remaining() {
        assert_eq!(compute_remaining(&candidate(dec!(400))), dec!(0));
    }

    #[test]
    fn totals_on_empty_ledger_are_zero() {
        assert_eq!(ledger_totals(&[]), LedgerTotals::default());
    }

    #[test]
    fn totals_read_accumulations_from_tail() {
        let mut ledger = Vec::new();
        append(&mut ledger, &candidate(dec!(400)));
        append(&mut ledger, &candidate(dec!(100)));

        let totals = ledger_totals(&ledger);
        assert_eq!(totals.entry_count, 2);
        assert_eq!(totals.total_income, dec!(1803.04));
        assert_eq!(totals.accumulated_investments, dec!(500));
        assert_eq!(totals.accumulated_pc, dec!(125));
    }

    #[test]
    fn huge_amounts_saturate_running_totals() {
        let huge = EntryCandidate {
            date: Some(date(2024, 10, 1)),
            income: Decimal::MAX,
            free_investment: Decimal::MAX,
            fixed_income: Decimal::MAX,
            ..EntryCandidate::default()
        };
        let mut ledger = Vec::new();
        append(&mut ledger, &huge);
        append(&mut ledger, &huge);

        assert_eq!(ledger[1].accumulated_investments, Decimal::MAX);
        assert!(ledger[1].accumulated_pc > ledger[0].accumulated_pc);
        assert_eq!(ledger_totals(&ledger).accumulated_investments, Decimal::MAX);

        let overdrawn = EntryCandidate {
            income: Decimal::MIN,
            free_investment: Decimal::MAX,
            ..EntryCandidate::default()
        };
        assert_eq!(compute_remaining(&overdrawn), Decimal::MIN);
        assert_eq!(ledger_totals(&ledger).total_income, Decimal::MAX);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_running_totals_follow_recurrence(
            free_cents in vec(0u32..10_000_000, 1..20)
        ) {
            let mut ledger: Vec<FinancialEntry> = Vec::new();
            for cents in &free_cents {
                let c = EntryCandidate {
                    date: Some(date(2024, 1, 1)),
                    income: dec!(1),
                    free_investment: Decimal::new(*cents as i64, 2),
                    ..EntryCandidate::default()
                };
                let entry = submit_entry(&c, &ledger).expect("valid entry");
                ledger.push(entry);
            }

            let mut prev_inv = Decimal::ZERO;
            let mut prev_pc = Decimal::ZERO;
            for entry in &ledger {
                prop_assert_eq!(entry.accumulated_investments, prev_inv + entry.free_investment);
                prop_assert_eq!(entry.accumulated_pc, prev_pc + entry.free_investment * dec!(0.25));
                prev_inv = entry.accumulated_investments;
                prev_pc = entry.accumulated_pc;
            }
        }

        #[test]
        fn prop_remaining_is_income_minus_allocations(
            income in 0u32..10_000_000,
            a in 0u32..10_000_000,
            b in 0u32..10_000_000,
            c in 0u32..10_000_000,
            d in 0u32..10_000_000
        ) {
            let cents = |v: u32| Decimal::new(v as i64, 2);
            let candidate = EntryCandidate {
                date: None,
                income: cents(income),
                free_investment: cents(a),
                fixed_income: cents(b),
                personal_use: cents(c),
                surplus: cents(d),
            };
            let swapped = EntryCandidate {
                free_investment: cents(d),
                surplus: cents(a),
                ..candidate.clone()
            };

            prop_assert_eq!(
                compute_remaining(&candidate),
                cents(income) - (cents(a) + cents(b) + cents(c) + cents(d))
            );
            prop_assert_eq!(compute_remaining(&candidate), compute_remaining(&swapped));
        }
    }
}
