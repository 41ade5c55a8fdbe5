use rust_decimal::Decimal;

use super::types::{MonthlySimulationPoint, SimulationInputs, SimulationSummary};

pub const DEFAULT_RETURN_RATE_PERCENT: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
pub const DEFAULT_MONTHLY_CONTRIBUTION: Decimal = Decimal::from_parts(450, 0, 0, false, 0);
pub const DEFAULT_FIRST_MONTH_CONTRIBUTION: Decimal = Decimal::from_parts(400, 0, 0, false, 0);

const DEFAULT_MONTH_LABELS: [&str; 5] = ["Agosto", "Setembro", "Outubro", "Novembro", "Dezembro"];

pub fn default_month_labels() -> Vec<String> {
    DEFAULT_MONTH_LABELS.iter().map(|m| m.to_string()).collect()
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            return_rate_percent: DEFAULT_RETURN_RATE_PERCENT,
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            first_month_contribution: DEFAULT_FIRST_MONTH_CONTRIBUTION,
            month_labels: default_month_labels(),
        }
    }
}

impl SimulationInputs {
    /// Contribution applied at `index` of the horizon.
    pub fn contribution_at(&self, index: usize) -> Decimal {
        if index == 0 {
            self.first_month_contribution
        } else {
            self.monthly_contribution
        }
    }
}

/// Projects the account month by month: contribute, grow, round to whole units.
/// The rounded value is carried into the next month. Values saturate at
/// `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn simulate(inputs: &SimulationInputs) -> Vec<MonthlySimulationPoint> {
    let mut points = Vec::with_capacity(inputs.month_labels.len());
    let mut current_value = Decimal::ZERO;

    for (index, month) in inputs.month_labels.iter().enumerate() {
        let final_value = compound_month(
            current_value,
            inputs.contribution_at(index),
            inputs.return_rate_percent,
        );
        points.push(MonthlySimulationPoint {
            month: month.clone(),
            initial_value: current_value,
            return_rate: inputs.return_rate_percent,
            final_value,
        });
        current_value = final_value;
    }

    tracing::debug!(
        months = points.len(),
        final_value = %current_value,
        "compounding simulation complete"
    );
    points
}

/// Totals for a simulated horizon. Contributions are recomputed from the
/// contribution policy for every point present, not read back from the points.
pub fn summarize_simulation(
    inputs: &SimulationInputs,
    points: &[MonthlySimulationPoint],
) -> SimulationSummary {
    let final_value = points
        .last()
        .map(|point| point.final_value)
        .unwrap_or(Decimal::ZERO);
    let total_contributed = (0..points.len())
        .map(|index| inputs.contribution_at(index))
        .fold(Decimal::ZERO, Decimal::saturating_add);

    SimulationSummary {
        final_value,
        total_contributed,
        total_returns: final_value.saturating_sub(total_contributed),
    }
}

/// Change in final value per month; the first month reports its own final value.
pub fn month_over_month_growth(points: &[MonthlySimulationPoint]) -> Vec<Decimal> {
    let mut previous: Option<Decimal> = None;
    points
        .iter()
        .map(|point| {
            let growth = match previous {
                Some(prev) => point.final_value.saturating_sub(prev),
                None => point.final_value,
            };
            previous = Some(point.final_value);
            growth
        })
        .collect()
}

fn compound_month(current_value: Decimal, contribution: Decimal, rate_percent: Decimal) -> Decimal {
    let value_with_contribution = current_value.saturating_add(contribution);
    let returns = value_with_contribution.saturating_mul(rate_percent / Decimal::ONE_HUNDRED);
    round_half_up(value_with_contribution.saturating_add(returns))
}

// Halves go toward positive infinity, so -2.5 rounds to -2.
fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(Decimal::new(5, 1)).floor()
}
