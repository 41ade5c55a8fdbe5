use std::net::SocketAddr;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{
    AllocationSlice, AllocationStatus, CategorySummary, EntryCandidate, Expense, ExpenseCandidate, ExpenseCategory,
    FinancialEntry, GoalProgress, LedgerTotals, MonthlySimulationPoint, NewExpense,
    SimulationInputs, SimulationSummary, ValidationError, allocation_status, compute_remaining,
    allocation_breakdown, goal_progress, ledger_totals, month_over_month_growth,
    parse::{date_or_none, decimal_or_zero},
    simulate, submit_entry, summarize_by_category, summarize_simulation, total_expenses,
    validate_expense,
};

/// Savings target the dashboard measures accumulated investments against.
pub const DEFAULT_GOAL_TARGET: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// A form field as the browser sends it: usually text, sometimes a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Number(serde_json::Number),
}

impl FormValue {
    fn text(&self) -> String {
        match self {
            FormValue::Text(s) => s.clone(),
            FormValue::Number(n) => n.to_string(),
        }
    }
}

fn amount(field: &Option<FormValue>) -> Decimal {
    decimal_or_zero(field.as_ref().map(FormValue::text).as_deref())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MonthsField {
    List(Vec<String>),
    Csv(String),
}

impl MonthsField {
    fn into_labels(self) -> Vec<String> {
        match self {
            MonthsField::List(labels) => labels,
            MonthsField::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EntryPayload {
    date: Option<String>,
    income: Option<FormValue>,
    free_investment: Option<FormValue>,
    fixed_income: Option<FormValue>,
    personal_use: Option<FormValue>,
    surplus: Option<FormValue>,
    ledger: Vec<FinancialEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LedgerPayload {
    ledger: Vec<FinancialEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExpensePayload {
    date: Option<String>,
    category: Option<String>,
    description: Option<String>,
    amount: Option<FormValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExpenseSummaryPayload {
    expenses: Vec<Expense>,
    categories: Option<Vec<ExpenseCategory>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    return_rate: Option<FormValue>,
    monthly_contribution: Option<FormValue>,
    first_month_contribution: Option<FormValue>,
    months: Option<MonthsField>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoalQuery {
    accumulated: Option<FormValue>,
    target: Option<FormValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitEntryResponse {
    entry: FinancialEntry,
    remaining: Decimal,
    status: AllocationStatus,
    breakdown: [AllocationSlice; 4],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemainingResponse {
    total_allocated: Decimal,
    remaining: Decimal,
    status: AllocationStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseSummaryResponse {
    total: Decimal,
    by_category: Vec<CategorySummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    points: Vec<MonthlySimulationPoint>,
    summary: SimulationSummary,
    growth: Vec<Decimal>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn entry_candidate_from_payload(payload: &EntryPayload) -> EntryCandidate {
    EntryCandidate {
        date: date_or_none(payload.date.as_deref()),
        income: amount(&payload.income),
        free_investment: amount(&payload.free_investment),
        fixed_income: amount(&payload.fixed_income),
        personal_use: amount(&payload.personal_use),
        surplus: amount(&payload.surplus),
    }
}

fn expense_candidate_from_payload(payload: &ExpensePayload) -> ExpenseCandidate {
    ExpenseCandidate {
        date: date_or_none(payload.date.as_deref()),
        category: payload
            .category
            .as_deref()
            .and_then(|raw| raw.parse::<ExpenseCategory>().ok()),
        description: payload.description.clone().unwrap_or_default(),
        amount: amount(&payload.amount),
    }
}

/// Missing fields fall back to the dashboard defaults; present but unreadable
/// amounts become zero.
fn simulation_inputs_from_payload(payload: SimulatePayload) -> SimulationInputs {
    let mut inputs = SimulationInputs::default();
    if let Some(v) = &payload.return_rate {
        inputs.return_rate_percent = decimal_or_zero(Some(v.text().as_str()));
    }
    if let Some(v) = &payload.monthly_contribution {
        inputs.monthly_contribution = decimal_or_zero(Some(v.text().as_str()));
    }
    if let Some(v) = &payload.first_month_contribution {
        inputs.first_month_contribution = decimal_or_zero(Some(v.text().as_str()));
    }
    if let Some(months) = payload.months {
        inputs.month_labels = months.into_labels();
    }
    inputs
}

pub fn router() -> Router {
    Router::new()
        .route("/api/ledger/entries", post(submit_entry_handler))
        .route("/api/ledger/remaining", post(remaining_handler))
        .route("/api/ledger/totals", post(totals_handler))
        .route("/api/expenses/validate", post(validate_expense_handler))
        .route("/api/expenses/summary", post(expense_summary_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route("/api/dashboard/goal", get(goal_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "finflow HTTP API listening");
    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn submit_entry_handler(payload: Result<Json<EntryPayload>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    submit_entry_impl(payload)
}

fn submit_entry_impl(payload: EntryPayload) -> Response {
    let candidate = entry_candidate_from_payload(&payload);
    match submit_entry(&candidate, &payload.ledger) {
        Ok(entry) => {
            let remaining = compute_remaining(&candidate);
            tracing::info!(id = %entry.id, %remaining, "ledger entry submitted");
            json_response(
                StatusCode::CREATED,
                SubmitEntryResponse {
                    breakdown: allocation_breakdown(&entry),
                    entry,
                    remaining,
                    status: allocation_status(remaining),
                },
            )
        }
        Err(err) => validation_response(err),
    }
}

async fn remaining_handler(payload: Result<Json<EntryPayload>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let candidate = entry_candidate_from_payload(&payload);
    let remaining = compute_remaining(&candidate);
    json_response(
        StatusCode::OK,
        RemainingResponse {
            total_allocated: candidate.total_allocated(),
            remaining,
            status: allocation_status(remaining),
        },
    )
}

async fn totals_handler(payload: Result<Json<LedgerPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => {
            let totals: LedgerTotals = ledger_totals(&payload.ledger);
            json_response(StatusCode::OK, totals)
        }
        Err(rejection) => rejection_response(rejection),
    }
}

async fn validate_expense_handler(
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    validate_expense_impl(&payload)
}

fn validate_expense_impl(payload: &ExpensePayload) -> Response {
    let candidate = expense_candidate_from_payload(payload);
    match validate_expense(&candidate) {
        Ok(expense) => json_response::<NewExpense>(StatusCode::OK, expense),
        Err(err) => validation_response(err),
    }
}

async fn expense_summary_handler(
    payload: Result<Json<ExpenseSummaryPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    expense_summary_impl(payload)
}

fn expense_summary_impl(payload: ExpenseSummaryPayload) -> Response {
    let categories = payload
        .categories
        .unwrap_or_else(|| ExpenseCategory::ALL.to_vec());
    json_response(
        StatusCode::OK,
        ExpenseSummaryResponse {
            total: total_expenses(&payload.expenses),
            by_category: summarize_by_category(&payload.expenses, &categories),
        },
    )
}

async fn simulate_get_handler(query: Result<Query<SimulatePayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => simulate_handler_impl(payload),
        Err(rejection) => query_rejection_response(rejection),
    }
}

async fn simulate_post_handler(payload: Result<Json<SimulatePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => simulate_handler_impl(payload),
        Err(rejection) => rejection_response(rejection),
    }
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = simulation_inputs_from_payload(payload);
    let points = simulate(&inputs);
    let response = SimulateResponse {
        summary: summarize_simulation(&inputs, &points),
        growth: month_over_month_growth(&points),
        points,
    };
    json_response(StatusCode::OK, response)
}

async fn goal_handler(query: Result<Query<GoalQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection),
    };
    let target = match &query.target {
        Some(_) => amount(&query.target),
        None => DEFAULT_GOAL_TARGET,
    };
    let progress: GoalProgress = goal_progress(amount(&query.accumulated), target);
    json_response(StatusCode::OK, progress)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn validation_response(err: ValidationError) -> Response {
    tracing::warn!(%err, "rejected submission");
    error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::warn!(error = %rejection.body_text(), "malformed request body");
    error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
}

fn query_rejection_response(rejection: QueryRejection) -> Response {
    tracing::warn!(error = %rejection.body_text(), "malformed query string");
    error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
}
