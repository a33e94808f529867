//! HTTP request handlers for the timesheet engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{holidays_for_year, resolve_period};
use crate::models::{HOLIDAY_TABLE_VERSION, MAX_YEAR, MIN_YEAR};

use super::request::ResolveRequest;
use super::response::{ApiError, ApiErrorResponse, HolidaysResponse, ScheduleResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/periods/resolve", post(resolve_handler))
        .route("/periods/current", get(current_handler))
        .route("/holidays/:year", get(holidays_handler))
        .route("/schedule/:year", get(schedule_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Extracts a supported year from the path, or the 400 response to send.
fn parse_year(
    correlation_id: &Uuid,
    year: Result<Path<i32>, PathRejection>,
) -> Result<i32, Response> {
    match year {
        Ok(Path(year)) if (MIN_YEAR..=MAX_YEAR).contains(&year) => Ok(year),
        Ok(Path(year)) => {
            warn!(correlation_id = %correlation_id, year, "Year out of range");
            Err(error_response(ApiErrorResponse::bad_request(
                ApiError::invalid_year(year.to_string()),
            )))
        }
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid year in path");
            Err(error_response(ApiErrorResponse::bad_request(
                ApiError::invalid_year(rejection.body_text()),
            )))
        }
    }
}

/// Handler for POST /periods/resolve.
///
/// Accepts a period and returns its pay, email and reminder dates.
async fn resolve_handler(payload: Result<Json<ResolveRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing resolve request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    let period = match request.to_period() {
        Ok(period) => period,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid pay period"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let dates = resolve_period(&period);
    info!(
        correlation_id = %correlation_id,
        period = %period,
        pay_date = %dates.pay_date(),
        duration_us = start_time.elapsed().as_micros(),
        "Resolve completed successfully"
    );

    json_response(StatusCode::OK, dates)
}

/// Handler for GET /periods/current.
///
/// Selects the period containing "now" in the configured timezone.
async fn current_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.orchestrator().current(Utc::now()) {
        Ok(current) => {
            info!(
                correlation_id = %correlation_id,
                period = %current.period,
                "Current period selected"
            );
            json_response(StatusCode::OK, current)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Current period failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /holidays/{year}.
async fn holidays_handler(year: Result<Path<i32>, PathRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let year = match parse_year(&correlation_id, year) {
        Ok(year) => year,
        Err(response) => return response,
    };

    let holidays = holidays_for_year(year);
    info!(
        correlation_id = %correlation_id,
        year,
        count = holidays.len(),
        "Holiday table listed"
    );

    json_response(
        StatusCode::OK,
        HolidaysResponse {
            year,
            table_version: HOLIDAY_TABLE_VERSION.to_string(),
            holidays,
        },
    )
}

/// Handler for GET /schedule/{year}.
async fn schedule_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year = match parse_year(&correlation_id, year) {
        Ok(year) => year,
        Err(response) => return response,
    };

    let orchestrator = state.orchestrator();
    match orchestrator.plan_year(year) {
        Ok(triggers) => {
            info!(
                correlation_id = %correlation_id,
                year,
                count = triggers.len(),
                "Schedule planned"
            );
            json_response(
                StatusCode::OK,
                ScheduleResponse {
                    year,
                    timezone: orchestrator.timezone().name().to_string(),
                    triggers,
                },
            )
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Schedule planning failed");
            error_response(err.into())
        }
    }
}
