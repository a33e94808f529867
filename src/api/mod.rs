//! HTTP API module for the timesheet engine.
//!
//! This module exposes period resolution, the holiday table and the
//! trigger schedule as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ResolveRequest;
pub use response::{ApiError, HolidaysResponse, ScheduleResponse};
pub use state::AppState;
