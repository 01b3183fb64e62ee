//! Handler functions

use crate::errors::{ErrorMessage, WebServicePlanError};
use loan_plan_common::engine;
use loan_plan_common::errors::PlanError;
use loan_plan_common::LoanRequest;
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType};
use warp::{Rejection, Reply};

/// The `generate_plan` handler
///
/// Responds with the whole amortization schedule, one record per month.
///
/// POST /generate_plan
pub async fn generate_plan(request: LoanRequest) -> Result<impl Reply, Rejection> {
    log::debug!("generate_plan; request = {:?}", request);

    match engine::generate_plan(&request) {
        Ok(schedule) => Ok(warp::reply::json(&schedule)),
        Err(plan_err) => {
            log::warn!("generate_plan; {}", plan_err);
            Err(warp::reject::custom(WebServicePlanError(plan_err)))
        }
    }
}

/// **Status code for an error of the domain**
fn plan_error_status(err: &PlanError) -> StatusCode {
    match err {
        PlanError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlanError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
    }
}

/// **Turns a rejection into a JSON error response**
///
/// A body that doesn't decode into a loan request is a malformed request (400);
/// one that decodes but can't produce a plan is invalid input (422).
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(WebServicePlanError(plan_err)) = err.find::<WebServicePlanError>() {
        (plan_error_status(plan_err), plan_err.to_string())
    } else if let Some(body_err) = err.find::<BodyDeserializeError>() {
        let plan_err = PlanError::MalformedRequest(body_err.to_string());
        (plan_error_status(&plan_err), plan_err.to_string())
    } else if err.find::<MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "HTTP method not supported".to_string(),
        )
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected a JSON body".to_string(),
        )
    } else if err.find::<LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content-Length header is required".to_string(),
        )
    } else if err.find::<PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body is too large".to_string(),
        )
    } else {
        log::error!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    let body = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(body, code))
}
