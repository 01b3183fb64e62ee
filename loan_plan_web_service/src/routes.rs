//! Filters that make up the service

use crate::handlers;
use std::convert::Infallible;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body, in bytes.
pub const BODY_LIMIT: u64 = 1024 * 16;

/// **POST /generate_plan**
pub fn generate_plan() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("generate_plan")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and_then(handlers::generate_plan)
}

/// **All routes, with rejections turned into JSON error responses**
pub fn api() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    generate_plan()
        .recover(handlers::handle_rejection)
        .with(warp::log("loan_plan"))
}
