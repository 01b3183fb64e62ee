use loan_plan_common::errors::PlanError;
use serde::Serialize;
use warp::reject::Reject;

#[derive(Debug)]
pub struct WebServicePlanError(pub PlanError);

impl Reject for WebServicePlanError {}

/// **Body of every error response**
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}
