//! Plan response body.

use serde::{Deserialize, Serialize};

use crate::models::PlanResult;
use crate::solver::InversePlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanResponse {
    Forward(PlanResult),
    Inverse(InversePlan),
}

impl PlanResponse {
    /// The plan itself, regardless of mode.
    pub fn plan(&self) -> &PlanResult {
        match self {
            PlanResponse::Forward(plan) => plan,
            PlanResponse::Inverse(inverse) => &inverse.plan,
        }
    }
}
