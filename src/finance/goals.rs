//! Goal feasibility

use serde::{Deserialize, Serialize};

use super::{require_finite, require_non_negative, require_years};
use crate::models::Goal;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAssessment {
    pub goal_id: String,
    pub required_monthly_saving: f64,
    pub feasible: bool,
    /// Years the goal would actually take at the current savings rate, when
    /// the planned timeline is out of reach. `None` if nothing is being saved
    /// or the goal could not be reached within `u32::MAX` years.
    pub adjusted_timeline_years: Option<u32>,
}

/// Checks whether `monthly_savings` is enough to reach `goal` on time.
pub fn assess_goal(goal: &Goal, monthly_savings: f64) -> Result<GoalAssessment> {
    let target = require_non_negative("goal amount", goal.target_amount)?;
    let timeline = require_years("goal timeline", goal.timeline)?;
    let monthly_savings = require_finite("monthly savings", monthly_savings)?;

    let required = target / (f64::from(timeline) * 12.0);
    let feasible = required <= monthly_savings;

    let adjusted_timeline_years = if feasible {
        Some(timeline)
    } else if monthly_savings > 0.0 {
        let years = (target / (monthly_savings * 12.0)).ceil();
        (years.is_finite() && years <= f64::from(u32::MAX)).then(|| years as u32)
    } else {
        None
    };

    Ok(GoalAssessment {
        goal_id: goal.id.clone(),
        required_monthly_saving: required,
        feasible,
        adjusted_timeline_years,
    })
}
