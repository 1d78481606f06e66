use serde::Serialize;

use crate::model::{ActionCategory, ConfidenceRating, ImpactCompletion, ImpactSeverity, ImpactType};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub impact: Option<Impact>,
    pub actions: Vec<Action>,
    pub confidence: Option<Confidence>,
}

/// `severity` and `completion` have no default; `impact_type` defaults to `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Impact {
    pub severity: Option<ImpactSeverity>,
    pub completion: Option<ImpactCompletion>,
    pub impact_type: Option<ImpactType>,
    pub description: Option<String>,
}

impl Impact {
    pub fn impact_type(&self) -> ImpactType {
        self.impact_type.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Action {
    pub category: Option<ActionCategory>,
    pub description: Option<String>,
}

impl Action {
    pub fn category(&self) -> ActionCategory {
        self.category.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Confidence {
    pub rating: Option<ConfidenceRating>,
    /// Probability in `0.0..=1.0`, meaningful when the rating is `numeric`.
    pub value: Option<f64>,
}

impl Confidence {
    pub fn rating(&self) -> ConfidenceRating {
        self.rating.unwrap_or_default()
    }
}
