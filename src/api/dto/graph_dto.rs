use serde::Deserialize;

/// Query string for step selection (`?start=..&end=..`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Date picker range (`?from=..&to=..`); either side may be missing or invalid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnergyGraphQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatQuery {
    pub value: Option<f64>,
}
