use serde::Serialize;
use serde_json::Value;

/// Success envelope: `{"results": ...}`
#[derive(Debug, Serialize)]
pub struct ResultsResponse<'a> {
    pub results: &'a Value,
}

impl<'a> ResultsResponse<'a> {
    pub fn new(results: &'a Value) -> Self {
        Self { results }
    }
}
