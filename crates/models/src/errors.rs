use thiserror::Error;

/// Field-level violations collected while validating an asset candidate.
///
/// Messages keep the field order `name`, `serialNo`, `assignDate` and there is
/// at most one message per field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", .violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self { Self { violations } }

    pub fn violations(&self) -> &[String] { &self.violations }
}
