//! Project code formatting.
//!
//! Codes are `DS` followed by the identifier left-padded with `0` to eight
//! characters. Intake candidates are coded from their key, so `new7` becomes
//! `DS0000new7`.

/// Prefix shared by every project code.
pub const PROJECT_CODE_PREFIX: &str = "DS";

const CODE_WIDTH: usize = 8;

/// Format the display code for a registry project id.
#[must_use]
pub fn project_code(id: u32) -> String {
    code_for(&id.to_string())
}

/// Format the display code for an arbitrary identifier (ids or intake keys).
#[must_use]
pub fn code_for(raw: &str) -> String {
    format!("{PROJECT_CODE_PREFIX}{raw:0>CODE_WIDTH$}")
}
