//! Raw-to-public response translation
//!
//! Three independent closed-set mappings, each total over its axis's legal
//! raw values. Anything outside the mapped set is a programming error and
//! fails with [`ContractError::UnmappedVariant`] rather than silently
//! defaulting.

use contracts::{ContractError, LateralResponse, LongitudinalResponse, RawResponse};

/// Translate the longitudinal axis: {None, BrakeMinCorrect, BrakeMin}
pub fn longitudinal(raw: RawResponse) -> Result<LongitudinalResponse, ContractError> {
    match raw {
        RawResponse::None => Ok(LongitudinalResponse::None),
        RawResponse::BrakeMinCorrect => Ok(LongitudinalResponse::BrakeMinCorrect),
        RawResponse::BrakeMin => Ok(LongitudinalResponse::BrakeMin),
    }
}

/// Translate one lateral axis: {None, BrakeMin}
///
/// `axis` names the side in the error ("lateral_right"/"lateral_left").
pub fn lateral(raw: RawResponse, axis: &'static str) -> Result<LateralResponse, ContractError> {
    match raw {
        RawResponse::None => Ok(LateralResponse::None),
        RawResponse::BrakeMin => Ok(LateralResponse::BrakeMin),
        unmapped => Err(ContractError::unmapped_variant(axis, unmapped)),
    }
}
