//! Domain validation errors.
//!
//! Messages are user-facing: the API layer passes them through verbatim in
//! the JSON error body and the front end displays them as-is, so they stay
//! in the shop's language.

use thiserror::Error;

/// A submission or update failed domain validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The intake submission carried no identity number after trimming.
    #[error("la cédula es obligatoria para verificar al cliente")]
    MissingIdentityNumber,

    /// An update patch carried none of the mutable fields.
    #[error("no hay campos válidos para actualizar")]
    EmptyPatch,
}
