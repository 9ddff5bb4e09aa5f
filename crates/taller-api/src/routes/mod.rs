//! # HTTP Route Modules
//!
//! One module per API surface:
//!
//! - [`intake`] — POST `/api/registro-total`, the single-call registration cascade
//! - [`repairs`] — PUT/DELETE `/api/reparaciones/:id`, repair lifecycle updates
//! - [`dashboard`] — GET `/api/dashboard`, the joined admin view
//! - [`finance`] — GET `/api/finanzas/*`, daily and weekly financial reports

pub mod dashboard;
pub mod finance;
pub mod intake;
pub mod repairs;
