//! Report domain
//!
//! The final output of a pipeline condensed into findings and
//! recommendations. [`parse_report`](parsing::parse_report) never fails; the
//! worst case is an empty [`Report`](entities::Report).

pub mod entities;
pub mod parsing;
