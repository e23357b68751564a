//! Types shared between the poetry client, the search controller and the front end.

pub mod domain;
pub mod error;
