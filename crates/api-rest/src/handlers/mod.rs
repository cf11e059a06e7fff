//! Request handlers, one module per resource.

pub mod labs;
pub mod patients;
pub mod responses;
pub mod visits;
