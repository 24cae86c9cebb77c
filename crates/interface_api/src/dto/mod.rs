//! Request and response bodies

pub mod person;
