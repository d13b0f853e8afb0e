//! doh-bridge application layer: ports and the request fan-out use case.
pub mod ports;
pub mod use_cases;
