pub mod dns;

pub use dns::{AggregatedAnswer, DispatchOutcome, HandleDnsRequestUseCase};
