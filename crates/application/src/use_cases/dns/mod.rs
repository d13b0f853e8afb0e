mod handle_dns_request;

pub use handle_dns_request::{AggregatedAnswer, DispatchOutcome, HandleDnsRequestUseCase};
