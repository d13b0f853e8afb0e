pub mod client;
pub mod payload;
pub mod record_mapper;

pub use client::HttpsJsonResolver;
pub use payload::{DohAnswer, DohPayload};
pub use record_mapper::RecordMapper;
