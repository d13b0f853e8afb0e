use super::RecordType;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// One inbound DNS exchange: who asked, and every question they asked, in order.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub client: SocketAddr,
    pub questions: Vec<Question>,
}

impl DnsRequest {
    pub fn new(client: SocketAddr, questions: Vec<Question>) -> Self {
        Self { client, questions }
    }

    /// Name of the first question, used for request logging.
    pub fn first_name(&self) -> Option<&str> {
        self.questions.first().map(|q| q.name.as_ref())
    }
}
