use crate::dns::forwarding::RecordTypeMapper;
use crate::dns::record_encoder::RecordEncoder;
use doh_bridge_application::use_cases::HandleDnsRequestUseCase;
use doh_bridge_domain::{DnsRequest, Question};
use hickory_proto::op::{MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Bridges hickory's server loop to the fan-out use case.
///
/// Every well-formed query gets exactly one NOERROR response carrying
/// whatever records the backend produced, possibly none.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsRequestUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsRequestUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_string()
    }

    /// Run all questions through the backend and encode the combined answer.
    pub async fn answer(&self, dns_request: &DnsRequest) -> Vec<Record> {
        let aggregated = self.use_case.execute(dns_request).await;

        let dropped: Vec<&str> = aggregated
            .failures()
            .map(|outcome| outcome.question().name.as_ref())
            .collect();
        if !dropped.is_empty() {
            debug!(
                client = %dns_request.client,
                answered = aggregated.answered_count(),
                dropped = ?dropped,
                "Answering with partial results"
            );
        }

        RecordEncoder::encode_all(&aggregated.records)
    }

    fn questions_from(request: &Request) -> Vec<Question> {
        request
            .queries()
            .iter()
            .map(|query| {
                Question::new(
                    Self::normalize_domain(&query.name().to_ascii()),
                    RecordTypeMapper::from_hickory(query.query_type()),
                )
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let header = request.header();
        if header.message_type() != MessageType::Query || header.op_code() != OpCode::Query {
            warn!(
                op_code = ?header.op_code(),
                client = %request.src(),
                "Unsupported operation"
            );
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp)
                .await;
        }

        let client = request.src();
        let dns_request = DnsRequest::new(client, Self::questions_from(request));

        info!(
            client = %client.ip(),
            questions = dns_request.questions.len(),
            "request from {} for {}",
            client.ip(),
            dns_request.first_name().unwrap_or("<none>")
        );

        let answers = self.answer(&dns_request).await;

        debug!(client = %client, answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_message_type(MessageType::Response);
        header.set_response_code(ResponseCode::NoError);
        header.set_recursion_available(true);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, client = %client, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_message_type(MessageType::Response);
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
