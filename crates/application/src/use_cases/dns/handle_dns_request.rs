use crate::ports::DohResolver;
use doh_bridge_domain::{DnsRecord, DnsRequest, DomainError, Question};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How one question of a request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Answered { question: Question, records: usize },
    Failed { question: Question, reason: DomainError },
    TimedOut { question: Question },
}

impl DispatchOutcome {
    pub fn question(&self) -> &Question {
        match self {
            DispatchOutcome::Answered { question, .. }
            | DispatchOutcome::Failed { question, .. }
            | DispatchOutcome::TimedOut { question } => question,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, DispatchOutcome::Answered { .. })
    }
}

/// Everything gathered for one request.
///
/// `records` is in dispatch completion order, not question order.
#[derive(Debug, Clone, Default)]
pub struct AggregatedAnswer {
    pub records: Vec<DnsRecord>,
    pub outcomes: Vec<DispatchOutcome>,
}

impl AggregatedAnswer {
    fn with_capacity(questions: usize) -> Self {
        Self {
            records: Vec::new(),
            outcomes: Vec::with_capacity(questions),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_answered())
    }

    pub fn answered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_answered()).count()
    }
}

pub struct HandleDnsRequestUseCase {
    resolver: Arc<dyn DohResolver>,
    deadline: Option<Duration>,
}

impl HandleDnsRequestUseCase {
    pub fn new(resolver: Arc<dyn DohResolver>) -> Self {
        Self {
            resolver,
            deadline: None,
        }
    }

    /// Bound the whole fan-out; `None` waits for every dispatch.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Dispatch every question concurrently and join on all of them.
    ///
    /// Failed questions contribute no records. When the deadline elapses the
    /// outstanding dispatches are dropped and reported as `TimedOut`.
    pub async fn execute(&self, request: &DnsRequest) -> AggregatedAnswer {
        let start = Instant::now();
        let total = request.questions.len();

        let mut pending: FuturesUnordered<_> = request
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let resolver = &self.resolver;
                async move { (index, resolver.resolve(question).await) }
            })
            .collect();

        let mut answer = AggregatedAnswer::with_capacity(total);
        let mut settled = vec![false; total];

        let join_all = async {
            while let Some((index, result)) = pending.next().await {
                settled[index] = true;
                let question = request.questions[index].clone();

                match result {
                    Ok(records) => {
                        debug!(
                            domain = %question.name,
                            record_type = %question.record_type,
                            records = records.len(),
                            "DoH dispatch answered"
                        );
                        answer.outcomes.push(DispatchOutcome::Answered {
                            question,
                            records: records.len(),
                        });
                        answer.records.extend(records);
                    }
                    Err(reason) => {
                        warn!(
                            domain = %question.name,
                            record_type = %question.record_type,
                            kind = reason.kind(),
                            error = %reason,
                            "DoH dispatch failed, question dropped from response"
                        );
                        answer
                            .outcomes
                            .push(DispatchOutcome::Failed { question, reason });
                    }
                }
            }
        };

        let timed_out = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, join_all).await.is_err(),
            None => {
                join_all.await;
                false
            }
        };

        if timed_out {
            for (question, _) in request
                .questions
                .iter()
                .zip(settled.iter())
                .filter(|(_, done)| !**done)
            {
                warn!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    "DoH dispatch abandoned at request deadline"
                );
                answer.outcomes.push(DispatchOutcome::TimedOut {
                    question: question.clone(),
                });
            }
        }

        debug!(
            client = %request.client,
            questions = total,
            answered = answer.answered_count(),
            records = answer.records.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Request aggregated"
        );

        answer
    }
}
