use crate::notifications::{DeliveryResponse, TransportError};
use crate::payload::NotificationPayload;
use crate::traits::NotificationSender;
use anyhow::{Context, Result, anyhow};
use std::io::Write;
use tracing::{error, info};
use uuid::Uuid;

/// What to do once a request fails at the transport level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    StopOnFirstFailure,
    ContinueOnFailure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered(DeliveryResponse),
    Failed(TransportError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchRecord {
    pub index: usize,
    pub title: String,
    pub outcome: DispatchOutcome,
}

/// Result of one pass over a payload list. `skipped` counts payloads never tried.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub records: Vec<DispatchRecord>,
    pub skipped: usize,
}

impl DispatchReport {
    pub fn delivered(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, DispatchOutcome::Delivered(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.delivered()
    }

    pub fn first_failure(&self) -> Option<(&DispatchRecord, &TransportError)> {
        self.records.iter().find_map(|r| match &r.outcome {
            DispatchOutcome::Failed(e) => Some((r, e)),
            DispatchOutcome::Delivered(_) => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped == 0
    }
}

/// Sends every payload in order, waiting for each response before the next request,
/// and writes each response body to `out` as-is.
///
/// Transport failures end up in the report; the returned error is only for writes to `out`.
#[tracing::instrument(
    name = "dispatch_all",
    skip(sender, payloads, out),
    fields(run_id = %Uuid::new_v4(), count = payloads.len())
)]
pub async fn dispatch_all<S, W>(
    sender: &S,
    payloads: &[NotificationPayload],
    policy: FailurePolicy,
    out: &mut W,
) -> Result<DispatchReport>
where
    S: NotificationSender + ?Sized,
    W: Write,
{
    info!("Dispatching {} notifications", payloads.len());
    let mut report = DispatchReport::default();

    for (index, payload) in payloads.iter().enumerate() {
        let outcome = match sender.deliver(payload).await {
            Ok(response) => {
                writeln!(out, "{}", response.body).context("Failed to write response body")?;
                out.flush().context("Failed to flush output")?;
                DispatchOutcome::Delivered(response)
            }
            Err(e) => {
                error!(index, title = %payload.title, "Failed to send notification: {}", e);
                DispatchOutcome::Failed(e)
            }
        };

        let failed = matches!(outcome, DispatchOutcome::Failed(_));
        report.records.push(DispatchRecord {
            index,
            title: payload.title.clone(),
            outcome,
        });

        if failed && policy == FailurePolicy::StopOnFirstFailure {
            report.skipped = payloads.len() - index - 1;
            break;
        }
    }

    info!(
        delivered = report.delivered(),
        failed = report.failed(),
        skipped = report.skipped,
        "Dispatch finished"
    );

    Ok(report)
}

/// Turns a report into the run's final result: `Ok` only when every tried request
/// got a response, otherwise an error naming the first failed notification.
pub fn ensure_delivered(report: &DispatchReport) -> Result<()> {
    match report.first_failure() {
        None => Ok(()),
        Some((record, error)) => Err(anyhow!(error.clone()).context(format!(
            "Notification {} ({}) could not be sent, {} delivered, {} failed, {} not attempted",
            record.index,
            record.title,
            report.delivered(),
            report.failed(),
            report.skipped
        ))),
    }
}
