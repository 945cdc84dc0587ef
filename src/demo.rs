// Demo mode: simulate the conversion backend
//
// With --demo, a submission resolves after a delay long enough for the
// placeholder animation to play, then returns canned structured output. The
// whole intake -> pending -> reveal -> download flow runs against it with no
// server, exercising the same channel and generation plumbing as a real
// conversion.
//
// Run with: docdrop --demo

use crate::events::ConvertEvent;
use crate::payload::ResultPayload;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// How long the fake backend "works" before answering
const DEMO_CONVERSION_DELAY: Duration = Duration::from_secs(12);

/// Resolve one simulated conversion for `file_name`.
pub async fn run_demo_conversion(
    generation: u64,
    file_name: String,
    tx: mpsc::Sender<ConvertEvent>,
) {
    sleep(DEMO_CONVERSION_DELAY).await;

    let payload = ResultPayload::Structured(demo_document(&file_name));
    let _ = tx
        .send(ConvertEvent::Finished {
            generation,
            outcome: Ok(payload),
        })
        .await;
}

/// Canned output shaped like the real service's document extraction.
fn demo_document(file_name: &str) -> serde_json::Value {
    json!({
        "document": file_name,
        "language": "en",
        "pages": 2,
        "sections": [
            {
                "heading": "Summary",
                "text": "Quarterly results improved across all regions."
            },
            {
                "heading": "Details",
                "text": "Revenue grew 14% year over year, driven by services."
            }
        ],
        "tables": [
            {
                "caption": "Revenue by region",
                "rows": [["EMEA", "4.1M"], ["APAC", "3.2M"], ["AMER", "6.8M"]]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_document_is_structured() {
        let doc = demo_document("report.pdf");
        assert_eq!(doc["document"], "report.pdf");
        assert!(doc["sections"].is_array());
    }
}
