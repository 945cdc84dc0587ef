// Events that flow from the conversion worker back to the TUI
//
// The worker runs on its own task; all state lives with the TUI loop, so
// completions travel over a channel. Each event carries the generation of
// the submission that produced it - the TUI discards anything stale, which
// is what makes "latest submission wins" safe without cancellation.

use crate::payload::ResultPayload;

/// Outcome of one conversion submission.
#[derive(Debug)]
pub enum ConvertEvent {
    /// The upload finished, successfully or not. The error variant is the
    /// ready-to-display message.
    Finished {
        generation: u64,
        outcome: Result<ResultPayload, String>,
    },
}
