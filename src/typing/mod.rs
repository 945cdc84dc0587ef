// Typing scheduler - incremental text reveal state machine
//
// Two animations share the preview buffer: the placeholder typed while a
// conversion is pending, and the reveal of the final result. Both are pure
// step functions (emit one character, report the delay before the next
// step); this module is the single driver that owns the displayed text, the
// next deadline, and the generation counter.
//
// Mutual exclusion is by construction: the scheduler holds at most one
// active script, and starting or stopping a run replaces it wholesale. Every
// run gets a monotonically increasing generation token; a wakeup armed for a
// superseded run is a silent no-op, so a stale step can never write to the
// display buffer.
//
// Time is plain milliseconds supplied by the caller. The TUI loop feeds
// elapsed wall-clock time; tests feed a virtual clock and never sleep.

pub mod placeholder;
pub mod reveal;

pub use placeholder::PlaceholderScript;
pub use reveal::RevealScript;

/// Which animator currently owns the display buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveAnimator {
    #[default]
    None,
    Placeholder,
    Result,
}

#[derive(Debug)]
enum ScriptKind {
    Placeholder(PlaceholderScript),
    Result(RevealScript),
}

/// Driver for the character-by-character preview animations.
#[derive(Debug, Default)]
pub struct Typewriter {
    display: String,
    script: Option<ScriptKind>,
    /// Absolute time (ms) the next step is due, while a script is active
    next_due: Option<u64>,
    generation: u64,
}

impl Typewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text revealed so far.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Tag for the animator that currently owns the buffer.
    pub fn active(&self) -> ActiveAnimator {
        match self.script {
            None => ActiveAnimator::None,
            Some(ScriptKind::Placeholder(_)) => ActiveAnimator::Placeholder,
            Some(ScriptKind::Result(_)) => ActiveAnimator::Result,
        }
    }

    pub fn is_running(&self) -> bool {
        self.script.is_some()
    }

    /// Deadline of the next step as (due_ms, generation), if a script is
    /// active. The caller arms a wakeup for `due_ms` and passes the token
    /// back to `poll` when it fires.
    pub fn next_deadline(&self) -> Option<(u64, u64)> {
        self.next_due.map(|due| (due, self.generation))
    }

    /// Begin the pending-status animation. Clears the display before the
    /// first character of the new run.
    pub fn start_placeholder(&mut self, now_ms: u64) -> u64 {
        self.begin(ScriptKind::Placeholder(PlaceholderScript::new()), now_ms)
    }

    /// Begin revealing `text` from the first character. Clears the display
    /// before the first character of the new run.
    pub fn start_result(&mut self, text: &str, now_ms: u64) -> u64 {
        self.begin(ScriptKind::Result(RevealScript::new(text)), now_ms)
    }

    fn begin(&mut self, script: ScriptKind, now_ms: u64) -> u64 {
        self.generation += 1;
        self.display.clear();
        self.script = Some(script);
        // First character lands on the first poll at or after `now_ms`
        self.next_due = Some(now_ms);
        self.generation
    }

    /// Stop the active run and clear the display. Any wakeup armed for the
    /// old run becomes stale.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.script = None;
        self.next_due = None;
        self.display.clear();
    }

    /// Run every step due at `now_ms`.
    ///
    /// `armed_generation` is the token captured when the wakeup was
    /// scheduled; if it no longer matches the current run the call is a
    /// no-op and returns false. Deadlines accumulate from the previous due
    /// time, not from `now_ms`, so a late wakeup catches up without drift.
    pub fn poll(&mut self, armed_generation: u64, now_ms: u64) -> bool {
        if armed_generation != self.generation {
            return false;
        }

        loop {
            let Some(due) = self.next_due else { break };
            if due > now_ms {
                break;
            }
            let Some(script) = self.script.as_mut() else {
                break;
            };
            let next = match script {
                ScriptKind::Placeholder(s) => s.step(&mut self.display),
                ScriptKind::Result(s) => s.step(&mut self.display),
            };
            match next {
                Some(delay) => self.next_due = Some(due + delay),
                None => {
                    // Run complete; the revealed text stays on screen
                    self.script = None;
                    self.next_due = None;
                }
            }
        }
        true
    }
}
