// Result reveal script
//
// Once a conversion result arrives, the preview re-types the canonical text
// from the first character: fast within a line, with a longer pause at each
// line boundary. A new result always constructs a fresh script; partial runs
// are never resumed.

/// Delay between characters within a line (ms)
pub const CHAR_DELAY_MS: u64 = 5;

/// Pause after the newline at each line boundary (ms)
pub const LINE_PAUSE_MS: u64 = 20;

/// Cursor over the canonical result text, line by line.
#[derive(Debug)]
pub struct RevealScript {
    lines: Vec<Vec<char>>,
    line: usize,
    col: usize,
}

impl RevealScript {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|l| l.chars().collect()).collect(),
            line: 0,
            col: 0,
        }
    }

    /// Emit the next character into `out`.
    ///
    /// Within a line, characters are appended at `CHAR_DELAY_MS`. At a line
    /// boundary a newline is appended and the next step waits
    /// `LINE_PAUSE_MS`. The newline is emitted only between lines, so the
    /// final buffer equals the source text exactly. Returns `None` once the
    /// last line is exhausted.
    pub fn step(&mut self, out: &mut String) -> Option<u64> {
        let current = self.lines.get(self.line)?;

        if self.col < current.len() {
            out.push(current[self.col]);
            self.col += 1;
            if self.col == current.len() && self.line + 1 == self.lines.len() {
                // Last character of the last line
                self.line += 1;
                return None;
            }
            return Some(CHAR_DELAY_MS);
        }

        if self.line + 1 == self.lines.len() {
            // Final line is empty (source ended with a newline): nothing left
            self.line += 1;
            return None;
        }

        out.push('\n');
        self.line += 1;
        self.col = 0;
        Some(LINE_PAUSE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(text: &str) -> (String, Vec<(char, Option<u64>)>) {
        let mut script = RevealScript::new(text);
        let mut out = String::new();
        let mut steps = Vec::new();
        loop {
            let before = out.clone();
            let delay = script.step(&mut out);
            if out == before {
                // Finished without emitting (empty source or trailing newline)
                assert!(delay.is_none());
                break;
            }
            // Monotone growth: every step extends the previous buffer
            assert!(out.starts_with(&before));
            assert_eq!(out.chars().count(), before.chars().count() + 1);
            steps.push((out.chars().last().unwrap(), delay));
            if delay.is_none() {
                break;
            }
        }
        (out, steps)
    }

    #[test]
    fn test_final_text_equals_source() {
        let text = "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}";
        let (out, _) = run_to_end(text);
        assert_eq!(out, text);
    }

    #[test]
    fn test_no_trailing_newline_added() {
        let (out, _) = run_to_end("single line");
        assert_eq!(out, "single line");
    }

    #[test]
    fn test_source_with_trailing_newline_preserved() {
        let (out, _) = run_to_end("a\nb\n");
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_empty_source_finishes_immediately() {
        let mut script = RevealScript::new("");
        let mut out = String::new();
        assert!(script.step(&mut out).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_in_line_delay_and_boundary_pause() {
        let (_, steps) = run_to_end("ab\ncd");
        let collected: Vec<(char, Option<u64>)> = steps;
        assert_eq!(
            collected,
            vec![
                ('a', Some(CHAR_DELAY_MS)),
                ('b', Some(CHAR_DELAY_MS)),
                ('\n', Some(LINE_PAUSE_MS)),
                ('c', Some(CHAR_DELAY_MS)),
                ('d', None),
            ]
        );
    }

    #[test]
    fn test_empty_interior_lines() {
        let (out, steps) = run_to_end("a\n\nb");
        assert_eq!(out, "a\n\nb");
        // Both boundary newlines carry the line pause
        let newline_delays: Vec<Option<u64>> = steps
            .iter()
            .filter(|(ch, _)| *ch == '\n')
            .map(|(_, d)| *d)
            .collect();
        assert_eq!(newline_delays, vec![Some(LINE_PAUSE_MS), Some(LINE_PAUSE_MS)]);
    }

    #[test]
    fn test_steps_are_inert_after_completion() {
        let mut script = RevealScript::new("x");
        let mut out = String::new();
        assert!(script.step(&mut out).is_none());
        assert!(script.step(&mut out).is_none());
        assert_eq!(out, "x");
    }
}
