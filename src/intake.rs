// File intake state machine
//
// Normalizes the ways a file can arrive - a drag gesture over the drop card,
// a paste of dropped paths, or the path prompt - into a single "file
// selected" signal for the upload lifecycle.
//
// The drag-leave policy is deliberate: the active highlight is cleared only
// when the pointer is strictly outside the card's rectangle. Leave events
// that fire while the pointer is still inside (crossing into nested
// content) must not toggle the highlight off, or it flickers.

use ratatui::layout::Rect;
use std::path::{Path, PathBuf};

/// Extensions the picker advertises. Advisory only: a mismatched file is
/// still submitted and real validation stays server-side.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "png", "jpg", "jpeg"];

/// Drop-target state for the intake card.
#[derive(Debug, Default)]
pub struct DropZone {
    rect: Rect,
    drag_active: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the card's on-screen rectangle (called each frame from layout).
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Whether the drag highlight is on.
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Pointer entered the card while dragging.
    pub fn drag_enter(&mut self, _x: u16, _y: u16) {
        self.drag_active = true;
    }

    /// Pointer moved over the card while dragging.
    pub fn drag_over(&mut self, _x: u16, _y: u16) {
        if !self.drag_active {
            self.drag_active = true;
        }
    }

    /// Pointer may have left the card. Clears the highlight only when the
    /// coordinates fall strictly outside the bounding rectangle
    /// (left/top-inclusive, right/bottom-exclusive).
    pub fn drag_leave(&mut self, x: u16, y: u16) {
        if !self.contains(x, y) {
            self.drag_active = false;
        }
    }

    /// A set of files was dropped. Clears the highlight and yields the first
    /// file; any additional files are silently ignored (single-file intake
    /// is a design constraint).
    pub fn drop_files(&mut self, paths: &[PathBuf]) -> Option<PathBuf> {
        self.drag_active = false;
        paths.first().cloned()
    }

    /// Bounding-rectangle containment used by the leave policy.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.left() && x < self.rect.right() && y >= self.rect.top() && y < self.rect.bottom()
    }
}

/// Whether a path carries one of the advertised extensions.
pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Parse a bracketed paste into dropped file paths.
///
/// Terminal emulators deliver OS file drops as pasted text, one path per
/// line. Blank lines are skipped; surrounding quotes (some terminals add
/// them for paths with spaces) are stripped.
pub fn paths_from_paste(pasted: &str) -> Vec<PathBuf> {
    pasted
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.trim_matches('\'').trim_matches('"'))
        .map(PathBuf::from)
        .collect()
}
