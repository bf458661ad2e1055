//! Pause menu timing for headless runs

/// Keeps controls frozen for a fixed number of frames after a pause request
#[derive(Debug, Clone)]
pub struct PauseWindow {
    /// Frames the menu stays open
    duration: u64,
    release_frame: Option<u64>,
}

impl PauseWindow {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            release_frame: None,
        }
    }

    /// Open the menu at `frame`. Returns false if it is already open.
    pub fn open(&mut self, frame: u64) -> bool {
        if self.release_frame.is_some() {
            return false;
        }
        self.release_frame = Some(frame + self.duration);
        true
    }

    /// Close the menu once its time is up. Returns true on the closing frame.
    pub fn close_due(&mut self, frame: u64) -> bool {
        match self.release_frame {
            Some(release) if frame >= release => {
                self.release_frame = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.release_frame.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_closes_after_duration() {
        let mut window = PauseWindow::new(3);
        assert!(window.open(10));
        assert!(window.is_open());

        assert!(!window.close_due(11));
        assert!(!window.close_due(12));
        assert!(window.close_due(13));
        assert!(!window.is_open());
        assert!(!window.close_due(14));
    }

    #[test]
    fn test_second_request_while_open_is_ignored() {
        let mut window = PauseWindow::new(3);
        assert!(window.open(10));
        assert!(!window.open(11));

        // The original release frame still applies
        assert!(!window.close_due(12));
        assert!(window.close_due(13));

        assert!(window.open(20));
    }
}
