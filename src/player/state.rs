//! Playback cursor for the interactive preview, free of any terminal I/O.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    SpeedUp,
    SlowDown,
    StepForward,
    StepBack,
    Restart,
    Quit,
}

/// What the driver has to do to the scene after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Nothing changed in the scene; only the status line may differ.
    Continue,
    /// Tick these frames in order, then redraw.
    Tick(Range<usize>),
    /// Rewind and replay up to and including this frame, then redraw.
    Seek(usize),
    /// Rewind to the pristine state; nothing has been ticked yet.
    Rewind,
    Quit,
}

#[derive(Debug, Clone)]
pub struct PlaybackState {
    next_frame: usize,
    length: usize,
    paused: bool,
    speed: usize,
    max_speed: usize,
}

impl PlaybackState {
    pub fn new(length: usize, max_speed: usize) -> Self {
        PlaybackState {
            next_frame: 0,
            length,
            paused: false,
            speed: 1,
            max_speed: max_speed.max(1),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> usize {
        self.speed
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The most recently ticked frame, if any.
    pub fn current(&self) -> Option<usize> {
        self.next_frame.checked_sub(1)
    }

    /// True once every frame has been ticked.
    pub fn finished(&self) -> bool {
        self.next_frame >= self.length
    }

    /// Frames to tick for one display step: `speed` of them unless paused,
    /// fewer at the end of the scene.
    pub fn advance(&mut self) -> Option<Range<usize>> {
        if self.paused {
            return None;
        }
        self.take(self.speed)
    }

    fn take(&mut self, count: usize) -> Option<Range<usize>> {
        if self.finished() {
            return None;
        }
        let start = self.next_frame;
        self.next_frame = (start + count).min(self.length);
        Some(start..self.next_frame)
    }

    pub fn apply(&mut self, command: Command) -> Control {
        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                Control::Continue
            }
            Command::SpeedUp => {
                self.speed = (self.speed + 1).min(self.max_speed);
                Control::Continue
            }
            Command::SlowDown => {
                self.speed = self.speed.saturating_sub(1).max(1);
                Control::Continue
            }
            Command::StepForward if self.paused => match self.take(1) {
                Some(frames) => Control::Tick(frames),
                None => Control::Continue,
            },
            Command::StepBack if self.paused && self.next_frame >= 2 => {
                self.next_frame -= 1;
                Control::Seek(self.next_frame - 1)
            }
            Command::StepForward | Command::StepBack => Control::Continue,
            Command::Restart => {
                self.next_frame = 0;
                Control::Rewind
            }
            Command::Quit => Control::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_every_frame_once() {
        let mut state = PlaybackState::new(5, 4);
        let mut ticked = Vec::new();
        while let Some(frames) = state.advance() {
            ticked.extend(frames);
        }
        assert_eq!(ticked, vec![0, 1, 2, 3, 4]);
        assert!(state.finished());
        assert_eq!(state.current(), Some(4));
    }

    #[test]
    fn speed_ticks_consecutive_frames() {
        let mut state = PlaybackState::new(7, 4);
        state.apply(Command::SpeedUp);
        state.apply(Command::SpeedUp);
        assert_eq!(state.speed(), 3);
        assert_eq!(state.advance(), Some(0..3));
        assert_eq!(state.advance(), Some(3..6));
        // Clamped at the end of the scene.
        assert_eq!(state.advance(), Some(6..7));
        assert_eq!(state.advance(), None);
    }

    #[test]
    fn speed_is_clamped() {
        let mut state = PlaybackState::new(10, 4);
        for _ in 0..10 {
            state.apply(Command::SpeedUp);
        }
        assert_eq!(state.speed(), 4);
        for _ in 0..10 {
            state.apply(Command::SlowDown);
        }
        assert_eq!(state.speed(), 1);
    }

    #[test]
    fn paused_holds_the_cursor() {
        let mut state = PlaybackState::new(10, 4);
        state.advance();
        assert_eq!(state.apply(Command::TogglePause), Control::Continue);
        assert!(state.paused());
        assert_eq!(state.advance(), None);
        assert_eq!(state.current(), Some(0));
    }

    #[test]
    fn stepping_only_while_paused() {
        let mut state = PlaybackState::new(10, 4);
        assert_eq!(state.apply(Command::StepForward), Control::Continue);
        assert_eq!(state.current(), None);

        state.apply(Command::TogglePause);
        assert_eq!(state.apply(Command::StepForward), Control::Tick(0..1));
        assert_eq!(state.apply(Command::StepForward), Control::Tick(1..2));
        assert_eq!(state.apply(Command::StepForward), Control::Tick(2..3));
        assert_eq!(state.apply(Command::StepBack), Control::Seek(1));
        assert_eq!(state.current(), Some(1));
        assert_eq!(state.apply(Command::StepBack), Control::Seek(0));
        // Frame 0 is the earliest displayable frame.
        assert_eq!(state.apply(Command::StepBack), Control::Continue);
        assert_eq!(state.current(), Some(0));
    }

    #[test]
    fn restart_and_quit() {
        let mut state = PlaybackState::new(3, 4);
        while state.advance().is_some() {}
        assert_eq!(state.apply(Command::Restart), Control::Rewind);
        assert!(!state.finished());
        assert_eq!(state.current(), None);
        assert_eq!(state.apply(Command::Quit), Control::Quit);
    }

    #[test]
    fn empty_scene_is_finished() {
        let mut state = PlaybackState::new(0, 4);
        assert!(state.finished());
        assert_eq!(state.advance(), None);
    }
}
