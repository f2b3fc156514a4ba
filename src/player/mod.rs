//! Player — the interactive preview driver.
//!
//! Ticks the scene in real time, resolves and renders each displayed frame
//! and paints it to the terminal. Input is read between frames; the input
//! poll doubles as the pacing wait, so a key press is handled as soon as it
//! arrives.

pub mod state;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use log::debug;

use crate::config::{PreviewConfig, matches_binding};
use crate::engine::Scene;
use crate::menubar::print_bar;
use crate::renderer::Renderer;
use crate::types::{Cell, Grid};

pub use state::{Command, Control, PlaybackState};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;

pub struct Player<'a> {
    scene: &'a mut Scene,
    renderer: &'a Renderer,
    config: &'a PreviewConfig,
    /// Grid currently on screen; `None` forces a full redraw.
    shown: Option<Grid>,
}

impl<'a> Player<'a> {
    pub fn new(scene: &'a mut Scene, renderer: &'a Renderer, config: &'a PreviewConfig) -> Self {
        Self {
            scene,
            renderer,
            config,
            shown: None,
        }
    }

    /// Preview the scene in the terminal.
    ///
    /// Sets up the terminal, plays until the last frame or a quit key, and
    /// restores the terminal on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let contract = self.renderer.contract();
        let (term_w, term_h) = terminal::size()?;
        // +2: one row for menu bar, one row for status line
        if term_w < contract.width || term_h < contract.height + 2 {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                contract.width,
                contract.height + 2,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.scene.finalize();
        self.scene.rewind();

        let mut state = PlaybackState::new(self.scene.length_in_frames(), self.config.max_speed);
        let slice = Duration::from_millis(self.config.frame_millis);
        self.render_menubar(stdout)?;

        while !state.finished() {
            let started = Instant::now();
            if let Some(frames) = state.advance() {
                for t in frames {
                    self.scene.tick(t);
                }
                self.present(stdout, &state)?;
            }

            loop {
                let remaining = slice.saturating_sub(started.elapsed());
                if !event::poll(remaining)? {
                    break;
                }
                match event::read()? {
                    event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let Some(command) = self.command_for(&key) else {
                            continue;
                        };
                        match state.apply(command) {
                            Control::Quit => return Ok(()),
                            Control::Continue => self.render_status(stdout, &state)?,
                            Control::Tick(frames) => {
                                for t in frames {
                                    self.scene.tick(t);
                                }
                                self.present(stdout, &state)?;
                            }
                            Control::Seek(t) => {
                                debug!("seek to frame {t}");
                                self.scene.seek(t);
                                self.present(stdout, &state)?;
                            }
                            Control::Rewind => {
                                self.scene.rewind();
                                self.render_status(stdout, &state)?;
                            }
                        }
                    }
                    event::Event::Resize(_, _) => {
                        self.shown = None;
                        self.render_menubar(stdout)?;
                        self.present(stdout, &state)?;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        let b = &self.config.key_bindings;
        if key.code == KeyCode::Esc || matches_binding(&b.quit, key) {
            Some(Command::Quit)
        } else if matches_binding(&b.pause, key) || matches_binding(&b.pause_alt, key) {
            Some(Command::TogglePause)
        } else if matches_binding(&b.speed_up, key) {
            Some(Command::SpeedUp)
        } else if matches_binding(&b.slow_down, key) {
            Some(Command::SlowDown)
        } else if matches_binding(&b.step_forward, key) {
            Some(Command::StepForward)
        } else if matches_binding(&b.step_back, key) {
            Some(Command::StepBack)
        } else if matches_binding(&b.restart, key) {
            Some(Command::Restart)
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    /// Render the current object state and paint whatever changed.
    fn present(&mut self, stdout: &mut io::Stdout, state: &PlaybackState) -> Result<()> {
        let Some(t) = state.current() else {
            return self.render_status(stdout, state);
        };
        let frame = self.scene.resolve(t);
        let grid = self.renderer.render(&frame);

        match &self.shown {
            Some(shown) => {
                for change in Renderer::diff(shown, &grid) {
                    queue!(
                        stdout,
                        cursor::MoveTo(change.x, change.y + CANVAS_OFFSET),
                        style::PrintStyledContent(styled(&change.cell)),
                    )?;
                }
            }
            None => {
                for (y, row) in grid.iter().enumerate() {
                    queue!(stdout, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
                    for cell in row {
                        queue!(stdout, style::PrintStyledContent(styled(cell)))?;
                    }
                }
            }
        }
        self.shown = Some(grid);
        self.render_status(stdout, state)
    }

    fn render_menubar(&self, stdout: &mut io::Stdout) -> Result<()> {
        let b = &self.config.key_bindings;
        let hints = [
            format!("[{}][{}] pause", b.pause, b.pause_alt),
            format!("[{}] faster", b.speed_up),
            format!("[{}] slower", b.slow_down),
            format!("[{}][{}] step", b.step_back, b.step_forward),
            format!("[{}] restart", b.restart),
            format!("[{}][Esc] quit", b.quit),
        ];
        print_bar(stdout, 0, &hints)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout, state: &PlaybackState) -> Result<()> {
        let status_y = self.renderer.contract().height + CANVAS_OFFSET;
        let (_, term_h) = terminal::size()?;
        if status_y >= term_h {
            stdout.flush()?;
            return Ok(()); // No room for status line.
        }

        let shown = state.current().map_or(0, |t| t + 1);
        let status = format!(
            " Frame {}/{} | speed x{}{} ",
            shown,
            state.length(),
            state.speed(),
            if state.paused() { " | paused" } else { "" },
        );

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

fn styled(cell: &Cell) -> style::StyledContent<char> {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = Some(style::Color::Rgb {
        r: cell.fg.r,
        g: cell.fg.g,
        b: cell.fg.b,
    });
    cs.background_color = Some(style::Color::Rgb {
        r: cell.bg.r,
        g: cell.bg.g,
        b: cell.bg.b,
    });
    style::StyledContent::new(cs, cell.ch)
}
