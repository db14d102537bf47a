use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, MoveToColumn, MoveUp, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    proc::Field,
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations that changed at least one cell.
    pub generations: u64,
    pub population: usize,
    /// The last step changed nothing.
    pub settled: bool,
}

pub struct App {
    field: Field,
    frame_delay: Duration,
    max_generations: Option<u64>,
    generation: u64,
    pause: bool,
    should_exit: bool,
}

impl App {

    #[inline]
    pub fn new(field: Field, frame_delay: Duration, max_generations: Option<u64>) -> Self {
        App {
            field,
            frame_delay,
            max_generations,
            generation: 0,
            pause: false,
            should_exit: false,
        }
    }

    #[inline]
    pub fn from_config(field: Field, config: &Config) -> Self {
        Self::new(field, config.frame_delay(), config.max_generations)
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn pause(&self) -> bool {
        self.pause
    }

    #[inline]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn budget_left(&self) -> bool {
        self.max_generations.map_or(true, |max| self.generation < max)
    }

    /// Steps the field once. Returns `false` when nothing changed.
    pub fn advance(&mut self) -> bool {
        let changes = self.field.step();
        if changes > 0 {
            self.generation += 1;
        }
        changes > 0
    }

    fn summary(&self, settled: bool) -> RunSummary {
        RunSummary {
            generations: self.generation,
            population: self.field.population(),
            settled,
        }
    }

    /// Steps until the field settles or the generation budget runs out,
    /// without pacing or terminal control, then writes the final grid.
    pub fn run_headless<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        info!(height = self.field.height(), width = self.field.width(), "headless run");

        let settled = loop {
            if !self.budget_left() {
                warn!(generation = self.generation, "generation budget exhausted");
                break false;
            }
            if !self.advance() {
                break true;
            }
        };

        write_frame(out, &self.field)?;
        Ok(self.summary(settled))
    }

    /// Draws generations in the terminal at the configured frame rate.
    /// The final grid is printed again once the terminal is restored.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(height = self.field.height(), width = self.field.width(), "interactive run");
        fits_terminal(&self.field, terminal::size()?)?;

        let mut out = io::stdout();
        let d = runup(&mut out).and_then(|_| self.draw(&mut out));
        shutdown(&mut out)?;
        let summary = d?;

        write_frame(&mut out, &self.field)?;
        Ok(summary)
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        write_frame(out, &self.field)?;

        let mut settled = false;
        while !self.should_exit {
            self.hotkeys(Instant::now() + self.frame_delay)?;

            if self.should_exit {
                break
            }
            if self.pause {
                continue
            }
            if !self.budget_left() {
                warn!(generation = self.generation, "generation budget exhausted");
                break
            }
            if !self.advance() {
                settled = true;
                break
            }

            reset_cursor(out, &self.field)?;
            write_frame(out, &self.field)?;
            debug!(generation = self.generation, population = self.field.population(), "frame drawn");
        }

        Ok(self.summary(settled))
    }

    // Waits for input until `deadline`; this is also the frame pacing.
    fn hotkeys(&mut self, deadline: Instant) -> Result<()> {
        loop {
            let now = Instant::now();
            if now >= deadline || self.should_exit {
                return Ok(());
            }
            if event::poll(deadline - now)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('c') {
                self.should_exit = true;
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('p') => {
                self.pause = !self.pause;
                debug!(paused = self.pause, "pause toggled");
            }
            _ => {}
        }
    }
}

/// Fails unless the field fits a terminal of `(columns, rows)`. Every row
/// ends in a line break, so one spare row is needed to avoid scrolling.
pub fn fits_terminal(field: &Field, (columns, rows): (u16, u16)) -> Result<()> {
    if field.width() > usize::from(columns) || field.height() >= usize::from(rows) {
        return Err(Error::config(format!(
            "{}x{} field does not fit a terminal of {rows} rows and {columns} columns",
            field.height(),
            field.width()
        )));
    }
    Ok(())
}

/// Writes every row of the field followed by `\r\n`.
pub fn write_frame<W: Write>(out: &mut W, field: &Field) -> io::Result<()> {
    for row in field.snapshot() {
        queue!(out, Print(row), Print("\r\n"))?;
    }
    out.flush()
}

/// Moves the cursor back to the first row of the frame just drawn.
pub fn reset_cursor<W: Write>(out: &mut W, field: &Field) -> io::Result<()> {
    let up = u16::try_from(field.height()).unwrap_or(u16::MAX);
    queue!(out, MoveUp(up), MoveToColumn(0))?;
    out.flush()
}

fn runup<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, EnterAlternateScreen, SetTitle("Life"), Hide)?;
    enable_raw_mode()?;
    clear(out)?;
    Ok(())
}

fn shutdown<W: Write>(out: &mut W) -> Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, Show)?;
    Ok(())
}

fn clear<W: Write>(out: &mut W) -> Result<()> {
    use terminal::{Clear, ClearType};

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
