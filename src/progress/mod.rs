// A very bare-bones progress bar. No speed or ETA support.
//
//  536870912/4294967296 [===>      ]  12%
use std::io::{self, Write};
use std::time::{Duration, Instant};

use console::Term;

pub const DEFAULT_MIN_REDRAW_INTERVAL: Duration = Duration::from_secs(1);

const MIN_BAR_WIDTH: usize = 40;
const FALLBACK_TERM_WIDTH: usize = 80;

/// Where a [`ProgressBar`] draws: a writer that knows its width and can hide
/// its cursor.
pub trait Terminal: Write {
    /// Current width in columns, `None` when not attached to a terminal.
    fn width(&self) -> Option<usize>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
}

impl Terminal for Term {
    fn width(&self) -> Option<usize> {
        self.size_checked().map(|(_, cols)| usize::from(cols))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Term::hide_cursor(self)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Term::show_cursor(self)
    }
}

/// Single-line progress bar redrawn in place on `T` (stderr by default).
///
/// Inactive until [`ProgressBar::activate`]; [`ProgressBar::done`] finishes
/// the line and the bar may be activated again afterwards.
pub struct ProgressBar<T: Terminal = Term> {
    total: u64,
    min_redraw_interval: Duration,
    term_width: Option<usize>,
    out: T,
    pos: u64,
    last_draw: Option<Instant>,
    active: bool,
}

impl ProgressBar<Term> {
    pub fn new(total: u64) -> Self {
        Self::with_terminal(total, Term::stderr())
    }
}

impl<T: Terminal> ProgressBar<T> {
    pub fn with_terminal(total: u64, out: T) -> Self {
        ProgressBar {
            total,
            min_redraw_interval: DEFAULT_MIN_REDRAW_INTERVAL,
            term_width: None,
            out,
            pos: 0,
            last_draw: None,
            active: false,
        }
    }

    pub fn min_redraw_interval(mut self, interval: Duration) -> Self {
        self.min_redraw_interval = interval;
        self
    }

    /// Fixes the width instead of asking the terminal.
    pub fn term_width(mut self, width: usize) -> Self {
        self.term_width = Some(width);
        self
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn get_ref(&self) -> &T {
        &self.out
    }

    /// Hides the cursor and draws the bar at the last known position.
    pub fn activate(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        self.out.hide_cursor()?;
        self.active = true;
        self.update(self.pos, true)
    }

    /// Records `pos` and redraws, unless inactive or throttled.
    pub fn update(&mut self, pos: u64, force: bool) -> io::Result<()> {
        self.pos = pos;
        if !self.active {
            return Ok(());
        }
        if !force {
            if let Some(last) = self.last_draw {
                if last.elapsed() < self.min_redraw_interval {
                    return Ok(());
                }
            }
        }
        let width = self
            .term_width
            .or_else(|| self.out.width())
            .unwrap_or(FALLBACK_TERM_WIDTH);
        let line = self.render(pos, width);
        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;
        self.last_draw = Some(Instant::now());
        Ok(())
    }

    /// Draws the final position, ends the line and restores the cursor.
    pub fn done(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.update(self.pos, true)?;
        self.out.write_all(b"\n")?;
        self.out.show_cursor()?;
        self.out.flush()?;
        self.active = false;
        Ok(())
    }

    pub fn render(&self, pos: u64, term_width: usize) -> String {
        let total_width = self.total.to_string().len();
        let decorations = 2 * total_width + 9;
        let bar_width = term_width
            .saturating_sub(1 + decorations)
            .max(MIN_BAR_WIDTH);

        let (filled, percentage) = if self.total == 0 {
            (bar_width, 100)
        } else {
            let total = u128::from(self.total);
            let pos = u128::from(pos);
            let filled = usize::try_from(bar_width as u128 * pos / total).unwrap_or(usize::MAX);
            (filled, pos * 100 / total)
        };
        let filled = filled.clamp(1, bar_width);
        let bar = format!(
            "{}>{}",
            "=".repeat(filled - 1),
            " ".repeat(bar_width - filled)
        );

        format!(
            "\r{:>width$}/{} [{}]{:>4}%",
            pos,
            self.total,
            bar,
            percentage,
            width = total_width
        )
    }
}

impl<T: Terminal> Drop for ProgressBar<T> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.out.write_all(b"\n");
            let _ = self.out.show_cursor();
            let _ = self.out.flush();
        }
    }
}
