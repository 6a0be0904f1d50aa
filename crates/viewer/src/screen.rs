//! Terminal context: raw mode, alternate screen, and board drawing.
//!
//! All drawing goes through one `Screen` owned by the run loop; nothing
//! touches process-global display state.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use chess_reel_core::{Cell, Side, Snapshot};

use crate::layout::GridLayout;

const LIGHT_SQUARE: Color = Color::Rgb {
    r: 240,
    g: 217,
    b: 181,
};
const DARK_SQUARE: Color = Color::Rgb {
    r: 181,
    g: 136,
    b: 99,
};
const WHITE_PIECE: Color = Color::Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const BLACK_PIECE: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const BANNER: Color = Color::Rgb {
    r: 200,
    g: 40,
    b: 40,
};

pub struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Draws one board with its top-left corner at (`x`, `y`).
    pub fn draw_board(
        &mut self,
        x: u16,
        y: u16,
        layout: &GridLayout,
        snapshot: &Snapshot,
    ) -> Result<()> {
        for (rank, row) in snapshot.rows().iter().enumerate() {
            for (file, cell) in row.iter().enumerate() {
                let bg = if (rank + file) % 2 == 0 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                };
                self.draw_square(
                    x + file as u16 * layout.square_w,
                    y + rank as u16 * layout.square_h,
                    layout.square_w,
                    layout.square_h,
                    bg,
                    *cell,
                )?;
            }
        }
        Ok(())
    }

    fn draw_square(&mut self, x: u16, y: u16, w: u16, h: u16, bg: Color, cell: Cell) -> Result<()> {
        self.stdout.queue(SetBackgroundColor(bg))?;
        let blank = " ".repeat(w as usize);
        for dy in 0..h {
            self.stdout.queue(cursor::MoveTo(x, y + dy))?;
            self.stdout.queue(Print(&blank))?;
        }

        if let Cell::Piece(piece) = cell {
            let fg = match piece.side {
                Side::White => WHITE_PIECE,
                Side::Black => BLACK_PIECE,
            };
            self.stdout
                .queue(cursor::MoveTo(x + (w - 1) / 2, y + h / 2))?;
            self.stdout.queue(SetForegroundColor(fg))?;
            if piece.side == Side::White {
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            self.stdout.queue(Print(piece.symbol()))?;
            self.stdout.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    /// Clears the screen and shows a centered banner message.
    pub fn draw_intermission(&mut self, term_w: u16, term_h: u16, message: &str) -> Result<()> {
        self.clear()?;
        let x = term_w.saturating_sub(message.len() as u16) / 2;
        self.stdout.queue(cursor::MoveTo(x, term_h / 2))?;
        self.stdout.queue(SetForegroundColor(BANNER))?;
        self.stdout.queue(SetAttribute(Attribute::Bold))?;
        self.stdout.queue(Print(message))?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
