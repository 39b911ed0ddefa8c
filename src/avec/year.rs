//! Guessing the year of each tour.
//!
//! Tours are visited most recent first, starting from the year the image was
//! transferred. A tour recorded in a later month than the tour visited before
//! it must belong to the previous year.
//!
//! This is a heuristic. If the buffer spans more than a year, for example a
//! March tour followed (going back in time) by a February tour of the year
//! before, the missed boundary goes unnoticed and every older tour is dated
//! one year too late.

/// The running year guess of a walk.
#[derive(Debug, Clone, Copy)]
pub struct YearGuess {
    year: i32,
    month: Option<u8>,
}

impl YearGuess {
    /// Begin guessing from the year the image was transferred.
    pub fn new(year: i32) -> Self {
        Self { year, month: None }
    }

    /// Guess the year of the next (older) tour, started in `month`.
    pub fn next(&mut self, month: u8) -> i32 {
        if self.month.is_some_and(|previous| month > previous) {
            self.year -= 1;
        }
        self.month = Some(month);

        self.year
    }
}
