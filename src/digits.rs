use crate::base::*;
use crate::number::PositionalNumber;

/// The configuration of one walk over the digits of a number.
///
/// Positions count from the most significant digit at 0. A positive step
/// moves toward the least significant digit, a negative one toward the
/// most significant. An unset end means the natural edge for the chosen
/// direction: the last digit when walking forward, position 0 backward.
#[derive(Debug, Clone)]
pub struct DigitWalk {
    pub start: isize,
    pub end: Option<isize>,
    /// Nonzero.
    pub step: isize,
    pub include_start: bool,
    pub include_end: bool,
}

impl Default for DigitWalk {
    fn default() -> DigitWalk {
        DigitWalk {
            start: 0,
            end: None,
            step: 1,
            include_start: true,
            include_end: true,
        }
    }
}

impl DigitWalk {
    pub fn new() -> DigitWalk {
        Default::default()
    }

    pub fn starting_at(mut self, start: isize) -> DigitWalk {
        self.start = start;
        self
    }

    pub fn ending_at(mut self, end: isize) -> DigitWalk {
        self.end = Some(end);
        self
    }

    pub fn step(mut self, step: isize) -> DigitWalk {
        self.step = step;
        self
    }

    pub fn exclusive_start(mut self) -> DigitWalk {
        self.include_start = false;
        self
    }

    pub fn exclusive_end(mut self) -> DigitWalk {
        self.include_end = false;
        self
    }
}

/// A lazy, finite walk over the digits of one number. Visited positions
/// outside the number's span yield `None` items; the walk always
/// terminates at its configured end. Created by
/// [`PositionalNumber::digits_from`]; every call there starts afresh.
#[derive(Clone)]
pub struct Digits<'num> {
    number: &'num PositionalNumber,
    count: usize,
    position: isize,
    end: isize,
    step: isize,
    include_end: bool,
    exhausted: bool,
    mode: Mode,
}

/// The four walk cases: dense-array-backed or value-backed, forward or
/// backward. All four agree exactly on bounds and out-of-span policy;
/// they differ only in how an in-span digit is obtained.
#[derive(Clone)]
enum Mode {
    /// The number's cache is already dense; every digit is an index.
    Indexed,
    /// Value-backed, increasing positions. Keeps base^step to move the
    /// extraction window one step at a time.
    Forward { pow_step: UNumber, state: Option<Fwd> },
    /// Value-backed, decreasing positions, quotient-based.
    Backward { pow_step: UNumber, state: Option<Bwd> },
}

/// Extraction state aligned to one position: `rem` = value mod
/// base^(count−position), `low` = base^(count−position−1). The digit is
/// `rem / low`; both shrink by base^step per step.
#[derive(Clone)]
struct Fwd {
    position: usize,
    rem: UNumber,
    low: UNumber,
}

impl Fwd {
    fn init(value: &UNumber, base: &UNumber, count: usize, position: usize) -> Fwd {
        let low = base.pow((count - position - 1) as u32);
        let rem = value % (&low * base);
        Fwd { position, rem, low }
    }
}

/// Backward counterpart: `quot` = value div base^(count−1−position); the
/// digit is `quot mod base`, and each step divides by base^|step|.
#[derive(Clone)]
struct Bwd {
    position: usize,
    quot: UNumber,
}

impl Bwd {
    fn init(value: &UNumber, base: &UNumber, count: usize, position: usize) -> Bwd {
        let quot = value / base.pow((count - 1 - position) as u32);
        Bwd { position, quot }
    }
}

impl<'num> Digits<'num> {
    pub(crate) fn new(number: &'num PositionalNumber, walk: DigitWalk) -> Digits<'num> {
        assert!(walk.step != 0, "step must be nonzero");
        let count = number.digit_count();
        let step = walk.step;
        let position = if walk.include_start {
            walk.start
        } else {
            walk.start.saturating_add(step)
        };
        let end = walk.end.unwrap_or(if step > 0 { count as isize - 1 } else { 0 });
        let base = number.system().big_base();
        let mode = if number.is_dense() {
            Mode::Indexed
        } else if step > 0 {
            Mode::Forward { pow_step: base.pow(step as u32), state: None }
        } else {
            Mode::Backward { pow_step: base.pow(step.unsigned_abs() as u32), state: None }
        };
        Digits {
            number,
            count,
            position,
            end,
            step,
            include_end: walk.include_end,
            exhausted: false,
            mode,
        }
    }

    /// Positions left to visit, from the current one on.
    fn remaining(&self) -> usize {
        if self.exhausted {
            return 0;
        }
        let (position, end, step) = (self.position as i128, self.end as i128, self.step as i128);
        let span = if step > 0 {
            let last = if self.include_end { end } else { end - 1 };
            last - position
        } else {
            let first = if self.include_end { end } else { end + 1 };
            position - first
        };
        if span < 0 {
            0
        } else {
            (span / step.abs() + 1) as usize
        }
    }

    /// The digit at an in-span position, through whichever of the four
    /// cases this walk runs in.
    fn in_span_digit(&mut self, position: usize) -> usize {
        match &mut self.mode {
            Mode::Indexed => self.number.cached_digit(position)
                .expect("dense cache holds every digit"),
            Mode::Forward { pow_step, state } => {
                let base = self.number.system().big_base();
                let fwd = match state.take() {
                    Some(fwd) if fwd.position == position => fwd,
                    _ => Fwd::init(self.number.value(), base, self.count, position),
                };
                let digit = (&fwd.rem / &fwd.low).to_usize().expect("digit is below base");
                self.number.note_digit(position, digit);
                let next = position + self.step as usize;
                if next < self.count {
                    let low = &fwd.low / &*pow_step;
                    let rem = &fwd.rem % (&low * base);
                    *state = Some(Fwd { position: next, rem, low });
                }
                digit
            },
            Mode::Backward { pow_step, state } => {
                let base = self.number.system().big_base();
                let bwd = match state.take() {
                    Some(bwd) if bwd.position == position => bwd,
                    _ => Bwd::init(self.number.value(), base, self.count, position),
                };
                let digit = (&bwd.quot % base).to_usize().expect("digit is below base");
                self.number.note_digit(position, digit);
                if let Some(next) = position.checked_sub(self.step.unsigned_abs()) {
                    let quot = &bwd.quot / &*pow_step;
                    *state = Some(Bwd { position: next, quot });
                }
                digit
            },
        }
    }
}

impl Iterator for Digits<'_> {
    /// `None` within the sequence marks a visited position outside the
    /// number's span; iterator exhaustion is the outer `Option`.
    type Item = Option<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let position = self.position;
        match position.checked_add(self.step) {
            Some(next) => self.position = next,
            None => self.exhausted = true,
        }
        if position < 0 || position as usize >= self.count {
            return Some(None);
        }
        Some(Some(self.in_span_digit(position as usize)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Digits<'_> { }
