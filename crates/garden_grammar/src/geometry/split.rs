//! Rectangle splitting used by AREA subdivision.
use rand::RngCore;

use crate::geometry::Rect;
use crate::sampling::rand_index;

/// Aspect ratio above which a rectangle is considered elongated.
pub const ELONGATION_RATIO: f32 = 1.3;

/// The six ways an area can be cut in two.
///
/// Vertical modes cut with a vertical line (halves side by side), horizontal
/// modes with a horizontal line (halves stacked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitMode {
    Vertical50,
    Vertical60_40,
    Vertical40_60,
    Horizontal50,
    Horizontal60_40,
    Horizontal40_60,
}

const WIDE_CANDIDATES: [SplitMode; 4] = [
    SplitMode::Vertical50,
    SplitMode::Vertical50,
    SplitMode::Vertical60_40,
    SplitMode::Vertical40_60,
];

const TALL_CANDIDATES: [SplitMode; 4] = [
    SplitMode::Horizontal50,
    SplitMode::Horizontal50,
    SplitMode::Horizontal60_40,
    SplitMode::Horizontal40_60,
];

const ALL_CANDIDATES: [SplitMode; 6] = [
    SplitMode::Vertical50,
    SplitMode::Vertical60_40,
    SplitMode::Vertical40_60,
    SplitMode::Horizontal50,
    SplitMode::Horizontal60_40,
    SplitMode::Horizontal40_60,
];

impl SplitMode {
    /// Share of the cut axis given to the first half.
    pub fn first_fraction(self) -> f32 {
        match self {
            SplitMode::Vertical50 | SplitMode::Horizontal50 => 0.5,
            SplitMode::Vertical60_40 | SplitMode::Horizontal60_40 => 0.6,
            SplitMode::Vertical40_60 | SplitMode::Horizontal40_60 => 0.4,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            SplitMode::Vertical50 | SplitMode::Vertical60_40 | SplitMode::Vertical40_60
        )
    }

    /// Modes eligible for `rect`, with repetitions encoding their weight.
    ///
    /// Wide rectangles are cut vertically and tall ones horizontally, with the
    /// even cut counted twice; near-square rectangles may use any mode.
    pub fn candidates(rect: &Rect) -> &'static [SplitMode] {
        if rect.w > rect.h * ELONGATION_RATIO {
            &WIDE_CANDIDATES
        } else if rect.h > rect.w * ELONGATION_RATIO {
            &TALL_CANDIDATES
        } else {
            &ALL_CANDIDATES
        }
    }
}

/// Cuts `rect` in two adjoining halves according to `mode`.
pub fn split(rect: &Rect, mode: SplitMode) -> (Rect, Rect) {
    let f = mode.first_fraction();
    let Rect { x, y, w, h } = *rect;
    if mode.is_vertical() {
        let w1 = w * f;
        (Rect::new(x, y, w1, h), Rect::new(x + w1, y, w * (1.0 - f), h))
    } else {
        let h1 = h * f;
        (Rect::new(x, y, w, h1), Rect::new(x, y + h1, w, h * (1.0 - f)))
    }
}

/// Draws a split mode for `rect` from [`SplitMode::candidates`].
pub fn choose_split_mode(rect: &Rect, rng: &mut dyn RngCore) -> SplitMode {
    let candidates = SplitMode::candidates(rect);
    candidates[rand_index(candidates.len(), rng)]
}

/// True when both halves of the cut have a shorter side of at least `min_side`.
pub fn split_fits(rect: &Rect, mode: SplitMode, min_side: f32) -> bool {
    let (a, b) = split(rect, mode);
    a.min_side() >= min_side && b.min_side() >= min_side
}

/// True when at least one candidate mode for `rect` yields halves no smaller
/// than `min_side`.
pub fn is_splittable(rect: &Rect, min_side: f32) -> bool {
    SplitMode::candidates(rect)
        .iter()
        .any(|&mode| split_fits(rect, mode, min_side))
}
