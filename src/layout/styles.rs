//! KLE label alignment styles (`a` property).
//!
//! A style decides which of the twelve label zones each line of a key's
//! legend lands in.

use super::zones::{ZoneFn, bottom_edge, center_line, front_edge, left_edge, right_edge, top_edge};
use crate::drawing::{Baseline, TextAnchor};
use Zone::*;

pub const LABEL_SLOTS: usize = 12;
pub const STYLE_COUNT: usize = 8;

#[derive(Clone, Copy)]
pub struct Placement {
    pub horizontal: ZoneFn,
    pub vertical: ZoneFn,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
}

impl std::fmt::Debug for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placement")
            .field("anchor", &self.anchor)
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

/// Physical label positions on a key face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    FrontLeft,
    FrontCenter,
    FrontRight,
}

impl Zone {
    pub fn placement(self) -> Placement {
        use Baseline::{AfterEdge, BeforeEdge, Middle as Mid};
        use TextAnchor::{End, Middle, Start};
        match self {
            Zone::TopLeft => place(left_edge, top_edge, Start, BeforeEdge),
            Zone::TopCenter => place(center_line, top_edge, Middle, BeforeEdge),
            Zone::TopRight => place(right_edge, top_edge, End, BeforeEdge),
            Zone::CenterLeft => place(left_edge, center_line, Start, Mid),
            Zone::Center => place(center_line, center_line, Middle, Mid),
            Zone::CenterRight => place(right_edge, center_line, End, Mid),
            Zone::BottomLeft => place(left_edge, bottom_edge, Start, AfterEdge),
            Zone::BottomCenter => place(center_line, bottom_edge, Middle, AfterEdge),
            Zone::BottomRight => place(right_edge, bottom_edge, End, AfterEdge),
            Zone::FrontLeft => place(left_edge, front_edge, Start, Mid),
            Zone::FrontCenter => place(center_line, front_edge, Middle, Mid),
            Zone::FrontRight => place(right_edge, front_edge, End, Mid),
        }
    }
}

fn place(
    horizontal: ZoneFn,
    vertical: ZoneFn,
    anchor: TextAnchor,
    baseline: Baseline,
) -> Placement {
    Placement {
        horizontal,
        vertical,
        anchor,
        baseline,
    }
}

// Row = style, column = label line. Not a simple permutation; keep as is.
const STYLE_TABLE: [[Option<Zone>; LABEL_SLOTS]; STYLE_COUNT] = [
    [
        Some(TopLeft),
        Some(BottomLeft),
        Some(TopRight),
        Some(BottomRight),
        Some(FrontLeft),
        Some(FrontRight),
        Some(CenterLeft),
        Some(CenterRight),
        Some(TopCenter),
        Some(Center),
        Some(BottomCenter),
        Some(FrontCenter),
    ],
    [
        Some(TopCenter),
        Some(BottomCenter),
        None,
        None,
        Some(FrontLeft),
        Some(FrontRight),
        Some(Center),
        None,
        None,
        None,
        None,
        Some(FrontCenter),
    ],
    [
        Some(CenterLeft),
        None,
        Some(CenterRight),
        None,
        Some(FrontLeft),
        Some(FrontRight),
        None,
        None,
        Some(Center),
        None,
        None,
        Some(FrontCenter),
    ],
    [
        Some(Center),
        None,
        None,
        None,
        Some(FrontLeft),
        Some(FrontRight),
        None,
        None,
        None,
        None,
        None,
        Some(FrontCenter),
    ],
    [
        Some(TopLeft),
        Some(BottomLeft),
        Some(TopRight),
        Some(BottomRight),
        Some(FrontCenter),
        None,
        Some(CenterLeft),
        Some(CenterRight),
        Some(TopCenter),
        Some(Center),
        Some(BottomCenter),
        None,
    ],
    [
        Some(TopCenter),
        Some(BottomCenter),
        None,
        None,
        Some(FrontCenter),
        None,
        Some(Center),
        None,
        None,
        None,
        None,
        None,
    ],
    [
        Some(CenterLeft),
        None,
        Some(CenterRight),
        None,
        Some(FrontCenter),
        None,
        None,
        None,
        Some(Center),
        None,
        None,
        None,
    ],
    [
        Some(Center),
        None,
        None,
        None,
        Some(FrontCenter),
        None,
        None,
        None,
        None,
        None,
        None,
        None,
    ],
];

/// A validated label style index (0..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle(u8);

impl LabelStyle {
    pub fn new(index: u8) -> Option<Self> {
        (usize::from(index) < STYLE_COUNT).then_some(Self(index))
    }

    /// Zone for label line `line`, or `None` if this style drops that line.
    pub fn zone(self, line: usize) -> Option<Zone> {
        STYLE_TABLE[usize::from(self.0)].get(line).copied().flatten()
    }

    pub fn placement(self, line: usize) -> Option<Placement> {
        self.zone(line).map(Zone::placement)
    }
}
