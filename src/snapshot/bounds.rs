use crate::error::SnapshotError;

/// Axis-aligned screen rectangle, stored as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top: i64,
    pub left: i64,
    pub height: i64,
    pub width: i64,
}

impl Rect {
    /// Parse a capture-format rectangle `[x1,y1][x2,y2]`.
    pub fn parse(raw: &str) -> Result<Rect, SnapshotError> {
        parse_corners(raw)
            .and_then(|(left, top, right, bottom)| {
                Some(Rect {
                    top,
                    left,
                    height: bottom.checked_sub(top)?,
                    width: right.checked_sub(left)?,
                })
            })
            .ok_or_else(|| SnapshotError::MalformedBounds(raw.to_string()))
    }

    pub fn has_area(&self) -> bool {
        self.height > 0 && self.width > 0
    }

    /// Strict intersection: rectangles sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.top >= other.bottom()
            || self.left >= other.right()
            || other.top >= self.bottom()
            || other.left >= self.right())
    }

    fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }

    fn right(&self) -> i64 {
        self.left.saturating_add(self.width)
    }
}

fn parse_corners(raw: &str) -> Option<(i64, i64, i64, i64)> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let (first, second) = inner.split_once("][")?;
    let (x1, y1) = parse_point(first)?;
    let (x2, y2) = parse_point(second)?;
    Some((x1, y1, x2, y2))
}

fn parse_point(raw: &str) -> Option<(i64, i64)> {
    let (x, y) = raw.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}
