use crate::terminal::TerminalSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn bottom(self) -> u16 {
        self.row.saturating_add(self.height)
    }

    pub fn right(self) -> u16 {
        self.col.saturating_add(self.width)
    }

    pub fn contains(self, col: u16, row: u16) -> bool {
        col >= self.col && col < self.right() && row >= self.row && row < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

/// Panel placement relative to its anchor: start-aligned below, with
/// `offset` blank rows in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    pub offset: u16,
    pub flip: bool,
    pub shift: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            flip: true,
            shift: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub area: Rect,
    pub side: Side,
}

impl PanelGeometry {
    /// Inner area, inside a one-cell border.
    pub fn content(self) -> Rect {
        Rect {
            col: self.area.col.saturating_add(1),
            row: self.area.row.saturating_add(1),
            width: self.area.width.saturating_sub(2),
            height: self.area.height.saturating_sub(2),
        }
    }

    /// Content row under the given cell, counted from the top of the content.
    pub fn content_row_at(self, col: u16, row: u16) -> Option<usize> {
        let content = self.content();
        if !content.contains(col, row) {
            return None;
        }
        Some((row - content.row) as usize)
    }
}

/// Places a `width` x `height` panel against `anchor` inside `viewport`.
///
/// Below the anchor is preferred. With `flip`, the panel moves above when
/// it does not fit below but does fit above. With `shift`, it slides left
/// to stay on screen. A panel too tall for either side is cut to the
/// larger one.
pub fn place_panel(
    anchor: Rect,
    width: u16,
    height: u16,
    viewport: TerminalSize,
    options: PlacementOptions,
) -> Option<PanelGeometry> {
    if viewport.width == 0 || viewport.height == 0 || width == 0 || height == 0 {
        return None;
    }

    let below_row = anchor.bottom().saturating_add(options.offset);
    let space_below = viewport.height.saturating_sub(below_row);
    let space_above = anchor.row.saturating_sub(options.offset);

    let (side, height) = if height <= space_below {
        (Side::Below, height)
    } else if options.flip && height <= space_above {
        (Side::Above, height)
    } else if options.flip && space_above > space_below {
        (Side::Above, space_above)
    } else {
        (Side::Below, space_below)
    };
    if height == 0 {
        return None;
    }

    let row = match side {
        Side::Below => below_row,
        Side::Above => space_above - height,
    };

    let width = width.min(viewport.width);
    let mut col = anchor.col;
    if col.saturating_add(width) > viewport.width {
        col = if options.shift {
            viewport.width - width
        } else {
            col.min(viewport.width - 1)
        };
    }
    let width = width.min(viewport.width - col);

    Some(PanelGeometry {
        area: Rect {
            col,
            row,
            width,
            height,
        },
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: u16, height: u16) -> TerminalSize {
        TerminalSize { width, height }
    }

    fn anchor(row: u16) -> Rect {
        Rect {
            col: 2,
            row,
            width: 30,
            height: 1,
        }
    }

    #[test]
    fn prefers_below_anchor() {
        let geometry =
            place_panel(anchor(3), 20, 6, viewport(80, 24), PlacementOptions::default())
                .expect("fits");
        assert_eq!(geometry.side, Side::Below);
        assert_eq!(geometry.area.row, 4);
        assert_eq!(geometry.area.col, 2);
    }

    #[test]
    fn offset_leaves_gap() {
        let options = PlacementOptions {
            offset: 1,
            ..PlacementOptions::default()
        };
        let geometry = place_panel(anchor(3), 20, 6, viewport(80, 24), options).expect("fits");
        assert_eq!(geometry.area.row, 5);
    }

    #[test]
    fn flips_above_when_no_room_below() {
        let geometry =
            place_panel(anchor(20), 20, 6, viewport(80, 24), PlacementOptions::default())
                .expect("fits above");
        assert_eq!(geometry.side, Side::Above);
        assert_eq!(geometry.area.row, 14);
        assert_eq!(geometry.area.bottom(), 20);
    }

    #[test]
    fn shrinks_when_neither_side_fits() {
        let geometry =
            place_panel(anchor(4), 20, 12, viewport(80, 12), PlacementOptions::default())
                .expect("partial fit");
        assert_eq!(geometry.side, Side::Below);
        assert_eq!(geometry.area.height, 7);
    }

    #[test]
    fn shifts_left_to_stay_on_screen() {
        let wide_anchor = Rect {
            col: 70,
            row: 2,
            width: 10,
            height: 1,
        };
        let geometry =
            place_panel(wide_anchor, 20, 5, viewport(80, 24), PlacementOptions::default())
                .expect("fits");
        assert_eq!(geometry.area.col, 60);
        assert_eq!(geometry.area.right(), 80);
    }

    #[test]
    fn maps_cells_to_content_rows() {
        let geometry =
            place_panel(anchor(3), 20, 6, viewport(80, 24), PlacementOptions::default())
                .expect("fits");
        assert_eq!(geometry.content_row_at(5, 5), Some(0));
        assert_eq!(geometry.content_row_at(5, 8), Some(3));
        assert_eq!(geometry.content_row_at(5, 4), None);
        assert_eq!(geometry.content_row_at(2, 6), None);
    }
}
