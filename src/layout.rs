// src/layout.rs
//! Page geometry and the layout cursor: the state machine that tracks the
//! vertical write position across an unbounded number of rows and decides
//! when a page break is due.

/// Fixed page geometry, in PDF layout units (1/72 inch).
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Left/right content margin.
    pub margin: f32,
    /// Content must stay above this line; the footer is drawn below it.
    pub bottom_margin: f32,
}

impl PageGeometry {
    /// ISO A4.
    pub const fn a4() -> Self {
        Self {
            width: 595.27,
            height: 841.89,
            margin: 40.0,
            bottom_margin: 40.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn right_edge(&self) -> f32 {
        self.width - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Top of a new page; repeating chrome has not been laid down yet.
    FreshPage,
    /// At least one element has been placed on the current page.
    InContent,
    /// The next element did not fit; the page must be finalized and broken.
    NeedsBreak,
}

/// Mutable per-render layout state.
///
/// `y` is the distance from the page bottom and decreases monotonically
/// while a page is being filled; [`LayoutCursor::break_page`] resets it to
/// the top of the page. A break is requested exactly when the next
/// element's height would push `y` below the bottom margin.
#[derive(Debug)]
pub struct LayoutCursor {
    pub geometry: PageGeometry,
    page_number: u32,
    y: f32,
    row_index: usize,
    state: CursorState,
}

// Tolerance for accumulated floating point error in fit checks.
const EPSILON: f32 = 0.01;

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page_number: 1,
            y: geometry.height,
            row_index: 0,
            state: CursorState::FreshPage,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Places chrome at an absolute height without consuming content space
    /// below it; used when a banner dictates where content starts.
    pub fn move_to(&mut self, y: f32) {
        self.y = y;
    }

    /// Reports whether an element of the given height still fits above the
    /// bottom margin. A failed fit transitions the cursor to `NeedsBreak`.
    pub fn fits(&mut self, height: f32) -> bool {
        let fits = self.y - height >= self.geometry.bottom_margin - EPSILON;
        if !fits {
            self.state = CursorState::NeedsBreak;
        }
        fits
    }

    /// Consumes vertical space for one placed element.
    pub fn advance(&mut self, height: f32) {
        debug_assert!(height >= 0.0);
        self.y -= height;
        self.state = CursorState::InContent;
    }

    /// Consumes space for one table row and moves to the next row index.
    pub fn advance_row(&mut self, height: f32) {
        self.advance(height);
        self.row_index += 1;
    }

    /// Finalizes the break: next page number, cursor back at the page top,
    /// chrome pending again.
    pub fn break_page(&mut self) {
        self.page_number += 1;
        self.y = self.geometry.height;
        self.state = CursorState::FreshPage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fresh_on_page_one() {
        let cursor = LayoutCursor::new(PageGeometry::a4());
        assert_eq!(cursor.page_number(), 1);
        assert_eq!(cursor.state(), CursorState::FreshPage);
        assert_eq!(cursor.y(), 841.89);
    }

    #[test]
    fn y_decreases_monotonically_within_a_page() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.move_to(700.0);
        let mut previous = cursor.y();
        for _ in 0..10 {
            cursor.advance(20.0);
            assert!(cursor.y() < previous);
            previous = cursor.y();
        }
        assert_eq!(cursor.state(), CursorState::InContent);
    }

    #[test]
    fn break_triggers_exactly_at_bottom_margin() {
        let geometry = PageGeometry::a4();
        let mut cursor = LayoutCursor::new(geometry);

        // Exactly one row of room left.
        cursor.move_to(geometry.bottom_margin + 20.0);
        assert!(cursor.fits(20.0));
        cursor.advance(20.0);

        assert!(!cursor.fits(20.0));
        assert_eq!(cursor.state(), CursorState::NeedsBreak);
    }

    #[test]
    fn break_page_resets_to_fresh_state() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.move_to(50.0);
        let _ = cursor.fits(20.0);
        cursor.break_page();

        assert_eq!(cursor.page_number(), 2);
        assert_eq!(cursor.state(), CursorState::FreshPage);
        assert_eq!(cursor.y(), cursor.geometry.height);
    }

    #[test]
    fn rows_per_page_never_exceeds_capacity() {
        let geometry = PageGeometry::a4();
        let row_height = 20.0;
        let top = 736.89_f32;
        let capacity = ((top - geometry.bottom_margin) / row_height).floor() as usize;

        let mut cursor = LayoutCursor::new(geometry);
        cursor.move_to(top);
        let mut placed = 0;
        while cursor.fits(row_height) {
            cursor.advance_row(row_height);
            placed += 1;
        }
        assert_eq!(placed, capacity);
        assert_eq!(cursor.row_index(), capacity);
    }
}
