//! Pure calculation functions for grid geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{GridSpec, LayoutError};

/// Column/row counts and canvas size for a given number of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// Where one image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: u32,
    pub row: u32,
    /// Pixel offset of the cell's top-left corner.
    pub x: u32,
    pub y: u32,
}

/// Integer ceiling division. `divisor` must be non-zero.
pub fn ceil_div(value: u32, divisor: u32) -> u32 {
    value.div_ceil(divisor)
}

/// Compute the grid for `image_count` images.
///
/// # Examples
/// ```
/// # use folder_grid::imaging::{GridSpec, compute_layout};
/// // 5 images, 100px wide canvas, 50x50 cells → 2 columns, 3 rows
/// let spec = GridSpec::new(100, 50, 50).unwrap();
/// let layout = compute_layout(5, &spec).unwrap();
/// assert_eq!((layout.columns, layout.rows), (2, 3));
/// assert_eq!((layout.canvas_width, layout.canvas_height), (100, 150));
/// ```
pub fn compute_layout(image_count: usize, spec: &GridSpec) -> Result<GridLayout, LayoutError> {
    if image_count == 0 {
        return Err(LayoutError::NoImages);
    }
    let columns = spec.image_width() / spec.cell_width();
    if columns == 0 {
        // GridSpec::new already refuses this, kept for specs built elsewhere
        return Err(LayoutError::NoColumns {
            image_width: spec.image_width(),
            cell_width: spec.cell_width(),
        });
    }
    let count = u32::try_from(image_count).unwrap_or(u32::MAX);
    let rows = ceil_div(count, columns);
    let too_large = LayoutError::CanvasTooLarge {
        width: spec.image_width(),
        rows,
        cell_height: spec.cell_height(),
    };
    let canvas_height = rows.checked_mul(spec.cell_height()).ok_or(too_large.clone())?;
    // RGBA8 buffer length must fit in usize
    let fits = u64::from(spec.image_width())
        .checked_mul(u64::from(canvas_height))
        .and_then(|px| px.checked_mul(4))
        .is_some_and(|len| usize::try_from(len).is_ok());
    if !fits {
        return Err(too_large);
    }

    Ok(GridLayout {
        columns,
        rows,
        canvas_width: spec.image_width(),
        canvas_height,
        cell_width: spec.cell_width(),
        cell_height: spec.cell_height(),
    })
}

impl GridLayout {
    /// Placement of the image at `index` (load order), filling left to right
    /// then top to bottom.
    pub fn placement(&self, index: usize) -> Placement {
        let index = index as u32;
        let column = index % self.columns;
        let row = index / self.columns;
        Placement {
            column,
            row,
            x: column * self.cell_width,
            y: row * self.cell_height,
        }
    }

    /// Image indices that fall on `row`, clipped to `image_count`.
    pub fn row_indices(&self, row: u32, image_count: usize) -> std::ops::Range<usize> {
        let start = (row * self.columns) as usize;
        let end = (start + self.columns as usize).min(image_count);
        start.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize, width: u32, cell_w: u32, cell_h: u32) -> GridLayout {
        compute_layout(count, &GridSpec::new(width, cell_w, cell_h).unwrap()).unwrap()
    }

    // =========================================================================
    // compute_layout tests
    // =========================================================================

    #[test]
    fn five_images_in_two_columns() {
        let l = layout(5, 100, 50, 50);
        assert_eq!(l.columns, 2);
        assert_eq!(l.rows, 3);
        assert_eq!(l.canvas_width, 100);
        assert_eq!(l.canvas_height, 150);
    }

    #[test]
    fn default_sizes_give_twenty_columns() {
        // 520 / 26 = 20 columns; 41 images need 3 rows
        let l = layout(41, 520, 26, 26);
        assert_eq!(l.columns, 20);
        assert_eq!(l.rows, 3);
        assert_eq!(l.canvas_height, 78);
    }

    #[test]
    fn exact_fill_has_no_extra_row() {
        let l = layout(6, 90, 30, 10);
        assert_eq!(l.columns, 3);
        assert_eq!(l.rows, 2);
    }

    #[test]
    fn canvas_width_is_not_narrowed_to_columns() {
        // 100 / 30 = 3 columns (90px), canvas stays 100px
        let l = layout(4, 100, 30, 30);
        assert_eq!(l.columns, 3);
        assert_eq!(l.canvas_width, 100);
    }

    #[test]
    fn single_image_single_row() {
        let l = layout(1, 520, 26, 26);
        assert_eq!(l.rows, 1);
        assert_eq!(l.canvas_height, 26);
    }

    #[test]
    fn rows_cover_count_exactly() {
        for width in [26, 52, 100, 520] {
            for count in 1..=60usize {
                let l = layout(count, width, 26, 13);
                let n = count as u32;
                assert!(l.columns >= 1);
                assert!((l.rows - 1) * l.columns < n, "count {count} width {width}");
                assert!(n <= l.rows * l.columns, "count {count} width {width}");
            }
        }
    }

    #[test]
    fn empty_image_set_is_error() {
        let spec = GridSpec::new(100, 50, 50).unwrap();
        assert_eq!(compute_layout(0, &spec), Err(LayoutError::NoImages));
    }

    #[test]
    fn tall_cells_overflowing_height_are_rejected() {
        let spec = GridSpec::new(10, 10, 3_000_000_000).unwrap();
        assert_eq!(
            compute_layout(2, &spec),
            Err(LayoutError::CanvasTooLarge {
                width: 10,
                rows: 2,
                cell_height: 3_000_000_000,
            })
        );
        // One row of the same cell still fits in u32
        assert_eq!(compute_layout(1, &spec).unwrap().canvas_height, 3_000_000_000);
    }

    #[test]
    fn canvas_byte_length_overflow_is_rejected() {
        let spec = GridSpec::new(u32::MAX, u32::MAX, u32::MAX).unwrap();
        assert!(matches!(
            compute_layout(1, &spec),
            Err(LayoutError::CanvasTooLarge { .. })
        ));
    }

    #[test]
    fn ceil_div_rounds_up() {
        assert_eq!(ceil_div(7, 3), 3);
        assert_eq!(ceil_div(6, 3), 2);
        assert_eq!(ceil_div(1, 20), 1);
    }

    // =========================================================================
    // placement tests
    // =========================================================================

    #[test]
    fn placement_fills_left_to_right_top_to_bottom() {
        let l = layout(7, 30, 10, 10);
        assert_eq!(l.columns, 3);
        let cells: Vec<(u32, u32)> = (0..7)
            .map(|i| {
                let p = l.placement(i);
                (p.column, p.row)
            })
            .collect();
        assert_eq!(
            cells,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2)]
        );
    }

    #[test]
    fn placement_offsets_scale_by_cell_size() {
        let l = layout(5, 100, 50, 40);
        let p = l.placement(3);
        assert_eq!((p.column, p.row), (1, 1));
        assert_eq!((p.x, p.y), (50, 40));
        let last = l.placement(4);
        assert_eq!((last.x, last.y), (0, 80));
    }

    #[test]
    fn placement_is_unique_per_index() {
        let l = layout(23, 100, 20, 20);
        let mut seen = std::collections::HashSet::new();
        for i in 0..23 {
            let p = l.placement(i);
            assert!(p.column < l.columns && p.row < l.rows);
            assert!(seen.insert((p.column, p.row)));
        }
    }

    #[test]
    fn row_indices_clip_last_row() {
        let l = layout(5, 100, 50, 50);
        assert_eq!(l.row_indices(0, 5), 0..2);
        assert_eq!(l.row_indices(2, 5), 4..5);
    }
}
