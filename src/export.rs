//! Density grid export: `x,y,count` text and PNG previews

use std::fmt::Write as FmtWrite;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::constants::{LAYUP_CENTER, LAYUP_RADIUS};
use crate::zones::{DensityGrid, GridSpec, HotZone};

/// Pixels per grid cell in previews
pub const CELL_SIZE: u32 = 24;

const BACKGROUND: Rgb<u8> = Rgb([230, 230, 230]);
const ZONE_OUTLINE: Rgb<u8> = Rgb([20, 20, 20]);
const LAYUP_OUTLINE: Rgb<u8> = Rgb([90, 90, 200]);

/// One line per cell: cell center and count
pub fn grid_to_text(grid: &DensityGrid, spec: &GridSpec) -> String {
    let mut data = String::from("x,y,count\n");
    for cx in 0..grid.bins_x() {
        for cy in 0..grid.bins_y() {
            let (x_min, x_max, y_min, y_max) = spec.cell_bounds(cx, cy);
            let _ = writeln!(
                &mut data,
                "{:.2},{:.2},{}",
                (x_min + x_max) / 2.0,
                (y_min + y_max) / 2.0,
                grid.get(cx, cy)
            );
        }
    }
    data
}

/// Convert density (0-1) to RGB color.
/// Sparse = pale yellow, dense = deep red
pub fn density_to_color(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let g = 1.0 - t * 0.85;
    let b = (1.0 - t * 2.0).max(0.0) * 0.6;
    Rgb([255, (g * 255.0) as u8, (b * 255.0) as u8])
}

/// Pixel rectangle of a cell; rows are flipped so y grows upward
fn cell_pixels(bins_y: usize, cx: usize, cy: usize) -> (i32, i32) {
    let x0 = cx as u32 * CELL_SIZE;
    let y0 = (bins_y - 1 - cy) as u32 * CELL_SIZE;
    (x0 as i32, y0 as i32)
}

/// Fill a cell with a solid color
fn fill_cell(img: &mut RgbImage, bins_y: usize, cx: usize, cy: usize, color: Rgb<u8>) {
    let (x0, y0) = cell_pixels(bins_y, cx, cy);
    for dy in 0..CELL_SIZE {
        for dx in 0..CELL_SIZE {
            img.put_pixel(x0 as u32 + dx, y0 as u32 + dy, color);
        }
    }
}

/// Map a plot-space point to image pixels
fn plot_to_pixel(spec: &GridSpec, width: u32, height: u32, x: f64, y: f64) -> (i32, i32) {
    let x_min = spec.x_edges[0];
    let x_max = spec.x_edges[spec.bins_x()];
    let y_min = spec.y_edges[0];
    let y_max = spec.y_edges[spec.bins_y()];
    let px = (x - x_min) / (x_max - x_min) * width as f64;
    let py = height as f64 - (y - y_min) / (y_max - y_min) * height as f64;
    (px.round() as i32, py.round() as i32)
}

/// Render a season's grid with its hot zones outlined
pub fn render_density(grid: &DensityGrid, spec: &GridSpec, zones: &[HotZone]) -> RgbImage {
    let width = grid.bins_x() as u32 * CELL_SIZE;
    let height = grid.bins_y() as u32 * CELL_SIZE;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let max = grid.max().max(1) as f32;
    for cx in 0..grid.bins_x() {
        for cy in 0..grid.bins_y() {
            let count = grid.get(cx, cy);
            if count > 0 {
                fill_cell(&mut img, grid.bins_y(), cx, cy, density_to_color(count as f32 / max));
            }
        }
    }

    // Layup exclusion circle for reference
    let (rim_x, rim_y) = plot_to_pixel(spec, width, height, LAYUP_CENTER.0, LAYUP_CENTER.1);
    let (edge_x, _) = plot_to_pixel(spec, width, height, LAYUP_CENTER.0 + LAYUP_RADIUS, LAYUP_CENTER.1);
    let radius = (edge_x - rim_x).abs().max(1);
    draw_hollow_circle_mut(&mut img, (rim_x, rim_y), radius, LAYUP_OUTLINE);

    for zone in zones {
        let (x0, y0) = cell_pixels(grid.bins_y(), zone.cell_x, zone.cell_y);
        // Two nested outlines for a 2px border
        draw_hollow_rect_mut(&mut img, Rect::at(x0, y0).of_size(CELL_SIZE, CELL_SIZE), ZONE_OUTLINE);
        draw_hollow_rect_mut(
            &mut img,
            Rect::at(x0 + 1, y0 + 1).of_size(CELL_SIZE - 2, CELL_SIZE - 2),
            ZONE_OUTLINE,
        );
    }
    img
}

/// Tile same-sized images into a sheet, `cols` per row
pub fn combine_sheets(images: &[RgbImage], cols: u32) -> Option<RgbImage> {
    let first = images.first()?;
    let cell_w = first.width();
    let cell_h = first.height();
    let cols = cols.max(1);
    let rows = (images.len() as u32).div_ceil(cols).max(1);

    let mut sheet = RgbImage::from_pixel(cell_w * cols, cell_h * rows, Rgb([20, 20, 20]));
    for (idx, img) in images.iter().enumerate() {
        let x0 = (idx as u32 % cols) * cell_w;
        let y0 = (idx as u32 / cols) * cell_h;
        for y in 0..cell_h.min(img.height()) {
            for x in 0..cell_w.min(img.width()) {
                sheet.put_pixel(x0 + x, y0 + y, *img.get_pixel(x, y));
            }
        }
    }
    Some(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{build_grid_edges, top_k_zones};

    fn spec() -> GridSpec {
        build_grid_edges(&[-25.0, 25.0], &[0.0, 47.0], 4, 4).unwrap()
    }

    #[test]
    fn text_has_header_and_one_row_per_cell() {
        let spec = spec();
        let mut grid = DensityGrid::new(4, 4);
        grid.increment(0, 0);
        let text = grid_to_text(&grid, &spec);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y,count");
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[1], "-18.75,5.88,1");
    }

    #[test]
    fn render_outlines_hot_zones() {
        let spec = spec();
        let mut grid = DensityGrid::new(4, 4);
        for _ in 0..3 {
            grid.increment(3, 3);
        }
        let zones = top_k_zones(&grid, &spec, 1);
        let img = render_density(&grid, &spec, &zones);

        assert_eq!(img.dimensions(), (4 * CELL_SIZE, 4 * CELL_SIZE));
        // Cell (3, 3) is the top-right corner after the row flip
        assert_eq!(*img.get_pixel(3 * CELL_SIZE, 0), ZONE_OUTLINE);
        let inside = *img.get_pixel(3 * CELL_SIZE + CELL_SIZE / 2, CELL_SIZE / 2);
        assert_eq!(inside, density_to_color(1.0));
    }

    #[test]
    fn sheets_tile_in_rows() {
        let tile = RgbImage::from_pixel(2, 3, Rgb([1, 2, 3]));
        let sheet = combine_sheets(&[tile.clone(), tile.clone(), tile], 2).unwrap();
        assert_eq!(sheet.dimensions(), (4, 6));
        assert_eq!(*sheet.get_pixel(1, 4), Rgb([1, 2, 3]));
        assert_eq!(*sheet.get_pixel(3, 4), Rgb([20, 20, 20]));
        assert!(combine_sheets(&[], 4).is_none());
    }

    #[test]
    fn color_ramp_ends() {
        assert_eq!(density_to_color(0.0), Rgb([255, 255, 153]));
        assert_eq!(density_to_color(1.0).0[0], 255);
        assert!(density_to_color(1.0).0[1] < 60);
    }
}
