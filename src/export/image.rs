use std::path::Path;

use ::image::{Rgb, RgbImage};
use anyhow::Context;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use super::csv::CSV_HEADER;
use super::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph};
use crate::core::LedgerSnapshot;
use crate::detection::format_rupiah;

/// Pixel size of one font dot
pub const SCALE: u32 = 2;
pub const CELL_PADDING: u32 = 8;
pub const ROW_HEIGHT: u32 = GLYPH_HEIGHT * SCALE + 2 * CELL_PADDING;

pub const HEADER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const MUTED_COLOR: Rgb<u8> = Rgb([240, 240, 240]);
pub const FOOTER_COLOR: Rgb<u8> = Rgb([234, 179, 8]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

const CHAR_ADVANCE: u32 = (GLYPH_WIDTH + 1) * SCALE;
const TOTAL_LABEL: &str = "TOTAL:";
const EMPTY_LABEL: &str = "BELUM ADA DATA";

/// Rasterize the ledger as the three-column summary table.
///
/// Layout top to bottom: black header row, one striped row per entry (or a
/// single "BELUM ADA DATA" row), yellow total row.
pub fn render_ledger(snapshot: &LedgerSnapshot) -> RgbImage {
    let rows: Vec<[String; 3]> = snapshot
        .entries
        .iter()
        .map(|e| {
            [
                e.count().to_string(),
                format_rupiah(e.denomination().value()),
                format_rupiah(e.subtotal()),
            ]
        })
        .collect();
    let total_text = format_rupiah(snapshot.total);

    let mut widths = CSV_HEADER.map(text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(text_width(cell));
        }
    }
    widths[2] = widths[2].max(text_width(&total_text));
    let mut widths = widths.map(|w| w + 2 * CELL_PADDING);

    // The total label spans the first two columns
    let label_needed = text_width(TOTAL_LABEL) + 2 * CELL_PADDING;
    if widths[0] + widths[1] < label_needed {
        widths[1] = label_needed - widths[0];
    }
    if rows.is_empty() {
        let needed = text_width(EMPTY_LABEL) + 2 * CELL_PADDING;
        let sum: u32 = widths.iter().sum();
        if sum < needed {
            widths[2] += needed - sum;
        }
    }

    let width: u32 = widths.iter().sum();
    let body_rows = rows.len().max(1) as u32;
    let height = ROW_HEIGHT * (body_rows + 2);
    let mut img = RgbImage::from_pixel(width, height, WHITE);

    // Header
    fill_row(&mut img, 0, HEADER_COLOR);
    let mut x = 0;
    for (label, col_width) in CSV_HEADER.iter().zip(widths) {
        draw_text(&mut img, x + CELL_PADDING, CELL_PADDING, label, WHITE);
        x += col_width;
    }

    // Body
    if rows.is_empty() {
        fill_row(&mut img, ROW_HEIGHT, MUTED_COLOR);
        let x = (width - text_width(EMPTY_LABEL)) / 2;
        draw_text(&mut img, x, ROW_HEIGHT + CELL_PADDING, EMPTY_LABEL, INK);
    }
    for (idx, row) in rows.iter().enumerate() {
        let y = ROW_HEIGHT * (idx as u32 + 1);
        fill_row(&mut img, y, if idx % 2 == 0 { MUTED_COLOR } else { WHITE });

        let mut x = 0;
        for (cell, col_width) in row.iter().zip(widths) {
            draw_text(&mut img, x + CELL_PADDING, y + CELL_PADDING, cell, INK);
            x += col_width;
        }
    }

    // Footer
    let y = height - ROW_HEIGHT;
    fill_row(&mut img, y, FOOTER_COLOR);
    let span = widths[0] + widths[1];
    draw_text(
        &mut img,
        span - CELL_PADDING - text_width(TOTAL_LABEL),
        y + CELL_PADDING,
        TOTAL_LABEL,
        INK,
    );
    draw_text(&mut img, span + CELL_PADDING, y + CELL_PADDING, &total_text, INK);

    draw_hollow_rect_mut(&mut img, Rect::at(0, 0).of_size(width, height), INK);
    img
}

pub fn save_png(snapshot: &LedgerSnapshot, path: &Path) -> anyhow::Result<()> {
    render_ledger(snapshot)
        .save_with_format(path, ::image::ImageFormat::Png)
        .with_context(|| format!("Failed to save ledger image {:?}", path))
}

fn text_width(text: &str) -> u32 {
    match text.chars().count() as u32 {
        0 => 0,
        n => n * CHAR_ADVANCE - SCALE,
    }
}

fn fill_row(img: &mut RgbImage, y: u32, color: Rgb<u8>) {
    let width = img.width();
    draw_filled_rect_mut(img, Rect::at(0, y as i32).of_size(width, ROW_HEIGHT), color);
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        // Characters without a glyph (spaces included) only advance the cursor
        if let Some(rows) = glyph(c) {
            for (ry, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                        let dot = Rect::at(
                            (cursor + col * SCALE) as i32,
                            (y + ry as u32 * SCALE) as i32,
                        )
                        .of_size(SCALE, SCALE);
                        draw_filled_rect_mut(img, dot, color);
                    }
                }
            }
        }
        cursor += CHAR_ADVANCE;
    }
}
