//! PNG rendering of the summary snapshot.
//!
//! Text is drawn with the 8x8 bitmap glyphs from `font8x8` (Basic Latin and
//! Latin-1), scaled up by whole pixels. Characters outside those blocks are
//! drawn as `?`. Anything past the canvas edge is clipped.

use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{ImageFormat, Rgba, RgbaImage};

use super::summary_model::{format_refreshed_at, SummarySnapshot};
use super::summary_traits::SummaryRendererTrait;
use crate::constants::{SUMMARY_FILE_NAME, SUMMARY_HEIGHT, SUMMARY_WIDTH};
use crate::errors::{Error, Result};

const BACKGROUND: Rgba<u8> = Rgba([240, 248, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GLYPH_SIZE: u32 = 8;

const MARGIN_X: u32 = 50;
const LIST_X: u32 = 70;
const TITLE_Y: u32 = 56;
const TOTAL_Y: u32 = 124;
const HEADER_Y: u32 = 184;
const LIST_Y: u32 = 224;
const LIST_STEP: u32 = 40;
const TIMESTAMP_Y: u32 = 484;

/// Renders the snapshot to `<cache_dir>/summary.png`.
pub struct PngSummaryRenderer {
    output_path: PathBuf,
}

impl PngSummaryRenderer {
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            output_path: cache_dir.as_ref().join(SUMMARY_FILE_NAME),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Draws the snapshot onto a fresh canvas.
    pub fn draw(snapshot: &SummarySnapshot) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(SUMMARY_WIDTH, SUMMARY_HEIGHT, BACKGROUND);

        draw_text(&mut canvas, MARGIN_X, TITLE_Y, "Country Data Summary", 3);
        draw_text(
            &mut canvas,
            MARGIN_X,
            TOTAL_Y,
            &format!("Total Countries: {}", snapshot.total_countries),
            2,
        );
        draw_text(
            &mut canvas,
            MARGIN_X,
            HEADER_Y,
            "Top 5 Countries by Estimated GDP:",
            2,
        );

        for (i, line) in snapshot.ranked_lines().iter().enumerate() {
            let y = LIST_Y + i as u32 * LIST_STEP;
            draw_text(&mut canvas, LIST_X, y, line, fit_scale(line, LIST_X, 2));
        }

        draw_text(
            &mut canvas,
            MARGIN_X,
            TIMESTAMP_Y,
            &format!(
                "Last Refreshed: {}",
                format_refreshed_at(snapshot.last_refreshed_at)
            ),
            2,
        );

        canvas
    }

    /// Encodes the snapshot as PNG bytes.
    pub fn encode(snapshot: &SummarySnapshot) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        Self::draw(snapshot).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl SummaryRendererTrait for PngSummaryRenderer {
    fn render(&self, snapshot: &SummarySnapshot) -> Result<()> {
        let bytes = Self::encode(snapshot)?;

        if let Some(dir) = self.output_path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::Render(e.to_string()))?;
        }

        // Write beside the target and rename so readers never see a partial file.
        let staging = self.output_path.with_extension("png.tmp");
        fs::write(&staging, &bytes).map_err(|e| Error::Render(e.to_string()))?;
        fs::rename(&staging, &self.output_path).map_err(|e| Error::Render(e.to_string()))?;

        log::debug!(
            "Rendered summary ({} bytes) to {}",
            bytes.len(),
            self.output_path.display()
        );
        Ok(())
    }

    fn load_image(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.output_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Largest scale up to `preferred` at which `text` fits between `x` and the
/// right margin. Never below 1.
fn fit_scale(text: &str, x: u32, preferred: u32) -> u32 {
    let available = SUMMARY_WIDTH.saturating_sub(x + MARGIN_X / 2);
    let chars = text.chars().count() as u32;
    (1..=preferred)
        .rev()
        .find(|scale| chars * GLYPH_SIZE * scale <= available)
        .unwrap_or(1)
}

/// Draws `text` with its top-left corner at (`x`, `y`). Glyph rows are bytes
/// with the least significant bit as the leftmost pixel.
fn draw_text(canvas: &mut RgbaImage, x: u32, y: u32, text: &str, scale: u32) {
    let (width, height) = canvas.dimensions();
    let advance = GLYPH_SIZE * scale;

    for (index, c) in text.chars().enumerate() {
        let origin_x = x + index as u32 * advance;
        if origin_x >= width {
            break;
        }
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * scale;
                let py = y + row as u32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        if px + dx < width && py + dy < height {
                            canvas.put_pixel(px + dx, py + dy, INK);
                        }
                    }
                }
            }
        }
    }
}
