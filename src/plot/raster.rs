//! RGB canvas with filled rectangles and a 3×5 bitmap font for axis labels.

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const GRID: Rgb = [220, 220, 220];

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Row bitmaps (3 bits each, MSB left) for the characters labels use.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        'b' => [0b100, 0b100, 0b110, 0b101, 0b110],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => return None,
    };
    Some(rows)
}

/// A row-major RGB8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let pixels = background
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y.min(self.height)..y_end {
            for px in x.min(self.width)..x_end {
                let i = ((py * self.width + px) * 3) as usize;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    /// Pixel width of `text` at `scale`. Unknown characters still take a cell.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        (n * (GLYPH_W + 1) - 1) * scale
    }

    pub fn text_height(scale: u32) -> u32 {
        GLYPH_H * scale
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: Rgb) {
        let mut cursor = x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_W {
                        if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                            self.fill_rect(
                                cursor + col * scale,
                                y + row as u32 * scale,
                                scale,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            cursor += (GLYPH_W + 1) * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_filled() {
        let canvas = Canvas::new(4, 3, WHITE);
        assert_eq!(canvas.pixels().len(), 36);
        assert!(canvas.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        canvas.fill_rect(2, 2, 10, 10, BLACK);
        assert_eq!(canvas.pixel(3, 3), Some(BLACK));
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
        assert_eq!(canvas.pixel(4, 4), None);
    }

    #[test]
    fn text_metrics() {
        assert_eq!(Canvas::text_width("", 2), 0);
        assert_eq!(Canvas::text_width("C", 1), 3);
        assert_eq!(Canvas::text_width("C#", 2), 14);
        assert_eq!(Canvas::text_height(4), 20);
    }

    #[test]
    fn draws_glyph_pixels() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.draw_text(0, 0, "1", 1, BLACK);
        // '1' top row is 010
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(BLACK));
        // bottom row is 111
        assert_eq!(canvas.pixel(0, 4), Some(BLACK));
        assert_eq!(canvas.pixel(2, 4), Some(BLACK));
    }
}
