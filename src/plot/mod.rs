//! Charts — bar charts of the statistics, rasterised in-process and saved as PNG.

pub mod encode;
pub mod raster;

use crate::pitch::Accidental;
use crate::sonata::Sonata;
use crate::stats::{letter_histogram, scale_degrees, scale_note_count, unique_note_count, NoteSource};

pub use encode::{save_chart, write_png, PLOT_DPI};
use raster::{Canvas, BLACK, GRID, WHITE};

const BAR: [u8; 3] = [70, 130, 180];
const LABEL_SCALE: u32 = 4;
const VALUE_SCALE: u32 = 3;
const MARGIN: u32 = 40;

/// A labelled bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub width: u32,
    pub height: u32,
}

impl BarChart {
    /// A 1200×800 chart. Extra labels or values beyond the shorter list are ignored.
    pub fn new(title: impl Into<String>, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            labels,
            values,
            width: 1200,
            height: 800,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn bar_count(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    /// Draw the chart: value-labelled bars over a baseline, letter labels underneath.
    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height, WHITE);
        let n = self.bar_count() as u32;

        let label_h = Canvas::text_height(LABEL_SCALE);
        let value_h = Canvas::text_height(VALUE_SCALE);
        let left = MARGIN;
        let right = self.width.saturating_sub(MARGIN);
        let top = MARGIN + value_h + 8;
        let baseline = self.height.saturating_sub(MARGIN + label_h + 8);
        if n == 0 || right <= left || baseline <= top {
            return canvas;
        }

        let plot_w = right - left;
        let plot_h = baseline - top;
        let max = self.values[..n as usize]
            .iter()
            .copied()
            .fold(0.0f64, f64::max);

        // quarter grid lines
        for i in 1..=4 {
            let y = baseline - plot_h * i / 4;
            canvas.fill_rect(left, y, plot_w, 1, GRID);
        }

        let slot = plot_w / n;
        let bar_w = (slot * 7 / 10).max(1);
        for (i, (label, &value)) in self.labels.iter().zip(&self.values).enumerate() {
            let slot_x = left + slot * i as u32;
            let bar_x = slot_x + slot.saturating_sub(bar_w) / 2;
            let bar_h = if max > 0.0 && value > 0.0 {
                ((value / max) * plot_h as f64).round() as u32
            } else {
                0
            };
            canvas.fill_rect(bar_x, baseline - bar_h, bar_w, bar_h, BAR);

            let value_text = format!("{}", value.round() as i64);
            let vw = Canvas::text_width(&value_text, VALUE_SCALE);
            if vw <= slot {
                let vx = slot_x + (slot - vw) / 2;
                let vy = (baseline - bar_h).saturating_sub(value_h + 4);
                canvas.draw_text(vx, vy, &value_text, VALUE_SCALE, BLACK);
            }

            let lw = Canvas::text_width(label, LABEL_SCALE);
            let lx = slot_x + slot.saturating_sub(lw) / 2;
            canvas.draw_text(lx, baseline + 8, label, LABEL_SCALE, BLACK);
        }

        canvas.fill_rect(left, baseline, plot_w, 2, BLACK);
        canvas.fill_rect(left, top, 2, plot_h, BLACK);
        canvas
    }
}

/// Occurrences of each scale degree. `None` without a key signature.
pub fn scale_degree_chart<S: NoteSource + ?Sized>(title: &str, src: &S) -> Option<BarChart> {
    let key = src.key_signature()?;
    let labels = scale_degrees(key).into_iter().map(String::from).collect();
    let values = scale_note_count(src).into_iter().map(|c| c as f64).collect();
    Some(BarChart::new(format!("{title}: scale degrees"), labels, values))
}

/// Occurrences of all twelve letters, spelled for the key (sharps without one).
pub fn letter_occurrence_chart<S: NoteSource + ?Sized>(title: &str, src: &S) -> BarChart {
    let spelling = src
        .key_signature()
        .map(|k| k.spelling())
        .unwrap_or(Accidental::Sharp);
    let (labels, values) = letter_histogram(src, spelling)
        .into_iter()
        .map(|(name, count)| (name.to_string(), count as f64))
        .unzip();
    BarChart::new(format!("{title}: note letters"), labels, values)
}

/// Distinct MIDI notes used by each sonata.
pub fn unique_notes_chart(sonatas: &[Sonata]) -> BarChart {
    let (labels, values) = sonatas
        .iter()
        .map(|s| (s.title.sonata.to_string(), unique_note_count(s) as f64))
        .unzip();
    BarChart::new("Unique notes per sonata", labels, values)
}
