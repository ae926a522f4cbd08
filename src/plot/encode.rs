//! PNG output — 300 DPI images named `<name>.png`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use super::raster::Canvas;
use super::BarChart;
use crate::error::{AnalysisError, Result};

/// Resolution written into every image.
pub const PLOT_DPI: u32 = 300;

const METERS_PER_INCH: f64 = 0.0254;

/// Pixels per metre for a DPI value, as stored in the pHYs chunk.
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Encode a rendered canvas as PNG. `title` goes into a `tEXt` chunk.
pub fn write_png<W: Write>(canvas: &Canvas, title: &str, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = pixels_per_meter(PLOT_DPI);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    if !title.is_empty() {
        encoder.add_text_chunk("Title".to_string(), title.to_string())?;
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.pixels())?;
    writer.finish()?;
    Ok(())
}

/// Render `chart` and save it as `<dir>/<name>.png`, creating `dir` if needed.
pub fn save_chart(chart: &BarChart, dir: &Path, name: &str) -> Result<PathBuf> {
    let plot_err = |path: &Path, e: std::io::Error| {
        AnalysisError::Plot(format!("{}: {e}", path.display()))
    };
    std::fs::create_dir_all(dir).map_err(|e| plot_err(dir, e))?;

    let path = dir.join(format!("{name}.png"));
    let file = File::create(&path).map_err(|e| plot_err(&path, e))?;
    let mut out = BufWriter::new(file);
    write_png(&chart.render(), &chart.title, &mut out)?;
    out.flush().map_err(|e| plot_err(&path, e))?;
    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpi_conversion() {
        assert_eq!(pixels_per_meter(300), 11811);
        assert_eq!(pixels_per_meter(72), 2835);
    }

    #[test]
    fn saved_file_has_png_suffix_and_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let chart = BarChart::new(
            "Scale degrees",
            vec!["C".into(), "D".into()],
            vec![3.0, 1.0],
        );
        let path = save_chart(&chart, &dir.path().join("plots"), "sonata_01").unwrap();
        assert!(path.ends_with("plots/sonata_01.png"));

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.width, chart.width);
        assert_eq!(info.height, chart.height);
        let dims = info.pixel_dims.expect("pHYs chunk");
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn encodes_to_memory() {
        let chart = BarChart::new("t", vec!["1".into()], vec![1.0]);
        let mut buf = Vec::new();
        write_png(&chart.render(), &chart.title, &mut buf).unwrap();
        assert_eq!(&buf[..8], b"\x89PNG\r\n\x1a\n");
    }
}
