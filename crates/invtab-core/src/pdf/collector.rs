//! Positioned text runs from pdf-extract's glyph stream.
//!
//! pdf-extract interprets the content stream (graphics state, form XObjects,
//! font encodings and ToUnicode maps) and reports every glyph with its final
//! text rendering matrix. Glyphs that follow each other on one baseline are
//! merged into a run; a horizontal gap wider than [`CELL_GAP`] ems starts a
//! new run, which [`group_lines`](super::layout::group_lines) later turns
//! into a cell boundary.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

use super::layout::TextRun;

/// Gap, in ems, that separates two cells.
const CELL_GAP: f32 = 1.0;

/// Gap, in ems, that counts as a word space inside a cell.
const WORD_GAP: f32 = 0.15;

/// Run being built from consecutive glyphs.
#[derive(Debug)]
struct OpenRun {
    x: f32,
    y: f32,
    /// x where the next glyph is expected.
    end: f32,
    text: String,
}

/// Collects the text runs of one page.
#[derive(Debug, Default)]
pub struct RunCollector {
    runs: Vec<TextRun>,
    current: Option<OpenRun>,
}

impl RunCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished runs, in content-stream order.
    pub fn into_runs(mut self) -> Vec<TextRun> {
        self.flush();
        self.runs
    }

    fn flush(&mut self) {
        if let Some(run) = self.current.take() {
            if !run.text.trim().is_empty() {
                self.runs.push(TextRun::new(run.x, run.y, run.text));
            }
        }
    }

    fn push_glyph(&mut self, x: f32, y: f32, advance: f32, size: f32, glyph: &str) {
        let size = size.max(f32::EPSILON);

        if let Some(run) = self.current.as_mut() {
            let gap = x - run.end;
            let same_line = (run.y - y).abs() <= size * 0.5;
            if same_line && gap >= -size * 0.5 && gap <= size * CELL_GAP {
                if gap > size * WORD_GAP && !run.text.ends_with(' ') && glyph != " " {
                    run.text.push(' ');
                }
                run.text.push_str(glyph);
                run.end = x + advance;
                return;
            }
        }

        self.flush();
        self.current = Some(OpenRun {
            x,
            y,
            end: x + advance,
            text: glyph.to_string(),
        });
    }
}

impl OutputDev for RunCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        if char.is_empty() {
            return Ok(());
        }

        // Glyph size in user space, whatever the rotation or flip of the matrix.
        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        let size = (font_size * scale) as f32;
        let advance = width as f32 * size;

        self.push_glyph(trm.m31 as f32, trm.m32 as f32, advance, size, char);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glyphs(collector: &mut RunCollector, x: f32, y: f32, text: &str) {
        // Fixed 6pt advance at 10pt size.
        for (i, c) in text.chars().enumerate() {
            collector.push_glyph(x + 6.0 * i as f32, y, 6.0, 10.0, &c.to_string());
        }
    }

    #[test]
    fn test_adjacent_glyphs_form_one_run() {
        let mut collector = RunCollector::new();
        glyphs(&mut collector, 72.0, 700.0, "Net 30");

        assert_eq!(collector.into_runs(), vec![TextRun::new(72.0, 700.0, "Net 30")]);
    }

    #[test]
    fn test_wide_gap_starts_new_run() {
        let mut collector = RunCollector::new();
        glyphs(&mut collector, 72.0, 500.0, "Widget");
        glyphs(&mut collector, 252.0, 500.0, "$1.00");

        let runs = collector.into_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].x, 252.0);
        assert_eq!(runs[1].text, "$1.00");
    }

    #[test]
    fn test_kerned_gap_becomes_word_space() {
        let mut collector = RunCollector::new();
        glyphs(&mut collector, 72.0, 500.0, "Net");
        glyphs(&mut collector, 72.0 + 18.0 + 3.0, 500.0, "30");

        assert_eq!(collector.into_runs()[0].text, "Net 30");
    }

    #[test]
    fn test_baseline_change_starts_new_run() {
        let mut collector = RunCollector::new();
        glyphs(&mut collector, 72.0, 500.0, "Acme");
        glyphs(&mut collector, 96.0, 480.0, "Corp");

        let texts: Vec<String> = collector.into_runs().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["Acme", "Corp"]);
    }
}
