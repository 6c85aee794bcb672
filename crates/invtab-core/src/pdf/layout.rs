//! Line reconstruction from positioned text runs.

/// A piece of text shown at a position in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl TextRun {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Group runs into lines, top of page first.
///
/// Runs whose baselines are within `tolerance` share a line. Within a line,
/// runs are ordered by x; runs at a new x are separated by a tab so cell
/// boundaries survive, runs at the same x are concatenated.
pub fn group_lines(runs: &[TextRun], tolerance: f32) -> Vec<String> {
    let mut ordered: Vec<(usize, &TextRun)> = runs
        .iter()
        .enumerate()
        .filter(|(_, run)| !run.text.trim().is_empty())
        .collect();

    // PDF y grows upwards, so higher baselines come first.
    ordered.sort_by(|a, b| {
        b.1.y
            .partial_cmp(&a.1.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut grouped: Vec<Vec<(usize, &TextRun)>> = Vec::new();
    let mut current_y = f32::INFINITY;

    for entry in ordered {
        match grouped.last_mut() {
            Some(line) if (current_y - entry.1.y).abs() <= tolerance => line.push(entry),
            _ => {
                current_y = entry.1.y;
                grouped.push(vec![entry]);
            }
        }
    }

    grouped
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| {
                a.1.x
                    .partial_cmp(&b.1.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });

            let mut text = String::new();
            let mut last_x: Option<f32> = None;
            for (_, run) in line {
                if let Some(x) = last_x {
                    if (run.x - x).abs() > f32::EPSILON {
                        text.push('\t');
                    }
                }
                text.push_str(&run.text);
                last_x = Some(run.x);
            }
            text.trim().to_string()
        })
        .collect()
}
