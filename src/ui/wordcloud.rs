use std::time::Duration;

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::config::CloudConfig;
use crate::data::frequency::FrequencyTable;

// ---------------------------------------------------------------------------
// Layout (pure, no egui context needed)
// ---------------------------------------------------------------------------

/// Angle increment along the spiral, in radians.
const SPIRAL_STEP: f32 = 0.1;
/// Radial growth per radian, in points.
const SPIRAL_PITCH: f32 = 1.5;

/// A word positioned inside the cloud's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f32,
    pub rect: Rect,
    /// Frequency rank, used to pick a palette colour.
    pub rank: usize,
}

/// Font size for the word at `rank` (0-based) out of `n` ranked words.
fn font_size(count: usize, max_count: usize, rank: usize, n: usize, cloud: &CloudConfig) -> f32 {
    let relative = count as f32 / max_count.max(1) as f32;
    let by_rank = 1.0 - rank as f32 / n.max(1) as f32;
    let weight = cloud.relative_scaling * relative + (1.0 - cloud.relative_scaling) * by_rank;
    (cloud.min_font + (cloud.max_font - cloud.min_font) * weight).clamp(cloud.min_font, cloud.max_font)
}

/// Place the most frequent words of `table` inside `bounds`.
///
/// Words go from most to least frequent, each one walking an Archimedean
/// spiral out from the centre until it finds a free spot. A word with no free
/// spot inside the bounds is skipped. `measure` returns the rendered size of
/// a word at a given font size.
pub fn layout_cloud(
    table: &FrequencyTable,
    cloud: &CloudConfig,
    bounds: Rect,
    mut measure: impl FnMut(&str, f32) -> Vec2,
) -> Vec<PlacedWord> {
    if cloud.max_words == 0 || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Vec::new();
    }
    let Ok(ranked) = table.most_common(cloud.max_words) else {
        return Vec::new();
    };
    let Some(max_count) = ranked.first().map(|w| w.count) else {
        return Vec::new();
    };

    let center = bounds.center();
    let aspect = bounds.width() / bounds.height();
    let max_radius = bounds.size().length() / 2.0;
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(ranked.len());

    for (rank, entry) in ranked.iter().enumerate() {
        let size = font_size(entry.count, max_count, rank, ranked.len(), cloud);
        let extent = measure(&entry.word, size);
        if extent.x > bounds.width() || extent.y > bounds.height() {
            continue;
        }

        let mut theta = 0.0_f32;
        loop {
            let radius = SPIRAL_PITCH * theta;
            if radius > max_radius {
                break;
            }
            let pos = Pos2::new(
                center.x + radius * theta.cos() * aspect,
                center.y + radius * theta.sin(),
            );
            let rect = Rect::from_center_size(pos, extent);
            if bounds.contains_rect(rect) && !placed.iter().any(|p| p.rect.intersects(rect)) {
                placed.push(PlacedWord {
                    word: entry.word.clone(),
                    count: entry.count,
                    font_size: size,
                    rect,
                    rank,
                });
                break;
            }
            theta += SPIRAL_STEP;
        }
    }

    placed
}

// ---------------------------------------------------------------------------
// Cached layout + painter
// ---------------------------------------------------------------------------

/// How long the canvas size must stay unchanged before the cloud is laid out again.
const RESIZE_SETTLE_SECS: f64 = 0.25;

/// A layout together with the canvas size it was computed for.
#[derive(Debug, Clone, Default)]
pub struct CloudLayout {
    pub size: Vec2,
    pub words: Vec<PlacedWord>,
    /// Size requested while resizing, and when it was first seen.
    pending: Option<(Vec2, f64)>,
}

impl CloudLayout {
    /// Whether a canvas of `size` seen at `now` (seconds) warrants a new layout.
    ///
    /// A new size has to hold for [`RESIZE_SETTLE_SECS`] first, so dragging a
    /// window edge does not trigger a layout per frame.
    fn should_relayout(&mut self, size: Vec2, now: f64) -> bool {
        if size == self.size {
            self.pending = None;
            return false;
        }
        match self.pending {
            Some((pending, since)) if pending == size => now - since >= RESIZE_SETTLE_SECS,
            _ => {
                self.pending = Some((size, now));
                false
            }
        }
    }
}

/// Paint a word cloud for `table`, reusing `cache` while the canvas size is unchanged.
pub fn word_cloud(
    ui: &mut Ui,
    table: &FrequencyTable,
    cloud: &CloudConfig,
    palette: &[Color32],
    cache: &mut Option<CloudLayout>,
) {
    // Same 2:1 canvas as a classic 800x400 word cloud image.
    let width = ui.available_width().max(100.0);
    let size = Vec2::new(width, (width / 2.0).round());
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 4.0, Color32::WHITE);

    if table.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No words for this label",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
        return;
    }

    let now = ui.input(|i| i.time);
    let stale = match cache.as_mut() {
        None => true,
        Some(layout) => layout.should_relayout(size, now),
    };
    if stale {
        let local = Rect::from_min_size(Pos2::ZERO, size).shrink(4.0);
        let words = ui.fonts(|fonts| {
            layout_cloud(table, cloud, local, |word, font_size| {
                fonts
                    .layout_no_wrap(
                        word.to_owned(),
                        FontId::proportional(font_size),
                        Color32::BLACK,
                    )
                    .size()
            })
        });
        log::debug!("Word cloud laid out: {} words in {:?}", words.len(), size);
        *cache = Some(CloudLayout {
            size,
            words,
            pending: None,
        });
    }

    let Some(layout) = cache.as_ref() else {
        return;
    };
    // while a resize settles, stretch the previous layout over the new canvas
    let scale = size.x / layout.size.x.max(1.0);
    if layout.size != size {
        ui.ctx()
            .request_repaint_after(Duration::from_secs_f64(RESIZE_SETTLE_SECS));
    }
    let offset = rect.min.to_vec2();
    for placed in &layout.words {
        let color = if palette.is_empty() {
            Color32::DARK_GRAY
        } else {
            palette[placed.rank % palette.len()]
        };
        painter.text(
            (placed.rect.center().to_vec2() * scale).to_pos2() + offset,
            Align2::CENTER_CENTER,
            &placed.word,
            FontId::proportional(placed.font_size * scale),
            color,
        );
    }

    response.on_hover_text(format!(
        "{} distinct words, {} shown, top count {}",
        table.len(),
        layout.words.len(),
        table.max_count().unwrap_or(0)
    ));
}
