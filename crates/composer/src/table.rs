//! Field table rendering
//!
//! Sections lay their fields out as label/value rows in the left column.
//! When a companion font is registered the right column mirrors each row with
//! the translated label only; registry data arrives in French and is never
//! machine-translated.

use crate::config::{
    self, LayoutConfig, FONT_BOLD, FONT_COMPANION, FONT_COMPANION_BOLD, FONT_REGULAR,
};
use crate::record::SectionItem;
use bilingual::{shape_arabic, translate_label};
use pdf_canvas::{Align, Canvas, TextOptions};

/// Render the items of a section starting at `y`, returning the new cursor
///
/// Rows never shrink below [`LayoutConfig::min_row_height`], so a run of
/// blank fields still produces a visible grid of rows.
pub fn render_field_table(
    canvas: &mut Canvas,
    cfg: &LayoutConfig,
    items: &[SectionItem],
    y: f32,
) -> crate::Result<f32> {
    let bilingual = canvas.has_font(FONT_COMPANION);
    let column = cfg.column_width(bilingual);
    let mut cursor = y;
    for item in items {
        match item {
            SectionItem::Field(row) => {
                cursor = render_field_row(
                    canvas, cfg, &row.label, &row.value, column, bilingual, cursor,
                )?;
            }
            SectionItem::Text(text) => {
                let options = TextOptions {
                    width: Some(column),
                    ..config::text_options(FONT_REGULAR, cfg.paragraph_size, cfg.text_color)
                };
                let height = canvas.draw_text(text, cfg.margin, cursor, &options)?;
                cursor += height + cfg.paragraph_gap;
            }
        }
    }
    Ok(cursor)
}

/// The companion face to draw with, preferring the bold one when deployed
pub(crate) fn companion_face(canvas: &Canvas) -> &'static str {
    if canvas.has_font(FONT_COMPANION_BOLD) {
        FONT_COMPANION_BOLD
    } else {
        FONT_COMPANION
    }
}

/// Render one label/value row, plus its companion label when bilingual
fn render_field_row(
    canvas: &mut Canvas,
    cfg: &LayoutConfig,
    label: &str,
    value: &str,
    column: f32,
    bilingual: bool,
    y: f32,
) -> crate::Result<f32> {
    let label_width = cfg.label_width(column);
    let value_x = cfg.margin + label_width + cfg.column_gutter;
    let value_width = column - label_width - cfg.column_gutter;

    let companion_font = companion_face(canvas);
    let companion = if bilingual {
        translate_label(label).map(shape_arabic)
    } else {
        None
    };

    // All three cells share a baseline, so the row is as tall as its tallest
    // cell.
    let mut row_height = canvas
        .measure_text(label, FONT_BOLD, cfg.label_size, label_width)
        .max(canvas.measure_text(value, FONT_BOLD, cfg.value_size, value_width));
    if let Some(text) = &companion {
        let companion_height = canvas.measure_text(text, companion_font, cfg.label_size, column);
        row_height = row_height.max(companion_height);
    }
    let row_height = row_height.max(cfg.min_row_height);

    let label_options = TextOptions {
        width: Some(label_width),
        ..config::text_options(FONT_BOLD, cfg.label_size, cfg.label_color)
    };
    canvas.draw_text(label, cfg.margin, y, &label_options)?;

    let value_options = TextOptions {
        width: Some(value_width),
        ..config::text_options(FONT_BOLD, cfg.value_size, cfg.text_color)
    };
    canvas.draw_text(value, value_x, y, &value_options)?;

    if let Some(text) = &companion {
        let companion_options = TextOptions {
            align: Align::Right,
            width: Some(column),
            ..config::text_options(companion_font, cfg.label_size, cfg.label_color)
        };
        canvas.draw_text(text, cfg.right_column_x(), y, &companion_options)?;
    }

    Ok(y + row_height + cfg.row_gap)
}
