//! Shared certificate layout primitives
//!
//! Every act type is built from the same blocks: the republic header, the
//! title row, titled sections and the signature block. All primitives move
//! the cursor downward and never draw above the y they are given.

use crate::config::{
    self, LayoutConfig, FLAG_BLUE, FLAG_RED, FLAG_YELLOW, FONT_BOLD, FONT_COMPANION, FONT_OBLIQUE,
    FONT_REGULAR, REPUBLIC_MOTTO, REPUBLIC_TITLE,
};
use crate::record::{ActRecord, SectionContent};
use crate::table::{companion_face, render_field_table};
use crate::{assets, Result};
use bilingual::{shape_arabic, translate_document_title, translate_section_title};
use pdf_canvas::{Align, Canvas, Color, ImageScaleMode, TextOptions};

/// Draw the republic header: flag glyph, heading, optional logo, act number
///
/// Returns the constant body-start y whatever optional pieces rendered, so
/// a record without a logo or act number lays out identically below the
/// header.
pub fn render_header(canvas: &mut Canvas, cfg: &LayoutConfig, record: &ActRecord) -> Result<f32> {
    let band_width = cfg.flag_width / 3.0;
    for (index, color) in [FLAG_BLUE, FLAG_YELLOW, FLAG_RED].into_iter().enumerate() {
        canvas.draw_rect(
            cfg.margin + index as f32 * band_width,
            cfg.header_top,
            band_width,
            cfg.flag_height,
            Some(color),
            None,
        );
    }
    canvas.draw_rect(
        cfg.margin,
        cfg.header_top,
        cfg.flag_width,
        cfg.flag_height,
        None,
        Some((Color::gray(0.25), 0.8)),
    );

    let heading_x = cfg.margin + cfg.flag_width + 12.0;
    canvas.draw_text(
        REPUBLIC_TITLE,
        heading_x,
        cfg.header_top + 2.0,
        &config::text_options(FONT_BOLD, 12.0, cfg.text_color),
    )?;
    canvas.draw_text(
        REPUBLIC_MOTTO,
        heading_x,
        cfg.header_top + 20.0,
        &config::text_options(FONT_OBLIQUE, 9.0, cfg.label_color),
    )?;

    let mut logo_drawn = false;
    if let Some(data) = assets::load_logo() {
        let logo_x = cfg.page_width - cfg.margin - cfg.logo_size;
        match canvas.draw_image(
            &data,
            logo_x,
            cfg.header_top,
            cfg.logo_size,
            cfg.logo_size,
            ImageScaleMode::FitBox,
        ) {
            Ok(()) => logo_drawn = true,
            Err(err) => log::warn!("could not embed logo: {err}"),
        }
    }

    let number = record
        .act_number
        .as_deref()
        .map(str::trim)
        .filter(|number| !number.is_empty());
    let label = match number {
        Some(number) => format!("N° {number}"),
        None => "N° ________".to_string(),
    };
    let number_y = if logo_drawn {
        cfg.header_top + cfg.logo_size + 6.0
    } else {
        cfg.header_top + 14.0
    };
    let options = TextOptions {
        align: Align::Right,
        ..config::text_options(FONT_BOLD, 10.0, cfg.text_color)
    };
    canvas.draw_text(&label, cfg.page_width - cfg.margin, number_y, &options)?;

    Ok(cfg.body_top)
}

/// Extension point where a diagonal draft watermark would be drawn
pub fn render_watermark(_canvas: &mut Canvas, _cfg: &LayoutConfig) {}

/// Draw the centered document title and optional issuing-office subtitle
///
/// Returns the y where the first section starts.
pub fn render_title(
    canvas: &mut Canvas,
    cfg: &LayoutConfig,
    title: &str,
    subtitle: Option<&str>,
) -> Result<f32> {
    let options = TextOptions {
        align: Align::Center,
        width: Some(cfg.section_width()),
        ..config::text_options(FONT_BOLD, cfg.title_size, cfg.text_color)
    };
    canvas.draw_text(title, cfg.margin, cfg.title_y, &options)?;

    if canvas.has_font(FONT_COMPANION) {
        if let Some(translated) = translate_document_title(title) {
            let options = TextOptions {
                align: Align::Right,
                ..config::text_options(
                    companion_face(canvas),
                    cfg.title_size - 4.0,
                    cfg.label_color,
                )
            };
            canvas.draw_text(
                &shape_arabic(translated),
                cfg.page_width - cfg.margin,
                cfg.title_y + 2.0,
                &options,
            )?;
        }
    }

    match subtitle.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subtitle) => {
            let options = TextOptions {
                align: Align::Center,
                width: Some(cfg.section_width()),
                ..config::text_options(FONT_OBLIQUE, cfg.subtitle_size, cfg.label_color)
            };
            canvas.draw_text(subtitle, cfg.margin, cfg.title_y + 23.0, &options)?;
            Ok(170.0)
        }
        None => Ok(150.0),
    }
}

/// Draw a titled section and its content, returning the y after it
pub fn render_section(
    canvas: &mut Canvas,
    cfg: &LayoutConfig,
    title: &str,
    content: &SectionContent,
    y: f32,
) -> Result<f32> {
    canvas.draw_text(
        title,
        cfg.margin,
        y,
        &config::text_options(FONT_BOLD, cfg.section_title_size, cfg.text_color),
    )?;
    if canvas.has_font(FONT_COMPANION) {
        if let Some(translated) = translate_section_title(title) {
            let options = TextOptions {
                align: Align::Right,
                ..config::text_options(
                    companion_face(canvas),
                    cfg.section_title_size - 1.0,
                    cfg.label_color,
                )
            };
            canvas.draw_text(
                &shape_arabic(translated),
                cfg.page_width - cfg.margin,
                y,
                &options,
            )?;
        }
    }
    canvas.draw_line(
        cfg.margin,
        y + 16.0,
        cfg.page_width - cfg.margin,
        y + 16.0,
        cfg.rule_color,
        0.75,
    );

    let content_y = y + 22.0;
    let end_y = match content {
        SectionContent::Paragraph(text) => {
            let options = TextOptions {
                width: Some(cfg.section_width()),
                ..config::text_options(FONT_REGULAR, cfg.paragraph_size, cfg.text_color)
            };
            let height = canvas.draw_text(text, cfg.margin, content_y, &options)?;
            content_y + height + cfg.paragraph_gap
        }
        SectionContent::Items(items) => render_field_table(canvas, cfg, items, content_y)?,
    };
    Ok(end_y + cfg.section_gap)
}

/// Draw the closing signature block and return the final y
pub fn render_signature_block(
    canvas: &mut Canvas,
    cfg: &LayoutConfig,
    office: &str,
    date: &str,
    y: f32,
) -> Result<f32> {
    let right = cfg.page_width - cfg.margin;
    canvas.draw_line(cfg.margin, y + 12.0, right, y + 12.0, cfg.rule_color, 0.75);

    let office = if office.is_empty() { "________" } else { office };
    let issued = format!("Fait à {office}, le {date}");
    let options = TextOptions {
        align: Align::Right,
        ..config::text_options(FONT_REGULAR, cfg.paragraph_size, cfg.text_color)
    };
    canvas.draw_text(&issued, right, y + 18.0, &options)?;

    let options = TextOptions {
        align: Align::Right,
        ..config::text_options(FONT_BOLD, cfg.paragraph_size, cfg.text_color)
    };
    canvas.draw_text("L'Officier de l'État Civil", right, y + 36.0, &options)?;

    let rule_y = y + 88.0;
    canvas.draw_line(right - 170.0, rule_y, right, rule_y, cfg.rule_color, 0.75);
    let options = TextOptions {
        align: Align::Center,
        ..config::text_options(FONT_OBLIQUE, 8.0, cfg.label_color)
    };
    canvas.draw_text("Signature et cachet", right - 85.0, rule_y + 6.0, &options)?;

    Ok(rule_y + 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldRow, SectionItem};
    use lopdf::Object;
    use pdf_canvas::encode_win_ansi;
    use pretty_assertions::assert_eq;

    fn shown_texts(canvas: &Canvas) -> Vec<Vec<u8>> {
        canvas
            .operations()
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_header_returns_body_top() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let record = ActRecord {
            act_number: Some("0042/2021".to_string()),
            ..ActRecord::default()
        };
        let y = render_header(&mut canvas, &cfg, &record).unwrap();
        assert_eq!(y, cfg.body_top);
        assert!(shown_texts(&canvas).contains(&encode_win_ansi("N° 0042/2021")));
    }

    #[test]
    fn test_header_placeholder_without_act_number() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let record = ActRecord {
            act_number: Some("   ".to_string()),
            ..ActRecord::default()
        };
        let y = render_header(&mut canvas, &cfg, &record).unwrap();
        assert_eq!(y, cfg.body_top);
        let texts = shown_texts(&canvas);
        assert!(texts.contains(&encode_win_ansi("N° ________")));
        assert!(texts.contains(&encode_win_ansi(REPUBLIC_TITLE)));
    }

    #[test]
    fn test_header_draws_flag_bands_and_border() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        render_header(&mut canvas, &cfg, &ActRecord::default()).unwrap();
        let rects = canvas
            .operations()
            .iter()
            .filter(|op| op.operator == "re")
            .count();
        assert_eq!(rects, 4);
    }

    #[test]
    fn test_title_y_depends_on_subtitle() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let bare = render_title(&mut canvas, &cfg, "ACTE DE NAISSANCE", None).unwrap();
        assert_eq!(bare, 150.0);

        let mut canvas = Canvas::new().unwrap();
        let office = Some("Centre d'état civil de N'Djamena");
        let with_subtitle = render_title(&mut canvas, &cfg, "ACTE DE NAISSANCE", office).unwrap();
        assert_eq!(with_subtitle, 170.0);

        let mut canvas = Canvas::new().unwrap();
        let blank = render_title(&mut canvas, &cfg, "ACTE DE NAISSANCE", Some("  ")).unwrap();
        assert_eq!(blank, 150.0);
    }

    #[test]
    fn test_section_advances_past_its_rows() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let content = SectionContent::Items(vec![
            SectionItem::Field(FieldRow::new("", "")),
            SectionItem::Field(FieldRow::new("", "")),
        ]);
        let end = render_section(&mut canvas, &cfg, "Informations", &content, 200.0).unwrap();
        let expected = 200.0 + 22.0 + 2.0 * (cfg.min_row_height + cfg.row_gap) + cfg.section_gap;
        assert_eq!(end, expected);
    }

    #[test]
    fn test_section_paragraph_advances_by_height() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let content = SectionContent::Paragraph("Une seule ligne.".to_string());
        let end = render_section(&mut canvas, &cfg, "Déclaration", &content, 200.0).unwrap();
        let line = canvas.line_height(FONT_REGULAR, cfg.paragraph_size);
        let expected = 200.0 + 22.0 + line + cfg.paragraph_gap + cfg.section_gap;
        assert!((end - expected).abs() < 0.01);
    }

    #[test]
    fn test_signature_block_extent() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        let end =
            render_signature_block(&mut canvas, &cfg, "N'Djamena", "5 mars 2021", 600.0).unwrap();
        assert_eq!(end, 708.0);
        let texts = shown_texts(&canvas);
        assert!(texts.contains(&encode_win_ansi("Fait à N'Djamena, le 5 mars 2021")));
    }

    #[test]
    fn test_signature_block_office_placeholder() {
        let cfg = LayoutConfig::default();
        let mut canvas = Canvas::new().unwrap();
        render_signature_block(&mut canvas, &cfg, "", "5 mars 2021", 600.0).unwrap();
        assert!(shown_texts(&canvas).contains(&encode_win_ansi("Fait à ________, le 5 mars 2021")));
    }
}
