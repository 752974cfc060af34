//! 中奖名单 PDF 渲染 (A4, 表格分页，表头每页重复)

use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::PathBuf;

use printpdf::*;
use printpdf::path::PaintMode;

use crate::models::{ReportBody, ReportLayout, ReportRow};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

const TITLE_BASELINE: f32 = PAGE_HEIGHT - MARGIN - 9.0;
const GENERATED_BASELINE: f32 = TITLE_BASELINE - 14.0;
const TOTAL_BASELINE: f32 = GENERATED_BASELINE - 11.0;
const FIRST_TABLE_TOP: f32 = TOTAL_BASELINE - 10.0;
const NEXT_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN;

const HEADER_HEIGHT: f32 = 11.0;
const ROW_HEIGHT: f32 = 9.0;
const CELL_PADDING: f32 = 2.0;

/// 列边界: 中奖时间 | 名字 | 名次
const COLUMN_EDGES: [f32; 4] = [30.0, 80.0, 160.0, 180.0];

const PT_TO_MM: f32 = 25.4 / 72.0;

pub const FIRST_PAGE_ROWS: usize = rows_fitting(FIRST_TABLE_TOP);
pub const NEXT_PAGE_ROWS: usize = rows_fitting(NEXT_TABLE_TOP);

const fn rows_fitting(table_top: f32) -> usize {
    ((table_top - HEADER_HEIGHT - MARGIN) / ROW_HEIGHT) as usize
}

struct PdfFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// 把 `total` 行切分到各页: 第一页容量 `first`，其余每页 `rest`
pub fn paginate(total: usize, first: usize, rest: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    if total == 0 {
        return pages;
    }
    let first = first.max(1);
    let rest = rest.max(1);

    let mut start = 0;
    let mut capacity = first;
    while start < total {
        let end = (start + capacity).min(total);
        pages.push(start..end);
        start = end;
        capacity = rest;
    }
    pages
}

pub fn render_pdf(
    layout: &ReportLayout,
    font_paths: &[PathBuf],
) -> std::result::Result<Vec<u8>, Error> {
    let (doc, page1, layer1) = PdfDocument::new(
        layout.title.clone(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = load_fonts(&doc, font_paths)?;

    let first_layer = doc.get_page(page1).get_layer(layer1);
    draw_title_block(&first_layer, layout, &fonts);

    match &layout.body {
        ReportBody::Placeholder(text) => {
            first_layer.set_fill_color(hex_color(0x2c3e50));
            draw_right(
                &first_layer,
                text,
                12.0,
                PAGE_WIDTH - MARGIN,
                FIRST_TABLE_TOP - 8.0,
                &fonts.regular,
            );
        }
        ReportBody::Table { header, rows } => {
            let mut first_layer = Some(first_layer);
            for (page_no, range) in paginate(rows.len(), FIRST_PAGE_ROWS, NEXT_PAGE_ROWS)
                .into_iter()
                .enumerate()
            {
                let (layer, top) = match first_layer.take() {
                    Some(layer) => (layer, FIRST_TABLE_TOP),
                    None => {
                        let (page, layer) = doc.add_page(
                            Mm(PAGE_WIDTH),
                            Mm(PAGE_HEIGHT),
                            format!("Page {}", page_no + 1),
                        );
                        (doc.get_page(page).get_layer(layer), NEXT_TABLE_TOP)
                    }
                };
                draw_table(&layer, header, &rows[range], top, &fonts);
            }
        }
    }

    doc.save_to_bytes()
}

/// 依次尝试外部字体，全部失败时使用内置 Helvetica (非拉丁文字会显示异常)
fn load_fonts(
    doc: &PdfDocumentReference,
    font_paths: &[PathBuf],
) -> std::result::Result<PdfFonts, Error> {
    for path in font_paths {
        let Ok(file) = File::open(path) else {
            continue;
        };
        match doc.add_external_font(BufReader::new(file)) {
            Ok(font) => {
                log::debug!("Using report font {}", path.display());
                return Ok(PdfFonts {
                    regular: font.clone(),
                    bold: font,
                });
            }
            Err(e) => log::warn!("Failed to load font {}: {e:?}", path.display()),
        }
    }

    log::warn!("No Unicode font available, falling back to built-in Helvetica");
    Ok(PdfFonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    })
}

fn draw_title_block(layer: &PdfLayerReference, layout: &ReportLayout, fonts: &PdfFonts) {
    layer.set_fill_color(hex_color(0x2c3e50));
    draw_centered(
        layer,
        &layout.title,
        24.0,
        PAGE_WIDTH / 2.0,
        TITLE_BASELINE,
        &fonts.bold,
    );
    draw_right(
        layer,
        &layout.generated_line,
        12.0,
        PAGE_WIDTH - MARGIN,
        GENERATED_BASELINE,
        &fonts.regular,
    );
    layer.set_fill_color(hex_color(0x34495e));
    draw_centered(
        layer,
        &layout.total_line,
        16.0,
        PAGE_WIDTH / 2.0,
        TOTAL_BASELINE,
        &fonts.bold,
    );
}

fn draw_table(
    layer: &PdfLayerReference,
    header: &[String; 3],
    rows: &[ReportRow],
    top: f32,
    fonts: &PdfFonts,
) {
    let table_left = COLUMN_EDGES[0];
    let table_right = COLUMN_EDGES[3];

    fill_rect(
        layer,
        table_left,
        top - HEADER_HEIGHT,
        table_right,
        top,
        hex_color(0x3498db),
    );
    layer.set_fill_color(hex_color(0xf5f5f5));
    for (col, text) in header.iter().enumerate() {
        draw_centered(
            layer,
            text,
            13.0,
            column_center(col),
            top - HEADER_HEIGHT + 3.5,
            &fonts.bold,
        );
    }

    let mut y = top - HEADER_HEIGHT;
    for (i, row) in rows.iter().enumerate() {
        let background = if i % 2 == 0 {
            hex_color(0xffffff)
        } else {
            hex_color(0xecf0f1)
        };
        fill_rect(layer, table_left, y - ROW_HEIGHT, table_right, y, background);

        let baseline = y - ROW_HEIGHT + 3.0;
        layer.set_fill_color(hex_color(0x2c3e50));
        draw_centered(
            layer,
            &row.won_at,
            11.0,
            column_center(0),
            baseline,
            &fonts.regular,
        );
        draw_right(
            layer,
            &row.name,
            11.0,
            COLUMN_EDGES[2] - CELL_PADDING,
            baseline,
            &fonts.regular,
        );
        draw_centered(
            layer,
            &row.rank.to_string(),
            11.0,
            column_center(2),
            baseline,
            &fonts.regular,
        );
        y -= ROW_HEIGHT;
    }

    draw_grid(layer, top, y, rows.len());
}

fn draw_grid(layer: &PdfLayerReference, top: f32, bottom: f32, row_count: usize) {
    layer.set_outline_color(hex_color(0x95a5a6));
    layer.set_outline_thickness(0.8);

    let mut boundaries = vec![top, top - HEADER_HEIGHT];
    for i in 1..=row_count {
        boundaries.push(top - HEADER_HEIGHT - ROW_HEIGHT * i as f32);
    }
    for y in boundaries {
        stroke_line(layer, (COLUMN_EDGES[0], y), (COLUMN_EDGES[3], y));
    }
    for x in COLUMN_EDGES {
        stroke_line(layer, (x, top), (x, bottom));
    }

    // 表头下方加粗
    layer.set_outline_color(hex_color(0x2980b9));
    layer.set_outline_thickness(2.0);
    stroke_line(
        layer,
        (COLUMN_EDGES[0], top - HEADER_HEIGHT),
        (COLUMN_EDGES[3], top - HEADER_HEIGHT),
    );
}

fn column_center(col: usize) -> f32 {
    (COLUMN_EDGES[col] + COLUMN_EDGES[col + 1]) / 2.0
}

/// 内置字体无法测量字宽，按平均半个字号估算
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * PT_TO_MM
}

fn draw_centered(
    layer: &PdfLayerReference,
    text: &str,
    font_size: f32,
    center_x: f32,
    baseline: f32,
    font: &IndirectFontRef,
) {
    let x = center_x - text_width_mm(text, font_size) / 2.0;
    layer.use_text(text, font_size, Mm(x), Mm(baseline), font);
}

fn draw_right(
    layer: &PdfLayerReference,
    text: &str,
    font_size: f32,
    right_x: f32,
    baseline: f32,
    font: &IndirectFontRef,
) {
    let x = (right_x - text_width_mm(text, font_size)).max(MARGIN);
    layer.use_text(text, font_size, Mm(x), Mm(baseline), font);
}

fn fill_rect(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
    layer.set_fill_color(color);
    layer.add_rect(Rect::new(Mm(x1), Mm(y1), Mm(x2), Mm(y2)).with_mode(PaintMode::Fill));
}

fn stroke_line(layer: &PdfLayerReference, from: (f32, f32), to: (f32, f32)) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    });
}

fn hex_color(rgb: u32) -> Color {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    Color::Rgb(Rgb::new(channel(16), channel(8), channel(0), None))
}
