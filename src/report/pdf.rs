//! Fixed-layout US Letter page built with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::encoding::{approx_bold_width, to_win_ansi};
use super::{ReportData, ReportError};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN_X: f32 = 50.0;

const TITLE: &str = "CoachLite — Daily Insight Report";
const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const SUMMARY_SIZE: f32 = 10.0;
const SUMMARY_LEADING: f32 = 12.0;

/// Build the one-page report entirely in memory.
pub fn generate_report(data: &ReportData) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => bold_id,
            "F2" => regular_id,
        },
    });

    let content = Content {
        operations: page_operations(data),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn page_operations(data: &ReportData) -> Vec<Operation> {
    let mut ops = Vec::new();

    let title = to_win_ansi(TITLE);
    let title_x = (PAGE_WIDTH - approx_bold_width(&title, TITLE_SIZE)) / 2.0;
    text_at(&mut ops, "F1", TITLE_SIZE, title_x, PAGE_HEIGHT - 50.0, title);

    let mut y = PAGE_HEIGHT - 100.0;
    let lines = [
        format!("Composite Trait Score: {:.2}", data.trait_score),
        format!("Harmony Ratio: {:.1}%", data.harmony_ratio),
        format!("Suggested Stage: {}", data.stage),
    ];
    for line in &lines {
        text_at(&mut ops, "F2", BODY_SIZE, MARGIN_X, y, to_win_ansi(line));
        y -= 20.0;
    }
    y -= 10.0;

    text_at(&mut ops, "F2", BODY_SIZE, MARGIN_X, y, to_win_ansi("Trait Summary:"));
    y -= 20.0;

    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F2".into(), SUMMARY_SIZE.into()]));
    ops.push(Operation::new("TL", vec![SUMMARY_LEADING.into()]));
    ops.push(Operation::new("Td", vec![MARGIN_X.into(), y.into()]));
    for line in data.trait_summary.trim().lines() {
        ops.push(Operation::new("Tj", vec![literal(to_win_ansi(line))]));
        ops.push(Operation::new("T*", vec![]));
    }
    ops.push(Operation::new("ET", vec![]));

    ops
}

fn text_at(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: Vec<u8>) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn literal(bytes: Vec<u8>) -> Object {
    Object::String(bytes, StringFormat::Literal)
}
