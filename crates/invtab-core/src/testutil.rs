//! Fixture builders for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Lines 0-5 of the invoice template, before the client block.
const LETTERHEAD: [&str; 6] = [
    "ACME SUPPLIES LTD",
    "42 Industrial Way",
    "Springfield, IL 62701",
    "billing@acme.example",
    "INVOICE",
    "Bill To:",
];

/// Page text following the invoice template, table cells tab-separated.
pub fn template_text(invoice_number: &str, items: &[(&str, &str, &str)]) -> String {
    template_lines(invoice_number, items).join("\n")
}

fn template_lines(invoice_number: &str, items: &[(&str, &str, &str)]) -> Vec<String> {
    let mut lines: Vec<String> = LETTERHEAD.iter().map(|s| s.to_string()).collect();
    lines.push(format!("Client {invoice_number}"));
    lines.push("100 Market St, Shelbyville".to_string());
    lines.push(format!("Invoice Number: {invoice_number}"));
    lines.push("Invoice Date: January 5, 2024".to_string());
    lines.push("Due Date: February 4, 2024".to_string());
    lines.push("Payment Terms: Net 30".to_string());
    lines.push("Description\tUnit Price\tQuantity".to_string());
    for (description, price, quantity) in items {
        lines.push(format!("{description}\t{price}\t{quantity}"));
    }
    lines.push("Thank you for your business!".to_string());
    lines
}

/// A one-page PDF with the template laid out as positioned text.
pub fn template_pdf(invoice_number: &str, items: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut runs: Vec<(i64, i64, String)> = Vec::new();
    let mut y = 780;
    for line in template_lines(invoice_number, items) {
        for (col, cell) in line.split('\t').enumerate() {
            runs.push((72 + 180 * col as i64, y, cell.to_string()));
        }
        y -= 20;
    }

    let borrowed: Vec<(i64, i64, &str)> =
        runs.iter().map(|(x, y, s)| (*x, *y, s.as_str())).collect();
    pdf_with_runs(&borrowed)
}

/// A one-page PDF showing each string at an absolute position.
pub fn pdf_with_runs(runs: &[(i64, i64, &str)]) -> Vec<u8> {
    let mut operations = Vec::new();
    for (x, y, text) in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(set_font());
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(*x), Object::Integer(*y)],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    pdf_from_operations(operations)
}

/// Lines positioned through the graphics state: `q 1 0 0 1 0 y cm BT 72 0 Td ... ET Q`.
pub fn pdf_with_translated_lines(lines: &[(i64, &str)]) -> Vec<u8> {
    let mut operations = Vec::new();
    for (y, text) in lines {
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), 0.into(), Object::Integer(*y)],
        ));
        operations.push(Operation::new("BT", vec![]));
        operations.push(set_font());
        operations.push(Operation::new("Td", vec![72.into(), 0.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        operations.push(Operation::new("ET", vec![]));
        operations.push(Operation::new("Q", vec![]));
    }
    pdf_from_operations(operations)
}

/// Lines on a page whose y axis is flipped to grow downwards; `top` is
/// measured from the top edge.
pub fn pdf_with_flipped_lines(lines: &[(i64, &str)]) -> Vec<u8> {
    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![1.into(), 0.into(), 0.into(), (-1).into(), 0.into(), 792.into()],
        ),
    ];
    for (top, text) in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(set_font());
        operations.push(Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), (-1).into(), 72.into(), Object::Integer(*top)],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    operations.push(Operation::new("Q", vec![]));
    pdf_from_operations(operations)
}

fn set_font() -> Operation {
    Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(11)])
}

/// A one-page Letter PDF with Helvetica as `F1` and the given content.
fn pdf_from_operations(operations: Vec<Operation>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
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
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}
