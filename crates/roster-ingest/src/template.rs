//! The blank import template handed out to operators.
//!
//! One sheet, one header per catalog field in catalog order. Required
//! headers are bold, and every header carries a note with its requirement,
//! value type and, for select fields, the accepted options.

use std::path::Path;

use roster_model::{CATALOG, FieldDef, FieldType};
use rust_xlsxwriter::{Format, Note, Workbook, Worksheet};

use crate::error::Result;

pub const TEMPLATE_SHEET_NAME: &str = "Students";

const COLUMN_WIDTH: f64 = 22.0;

/// Template headers in column order.
pub fn template_headers() -> Vec<&'static str> {
    CATALOG.iter().map(|def| def.label).collect()
}

/// Note text attached to a template header.
pub fn field_annotation(def: &FieldDef) -> String {
    let requirement = if def.required { "Required" } else { "Optional" };
    let mut text = format!("{requirement} · {}", def.kind.as_str());
    if def.kind == FieldType::Select {
        text.push_str("\nOptions: ");
        text.push_str(&def.options.join(", "));
    }
    text
}

/// Builds the template workbook in memory.
pub fn template_bytes() -> Result<Vec<u8>> {
    let mut workbook = build_template()?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes the template workbook to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = build_template()?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), columns = CATALOG.len(), "template written");
    Ok(())
}

fn build_template() -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(TEMPLATE_SHEET_NAME)?;
    write_headers(sheet)?;
    Ok(workbook)
}

fn write_headers(sheet: &mut Worksheet) -> Result<()> {
    let bold = Format::new().set_bold();
    for (idx, def) in CATALOG.iter().enumerate() {
        let col = idx as u16;
        if def.required {
            sheet.write_string_with_format(0, col, def.label, &bold)?;
        } else {
            sheet.write_string(0, col, def.label)?;
        }
        sheet.insert_note(0, col, &Note::new(field_annotation(def)))?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}
