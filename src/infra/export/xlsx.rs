use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::schema::{QUANTITY_COLUMN, TOTAL_COLUMN, UNIT_PRICE_COLUMN};
use crate::domain::entities::view::DerivedView;
use crate::usecase::services::view_service::cell_text;

pub const SHEET_NAME: &str = "Lista de Compras";

pub fn render_xlsx(view: &DerivedView) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    for (col, column) in view.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, column)
            .context("failed to write xlsx header")?;
    }
    for (row_idx, row) in view.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, column) in view.columns.iter().enumerate() {
            let col_num = col as u16;
            match column.as_str() {
                QUANTITY_COLUMN => worksheet
                    .write_number(row_num, col_num, row.product.quantity)
                    .context("failed to write xlsx quantity")?,
                UNIT_PRICE_COLUMN => worksheet
                    .write_number(row_num, col_num, row.product.unit_price)
                    .context("failed to write xlsx unit price")?,
                TOTAL_COLUMN => worksheet
                    .write_number(row_num, col_num, row.total)
                    .context("failed to write xlsx total")?,
                _ => worksheet
                    .write_string(row_num, col_num, &cell_text(row, column))
                    .context("failed to write xlsx cell")?,
            };
        }
    }

    workbook
        .save_to_buffer()
        .context("failed to render xlsx workbook")
}
