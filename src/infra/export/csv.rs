use anyhow::{Context, Result};

use crate::domain::entities::view::DerivedView;
use crate::usecase::services::view_service::cell_text;

pub fn render_csv(view: &DerivedView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&view.columns)
        .context("failed to write csv header")?;
    for row in &view.rows {
        let record: Vec<String> = view
            .columns
            .iter()
            .map(|column| cell_text(row, column))
            .collect();
        writer
            .write_record(&record)
            .context("failed to write csv row")?;
    }
    writer
        .into_inner()
        .context("failed to flush csv output")
}
