use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use crate::domain::entities::view::DerivedView;
use crate::infra::export::csv::render_csv;
#[cfg(feature = "xlsx")]
use crate::infra::export::xlsx::render_xlsx;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    Unavailable(String),
    Render(String),
    Io(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Unavailable(message) => write!(f, "{message}"),
            ExportError::Render(message) => write!(f, "failed to render export: {message}"),
            ExportError::Io(message) => write!(f, "failed to write export: {message}"),
        }
    }
}

impl std::error::Error for ExportError {}

pub struct ExportService {
    out_dir: PathBuf,
}

impl ExportService {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    pub fn export_csv(&self, view: &DerivedView) -> Result<PathBuf, ExportError> {
        let bytes = render_csv(view).map_err(|err| ExportError::Render(err.to_string()))?;
        self.write_export("csv", &bytes)
    }

    #[cfg(feature = "xlsx")]
    pub fn export_xlsx(&self, view: &DerivedView) -> Result<PathBuf, ExportError> {
        let bytes = render_xlsx(view).map_err(|err| ExportError::Render(err.to_string()))?;
        self.write_export("xlsx", &bytes)
    }

    #[cfg(not(feature = "xlsx"))]
    pub fn export_xlsx(&self, _view: &DerivedView) -> Result<PathBuf, ExportError> {
        Err(ExportError::Unavailable(
            "spreadsheet export is not built in, rebuild with the xlsx feature".to_string(),
        ))
    }

    fn write_export(&self, extension: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .out_dir
            .join(format!("lista_compras_{stamp}.{extension}"));
        std::fs::create_dir_all(&self.out_dir).map_err(|err| ExportError::Io(err.to_string()))?;
        std::fs::write(&path, bytes).map_err(|err| ExportError::Io(err.to_string()))?;
        debug!("wrote export {}", path.display());
        Ok(path)
    }
}
