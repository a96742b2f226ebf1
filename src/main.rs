use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

mod domain;
mod infra;
mod usecase;


use crate::domain::entities::edit::EditedTable;
use crate::domain::entities::product::{ProductDraft, ProductId};
use crate::domain::entities::schema::{
    CATEGORY_COLUMN, NAME_COLUMN, NOTES_COLUMN, QUANTITY_COLUMN, TOTAL_COLUMN, UNIT_PRICE_COLUMN,
};
use crate::domain::entities::view::{DerivedView, SortDirection, SortKey, SortSpec, ViewQuery};
use crate::infra::json::store::JsonSnapshotStore;
use crate::usecase::services::export_service::{ExportError, ExportService};
use crate::usecase::services::list_service::ListService;
use crate::usecase::services::view_service;

const SNAPSHOT_FILE: &str = "dados_salvos.json";

#[derive(Parser)]
#[command(name = "compras", version, about = "Lista de Compras Inteligente")]
struct Cli {
    /// Snapshot file to load and save (defaults to the user data directory)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a product to the list
    Add {
        /// Product name
        name: String,
        /// Quantity bought or planned
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
        /// One of the registered categories
        #[arg(long, default_value = "Outros")]
        category: String,
        /// Unit price in reais
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        /// Free form note for this product
        #[arg(long, default_value = "")]
        notes: String,
        /// Extra column value as COLUMN=VALUE, repeatable
        #[arg(long = "extra", value_name = "COLUMN=VALUE")]
        extras: Vec<String>,
    },
    /// Print the list as a table
    List {
        /// Only products of this category
        #[arg(long)]
        category: Option<String>,
        /// Column to sort by (Name, Quantity, Category, UnitPrice or Total)
        #[arg(long, value_name = "COLUMN")]
        sort_by: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Print totals and per category breakdowns
    Summary {
        /// Only products of this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Overwrite one cell of a product
    Set {
        /// Product id as shown by list
        id: u64,
        /// Column to overwrite
        column: String,
        /// New value
        value: String,
    },
    /// Remove a product from the list
    Remove {
        /// Product id as shown by list
        id: u64,
    },
    /// Manage extra columns
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Manage the category registry for this session
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Show or replace the list level notes
    #[command(subcommand)]
    Notes(NotesCommand),
    /// Write the current view to a file
    Export {
        /// Output format, csv or xlsx
        format: String,
        /// Only products of this category
        #[arg(long)]
        category: Option<String>,
        /// Column to sort by (Name, Quantity, Category, UnitPrice or Total)
        #[arg(long, value_name = "COLUMN")]
        sort_by: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Directory to write into
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Drop every product and every extra column
    Clear,
}

#[derive(Subcommand)]
enum ColumnCommand {
    /// Add an extra column, blank on every product
    Add { name: String },
    /// Remove an extra column and its values
    Rm { name: String },
    /// List base and extra columns
    List,
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories with their colors
    List,
    /// Register a category for this session
    Add { label: String },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Print the notes
    Show,
    /// Replace the notes
    Set { text: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let snapshot_path = match cli.file {
        Some(path) => path,
        None => default_snapshot_path()?,
    };
    let store = Arc::new(JsonSnapshotStore::new(snapshot_path));
    let mut service = ListService::load(store)?;
    run(&mut service, cli.command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(service: &mut ListService, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            quantity,
            category,
            price,
            notes,
            extras,
        } => {
            let mut draft = ProductDraft {
                name: name.clone(),
                quantity,
                category,
                unit_price: price,
                notes,
                extras: Default::default(),
            };
            for extra in &extras {
                let (column, value) = parse_extra(extra)?;
                draft.extras.insert(column.to_string(), value.to_string());
            }
            let id = service.add(draft)?;
            println!("{name} adicionado (id {})", id.0);
            Ok(())
        }
        Command::List {
            category,
            sort_by,
            desc,
        } => {
            let query = view_query(category, sort_by, desc)?;
            print_table(&service.view(&query));
            Ok(())
        }
        Command::Summary { category } => {
            let query = view_query(category, None, false)?;
            print_summary(&service.view(&query));
            Ok(())
        }
        Command::Set { id, column, value } => {
            let id = ProductId(id);
            let mut edited = EditedTable::from_view(&service.view(&ViewQuery::default()));
            let row = edited
                .rows
                .iter_mut()
                .find(|row| row.id == Some(id))
                .ok_or_else(|| anyhow!("no product with id {}", id.0))?;
            apply_cell(&mut row.draft, &column, &value)?;
            if service.apply_edits(&edited)? {
                println!("{column} atualizado (id {})", id.0);
            } else {
                println!("nada a atualizar");
            }
            Ok(())
        }
        Command::Remove { id } => {
            let id = ProductId(id);
            let mut edited = EditedTable::from_view(&service.view(&ViewQuery::default()));
            let before = edited.rows.len();
            edited.rows.retain(|row| row.id != Some(id));
            if edited.rows.len() == before {
                anyhow::bail!("no product with id {}", id.0);
            }
            service.apply_edits(&edited)?;
            println!("removido (id {})", id.0);
            Ok(())
        }
        Command::Column(command) => match command {
            ColumnCommand::Add { name } => {
                let label = service.add_column(&name)?;
                println!("coluna adicionada: {label}");
                Ok(())
            }
            ColumnCommand::Rm { name } => {
                let label = service.remove_column(&name)?;
                println!("coluna removida: {label}");
                Ok(())
            }
            ColumnCommand::List => {
                for column in service.schema().view_columns() {
                    println!("{column}");
                }
                Ok(())
            }
        },
        Command::Category(command) => match command {
            CategoryCommand::List => {
                let categories = service.categories();
                for label in categories.labels() {
                    println!("{label}  {}", categories.color_of(label));
                }
                Ok(())
            }
            CategoryCommand::Add { label } => {
                let label = service.add_category(&label)?;
                println!("categoria registrada: {label}");
                Ok(())
            }
        },
        Command::Notes(command) => match command {
            NotesCommand::Show => {
                println!("{}", service.notes());
                Ok(())
            }
            NotesCommand::Set { text } => {
                service.set_notes(&text)?;
                println!("observações atualizadas");
                Ok(())
            }
        },
        Command::Export {
            format,
            category,
            sort_by,
            desc,
            out,
        } => {
            let query = view_query(category, sort_by, desc)?;
            let view = service.view(&query);
            let exporter = ExportService::new(out);
            let result = match format.as_str() {
                "csv" => exporter.export_csv(&view),
                "xlsx" => exporter.export_xlsx(&view),
                other => anyhow::bail!("unknown export format: {other} (expected csv or xlsx)"),
            };
            match result {
                Ok(path) => {
                    println!("exportado: {}", path.display());
                    Ok(())
                }
                Err(ExportError::Unavailable(message)) => {
                    println!("{message}");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        }
        Command::Clear => {
            service.clear()?;
            println!("lista limpa");
            Ok(())
        }
    }
}

fn view_query(category: Option<String>, sort_by: Option<String>, desc: bool) -> Result<ViewQuery> {
    let sort = match sort_by {
        Some(column) => Some(SortSpec {
            key: parse_sort_key(&column)?,
            direction: if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        }),
        None => None,
    };
    Ok(ViewQuery { category, sort })
}

fn parse_sort_key(column: &str) -> Result<SortKey> {
    match column {
        "Name" | "name" => Ok(SortKey::Name),
        "Quantity" | "quantity" => Ok(SortKey::Quantity),
        "Category" | "category" => Ok(SortKey::Category),
        "UnitPrice" | "unit-price" | "price" => Ok(SortKey::UnitPrice),
        "Total" | "total" => Ok(SortKey::Total),
        other => anyhow::bail!("unknown sort column: {other}"),
    }
}

fn parse_extra(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| anyhow!("expected COLUMN=VALUE, got {raw:?}"))
}

fn apply_cell(draft: &mut ProductDraft, column: &str, value: &str) -> Result<()> {
    match column {
        NAME_COLUMN => draft.name = value.to_string(),
        QUANTITY_COLUMN => draft.quantity = parse_f64(value),
        CATEGORY_COLUMN => draft.category = value.to_string(),
        UNIT_PRICE_COLUMN => draft.unit_price = parse_f64(value),
        NOTES_COLUMN => draft.notes = value.to_string(),
        TOTAL_COLUMN => anyhow::bail!("Total is derived from Quantity and UnitPrice"),
        other => {
            draft.extras.insert(other.to_string(), value.to_string());
        }
    }
    Ok(())
}

fn print_table(view: &DerivedView) {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(view.rows.len() + 1);
    let mut header = vec!["Id".to_string()];
    header.extend(view.columns.iter().cloned());
    table.push(header);
    for row in &view.rows {
        let mut record = vec![row.product.id.0.to_string()];
        record.extend(
            view.columns
                .iter()
                .map(|column| view_service::cell_text(row, column)),
        );
        table.push(record);
    }

    let mut widths = vec![0_usize; table[0].len()];
    for record in &table {
        for (idx, cell) in record.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    for record in &table {
        let mut line = String::new();
        for (idx, cell) in record.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            let width = widths[idx];
            line.push_str(&format!("{cell:<width$}"));
        }
        println!("{}", line.trim_end());
    }
}

fn print_summary(view: &DerivedView) {
    let summary = view_service::summarize(view);
    println!("Total de Produtos: {}", summary.product_count);
    println!("Total de Itens: {:.1}", summary.item_count);
    println!("Valor Total: R$ {:.2}", summary.total_value);
    println!("Preço Médio: R$ {:.2}", summary.average_unit_price);

    let counts = view_service::category_counts(view);
    if !counts.is_empty() {
        println!();
        println!("Produtos por Categoria:");
        for entry in counts {
            println!("  {}: {}", entry.category, entry.count);
        }
    }
    let totals = view_service::category_totals(view);
    if !totals.is_empty() {
        println!();
        println!("Valor por Categoria:");
        for entry in totals {
            println!("  {}: R$ {:.2}", entry.category, entry.total);
        }
    }
}

fn default_snapshot_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "compras", "compras")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join(SNAPSHOT_FILE))
}

// Decimal commas are accepted the way the rest of the list is written.
// Non-finite input collapses to zero, the snapshot cannot carry it.
fn parse_f64(value: &str) -> f64 {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}

fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if (value.fract()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}
