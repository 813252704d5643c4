//! Raw tabular data: values, tables, CSV loading, and the dataset repository.

mod csv;
mod error;
mod repository;
mod table;
mod value;

pub use csv::{read_csv, read_csv_path};
pub use error::TableError;
pub use repository::DatasetRepository;
pub use table::Table;
pub use value::Value;
