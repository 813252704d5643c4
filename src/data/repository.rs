//! Load-once dataset repository.

use std::collections::BTreeMap;
use std::path::Path;

use super::csv::read_csv_path;
use super::error::TableError;
use super::table::Table;

/// Named, in-memory datasets shared by every request.
///
/// Datasets are loaded once at startup and read-only for the process
/// lifetime. The prediction service takes the repository as an injected
/// dependency rather than reaching for global state.
#[derive(Debug, Default)]
pub struct DatasetRepository {
    tables: BTreeMap<String, Table>,
}

impl DatasetRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-loaded table under a name.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Load a CSV file and register it under a name.
    pub fn load_csv(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), TableError> {
        let table = read_csv_path(path)?;
        self.insert(name, table);
        Ok(())
    }

    /// Look up a dataset by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Registered dataset names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Column lists per dataset, sorted by dataset name.
    ///
    /// Backs the dataset-titles summary view.
    pub fn titles(&self) -> Vec<(String, Vec<String>)> {
        self.tables
            .iter()
            .map(|(name, table)| (name.clone(), table.columns().to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    #[test]
    fn titles_list_columns_per_dataset() {
        let mut repo = DatasetRepository::new();
        repo.insert(
            "ships",
            Table::new(
                vec!["ship_id".into(), "active".into()],
                vec![vec![Value::from("GOMSTREE"), Value::from(true)]],
            )
            .unwrap(),
        );

        let titles = repo.titles();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].0, "ships");
        assert_eq!(titles[0].1, vec!["ship_id", "active"]);
    }
}
