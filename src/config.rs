/*---------- Imports ----------*/
use std::env;

/*---------- Constants ----------*/
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Process configuration consumed by the ingest handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Target table. `None` is passed through to the store, which rejects the write.
    pub table_name: Option<String>,
}

impl Config {
    pub fn new(table_name: Option<String>) -> Self {
        Self { table_name }
    }

    pub fn from_env() -> Self {
        let table_name = env::var(TABLE_NAME_VAR)
            .ok()
            .filter(|value| !value.is_empty());

        Self { table_name }
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }
}
