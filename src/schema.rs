//! Schema synthesis: random column types and CREATE TABLE rendering.
//!
//! The generator decides the shape of the table once per run. Every later
//! stage (INSERT building, value synthesis) reads the resulting
//! [`ColumnTypeRegistry`], so the registry is the single source of truth for
//! which columns exist and in what order.

use rand::Rng;

/// Reserved identifier for the auto-increment primary key column.
pub const PRIMARY_KEY_COLUMN: &str = "pk";

/// Declared capacity of generated string columns.
pub const VARCHAR_WIDTH: u16 = 100;

/// The closed set of column types the generator can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    VarChar(u16),
}

impl ColumnType {
    /// Type name as it appears in DDL.
    pub fn sql_type(&self) -> String {
        match self {
            ColumnType::Int => "int".to_string(),
            ColumnType::VarChar(width) => format!("varchar({width})"),
        }
    }
}

/// One generated column: identifier plus its assigned type.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

/// Immutable mapping from non-key column identifier to its type.
///
/// Built exactly once per run by [`generate_create_table`] and shared
/// read-only by every worker (wrap it in an `Arc`). Columns keep their
/// creation order, which is also the order the INSERT builder renders them
/// in. The primary key column is never registered here since the server
/// assigns its values.
#[derive(Debug, Clone, Default)]
pub struct ColumnTypeRegistry {
    columns: Vec<ColumnSpec>,
}

impl ColumnTypeRegistry {
    /// Non-key columns in creation order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn push(&mut self, name: String, column_type: ColumnType) {
        self.columns.push(ColumnSpec { name, column_type });
    }
}

/// Pick one of the two supported types with equal probability.
fn random_type<R: Rng>(rng: &mut R) -> ColumnType {
    if rng.random_bool(0.5) {
        ColumnType::Int
    } else {
        ColumnType::VarChar(VARCHAR_WIDTH)
    }
}

/// Generate a CREATE TABLE statement with `column_count` columns of random
/// type, plus the registry describing every non-key column.
///
/// When `primary_key` is set, column 0 is the fixed
/// `pk int auto_increment primary key` and counts toward `column_count`.
/// Remaining identifiers are `col_<index>`, numbered from the position after
/// the key's reserved slot so they never collide with it.
///
/// Pure computation; executing the returned DDL is the caller's job.
pub fn generate_create_table<R: Rng>(
    table: &str,
    column_count: usize,
    primary_key: bool,
    rng: &mut R,
) -> (String, ColumnTypeRegistry) {
    let mut column_defs = Vec::new();
    let mut registry = ColumnTypeRegistry::default();

    if primary_key {
        column_defs.push(format!(
            "`{PRIMARY_KEY_COLUMN}` int auto_increment primary key"
        ));
    }
    for index in column_defs.len()..column_count {
        let column_type = random_type(rng);
        let name = format!("col_{index}");
        column_defs.push(format!("`{name}` {}", column_type.sql_type()));
        registry.push(name, column_type);
    }

    let create = format!("create table `{table}` ({})", column_defs.join(","));
    (create, registry)
}

/// DROP statement paired with [`generate_create_table`].
pub fn drop_table_statement(table: &str) -> String {
    format!("drop table if exists `{table}`")
}
