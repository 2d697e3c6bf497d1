//! Batched INSERT statement rendering.

use crate::schema::ColumnTypeRegistry;
use crate::value::render_value;
use rand::Rng;

/// Render one INSERT statement covering `row_count` rows.
///
/// The column list is the registry's non-key columns in registry order, and
/// every tuple renders its literals in exactly that order; a mismatch here
/// would land values in the wrong columns. The primary key is omitted so the
/// server assigns it. `row_count` must be at least 1.
pub fn build_insert<R: Rng>(
    table: &str,
    row_count: usize,
    registry: &ColumnTypeRegistry,
    rng: &mut R,
) -> String {
    debug_assert!(row_count >= 1, "callers never build an empty INSERT");

    let column_list = registry
        .columns()
        .iter()
        .map(|c| format!("`{}`", c.name))
        .collect::<Vec<_>>()
        .join(",");

    let mut tuples = Vec::with_capacity(row_count);
    for _ in 0..row_count {
        let literals = registry
            .columns()
            .iter()
            .map(|c| render_value(c.column_type, rng))
            .collect::<Vec<_>>()
            .join(",");
        tuples.push(format!("({literals})"));
    }

    format!(
        "insert into `{table}` ({column_list}) values {}",
        tuples.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::generate_create_table;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tuple_and_literal_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        let (_, registry) = generate_create_table("t", 4, true, &mut rng);
        assert_eq!(registry.len(), 3);

        let stmt = build_insert("t", 5, &registry, &mut rng);

        let values = stmt.split(" values ").nth(1).unwrap();
        let tuples: Vec<&str> = values.split("),(").collect();
        assert_eq!(tuples.len(), 5);
        // The alphabet has no commas, so commas delimit literals exactly.
        for tuple in tuples {
            assert_eq!(tuple.matches(',').count() + 1, registry.len());
        }
    }

    #[test]
    fn test_column_list_matches_registry_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let (_, registry) = generate_create_table("t", 4, true, &mut rng);

        let stmt = build_insert("t", 1, &registry, &mut rng);

        assert!(stmt.starts_with("insert into `t` (`col_1`,`col_2`,`col_3`) values "));
        assert!(!stmt.contains("`pk`"));
    }

    #[test]
    fn test_literal_types_follow_the_registry() {
        let mut rng = StdRng::seed_from_u64(42);
        let (_, registry) = generate_create_table("t", 6, true, &mut rng);

        let stmt = build_insert("t", 3, &registry, &mut rng);
        let values = stmt.split(" values ").nth(1).unwrap();

        for tuple in values.trim_start_matches('(').trim_end_matches(')').split("),(") {
            for (literal, spec) in tuple.split(',').zip(registry.columns()) {
                match spec.column_type {
                    crate::schema::ColumnType::Int => {
                        literal.parse::<i32>().expect("int column must hold an i32");
                    }
                    crate::schema::ColumnType::VarChar(_) => {
                        assert!(literal.starts_with('"') && literal.ends_with('"'));
                    }
                }
            }
        }
    }
}
