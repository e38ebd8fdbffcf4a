//! WHERE clause synthesis.

use crate::Column;

/// Build the optional-match WHERE clause over the primary-key columns.
///
/// Every key column contributes `(col = param OR param IS NULL)` so that a
/// NULL argument disables that part of the filter. Returns an empty string
/// when `columns` contains no primary-key column.
pub fn where_condition(columns: &[Column]) -> String {
    let keys: Vec<&Column> = columns.iter().filter(|c| c.is_primary_key).collect();
    if keys.is_empty() {
        return String::new();
    }

    let last = keys.len() - 1;
    let mut out = String::from("WHERE (");
    for (index, column) in keys.iter().enumerate() {
        out.push_str(&format!(
            "({} = {} OR {} IS NULL)",
            column.column_name, column.parameter_name, column.parameter_name
        ));
        if index != last {
            out.push_str(" AND ");
        }
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Column {
        Column::new(name, "int", true, format!("@{}", name))
    }

    fn plain(name: &str) -> Column {
        Column::new(name, "varchar(50)", false, format!("@{}", name))
    }

    #[test]
    fn test_no_key_columns() {
        assert_eq!(where_condition(&[]), "");
        assert_eq!(where_condition(&[plain("name"), plain("email")]), "");
    }

    #[test]
    fn test_single_key_column() {
        assert_eq!(
            where_condition(&[key("id")]),
            "WHERE ((id = @id OR @id IS NULL))"
        );
    }

    #[test]
    fn test_two_key_columns_joined_with_and() {
        assert_eq!(
            where_condition(&[key("a"), key("b")]),
            "WHERE ((a = @a OR @a IS NULL) AND (b = @b OR @b IS NULL))"
        );
    }

    #[test]
    fn test_non_key_columns_ignored() {
        assert_eq!(
            where_condition(&[plain("name"), key("id"), plain("email")]),
            "WHERE ((id = @id OR @id IS NULL))"
        );
    }
}
