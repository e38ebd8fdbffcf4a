//! End-to-end generation against the bundled templates.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::path::PathBuf;

use sprocgen_codegen::{GenerateOption, GeneratedProcedure, Generator, ParameterNamer, TemplateSettings};
use sprocgen_core::Action;
use sprocgen_schema::{Driver, SchemaColumn, TableDescription, format_column_type};

fn bundled_templates() -> TemplateSettings {
    TemplateSettings::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../templates"))
}

fn users() -> TableDescription {
    TableDescription {
        name: "users".to_string(),
        columns: vec![
            SchemaColumn {
                name: "id".to_string(),
                column_type: "int".to_string(),
                is_primary_key: true,
            },
            SchemaColumn {
                name: "name".to_string(),
                column_type: "varchar(50)".to_string(),
                is_primary_key: false,
            },
        ],
    }
}

fn generate(driver: Driver, actions: &[Action]) -> Vec<GeneratedProcedure> {
    let settings = bundled_templates();
    let table = ParameterNamer::new(&settings, driver)
        .name_table(&users())
        .expect("failed to name parameters");
    let option = GenerateOption::new(driver, "sp_users", actions.iter().copied(), settings)
        .expect("failed to build options");
    Generator::new(&option)
        .generate(&table)
        .expect("failed to generate procedures")
}

#[test]
fn test_select_and_insert_for_users() {
    let procedures = generate(Driver::MySql, &[Action::Select, Action::Insert]);
    assert_eq!(procedures.len(), 2);

    let select = &procedures[0];
    assert_eq!(select.action, Action::Select);
    assert!(select.content.contains("WHERE ((id = p_id OR p_id IS NULL))"));

    let insert = &procedures[1];
    assert_eq!(insert.action, Action::Insert);
    assert!(insert.content.contains("INSERT INTO users (name)"));
    assert!(insert.content.contains("IN p_name varchar(50)"));
    assert!(!insert.content.contains("p_id"));
    assert!(!insert.content.contains("WHERE"));
}

#[test]
fn test_mysql_select_procedure() {
    let procedures = generate(Driver::MySql, &[Action::Select]);
    insta::assert_snapshot!(&procedures[0].content, @r"
    DROP PROCEDURE IF EXISTS sp_users_select;
    DELIMITER //
    CREATE PROCEDURE sp_users_select(IN p_id int, IN p_name varchar(50))
    BEGIN
    SELECT id, name
    FROM users
    WHERE ((id = p_id OR p_id IS NULL));
    END //
    DELIMITER ;
    ");
}

#[test]
fn test_mysql_insert_procedure() {
    let procedures = generate(Driver::MySql, &[Action::Insert]);
    insta::assert_snapshot!(&procedures[0].content, @r"
    DROP PROCEDURE IF EXISTS sp_users_insert;
    DELIMITER //
    CREATE PROCEDURE sp_users_insert(IN p_name varchar(50))
    BEGIN
    INSERT INTO users (name)
    VALUES (p_name);
    END //
    DELIMITER ;
    ");
}

#[test]
fn test_postgres_update_function() {
    let procedures = generate(Driver::Postgres, &[Action::Update]);
    insta::assert_snapshot!(&procedures[0].content, @r"
    CREATE OR REPLACE FUNCTION sp_users_update(p_id int, p_name varchar(50))
    RETURNS void
    LANGUAGE sql
    AS $$
    UPDATE users
    SET name = p_name
    WHERE ((id = p_id OR p_id IS NULL));
    $$;
    ");
}

#[test]
fn test_postgres_delete_function() {
    let procedures = generate(Driver::Postgres, &[Action::Delete]);
    let delete = &procedures[0];

    assert_eq!(delete.procedure_name, "sp_users_delete");
    assert!(delete.content.starts_with("CREATE OR REPLACE FUNCTION sp_users_delete(p_id int)\n"));
    assert!(delete.content.contains("DELETE FROM users\nWHERE ((id = p_id OR p_id IS NULL));"));
}

#[test]
fn test_every_action_in_generation_order() {
    let procedures = generate(
        Driver::Postgres,
        &[Action::Update, Action::Insert, Action::Delete, Action::Select],
    );
    let names: Vec<&str> = procedures
        .iter()
        .map(|p| p.procedure_name.as_str())
        .collect();

    assert_eq!(
        names,
        vec![
            "sp_users_select",
            "sp_users_delete",
            "sp_users_insert",
            "sp_users_update"
        ]
    );
    assert!(procedures[0].content.contains("RETURNS SETOF users"));
}

#[test]
fn test_sql_server_update_procedure() {
    let procedures = generate(Driver::SqlServer, &[Action::Update]);
    insta::assert_snapshot!(&procedures[0].content, @r"
    IF OBJECT_ID('sp_users_update', 'P') IS NOT NULL
        DROP PROCEDURE sp_users_update;
    GO
    CREATE PROCEDURE sp_users_update
    @id int,
    @name varchar(50)
    AS
    BEGIN
    SET NOCOUNT ON;
    UPDATE users
    SET name = @name
    WHERE ((id = @id OR @id IS NULL));
    END
    GO
    ");
}

#[test]
fn test_sql_server_unbounded_column_type() {
    let settings = bundled_templates();
    let mut description = users();
    description.columns.push(SchemaColumn {
        name: "bio".to_string(),
        column_type: format_column_type("nvarchar", Some(-1)),
        is_primary_key: false,
    });
    let table = ParameterNamer::new(&settings, Driver::SqlServer)
        .name_table(&description)
        .expect("failed to name parameters");
    let option = GenerateOption::new(Driver::SqlServer, "sp_users", [Action::Insert], settings)
        .expect("failed to build options");
    let procedures = Generator::new(&option)
        .generate(&table)
        .expect("failed to generate procedures");

    let insert = &procedures[0].content;
    assert!(insert.contains("@name varchar(50),\n@bio nvarchar(max)\nAS"));
    assert!(insert.contains("INSERT INTO users (name, bio)\nVALUES (@name, @bio);"));
}
