use pretty_assertions::assert_eq;
use relsql::prelude::*;
use relsql::visitors::{collect_binds, to_dot, where_sql};

fn books() -> Table {
    Table::new("books")
}

fn paged_books() -> SelectStatement {
    SelectStatement::from_table(books())
        .order(asc(books().attr("id")))
        .limit(10)
        .offset(5)
}

#[test]
fn test_limit_offset_across_dialects() {
    let stmt = SelectStatement::from_table(books()).limit(10).offset(5);
    assert_eq!(stmt.to_sql().unwrap(), "SELECT * FROM \"books\" LIMIT 10 OFFSET 5");
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "SELECT * FROM `books` LIMIT 10 OFFSET 5"
    );

    assert_eq!(
        paged_books().to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT * FROM \"books\" \
         ORDER BY \"books\".\"id\" ASC) raw_sql_ WHERE rownum <= 15) WHERE raw_rnum_ > 5"
    );
    assert_eq!(
        paged_books().to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT _t.* FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [books].[id] ASC) as _row_num \
         FROM [books]) as _t WHERE _row_num BETWEEN 6 AND 15"
    );
}

#[test]
fn test_placeholders_per_dialect() {
    let node = and([
        eq(books().attr("id"), bind(1)),
        eq(books().attr("title"), bind("Dune")),
    ]);
    let cases = [
        (Dialect::Ansi, "\"books\".\"id\" = ? AND \"books\".\"title\" = ?"),
        (Dialect::Postgres, "\"books\".\"id\" = $1 AND \"books\".\"title\" = $2"),
        (Dialect::Oracle, "\"books\".\"id\" = :a1 AND \"books\".\"title\" = :a2"),
        (Dialect::MySQL, "`books`.`id` = ? AND `books`.`title` = ?"),
    ];
    for (dialect, expected) in cases {
        let compiled = node.compile_with_dialect(dialect).unwrap();
        assert_eq!(compiled.sql, expected);
        assert_eq!(compiled.binds, vec![Value::Int(1), Value::from("Dune")]);
    }
}

#[test]
fn test_large_in_list_is_split_for_oracle() {
    let ids: Vec<Node> = (1..=2500).map(quoted).collect();
    let node = in_list(books().attr("id"), ids);

    let sql = node.to_sql_with_dialect(Dialect::Oracle).unwrap();
    assert_eq!(sql.matches(" IN (").count(), 3);
    assert_eq!(sql.matches(" OR ").count(), 2);

    let sql = node.to_sql_with_dialect(Dialect::Postgres).unwrap();
    assert_eq!(sql.matches(" IN (").count(), 1);
}

#[test]
fn test_nested_union_shape() {
    let a = SelectStatement::from_table(Table::new("a"));
    let b = SelectStatement::from_table(Table::new("b"));
    let c = SelectStatement::from_table(Table::new("c"));
    let node = union(union(a, b), c);
    assert_eq!(
        node.to_sql().unwrap(),
        "( ( SELECT * FROM \"a\" UNION SELECT * FROM \"b\" ) UNION SELECT * FROM \"c\" )"
    );
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "( SELECT * FROM `a` UNION SELECT * FROM `b` UNION SELECT * FROM `c` )"
    );
}

#[test]
fn test_tree_survives_json() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(books())
            .project(books().attr("title"))
            .filter(eq(books().attr("author_id"), bind(7))),
    )
    .order(desc(books().attr("published_at")))
    .limit(3);
    let node = Node::SelectStatement(stmt);

    let json = serde_json::to_string(&node).unwrap();
    let decoded: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, node);
    assert_eq!(
        decoded.compile_with_dialect(Dialect::Postgres).unwrap(),
        node.compile_with_dialect(Dialect::Postgres).unwrap()
    );
}

#[test]
fn test_config_drives_compilation() {
    let config = CompilerConfig::from_toml("dialect = \"postgresql\"\nsubstitute_binds = true\n").unwrap();
    assert_eq!(config.dialect, Dialect::Postgres);

    let compiled = config.compile(&eq(books().attr("id"), bind(9))).unwrap();
    assert_eq!(compiled.sql, "\"books\".\"id\" = 9");
    assert!(compiled.binds.is_empty());

    assert!(CompilerConfig::from_toml("dialect = \"informix\"").is_err());
}

#[test]
fn test_auxiliary_visitors() {
    let node = eq(books().attr("id"), bind(1));
    assert_eq!(collect_binds(&node), vec![Value::Int(1)]);
    assert!(to_dot(&node).starts_with("digraph \"relsql\" {"));

    let stmt = SelectStatement::new(SelectCore::from_table(books()).filter(node));
    let clause = where_sql(Dialect::Postgres.generator().as_ref(), &stmt)
        .unwrap()
        .unwrap();
    assert_eq!(clause.sql, "WHERE \"books\".\"id\" = $1");
}

#[test]
fn test_unsupported_features_report_errors() {
    let node = regexp(books().attr("title"), quoted("^D"), true);
    let err = node.to_sql().unwrap_err();
    assert!(matches!(err, CompileError::NotImplemented { .. }));
    assert!(node.to_sql_with_dialect(Dialect::Postgres).is_ok());
}
