//! Core SQL transpiler tests (SELECT, UPDATE, DELETE, INSERT).

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::CompileError;
use crate::transpiler::{Dialect, ToSql};

fn users() -> Table {
    Table::new("users")
}

#[test]
fn test_simple_select() {
    let stmt = SelectStatement::from_table(users());
    assert_eq!(stmt.to_sql().unwrap(), "SELECT * FROM \"users\"");
}

#[test]
fn test_select_complex() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .project(users().attr("id"))
            .project(users().attr("email"))
            .filter(eq(users().attr("active"), Node::True)),
    )
    .order(desc(users().attr("created_at")))
    .limit(10);
    assert_eq!(
        stmt.to_sql().unwrap(),
        "SELECT \"users\".\"id\", \"users\".\"email\" FROM \"users\" WHERE \"users\".\"active\" = TRUE \
         ORDER BY \"users\".\"created_at\" DESC LIMIT 10"
    );
}

#[test]
fn test_null_comparisons() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .filter(eq(users().attr("deleted_at"), quoted(Value::Null)))
            .filter(not_eq(users().attr("email"), quoted(Value::Null))),
    );
    assert_eq!(
        stmt.to_sql().unwrap(),
        "SELECT * FROM \"users\" WHERE \"users\".\"deleted_at\" IS NULL AND \"users\".\"email\" IS NOT NULL"
    );
}

#[test]
fn test_binds_are_collected() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).filter(eq(users().attr("id"), bind(5))),
    );
    let compiled = stmt.compile_with_dialect(Dialect::Ansi).unwrap();
    assert_eq!(compiled.sql, "SELECT * FROM \"users\" WHERE \"users\".\"id\" = ?");
    assert_eq!(compiled.binds, vec![Value::Int(5)]);
    assert!(compiled.preparable);
    assert!(compiled.retryable);
}

#[test]
fn test_in_list() {
    let node = in_list(users().attr("id"), [quoted(1), quoted(2)]);
    let compiled = node.compile_with_dialect(Dialect::Ansi).unwrap();
    assert_eq!(compiled.sql, "\"users\".\"id\" IN (1, 2)");
    assert!(!compiled.preparable);

    let node = not_in_list(users().attr("id"), [quoted(1)]);
    assert_eq!(node.to_sql().unwrap(), "\"users\".\"id\" NOT IN (1)");
}

#[test]
fn test_empty_in_list_is_constant() {
    let compiled = in_list(users().attr("id"), Vec::<Node>::new())
        .compile_with_dialect(Dialect::Ansi)
        .unwrap();
    assert_eq!(compiled.sql, "1=0");
    assert!(!compiled.preparable);

    let compiled = not_in_list(users().attr("id"), Vec::<Node>::new())
        .compile_with_dialect(Dialect::Ansi)
        .unwrap();
    assert_eq!(compiled.sql, "1=1");
    assert!(!compiled.preparable);
}

#[test]
fn test_in_subselect() {
    let posts = Table::new("posts");
    let subselect = SelectStatement::new(SelectCore::from_table(posts.clone()).project(posts.attr("user_id")));
    let node = in_(users().attr("id"), subselect);
    assert_eq!(
        node.to_sql().unwrap(),
        "\"users\".\"id\" IN (SELECT \"posts\".\"user_id\" FROM \"posts\")"
    );
}

#[test]
fn test_unboundable_comparisons() {
    let huge = i64::from(i32::MAX) + 1;

    let compiled = eq(users().attr("id"), bind_typed(huge, SqlType::INTEGER))
        .compile_with_dialect(Dialect::Ansi)
        .unwrap();
    assert_eq!(compiled.sql, "1=0");
    assert!(compiled.binds.is_empty());

    let node = not_eq(users().attr("id"), bind_typed(huge, SqlType::INTEGER));
    assert_eq!(node.to_sql().unwrap(), "1=1");

    let node = gt(users().attr("id"), bind_typed(huge, SqlType::INTEGER));
    assert_eq!(node.to_sql().unwrap(), "1=0");

    let node = lt(users().attr("id"), bind_typed(huge, SqlType::INTEGER));
    assert_eq!(node.to_sql().unwrap(), "1=1");

    let node = in_list(
        users().attr("id"),
        [bind_typed(1, SqlType::INTEGER), bind_typed(huge, SqlType::INTEGER)],
    );
    assert_eq!(node.to_sql().unwrap(), "\"users\".\"id\" IN (?)");
}

#[test]
fn test_lock() {
    let stmt = SelectStatement::from_table(users()).lock(None);
    assert_eq!(stmt.to_sql().unwrap(), "SELECT * FROM \"users\" FOR UPDATE");
}

#[test]
fn test_joins() {
    let posts = Table::new("posts");
    let comments = Table::new("comments").with_alias("c");
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .join(inner_join(posts.clone(), eq(posts.attr("user_id"), users().attr("id"))))
            .join(outer_join(comments.clone(), eq(comments.attr("post_id"), posts.attr("id"))))
            .join(string_join("CROSS JOIN tags")),
    );
    assert_eq!(
        stmt.to_sql().unwrap(),
        "SELECT * FROM \"users\" INNER JOIN \"posts\" ON \"posts\".\"user_id\" = \"users\".\"id\" \
         LEFT OUTER JOIN \"comments\" \"c\" ON \"c\".\"post_id\" = \"posts\".\"id\" CROSS JOIN tags"
    );
}

#[test]
fn test_group_having() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .project(users().attr("org_id"))
            .project(count(vec![sql("*")]))
            .group(users().attr("org_id"))
            .having(gt(count(vec![sql("*")]), quoted(5))),
    );
    assert_eq!(
        stmt.to_sql().unwrap(),
        "SELECT \"users\".\"org_id\", COUNT(*) FROM \"users\" GROUP BY \"users\".\"org_id\" HAVING COUNT(*) > 5"
    );
}

#[test]
fn test_insert_values() {
    let stmt = InsertStatement {
        columns: vec![Arc::new(column("name")), Arc::new(column("age"))],
        values: Some(Arc::new(values_list(vec![vec![
            Node::Value(Value::from("Bob")),
            Node::Value(Value::Int(42)),
        ]]))),
        ..InsertStatement::new(users())
    };
    let compiled = stmt.compile_with_dialect(Dialect::Ansi).unwrap();
    assert_eq!(
        compiled.sql,
        "INSERT INTO \"users\" (\"name\", \"age\") VALUES ('Bob', 42)"
    );
    assert!(!compiled.retryable);
}

#[test]
fn test_insert_select() {
    let archive = Table::new("archive");
    let stmt = InsertStatement {
        columns: vec![Arc::new(archive.attr("id"))],
        select: Some(SelectStatement::new(SelectCore::from_table(users()).project(users().attr("id"))).into()),
        ..InsertStatement::new(archive)
    };
    assert_eq!(
        stmt.to_sql().unwrap(),
        "INSERT INTO \"archive\" (\"id\") SELECT \"users\".\"id\" FROM \"users\""
    );
}

#[test]
fn test_update() {
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("name"), Node::Value(Value::from("x"))))],
        wheres: vec![Arc::new(eq(users().attr("id"), bind(1)))],
        ..UpdateStatement::new(users())
    };
    let compiled = stmt.compile_with_dialect(Dialect::Ansi).unwrap();
    assert_eq!(
        compiled.sql,
        "UPDATE \"users\" SET \"name\" = 'x' WHERE \"users\".\"id\" = ?"
    );
    assert_eq!(compiled.binds, vec![Value::Int(1)]);
    assert!(!compiled.retryable);
}

#[test]
fn test_update_with_limit_uses_keyed_subselect() {
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("name"), Node::Value(Value::from("x"))))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        key: Some(Arc::new(users().attr("id"))),
        ..UpdateStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql().unwrap(),
        "UPDATE \"users\" SET \"name\" = 'x' WHERE (\"users\".\"id\") IN \
         (SELECT \"users\".\"id\" FROM \"users\" LIMIT 10)"
    );
}

#[test]
fn test_update_without_key_keeps_limit() {
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("name"), Node::Value(Value::from("x"))))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        ..UpdateStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql().unwrap(),
        "UPDATE \"users\" SET \"name\" = 'x' LIMIT 10"
    );
}

#[test]
fn test_delete() {
    let stmt = DeleteStatement {
        wheres: vec![Arc::new(eq(users().attr("id"), bind(1)))],
        ..DeleteStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql().unwrap(),
        "DELETE FROM \"users\" WHERE \"users\".\"id\" = ?"
    );
}

#[test]
fn test_delete_with_join_uses_keyed_subselect() {
    let posts = Table::new("posts");
    let stmt = DeleteStatement {
        wheres: vec![Arc::new(eq(posts.attr("spam"), Node::True))],
        key: Some(Arc::new(users().attr("id"))),
        ..DeleteStatement::new(join_source(
            users(),
            vec![inner_join(posts.clone(), eq(posts.attr("user_id"), users().attr("id")))],
        ))
    };
    assert_eq!(
        stmt.to_sql().unwrap(),
        "DELETE FROM \"users\" WHERE (\"users\".\"id\") IN (SELECT \"users\".\"id\" FROM \"users\" \
         INNER JOIN \"posts\" ON \"posts\".\"user_id\" = \"users\".\"id\" WHERE \"posts\".\"spam\" = TRUE)"
    );
}

#[test]
fn test_set_operations_nest() {
    let a = SelectStatement::from_table(Table::new("a"));
    let b = SelectStatement::from_table(Table::new("b"));
    let c = SelectStatement::from_table(Table::new("c"));
    let node = union(union(a.clone(), b.clone()), c);
    assert_eq!(
        node.to_sql().unwrap(),
        "( ( SELECT * FROM \"a\" UNION SELECT * FROM \"b\" ) UNION SELECT * FROM \"c\" )"
    );

    let node = except(a, b.limit(1));
    assert_eq!(
        node.to_sql().unwrap(),
        "( SELECT * FROM \"a\" EXCEPT (SELECT * FROM \"b\" LIMIT 1) )"
    );
}

#[test]
fn test_distinct_from_uses_case() {
    let node = is_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql().unwrap(),
        "CASE WHEN \"users\".\"a\" = \"users\".\"b\" OR (\"users\".\"a\" IS NULL AND \"users\".\"b\" IS NULL) \
         THEN 0 ELSE 1 END = 1"
    );

    let node = is_not_distinct_from(users().attr("a"), quoted(Value::Null));
    assert_eq!(node.to_sql().unwrap(), "\"users\".\"a\" IS NULL");
}

#[test]
fn test_like() {
    let node = matches(users().attr("name"), quoted("%bob%"));
    assert_eq!(node.to_sql().unwrap(), "\"users\".\"name\" LIKE '%bob%'");

    let node = matches_with(users().attr("name"), quoted("%b!%%"), Some(quoted("!")), false, true);
    assert_eq!(
        node.to_sql().unwrap(),
        "\"users\".\"name\" NOT LIKE '%b!%%' ESCAPE '!'"
    );
}

#[test]
fn test_distinct_on_not_implemented() {
    let stmt = SelectStatement::new(SelectCore::from_table(users()).distinct_on(users().attr("email")));
    let err = stmt.to_sql().unwrap_err();
    assert!(matches!(
        err,
        CompileError::NotImplemented {
            feature: "DISTINCT ON",
            dialect: "ansi"
        }
    ));
}

#[test]
fn test_regexp_not_implemented() {
    let err = regexp(users().attr("name"), quoted("^b"), true).to_sql().unwrap_err();
    assert!(matches!(err, CompileError::NotImplemented { .. }));
}

#[test]
fn test_raw_string_is_unsupported() {
    let node = eq(users().attr("name"), Node::Value(Value::from("bob")));
    let err = node.to_sql().unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedVisit(Kind::String)));
}

#[test]
fn test_negative_limit_rejected() {
    let err = SelectStatement::from_table(users()).limit(-1).to_sql().unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue(_)));
}

#[test]
fn test_empty_statement_rejected() {
    let stmt = SelectStatement {
        cores: Vec::new(),
        ..SelectStatement::from_table(users())
    }
    .order(asc(column("id")));
    for dialect in [Dialect::Ansi, Dialect::Oracle, Dialect::SqlServer] {
        let err = stmt.clone().limit(10).to_sql_with_dialect(dialect).unwrap_err();
        assert!(matches!(err, CompileError::InvalidValue(_)), "{}", dialect);
    }
    let err = stmt.to_sql().unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue(_)));

    let stmt = SelectStatement {
        cores: vec![Arc::new(users().node())],
        ..SelectStatement::from_table(users())
    };
    let err = stmt.to_sql().unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue(_)));
}

#[test]
fn test_compiling_twice_is_stable() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .filter(eq(users().attr("id"), bind(3)))
            .filter(in_list(users().attr("org_id"), [bind(1), bind(2)])),
    )
    .order(asc(users().attr("id")))
    .limit(10)
    .offset(20);
    for dialect in [Dialect::Postgres, Dialect::Oracle, Dialect::SqlServer] {
        let first = stmt.compile_with_dialect(dialect).unwrap();
        let second = stmt.compile_with_dialect(dialect).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.binds, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
    }
}
