//! SQL Dialect tests (MySQL, PostgreSQL, SQLite, Oracle, SQL Server, DB2)

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::CompileError;
use crate::quoting::StaticSchema;
use crate::transpiler::sql::sqlserver::SqlServerGenerator;
use crate::transpiler::{Dialect, SqlGenerator, ToSql};

fn users() -> Table {
    Table::new("users")
}

fn paged(limit: Option<i64>, offset: Option<i64>) -> SelectStatement {
    let mut stmt = SelectStatement::from_table(users()).order(asc(users().attr("id")));
    if let Some(limit) = limit {
        stmt = stmt.limit(limit);
    }
    if let Some(offset) = offset {
        stmt = stmt.offset(offset);
    }
    stmt
}

// ============= MySQL =============

#[test]
fn test_mysql_quoting_and_pagination() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).filter(eq(users().attr("name"), bind("bob"))),
    )
    .limit(10)
    .offset(5);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "SELECT * FROM `users` WHERE `users`.`name` = ? LIMIT 10 OFFSET 5"
    );
}

#[test]
fn test_mysql_offset_without_limit() {
    let stmt = SelectStatement::from_table(users()).offset(5);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "SELECT * FROM `users` LIMIT 18446744073709551615 OFFSET 5"
    );
}

#[test]
fn test_mysql_concat_and_dual() {
    let node = concat(users().attr("first"), users().attr("last"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "CONCAT(`users`.`first`, `users`.`last`)"
    );
    assert_eq!(
        node.to_sql().unwrap(),
        "\"users\".\"first\" || \"users\".\"last\""
    );

    let stmt = SelectStatement::new(SelectCore::default().project(sql("1")));
    assert_eq!(stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(), "SELECT 1 FROM DUAL");
    assert_eq!(stmt.to_sql().unwrap(), "SELECT 1");
}

#[test]
fn test_mysql_flat_union() {
    let a = SelectStatement::from_table(Table::new("a"));
    let b = SelectStatement::from_table(Table::new("b"));
    let c = SelectStatement::from_table(Table::new("c")).limit(1);
    let node = union(union(a, b), c);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "( SELECT * FROM `a` UNION SELECT * FROM `b` UNION (SELECT * FROM `c` LIMIT 1) )"
    );
}

#[test]
fn test_mysql_operators() {
    let node = is_not_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "`users`.`a` <=> `users`.`b`"
    );
    let node = is_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "NOT `users`.`a` <=> `users`.`b`"
    );

    let node = not_regexp(users().attr("name"), quoted("^b"), true);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "`users`.`name` NOT REGEXP '^b'"
    );

    let node = eq(bin(users().attr("name")), quoted("Bob"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "BINARY `users`.`name` = 'Bob'"
    );
}

#[test]
fn test_mysql_nulls_ordering() {
    let stmt = SelectStatement::from_table(users()).order(nulls_last(asc(users().attr("rank"))));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "SELECT * FROM `users` ORDER BY `users`.`rank` IS NULL, `users`.`rank` ASC"
    );
    assert_eq!(
        stmt.to_sql().unwrap(),
        "SELECT * FROM \"users\" ORDER BY \"users\".\"rank\" ASC NULLS LAST"
    );
}

#[test]
fn test_mysql_delete_join_without_rewrite() {
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
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "DELETE `users` FROM `users` INNER JOIN `posts` ON `posts`.`user_id` = `users`.`id` \
         WHERE `posts`.`spam` = TRUE"
    );
}

#[test]
fn test_mysql_delete_join_with_limit_uses_derived_table() {
    let posts = Table::new("posts");
    let stmt = DeleteStatement {
        wheres: vec![Arc::new(eq(posts.attr("id"), bind(3)))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        key: Some(Arc::new(users().attr("id"))),
        ..DeleteStatement::new(join_source(
            users(),
            vec![inner_join(posts.clone(), eq(posts.attr("user_id"), users().attr("id")))],
        ))
    };
    let compiled = stmt.compile_with_dialect(Dialect::MySQL).unwrap();
    assert_eq!(
        compiled.sql,
        "DELETE FROM `users` WHERE (`users`.`id`) IN (SELECT `id` FROM (SELECT `users`.`id` FROM `users` \
         INNER JOIN `posts` ON `posts`.`user_id` = `users`.`id` WHERE `posts`.`id` = ? LIMIT 10) AS __relsql_temp)"
    );
    assert_eq!(compiled.binds, vec![Value::Int(3)]);
}

#[test]
fn test_mysql_update_limit_without_rewrite() {
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("name"), Node::Value(Value::from("x"))))],
        orders: vec![Arc::new(asc(users().attr("id")))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        key: Some(Arc::new(users().attr("id"))),
        ..UpdateStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "UPDATE `users` SET `name` = 'x' ORDER BY `users`.`id` ASC LIMIT 10"
    );
}

// ============= PostgreSQL =============

#[test]
fn test_postgres_placeholders() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .filter(eq(users().attr("id"), bind(1)))
            .filter(eq(users().attr("name"), bind("bob"))),
    );
    let compiled = stmt.compile_with_dialect(Dialect::Postgres).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"users\" WHERE \"users\".\"id\" = $1 AND \"users\".\"name\" = $2"
    );
    assert_eq!(compiled.binds, vec![Value::Int(1), Value::from("bob")]);
}

#[test]
fn test_postgres_ilike_and_regexp() {
    let node = matches(users().attr("name"), quoted("%bob%"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "\"users\".\"name\" ILIKE '%bob%'"
    );
    let node = matches_with(users().attr("name"), quoted("%Bob%"), None, true, true);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "\"users\".\"name\" NOT LIKE '%Bob%'"
    );

    let node = regexp(users().attr("name"), quoted("^b"), false);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "\"users\".\"name\" ~* '^b'"
    );
    let node = not_regexp(users().attr("name"), quoted("^b"), true);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "\"users\".\"name\" !~ '^b'"
    );
}

#[test]
fn test_postgres_distinct_on() {
    let stmt = SelectStatement::new(SelectCore::from_table(users()).distinct_on(users().attr("email")));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "SELECT DISTINCT ON ( \"users\".\"email\" ) * FROM \"users\""
    );
}

#[test]
fn test_postgres_distinct_from() {
    let node = is_distinct_from(users().attr("a"), bind(1));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "\"users\".\"a\" IS DISTINCT FROM $1"
    );
}

#[test]
fn test_postgres_update_from() {
    let orgs = Table::new("orgs");
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("active"), Node::False))],
        wheres: vec![Arc::new(eq(orgs.attr("name"), bind("acme")))],
        ..UpdateStatement::new(join_source(
            users(),
            vec![inner_join(orgs.clone(), eq(orgs.attr("id"), users().attr("org_id")))],
        ))
    };
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Postgres).unwrap(),
        "UPDATE \"users\" SET \"active\" = FALSE FROM \"orgs\" \
         WHERE \"orgs\".\"id\" = \"users\".\"org_id\" AND \"orgs\".\"name\" = $1"
    );
}

// ============= SQLite =============

#[test]
fn test_sqlite_booleans_and_offset() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).filter(eq(users().attr("active"), Node::True)),
    )
    .offset(5);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "SELECT * FROM \"users\" WHERE \"users\".\"active\" = 1 LIMIT -1 OFFSET 5"
    );
}

#[test]
fn test_sqlite_drops_lock() {
    let stmt = SelectStatement::from_table(users()).limit(1).lock(None);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "SELECT * FROM \"users\" LIMIT 1"
    );
}

#[test]
fn test_sqlite_flat_set_operations() {
    let a = SelectStatement::from_table(Table::new("a"));
    let b = SelectStatement::from_table(Table::new("b"));
    let c = SelectStatement::from_table(Table::new("c"));
    let node = intersect(intersect(a, b), c);
    assert_eq!(
        node.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "( SELECT * FROM \"a\" INTERSECT SELECT * FROM \"b\" INTERSECT SELECT * FROM \"c\" )"
    );
}

#[test]
fn test_sqlite_distinct_from() {
    let node = is_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "\"users\".\"a\" IS NOT \"users\".\"b\""
    );
}

// ============= Oracle =============

#[test]
fn test_oracle_limit_becomes_rownum_filter() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).filter(eq(users().attr("id"), bind(1))),
    )
    .limit(10);
    let compiled = stmt.compile_with_dialect(Dialect::Oracle).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"users\" WHERE \"users\".\"id\" = :a1 AND ROWNUM <= 10"
    );
}

#[test]
fn test_oracle_ordered_limit_is_wrapped() {
    let stmt = paged(Some(10), None);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "SELECT * FROM (SELECT * FROM \"users\" ORDER BY \"users\".\"id\" ASC) WHERE ROWNUM <= 10"
    );
}

#[test]
fn test_oracle_limit_and_offset() {
    let stmt = paged(Some(10), Some(5));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT * FROM \"users\" \
         ORDER BY \"users\".\"id\" ASC) raw_sql_ WHERE rownum <= 15) WHERE raw_rnum_ > 5"
    );
}

#[test]
fn test_oracle_bound_limit_and_offset() {
    let stmt = SelectStatement::from_table(users())
        .limit_node(bind(10))
        .offset_node(bind(5));
    let compiled = stmt.compile_with_dialect(Dialect::Oracle).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT * FROM \"users\") raw_sql_ \
         WHERE rownum <= (:a1 + :a2)) WHERE raw_rnum_ > :a3"
    );
    assert_eq!(compiled.binds, vec![Value::Int(5), Value::Int(10), Value::Int(5)]);
}

#[test]
fn test_oracle_offset_only() {
    let stmt = SelectStatement::from_table(users()).offset(5);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT * FROM \"users\") raw_sql_) \
         WHERE raw_rnum_ > 5"
    );
}

#[test]
fn test_oracle_first_value_orders_use_aliases() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).project(sql(
            "FIRST_VALUE(\"users\".\"name\") OVER (ORDER BY \"users\".\"created_at\" DESC) AS alias_0__",
        )),
    )
    .order(desc(users().attr("created_at")));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "SELECT FIRST_VALUE(\"users\".\"name\") OVER (ORDER BY \"users\".\"created_at\" DESC) AS alias_0__ \
         FROM \"users\" ORDER BY alias_0__ DESC"
    );
}

#[test]
fn test_oracle_except_is_minus() {
    let node = except(
        SelectStatement::from_table(Table::new("a")),
        SelectStatement::from_table(Table::new("b")),
    );
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "( SELECT * FROM \"a\" MINUS SELECT * FROM \"b\" )"
    );
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Oracle12).unwrap(),
        "( SELECT * FROM \"a\" MINUS SELECT * FROM \"b\" )"
    );
}

#[test]
fn test_oracle_distinct_from_uses_decode() {
    let node = is_not_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "DECODE(\"users\".\"a\", \"users\".\"b\", 0, 1) = 0"
    );
    let node = is_distinct_from(users().attr("a"), quoted(Value::Null));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "\"users\".\"a\" IS NOT NULL"
    );
}

#[test]
fn test_oracle_in_list_is_sliced() {
    let values: Vec<Node> = (1..=2500).map(quoted).collect();
    let sql = in_list(users().attr("id"), values)
        .to_sql_with_dialect(Dialect::Oracle)
        .unwrap();
    assert!(sql.starts_with("(\"users\".\"id\" IN (1, 2, "));
    assert_eq!(sql.matches(" IN (").count(), 3);
    assert_eq!(sql.matches(") OR \"users\".\"id\" IN (").count(), 2);
    assert!(sql.contains("1000) OR \"users\".\"id\" IN (1001, "));
    assert!(sql.ends_with("2500))"));

    let sql = not_in_list(users().attr("id"), (1..=1001).map(quoted).collect::<Vec<_>>())
        .to_sql_with_dialect(Dialect::Oracle12)
        .unwrap();
    assert!(sql.contains("1000) AND \"users\".\"id\" NOT IN (1001)"));
}

#[test]
fn test_oracle_update_drops_order_without_limit() {
    let stmt = UpdateStatement {
        values: vec![Arc::new(assign(column("name"), Node::Value(Value::from("x"))))],
        orders: vec![Arc::new(asc(users().attr("id")))],
        ..UpdateStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle).unwrap(),
        "UPDATE \"users\" SET \"name\" = 'x'"
    );
    assert_eq!(
        stmt.to_sql().unwrap(),
        "UPDATE \"users\" SET \"name\" = 'x' ORDER BY \"users\".\"id\" ASC"
    );
}

#[test]
fn test_oracle12_fetch_first() {
    let stmt = paged(Some(10), Some(5));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle12).unwrap(),
        "SELECT * FROM \"users\" ORDER BY \"users\".\"id\" ASC OFFSET 5 ROWS FETCH FIRST 10 ROWS ONLY"
    );
}

#[test]
fn test_oracle12_limit_with_lock_rejected() {
    let stmt = SelectStatement::from_table(users()).limit(1).lock(None);
    let err = stmt.to_sql_with_dialect(Dialect::Oracle12).unwrap_err();
    assert!(matches!(err, CompileError::InvalidCombination(_)));

    let stmt = SelectStatement::from_table(users()).lock(None);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Oracle12).unwrap(),
        "SELECT * FROM \"users\" FOR UPDATE"
    );
}

// ============= SQL Server =============

#[test]
fn test_sqlserver_row_number_pagination() {
    let stmt = paged(Some(10), Some(5));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT _t.* FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [users].[id] ASC) as _row_num \
         FROM [users]) as _t WHERE _row_num BETWEEN 6 AND 15"
    );

    let stmt = paged(None, Some(5));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT _t.* FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [users].[id] ASC) as _row_num \
         FROM [users]) as _t WHERE _row_num >= 6"
    );
}

#[test]
fn test_sqlserver_row_bounds_out_of_range() {
    let stmt = paged(Some(i64::MAX), Some(5));
    let err = stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue(_)));

    let stmt = paged(None, Some(i64::MAX));
    let err = stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap_err();
    assert!(matches!(err, CompileError::InvalidValue(_)));

    let stmt = paged(Some(i64::MAX), None);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        format!(
            "SELECT _t.* FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [users].[id] ASC) as _row_num \
             FROM [users]) as _t WHERE _row_num BETWEEN 1 AND {}",
            i64::MAX
        )
    );
}

#[test]
fn test_sqlserver_unpaged_select_is_plain() {
    let stmt = SelectStatement::from_table(users()).order(asc(users().attr("id")));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT * FROM [users] ORDER BY [users].[id] ASC"
    );
}

#[test]
fn test_sqlserver_orders_by_group_when_unordered() {
    let stmt = SelectStatement::new(
        SelectCore::from_table(users())
            .project(users().attr("org_id"))
            .group(users().attr("org_id")),
    )
    .limit(10);
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT _t.* FROM (SELECT [users].[org_id], ROW_NUMBER() OVER (ORDER BY [users].[org_id]) as _row_num \
         FROM [users] GROUP BY [users].[org_id]) as _t WHERE _row_num BETWEEN 1 AND 10"
    );
}

#[test]
fn test_sqlserver_needs_an_ordering() {
    let stmt = SelectStatement::from_table(users()).limit(10);
    let err = stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap_err();
    assert!(matches!(err, CompileError::InvalidCombination(_)));
}

#[test]
fn test_sqlserver_primary_key_ordering() {
    let generator = SqlServerGenerator::new()
        .with_schema(Arc::new(StaticSchema::new().with_key("users", "id")));
    let stmt = SelectStatement::new(SelectCore::from_table(users()).project(count(vec![sql("*")]))).limit(10);
    let compiled = generator.compile(&Node::SelectStatement(stmt)).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT COUNT(1) as count_id FROM (SELECT _t.* FROM (SELECT ROW_NUMBER() OVER (ORDER BY [users].[id]) \
         as _row_num FROM [users]) as _t WHERE _row_num BETWEEN 1 AND 10) AS subquery"
    );
}

#[test]
fn test_sqlserver_delete_top() {
    let stmt = DeleteStatement {
        wheres: vec![Arc::new(eq(users().attr("id"), bind(1)))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        ..DeleteStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "DELETE TOP (10) FROM [users] WHERE [users].[id] = ?"
    );
}

#[test]
fn test_sqlserver_delete_top_drops_order() {
    let stmt = DeleteStatement {
        orders: vec![Arc::new(asc(users().attr("id")))],
        limit: Some(Arc::new(unary(UnaryOp::Limit, Node::Value(Value::Int(10))))),
        ..DeleteStatement::new(users())
    };
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "DELETE TOP (10) FROM [users]"
    );
}

#[test]
fn test_sqlserver_distinct_from_and_hints() {
    let node = is_not_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "EXISTS (VALUES ([users].[a]) INTERSECT VALUES ([users].[b]))"
    );
    let node = is_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "NOT EXISTS (VALUES ([users].[a]) INTERSECT VALUES ([users].[b]))"
    );

    let stmt = SelectStatement::new(SelectCore::from_table(users()).optimizer_hints(["HASH JOIN"]));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT * FROM [users] OPTION (HASH JOIN)"
    );
}

// ============= DB2 =============

#[test]
fn test_db2_pagination_and_hints() {
    let stmt = paged(Some(10), Some(5));
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Db2).unwrap(),
        "SELECT * FROM \"users\" ORDER BY \"users\".\"id\" ASC OFFSET 5 ROWS FETCH FIRST 10 ROWS ONLY"
    );

    let stmt = SelectStatement::new(
        SelectCore::from_table(users()).optimizer_hints(["<IXSCAN TABLE='users'/>"]),
    );
    assert_eq!(
        stmt.to_sql_with_dialect(Dialect::Db2).unwrap(),
        "SELECT * FROM \"users\" /* <OPTGUIDELINES><IXSCAN TABLE='users'/></OPTGUIDELINES> */"
    );
}

#[test]
fn test_db2_distinct_from_uses_decode() {
    let node = is_distinct_from(users().attr("a"), users().attr("b"));
    assert_eq!(
        node.to_sql_with_dialect(Dialect::Db2).unwrap(),
        "DECODE(\"users\".\"a\", \"users\".\"b\", 0, 1) = 1"
    );
}
