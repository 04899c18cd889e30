use std::thread;

use sqlcompose::prelude::*;
use sqlcompose::{Clause, frag_static};

sqlcompose::table! {
    struct Users("users") { id, name }
}

const SELECT_FROM: &str = r#"SELECT "users"."id", "users"."name" FROM "users""#;

fn sql(rest: &str) -> String {
    format!("{SELECT_FROM}{rest}")
}

#[test]
fn select_with_literals() {
    let query = compose(|q| {
        q.select([frag(r#""users"."id""#), frag(r#""users"."name""#)]);
        q.from(frag(r#""users""#));
    })
    .unwrap();
    assert_eq!(SELECT_FROM, query.to_sql().unwrap());
}

#[test]
fn select_with_literals_in_where() {
    let query = compose(|q| {
        q.select([frag(r#""users"."id""#), frag(r#""users"."name""#)]);
        q.from(frag(r#""users""#));
        q.where_equals(frag(r#""users"."name""#), "Jane");
    })
    .unwrap();
    assert_eq!(sql(r#" WHERE "users"."name" = 'Jane'"#), query.to_sql().unwrap());
}

#[test]
fn select_inline_syntax() {
    let query = select([frag_static(r#""users"."id""#), frag_static(r#""users"."name""#)])
        .from(frag_static(r#""users""#))
        .build()
        .unwrap();
    assert_eq!(SELECT_FROM, query.to_sql().unwrap());
}

#[test]
fn select_without_where() {
    let users = Users;
    let query = compose(|q| {
        q.select([users.id(), users.name()]);
        q.from(users.table());
    })
    .unwrap();
    assert_eq!(SELECT_FROM, query.to_sql().unwrap());
}

#[test]
fn select_with_where() {
    let users = Table::new("users");
    let query = compose(|q| {
        q.select([users.col("id"), users.col("name")]);
        q.from(users.table());
        q.where_(users.col("name").equals("Jane"));
    })
    .unwrap();
    assert_eq!(sql(r#" WHERE "users"."name" = 'Jane'"#), query.to_sql().unwrap());
}

#[test]
fn select_with_where_and_two_conditions() {
    let users = Users;
    let query = compose(|q| {
        q.select([users.id(), users.name()]);
        q.from(users.table());
        q.where_(users.name().equals("Jane").or(users.name().equals("Jade")));
    })
    .unwrap();
    assert_eq!(
        sql(r#" WHERE ("users"."name" = 'Jane') OR ("users"."name" = 'Jade')"#),
        query.to_sql().unwrap()
    );
}

#[test]
fn select_with_dynamic_where() {
    let users = Users;
    let query = compose(|q| {
        q.select([users.id(), users.name()]);
        q.from(users.table());
        q.where_(users.name().equals("%name%"));
    })
    .unwrap();

    assert_eq!(
        Err(Error::UnboundPlaceholder("name".into())),
        query.to_sql()
    );
    assert_eq!(
        sql(r#" WHERE "users"."name" = 'Jane'"#),
        query.set("name", "Jane").to_sql().unwrap()
    );
}

#[test]
fn select_with_order() {
    let users = Users;
    let query = compose(|q| {
        q.select([users.id(), users.name()]);
        q.from(users.table());
        q.where_(users.name().equals("Jane"));
        q.order_by(users.id().desc());
    })
    .unwrap();
    assert_eq!(
        sql(r#" WHERE "users"."name" = 'Jane' ORDER BY "users"."id" DESC"#),
        query.to_sql().unwrap()
    );
}

#[test]
fn authoring_styles_build_the_same_statement() {
    let users = Users;
    let by_handle = select([users.id(), users.name()])
        .from(users.table())
        .where_(users.name().equals("Jane").or(users.name().equals("Jade")))
        .order_by(users.id().desc())
        .build()
        .unwrap();
    let by_fragment = compose(|q| {
        q.select([frag(r#""users"."id""#), frag(r#""users"."name""#)]);
        q.from(frag(r#""users""#));
        q.where_equals(frag(r#""users"."name""#), "Jane");
        q.or_where_equals(frag(r#""users"."name""#), "Jade");
        q.order_by((frag(r#""users"."id""#), Direction::Desc));
    })
    .unwrap();

    assert_eq!(by_handle, by_fragment);
    assert_eq!(by_handle.to_sql().unwrap(), by_fragment.to_sql().unwrap());
}

#[test]
fn declarative_and_chained_render_identically() {
    let users = Users;
    let declarative = compose(|q| {
        q.select([users.id(), users.name()]);
        q.from(users.table());
        q.where_(users.name().equals("%name%"));
        q.order_by(users.id().desc());
    })
    .unwrap();
    let chained = select([users.id(), users.name()])
        .from(users.table())
        .where_(users.name().equals("%name%"))
        .order_by(users.id().desc())
        .build()
        .unwrap();

    let bindings = Bindings::from([("name", "Jane")]);
    assert_eq!(
        declarative.bind(&bindings).to_sql().unwrap(),
        chained.bind(&bindings).to_sql().unwrap()
    );
}

#[test]
fn binding_is_idempotent() {
    let users = Users;
    let template = select(users.id())
        .from(users)
        .where_(users.name().equals("%name%"))
        .build()
        .unwrap();
    let bindings = Bindings::new().set("name", "Jane");
    let once = bind(&template, &bindings);
    let twice = bind(&once, &bindings);
    assert_eq!(once.to_sql().unwrap(), twice.to_sql().unwrap());
    assert_eq!(once, twice);
}

#[test]
fn template_is_reusable() {
    let users = Users;
    let template = select([users.id(), users.name()])
        .from(users)
        .where_(users.name().equals("%name%"))
        .build()
        .unwrap();
    let snapshot = template.clone();

    let jane = template.set("name", "Jane").to_sql().unwrap();
    let jade = template.set("name", "Jade").to_sql().unwrap();
    assert_ne!(jane, jade);
    assert_eq!(sql(r#" WHERE "users"."name" = 'Jade'"#), jade);

    assert_eq!(snapshot, template);
    assert!(template.to_sql().unwrap_err().is_unbound());
    assert_eq!(jane, template.set("name", "Jane").to_sql().unwrap());
}

#[test]
fn incremental_binding() {
    let users = Users;
    let template = select(users.id())
        .from(users)
        .where_(users.name().equals("%first%").or(users.id().equals("%id%")))
        .build()
        .unwrap();

    let first = template.set("first", "Jane");
    assert!(first.to_sql().is_err());
    let closed = first.set("id", 7);
    assert!(closed.is_closed());
    assert_eq!(
        r#"SELECT "users"."id" FROM "users" WHERE ("users"."name" = 'Jane') OR ("users"."id" = 7)"#,
        closed.to_sql().unwrap()
    );
    assert_eq!(
        Err(Error::UnboundPlaceholder("id".into())),
        first.to_sql()
    );
}

#[test]
fn precedence_is_kept_when_nesting() {
    let a = Table::new("t").col("A");
    let cond = a
        .clone()
        .equals("x")
        .or(a.clone().equals("y"))
        .or(a.equals("z"));
    let query = select(Table::new("t").col("A"))
        .from("t")
        .where_(cond)
        .build()
        .unwrap();
    assert_eq!(
        r#"SELECT "t"."A" FROM "t" WHERE (("t"."A" = 'x') OR ("t"."A" = 'y')) OR ("t"."A" = 'z')"#,
        query.to_sql().unwrap()
    );
}

#[test]
fn string_literals_are_escaped() {
    let users = Users;
    let query = select(users.id())
        .from(users)
        .where_(users.name().equals("O'Brien"))
        .build()
        .unwrap();
    assert!(query.to_sql().unwrap().ends_with(r#"WHERE "users"."name" = 'O''Brien'"#));
}

#[test]
fn build_errors_surface() {
    let users = Users;
    assert_eq!(
        Err(Error::IncompleteStatement(Clause::From)),
        select(users.id()).build()
    );
    assert_eq!(
        Err(Error::ConflictingClause(Clause::Where)),
        select(users.id())
            .from(users)
            .where_(users.id().equals(1))
            .where_(users.id().equals(2))
            .build()
    );
    assert!(matches!(
        compose(|q| {
            q.select(frag(r#""users"."id"#));
            q.from("users");
        }),
        Err(Error::MalformedFragment { .. })
    ));
}

#[test]
fn templates_bind_concurrently() {
    let users = Users;
    let template = select([users.id(), users.name()])
        .from(users)
        .where_(users.name().equals("%name%"))
        .build()
        .unwrap();

    let names = ["Ann", "Bob", "Cy", "Dee"];
    let rendered: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let template = &template;
                scope.spawn(move || template.set("name", *name).to_sql().unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (name, sql_text) in names.iter().zip(rendered) {
        assert_eq!(sql(&format!(r#" WHERE "users"."name" = '{name}'"#)), sql_text);
    }
    assert!(!template.is_closed());
}
