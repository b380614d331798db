//! Shared test entity used by the integration suites.
#![allow(dead_code)]

use natq::prelude::*;

///
/// TestModel
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestModel {
    pub id: Ulid,
    pub foo: i64,
    pub bar: i64,
    pub name: String,
    pub created: Date,
    pub seen: Timestamp,
}

impl TestModel {
    pub fn new(foo: i64) -> Self {
        Self {
            foo,
            bar: foo * 10,
            name: format!("record {foo}"),
            created: Date::new(2024, 3, 9),
            seen: Timestamp::from_seconds(1_710_013_530),
            ..Self::default()
        }
    }
}

pub const FOO: FieldExpr = FieldExpr::new("foo");
pub const BAR: FieldExpr = FieldExpr::new("bar");
pub const NAME: FieldExpr = FieldExpr::new("name");
pub const PK: PkFieldExpr = PkFieldExpr::new();
pub static CREATED: DateFieldExpr = DateFieldExpr::new("created");
pub static SEEN: DateTimeFieldExpr = DateTimeFieldExpr::new("seen");

impl Path for TestModel {
    const PATH: &'static str = "tests::TestModel";
}

impl EntityKind for TestModel {
    fn schema() -> ModelSchema {
        ModelSchema::new(Self::PATH, "test_model")
            .with_field("foo", FieldKind::Int)
            .with_field("bar", FieldKind::Int)
            .with_field("name", FieldKind::Text)
            .with_field("created", FieldKind::Date)
            .with_field("seen", FieldKind::Timestamp)
    }
}

impl EntityIdentity for TestModel {
    fn id(&self) -> Ulid {
        self.id
    }

    fn set_id(&mut self, id: Ulid) {
        self.id = id;
    }
}

impl FieldValues for TestModel {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Ulid(self.id)),
            "foo" => Some(Value::Int(self.foo)),
            "bar" => Some(Value::Int(self.bar)),
            "name" => Some(Value::Text(self.name.clone())),
            "created" => Some(Value::Date(self.created)),
            "seen" => Some(Value::Timestamp(self.seen)),
            _ => None,
        }
    }
}

impl FieldWrite for TestModel {
    fn set_value(&mut self, field: &str, value: &Value) -> bool {
        match field {
            "id" => write_into(&mut self.id, value),
            "foo" => write_into(&mut self.foo, value),
            "bar" => write_into(&mut self.bar, value),
            "name" => write_into(&mut self.name, value),
            "created" => write_into(&mut self.created, value),
            "seen" => write_into(&mut self.seen, value),
            _ => false,
        }
    }
}

fn write_into<T: FieldValue>(slot: &mut T, value: &Value) -> bool {
    match T::from_value(value) {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Store seeded with records valued foo = 1, 2, 3.
pub fn seeded_store() -> Store<TestModel> {
    let mut store = Store::new();
    for foo in 1..=3 {
        store.insert(TestModel::new(foo));
    }

    store
}
