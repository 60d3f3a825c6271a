use crate::{
    row::{MaterializeError, Row, materialize_related},
    schema::{EntityDescriptor, ScalarKind},
    sql::WriteError,
    traits::{Entity, relation_key},
    value::{CoerceError, Value},
};
use std::sync::OnceLock;

fn conversion(field: &str, source: CoerceError) -> MaterializeError {
    MaterializeError::TypeConversion {
        field: field.to_string(),
        source,
    }
}

fn untracked(entity: &'static str, field: &str) -> MaterializeError {
    MaterializeError::UntrackedField {
        entity,
        field: field.to_string(),
    }
}

fn opt_i64(field: &str, value: Value) -> Result<Option<i64>, MaterializeError> {
    value
        .opt()
        .map(Value::into_i64)
        .transpose()
        .map_err(|source| conversion(field, source))
}

fn opt_i32(field: &str, value: Value) -> Result<Option<i32>, MaterializeError> {
    value
        .opt()
        .map(Value::into_i32)
        .transpose()
        .map_err(|source| conversion(field, source))
}

fn opt_text(field: &str, value: Value) -> Result<Option<String>, MaterializeError> {
    value
        .opt()
        .map(Value::into_text)
        .transpose()
        .map_err(|source| conversion(field, source))
}

///
/// Role
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Role {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Entity for Role {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: OnceLock<EntityDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::builder("Role", "tb_role")
                .key("id", ScalarKind::BigInt)
                .scalar("name", ScalarKind::Text)
                .build()
                .expect("static descriptor")
        })
    }

    fn value(&self, field: &str) -> Result<Value, WriteError> {
        match field {
            "id" => Ok(self.id.into()),
            "name" => Ok(self.name.clone().into()),
            _ => Err(WriteError::UntrackedField {
                entity: "Role",
                field: field.to_string(),
            }),
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), MaterializeError> {
        match field {
            "id" => self.id = opt_i64(field, value)?,
            "name" => self.name = opt_text(field, value)?,
            _ => return Err(untracked("Role", field)),
        }
        Ok(())
    }

    fn hydrate_relation(
        &mut self,
        field: &str,
        _row: &Row,
        _alias: &str,
    ) -> Result<(), MaterializeError> {
        Err(untracked("Role", field))
    }
}

///
/// User
///
/// The richest demo entity: scalar spread plus two many-to-one relations.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub role: Option<Role>,
    pub dept: Option<Dept>,
}

impl Entity for User {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: OnceLock<EntityDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::builder("User", "tb_user")
                .key("id", ScalarKind::BigInt)
                .scalar("username", ScalarKind::Text)
                .scalar("password", ScalarKind::Text)
                .scalar("phone_number", ScalarKind::Text)
                .scalar("name", ScalarKind::Text)
                .scalar("age", ScalarKind::Int)
                .scalar("city", ScalarKind::Text)
                .relation("role", Role::descriptor)
                .relation("dept", Dept::descriptor)
                .build()
                .expect("static descriptor")
        })
    }

    fn value(&self, field: &str) -> Result<Value, WriteError> {
        match field {
            "id" => Ok(self.id.into()),
            "username" => Ok(self.username.clone().into()),
            "password" => Ok(self.password.clone().into()),
            "phone_number" => Ok(self.phone_number.clone().into()),
            "name" => Ok(self.name.clone().into()),
            "age" => Ok(self.age.into()),
            "city" => Ok(self.city.clone().into()),
            "role" => relation_key(self.role.as_ref(), "User", "role"),
            "dept" => relation_key(self.dept.as_ref(), "User", "dept"),
            _ => Err(WriteError::UntrackedField {
                entity: "User",
                field: field.to_string(),
            }),
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), MaterializeError> {
        match field {
            "id" => self.id = opt_i64(field, value)?,
            "username" => self.username = opt_text(field, value)?,
            "password" => self.password = opt_text(field, value)?,
            "phone_number" => self.phone_number = opt_text(field, value)?,
            "name" => self.name = opt_text(field, value)?,
            "age" => self.age = opt_i32(field, value)?,
            "city" => self.city = opt_text(field, value)?,
            _ => return Err(untracked("User", field)),
        }
        Ok(())
    }

    fn hydrate_relation(
        &mut self,
        field: &str,
        row: &Row,
        alias: &str,
    ) -> Result<(), MaterializeError> {
        match field {
            "role" => {
                self.role = Some(materialize_related::<Role>(row, alias)?);
                Ok(())
            }
            "dept" => {
                self.dept = Some(materialize_related::<Dept>(row, alias)?);
                Ok(())
            }
            _ => Err(untracked("User", field)),
        }
    }
}

///
/// Company
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Company {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Entity for Company {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: OnceLock<EntityDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::builder("Company", "tb_company")
                .key("id", ScalarKind::BigInt)
                .scalar("name", ScalarKind::Text)
                .build()
                .expect("static descriptor")
        })
    }

    fn value(&self, field: &str) -> Result<Value, WriteError> {
        match field {
            "id" => Ok(self.id.into()),
            "name" => Ok(self.name.clone().into()),
            _ => Err(WriteError::UntrackedField {
                entity: "Company",
                field: field.to_string(),
            }),
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), MaterializeError> {
        match field {
            "id" => self.id = opt_i64(field, value)?,
            "name" => self.name = opt_text(field, value)?,
            _ => return Err(untracked("Company", field)),
        }
        Ok(())
    }

    fn hydrate_relation(
        &mut self,
        field: &str,
        _row: &Row,
        _alias: &str,
    ) -> Result<(), MaterializeError> {
        Err(untracked("Company", field))
    }
}

///
/// Dept
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dept {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub company: Option<Company>,
}

impl Entity for Dept {
    fn descriptor() -> &'static EntityDescriptor {
        static DESCRIPTOR: OnceLock<EntityDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::builder("Dept", "tb_dept")
                .key("id", ScalarKind::BigInt)
                .scalar("name", ScalarKind::Text)
                .relation("company", Company::descriptor)
                .build()
                .expect("static descriptor")
        })
    }

    fn value(&self, field: &str) -> Result<Value, WriteError> {
        match field {
            "id" => Ok(self.id.into()),
            "name" => Ok(self.name.clone().into()),
            "company" => relation_key(self.company.as_ref(), "Dept", "company"),
            _ => Err(WriteError::UntrackedField {
                entity: "Dept",
                field: field.to_string(),
            }),
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), MaterializeError> {
        match field {
            "id" => self.id = opt_i64(field, value)?,
            "name" => self.name = opt_text(field, value)?,
            _ => return Err(untracked("Dept", field)),
        }
        Ok(())
    }

    fn hydrate_relation(
        &mut self,
        field: &str,
        row: &Row,
        alias: &str,
    ) -> Result<(), MaterializeError> {
        match field {
            "company" => {
                self.company = Some(materialize_related::<Company>(row, alias)?);
                Ok(())
            }
            _ => Err(untracked("Dept", field)),
        }
    }
}
