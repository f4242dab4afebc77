use crate::ast::Statement;
use crate::environment::Environment;
use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    MonkeyString(String),
    Boolean(bool),
    ArrayObject(Vec<Rc<Object>>),
    // hash key -> (original key object, value object)
    HashObject(HashMap<u64, (Rc<Object>, Rc<Object>)>),
    Function {
        parameters: Vec<String>,
        body: Rc<Statement>,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(Builtin),
    ReturnValue(Rc<Object>),
    Error(String),
    Null,
}

impl Object {
    pub fn calculate_hash(&self) -> Result<u64> {
        let mut s = DefaultHasher::new();
        mem::discriminant(self).hash(&mut s);
        match self {
            Object::Integer(val) => {
                val.hash(&mut s);
            }
            Object::MonkeyString(val) => {
                val.hash(&mut s);
            }
            Object::Boolean(val) => {
                val.hash(&mut s);
            }
            obj => {
                bail!("unusable as hash key: {}", obj.r#type());
            }
        }
        Ok(s.finish())
    }
}

impl Object {
    pub fn r#type(&self) -> &'static str {
        use Object::*;
        match self {
            Integer(..) => "INTEGER",
            MonkeyString(..) => "STRING",
            Boolean(..) => "BOOLEAN",
            ArrayObject(..) => "ARRAY",
            HashObject(..) => "HASH",
            Function { .. } => "FUNCTION",
            Builtin(..) => "BUILTIN",
            ReturnValue(..) => "RETURN_VALUE",
            Error(..) => "ERROR",
            Null => "NULL",
        }
    }
}

// the Inspect form
impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Object::*;
        match self {
            Integer(value) => {
                write!(f, "{}", value)
            }
            MonkeyString(value) => {
                write!(f, "{}", value)
            }
            Boolean(value) => {
                write!(f, "{}", value)
            }
            ArrayObject(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            HashObject(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Function {
                parameters, body, ..
            } => {
                write!(f, "fn({}) {{\n{}\n}}", parameters.join(", "), body)
            }
            Builtin(..) => {
                write!(f, "builtin function")
            }
            ReturnValue(value) => {
                write!(f, "{}", value)
            }
            Error(message) => {
                write!(f, "ERROR: {}", message)
            }
            Null => {
                write!(f, "null")
            }
        }
    }
}

// a function value is cyclic through its captured environment, so Debug
// elides the environment and PartialEq compares by identity
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Object::*;
        match self {
            Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            MonkeyString(value) => f.debug_tuple("MonkeyString").field(value).finish(),
            Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            ArrayObject(elements) => f.debug_tuple("ArrayObject").field(elements).finish(),
            HashObject(pairs) => f.debug_tuple("HashObject").field(pairs).finish(),
            Function {
                parameters, body, ..
            } => f
                .debug_struct("Function")
                .field("parameters", parameters)
                .field("body", body)
                .finish(),
            Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            ReturnValue(value) => f.debug_tuple("ReturnValue").field(value).finish(),
            Error(message) => f.debug_tuple("Error").field(message).finish(),
            Null => write!(f, "Null"),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        use Object::*;
        match (self, other) {
            (Integer(l), Integer(r)) => l == r,
            (MonkeyString(l), MonkeyString(r)) => l == r,
            (Boolean(l), Boolean(r)) => l == r,
            (ArrayObject(l), ArrayObject(r)) => l == r,
            (HashObject(l), HashObject(r)) => l == r,
            (
                Function {
                    body: lb, env: le, ..
                },
                Function {
                    body: rb, env: re, ..
                },
            ) => Rc::ptr_eq(lb, rb) && Rc::ptr_eq(le, re),
            (Builtin(l), Builtin(r)) => l == r,
            (ReturnValue(l), ReturnValue(r)) => l == r,
            (Error(l), Error(r)) => l == r,
            (Null, Null) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

pub const BUILTINS: [Builtin; 6] = [
    Builtin::Len,
    Builtin::First,
    Builtin::Last,
    Builtin::Rest,
    Builtin::Push,
    Builtin::Puts,
];

impl Builtin {
    pub fn name(self) -> &'static str {
        use Builtin::*;
        match self {
            Len => "len",
            First => "first",
            Last => "last",
            Rest => "rest",
            Push => "push",
            Puts => "puts",
        }
    }
}
