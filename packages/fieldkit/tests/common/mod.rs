#![allow(dead_code)]

use std::fmt;

use fieldkit::{Tracked, TreeLike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub active: bool,
}

pub fn person(name: &str, age: i64, active: bool) -> Person {
    Person {
        name: name.to_string(),
        age,
        active,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub kind: String,
    pub weight: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub zip: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub address: Address,
}

pub fn jane() -> Customer {
    Customer {
        name: "Jane".into(),
        address: Address {
            city: "Paris".into(),
            zip: 12345,
        },
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub age: i64,
    pub tags: Vec<String>,
}

pub fn alice_smith() -> Dog {
    Dog {
        name: "Alice Smith".into(),
        age: 34,
        tags: vec!["engineer".into(), "swift".into()],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub value: i64,
    pub children: Vec<Node>,
}

impl TreeLike for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub fn node(value: i64, children: Vec<Node>) -> Node {
    Node { value, children }
}

/// `1 -> [2, 3 -> [5], 4]`
pub fn sample_tree() -> Node {
    node(
        1,
        vec![node(2, vec![]), node(3, vec![node(5, vec![])]), node(4, vec![])],
    )
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUp {
    pub email: Tracked<String>,
    pub password: Tracked<String>,
    pub remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedItem {
    Text(String),
    Image { url: String, caption: Option<String> },
    Divider,
}
