//! The painting record

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A painting: a title and the year it was made.
///
/// There is no identifier. Both fields are nullable on the wire: a `null`
/// or missing title stays absent, a `null` or missing year reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Painting {
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_zero")]
    pub year_made: i32,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

impl Painting {
    pub fn new(title: impl Into<String>, year_made: i32) -> Self {
        Self {
            title: Some(title.into()),
            year_made,
        }
    }
}

impl fmt::Display for Painting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(
                f,
                "Painting{{title='{}', year_made={}}}",
                title, self.year_made
            ),
            None => write!(f, "Painting{{title=null, year_made={}}}", self.year_made),
        }
    }
}
