use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ID_FIELD: &str = "id";

/// Flat JSON object looked up by its `id`; every other field is opaque.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Picture(Map<String, Value>);

impl Picture {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Floats with an integral value count as that integer, so `1.0` is found as `1`.
    pub fn id(&self) -> Option<i64> {
        let id = self.0.get(ID_FIELD)?;
        id.as_i64().or_else(|| {
            let f = id.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f as i64)
        })
    }

    pub fn set_id(&mut self, id: i64) {
        self.0.insert(ID_FIELD.to_owned(), Value::from(id));
    }

    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            self.0.insert(key, value);
        }
    }
}

impl From<Picture> for Value {
    fn from(picture: Picture) -> Self {
        Value::Object(picture.0)
    }
}
