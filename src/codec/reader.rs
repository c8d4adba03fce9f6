use indexmap::IndexMap;

use super::types::{Choice, Coordinates};
use crate::error::{Error, Result};

/// Raw attribute values collected for one object (`TAG -> [values]`)
///
/// Every typed accessor takes the value index (almost always 0), the
/// attribute name, and whether the attribute is required. An absent optional
/// attribute yields the type's zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectAttributes {
    fields: IndexMap<String, Vec<String>>,
}

impl ObjectAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the values for `tag`, replacing any earlier ones.
    pub fn insert(&mut self, tag: impl Into<String>, values: Vec<String>) {
        self.fields.insert(tag.into(), values);
    }

    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag).map(Vec::as_slice)
    }

    /// The raw value string, or `None` for an absent optional attribute.
    pub fn raw(&self, index: usize, name: &str, required: bool) -> Result<Option<&str>> {
        let Some(values) = self.fields.get(name) else {
            if required {
                return Err(Error::MissingRequiredAttribute {
                    attribute: name.to_string(),
                });
            }
            return Ok(None);
        };
        values
            .get(index)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| Error::ArityMismatch {
                attribute: name.to_string(),
                len: values.len(),
                index,
            })
    }

    pub fn float(&self, index: usize, name: &str, required: bool) -> Result<f64> {
        match self.raw(index, name, required)? {
            Some(v) => parse_float(name, v),
            None => Ok(0.0),
        }
    }

    pub fn int(&self, index: usize, name: &str, required: bool) -> Result<i64> {
        match self.raw(index, name, required)? {
            Some(v) => parse_int(name, v),
            None => Ok(0),
        }
    }

    pub fn boolean(&self, index: usize, name: &str, required: bool) -> Result<bool> {
        match self.raw(index, name, required)? {
            Some(v) => parse_bool(name, v),
            None => Ok(false),
        }
    }

    pub fn string(&self, index: usize, name: &str, required: bool) -> Result<String> {
        Ok(self
            .raw(index, name, required)?
            .map(str::to_string)
            .unwrap_or_default())
    }

    /// A value which is itself a list of strings.
    pub fn strings(&self, index: usize, name: &str, required: bool) -> Result<Vec<String>> {
        match self.raw(index, name, required)? {
            Some(v) => Ok(tcllist::parse_list(v)?),
            None => Ok(Vec::new()),
        }
    }

    /// A value holding a flat list of numbers taken as `x y` pairs.
    pub fn coordinates(&self, index: usize, name: &str, required: bool) -> Result<Vec<Coordinates>> {
        let Some(v) = self.raw(index, name, required)? else {
            return Ok(Vec::new());
        };
        let list = tcllist::parse_list(v)?;
        if list.len() % 2 != 0 {
            return Err(Error::Structural(format!(
                "attribute {name} list must have an even number of elements"
            )));
        }
        list.chunks_exact(2)
            .map(|pair| -> Result<Coordinates> {
                Ok(Coordinates::new(parse_float(name, &pair[0])?, parse_float(name, &pair[1])?))
            })
            .collect()
    }

    pub fn choice<T: Choice>(&self, index: usize, name: &str, required: bool) -> Result<T> {
        match self.raw(index, name, required)? {
            Some(v) => decode_choice(name, v, required),
            None => Ok(T::default()),
        }
    }
}

pub(crate) fn parse_float(attribute: &str, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| Error::TypeConversion {
        attribute: attribute.to_string(),
        value: value.to_string(),
        expected: "floating-point value",
    })
}

pub(crate) fn parse_int(attribute: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| Error::TypeConversion {
        attribute: attribute.to_string(),
        value: value.to_string(),
        expected: "integer",
    })
}

pub(crate) fn parse_bool(attribute: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::TypeConversion {
            attribute: attribute.to_string(),
            value: value.to_string(),
            expected: "boolean",
        }),
    }
}

/// Look `value` up in `T`'s vocabulary. An empty optional value is the
/// default variant without a lookup.
pub(crate) fn decode_choice<T: Choice>(attribute: &str, value: &str, required: bool) -> Result<T> {
    if value.is_empty() && !required {
        return Ok(T::default());
    }
    let table = T::choices();
    table.lookup(value).ok_or_else(|| Error::UnknownEnumValue {
        attribute: attribute.to_string(),
        value: value.to_string(),
        vocabulary: table.name,
    })
}
