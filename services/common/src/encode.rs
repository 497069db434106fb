// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Flatten structured request fields into wire parameters.
//!
//! Request types list their fields through [`EncodeParams`]. Each field is
//! flattened into one or more `key=value` entries:
//!
//! - `None` fields are skipped, and so are empty strings.
//! - Booleans and numbers are always emitted.
//! - A list emits `Name.0`, `Name.1`, ... A `None` element leaves a gap in
//!   the indexes, while an empty string element is still emitted.
//! - A nested object emits its own fields under `Name.`.

use std::collections::BTreeMap;
use tcapi_core::{Error, Result};

/// Named fields of a request, in declaration order.
pub type Fields = Vec<(&'static str, Option<ParamValue>)>;

/// EncodeParams is implemented by every type that can be sent as parameters.
pub trait EncodeParams {
    /// Returns the tagged fields of this value.
    fn fields(&self) -> Fields;
}

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value
    String(String),
    /// Boolean value
    Bool(bool),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    Uint(u64),
    /// Float value
    Float(f64),
    /// List of optional values
    List(Vec<Option<ParamValue>>),
    /// Nested object
    Object(Fields),
}

impl ParamValue {
    /// Build a nested object value.
    pub fn object<T: EncodeParams + ?Sized>(value: &T) -> Self {
        ParamValue::Object(value.fields())
    }

    /// Build a list of nested objects.
    pub fn objects<T: EncodeParams>(values: &[T]) -> Self {
        ParamValue::List(values.iter().map(|v| Some(Self::object(v))).collect())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::String(v.clone())
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Uint(v.into())
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Uint(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(|x| Some(x.into())).collect())
    }
}

impl<T: Clone + Into<ParamValue>> From<&Vec<T>> for ParamValue {
    fn from(v: &Vec<T>) -> Self {
        ParamValue::List(v.iter().map(|x| Some(x.clone().into())).collect())
    }
}

/// Flatten `value` into `params`.
///
/// Existing keys are overwritten. Fails with an encoding error on an empty
/// field name, a non-finite float or a list directly inside a list.
pub fn encode_params<T: EncodeParams + ?Sized>(
    value: &T,
    params: &mut BTreeMap<String, String>,
) -> Result<()> {
    encode_fields("", value.fields(), params)
}

fn encode_fields(prefix: &str, fields: Fields, params: &mut BTreeMap<String, String>) -> Result<()> {
    for (name, value) in fields {
        if name.is_empty() {
            return Err(Error::encoding(format!(
                "field with empty name under prefix `{prefix}`"
            )));
        }
        let Some(value) = value else {
            continue;
        };
        encode_value(format!("{prefix}{name}"), value, false, params)?;
    }
    Ok(())
}

fn encode_value(
    key: String,
    value: ParamValue,
    in_list: bool,
    params: &mut BTreeMap<String, String>,
) -> Result<()> {
    match value {
        ParamValue::String(s) => {
            // List elements are positional, so empty ones still count.
            if in_list || !s.is_empty() {
                params.insert(key, s);
            }
        }
        ParamValue::Bool(b) => {
            params.insert(key, b.to_string());
        }
        ParamValue::Int(i) => {
            params.insert(key, i.to_string());
        }
        ParamValue::Uint(u) => {
            params.insert(key, u.to_string());
        }
        ParamValue::Float(f) => {
            if !f.is_finite() {
                return Err(Error::encoding(format!(
                    "field `{key}` has non-finite value {f}"
                )));
            }
            params.insert(key, f.to_string());
        }
        ParamValue::List(items) => {
            if in_list {
                return Err(Error::encoding(format!(
                    "field `{key}` is a list nested in a list"
                )));
            }
            for (idx, item) in items.into_iter().enumerate() {
                let Some(item) = item else {
                    continue;
                };
                encode_value(format!("{key}.{idx}"), item, true, params)?;
            }
        }
        ParamValue::Object(fields) => {
            encode_fields(&format!("{key}."), fields, params)?;
        }
    }
    Ok(())
}
