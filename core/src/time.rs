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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `2022-03-13`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y-%m-%d").to_string()
}

/// Build a datetime from unix seconds.
pub fn from_unix(secs: i64) -> Result<DateTime> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::signing(format!("timestamp {secs} is out of range")))
}

/// Parse a decimal unix timestamp such as `1700000000`.
pub fn parse_unix(s: &str) -> Result<DateTime> {
    let secs = s
        .parse::<i64>()
        .map_err(|e| Error::signing(format!("invalid timestamp `{s}`")).with_source(e))?;
    from_unix(secs)
}
