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

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tcapi_core::utils::truncate_str;
use tcapi_core::{Error, Result};

const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Error reported by the API inside an otherwise successful HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Error code such as `AuthFailure.SignatureFailure`
    #[serde(rename = "Code", default)]
    pub code: String,
    /// Human readable message
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// Response is implemented by every decoded API response.
pub trait Response: DeserializeOwned + Send {
    /// Request id assigned by the service.
    fn request_id(&self) -> &str;

    /// API level error, if the call failed.
    fn error(&self) -> Option<&ApiError>;
}

/// Decoded `{"Response": {...}}` envelope with the action specific fields in `data`.
///
/// `data` is filled from the same object that carries `RequestId`, so its type
/// should tolerate missing fields (`#[serde(default)]`) for error responses.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Request id assigned by the service.
    pub request_id: String,
    /// API level error.
    pub error: Option<ApiError>,
    /// Action specific fields.
    pub data: T,
}

/// Response data for actions that return nothing but a request id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Empty {}

impl<T> ApiResponse<T> {
    /// Turn an embedded API error into `Err`.
    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Response")]
    response: Body<T>,
}

#[derive(Deserialize)]
struct Body<T> {
    #[serde(rename = "RequestId", default)]
    request_id: String,
    #[serde(rename = "Error", default)]
    error: Option<ApiError>,
    #[serde(flatten)]
    data: T,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let Envelope { response } = Envelope::<T>::deserialize(deserializer)?;
        Ok(ApiResponse {
            request_id: response.request_id,
            error: response.error,
            data: response.data,
        })
    }
}

impl<T: DeserializeOwned + Send> Response for ApiResponse<T> {
    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

/// Decode an HTTP response into `R`.
///
/// Non-2xx statuses and undecodable bodies fail with a response-invalid
/// error. An API error inside a 2xx body is returned as data.
pub fn parse_response<R: Response>(resp: http::Response<Bytes>) -> Result<R> {
    let status = resp.status();
    let body = resp.into_body();

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body);
        return Err(Error::response_invalid(format!(
            "unexpected status {status}: {}",
            truncate_str(&text, MAX_ERROR_BODY_CHARS)
        )));
    }

    serde_json::from_slice(&body).map_err(|e| {
        let text = String::from_utf8_lossy(&body);
        Error::response_invalid(format!(
            "failed to decode response: {}",
            truncate_str(&text, MAX_ERROR_BODY_CHARS)
        ))
        .with_source(e)
    })
}
