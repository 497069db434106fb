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

//! Signing client for the Tencent Cloud API.
//!
//! Requests are signed either with TC3-HMAC-SHA256 (the default) or with the
//! legacy HmacSHA1 / HmacSHA256 signature, sent through the `HttpSend`
//! transport of a [`tcapi_core::Context`], and decoded from the
//! `{"Response": {...}}` envelope.
//!
//! Service crates describe their actions by implementing [`Request`] and
//! [`EncodeParams`] on a type composing a [`BaseRequest`], and decode the
//! answer into an [`ApiResponse`].

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod encode;
pub use encode::{encode_params, EncodeParams, Fields, ParamValue};

mod profile;
pub use profile::{ClientProfile, HttpMethod, HttpProfile, Scheme, SignMethod};

mod request;
pub use request::{encode_query, BaseRequest, Request};

mod response;
pub use response::{parse_response, ApiError, ApiResponse, Empty, Response};

mod sign_v1;
pub use sign_v1::SignerV1;

mod sign_v3;
pub use sign_v3::SignerV3;

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
