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

//! Reqwest-based HTTP transport for tcapi.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `tcapi_core` on
//! top of a shared `reqwest::Client`, so its connection pool is reused by
//! every request sent through a cloned `Context`.
//!
//! ```no_run
//! use std::time::Duration;
//! use tcapi_core::Context;
//! use tcapi_http_send_reqwest::ReqwestHttpSend;
//!
//! let client = reqwest::Client::builder()
//!     .pool_max_idle_per_host(10)
//!     .connect_timeout(Duration::from_secs(5))
//!     .build()
//!     .expect("client must build");
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use tcapi_core::{Error, HttpSend, Result};

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request for reqwest").with_source(e)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::network(format!("fail to get response because {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::network("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
