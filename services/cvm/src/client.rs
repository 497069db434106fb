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

use crate::{
    DescribeRegionsRequest, DescribeRegionsResponse, DescribeZonesRequest, DescribeZonesResponse,
};
use tcapi_core::Result;

/// Client for CVM actions.
///
/// It wraps a configured [`tcapi_common::Client`], so credentials, profile
/// and transport are set up there.
#[derive(Debug, Clone)]
pub struct Client {
    inner: tcapi_common::Client,
}

impl From<tcapi_common::Client> for Client {
    fn from(inner: tcapi_common::Client) -> Self {
        Self { inner }
    }
}

impl Client {
    /// Create a CVM client from a configured client.
    pub fn new(inner: tcapi_common::Client) -> Self {
        Self { inner }
    }

    /// Create a CVM client for `region` with a long-term credential.
    pub fn new_with_secret_id(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::new(tcapi_common::Client::new_with_secret_id(
            secret_id, secret_key, region,
        ))
    }

    /// The underlying client.
    pub fn inner(&self) -> &tcapi_common::Client {
        &self.inner
    }

    /// List the zones of the client's region. `None` sends a default request.
    pub async fn describe_zones(
        &self,
        req: Option<DescribeZonesRequest>,
    ) -> Result<DescribeZonesResponse> {
        let mut req = req.unwrap_or_default();
        self.inner.send(&mut req).await
    }

    /// List the regions CVM is available in. `None` sends a default request.
    pub async fn describe_regions(
        &self,
        req: Option<DescribeRegionsRequest>,
    ) -> Result<DescribeRegionsResponse> {
        let mut req = req.unwrap_or_default();
        self.inner.send(&mut req).await
    }
}
