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

use serde::{Deserialize, Serialize};
use tcapi_common::{ApiResponse, BaseRequest, EncodeParams, Fields, Request};

/// API version of the CVM actions.
pub const API_VERSION: &str = "2017-03-12";
/// Service name of CVM.
pub const SERVICE: &str = "cvm";

/// An availability zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ZoneInfo {
    /// Zone name such as `ap-guangzhou-3`
    pub zone: String,
    /// Human readable description
    pub zone_name: String,
    /// Zone ID such as `100003`
    pub zone_id: String,
    /// `AVAILABLE` or `UNAVAILABLE`
    pub zone_state: String,
}

/// A region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegionInfo {
    /// Region name such as `ap-guangzhou`
    pub region: String,
    /// Human readable description
    pub region_name: String,
    /// `AVAILABLE` or `UNAVAILABLE`
    pub region_state: String,
}

/// Fields of a `DescribeZones` answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Zones {
    /// Number of zones
    pub total_count: u64,
    /// Zones of the region
    pub zone_set: Vec<ZoneInfo>,
}

/// Fields of a `DescribeRegions` answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Regions {
    /// Number of regions
    pub total_count: u64,
    /// Regions
    pub region_set: Vec<RegionInfo>,
}

/// Response of `DescribeZones`.
pub type DescribeZonesResponse = ApiResponse<Zones>;

/// Response of `DescribeRegions`.
pub type DescribeRegionsResponse = ApiResponse<Regions>;

/// Request of `DescribeZones`, listing the zones of the client's region.
#[derive(Debug, Clone, Serialize)]
pub struct DescribeZonesRequest {
    #[serde(skip)]
    base: BaseRequest,
}

impl Default for DescribeZonesRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl DescribeZonesRequest {
    /// Create a new request.
    pub fn new() -> Self {
        Self {
            base: BaseRequest::new(SERVICE, API_VERSION, "DescribeZones"),
        }
    }
}

impl EncodeParams for DescribeZonesRequest {
    fn fields(&self) -> Fields {
        Vec::new()
    }
}

impl Request for DescribeZonesRequest {
    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

/// Request of `DescribeRegions`, listing the regions CVM is available in.
#[derive(Debug, Clone, Serialize)]
pub struct DescribeRegionsRequest {
    #[serde(skip)]
    base: BaseRequest,
}

impl Default for DescribeRegionsRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl DescribeRegionsRequest {
    /// Create a new request.
    pub fn new() -> Self {
        Self {
            base: BaseRequest::new(SERVICE, API_VERSION, "DescribeRegions"),
        }
    }
}

impl EncodeParams for DescribeRegionsRequest {
    fn fields(&self) -> Fields {
        Vec::new()
    }
}

impl Request for DescribeRegionsRequest {
    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}
