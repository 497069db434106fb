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

use crate::constants::*;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use tcapi_core::utils::Redact;
use tcapi_core::Context;

/// Config carries all the configuration for Tencent Cloud API clients.
///
/// It deserializes from the snake_case keys used by configuration files
/// (`secret_id`, `secret_key`, ...), or can be loaded from env.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Region such as `ap-guangzhou`
    pub region: Option<String>,
    /// Secret ID
    pub secret_id: Option<String>,
    /// Secret Key
    pub secret_key: Option<String>,
    /// Session token
    pub token: Option<String>,
    /// Endpoint overriding `{service}.tencentcloudapi.com`
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("token", &Redact::from(&self.token))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            region: ctx
                .env_var(TENCENTCLOUD_REGION)
                .or_else(|| ctx.env_var(TKE_REGION)),
            secret_id: ctx
                .env_var(TENCENTCLOUD_SECRET_ID)
                .or_else(|| ctx.env_var(TKE_SECRET_ID)),
            secret_key: ctx
                .env_var(TENCENTCLOUD_SECRET_KEY)
                .or_else(|| ctx.env_var(TKE_SECRET_KEY)),
            token: ctx
                .env_var(TENCENTCLOUD_TOKEN)
                .or_else(|| ctx.env_var(TENCENTCLOUD_SECURITY_TOKEN)),
            endpoint: ctx.env_var(TENCENTCLOUD_ENDPOINT),
        }
    }
}
