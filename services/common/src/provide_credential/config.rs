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

use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tcapi_core::{Context, ProvideCredential, Result};

/// ConfigCredentialProvider loads credentials from a [`Config`].
///
/// Values found in the environment take precedence over the config.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let env_config = Config::from_env(ctx);
        let config = self.config.as_ref();

        let secret_id = env_config.secret_id.or_else(|| config.secret_id.clone());
        let secret_key = env_config.secret_key.or_else(|| config.secret_key.clone());
        let token = env_config.token.or_else(|| config.token.clone());

        match (secret_id, secret_key) {
            (Some(secret_id), Some(secret_key)) => {
                debug!("loading credential from config");
                Ok(Some(Credential {
                    secret_id,
                    secret_key,
                    token,
                }))
            }
            _ => {
                debug!("incomplete config, skipping");
                Ok(None)
            }
        }
    }
}
