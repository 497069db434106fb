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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use ini::Ini;
use log::debug;
use tcapi_core::{Context, Error, ErrorKind, ProvideCredential, Result};

/// ProfileCredentialProvider loads credentials from a shared credentials file.
///
/// The file is `~/.tencentcloud/credentials` unless `with_credentials_file()`
/// or `TENCENTCLOUD_CREDENTIALS_FILE` says otherwise:
///
/// ```ini
/// [default]
/// secret_id = AKID...
/// secret_key = ...
/// token = ...
/// ```
///
/// The section is `TENCENTCLOUD_PROFILE`, then the one set via
/// `with_profile()`, then `default`.
#[derive(Debug)]
pub struct ProfileCredentialProvider {
    profile: Option<String>,
    credentials_file: Option<String>,
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self {
            profile: None,
            credentials_file: None,
        }
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the path to the credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let profile = ctx
            .env_var(TENCENTCLOUD_PROFILE)
            .or_else(|| self.profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let path = self
            .credentials_file
            .clone()
            .or_else(|| ctx.env_var(TENCENTCLOUD_CREDENTIALS_FILE))
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string());
        let Some(path) = ctx.expand_home_dir(&path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::ConfigInvalid => return Err(err),
            Err(err) => {
                debug!("failed to read credentials file {path}: {err}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse credentials file {path}"))
                .with_source(anyhow::Error::new(e))
        })?;

        let Some(props) = conf.section(Some(profile.as_str())) else {
            debug!("profile {profile} not found in credentials file");
            return Ok(None);
        };

        match (props.get("secret_id"), props.get("secret_key")) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => Ok(Some(Credential {
                secret_id: id.to_string(),
                secret_key: key.to_string(),
                token: props
                    .get("token")
                    .filter(|t| !t.is_empty())
                    .map(|t| t.to_string()),
            })),
            _ => Ok(None),
        }
    }
}
