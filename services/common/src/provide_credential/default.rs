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

use crate::provide_credential::{EnvCredentialProvider, ProfileCredentialProvider};
use crate::Credential;
use async_trait::async_trait;
use tcapi_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider tries the environment first, then the shared
/// credentials file.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        Self::with_chain(
            ProvideCredentialChain::new()
                .push(EnvCredentialProvider::new())
                .push(ProfileCredentialProvider::new()),
        )
    }

    /// Create a DefaultCredentialProvider from a custom chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a provider to the end of the chain.
    pub fn push_back(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::provide_credential::StaticCredentialProvider;
    use std::collections::HashMap;
    use tcapi_core::StaticEnv;
    use tcapi_file_read_tokio::TokioFileRead;

    fn context(envs: HashMap<String, String>) -> Context {
        Context::new().with_file_read(TokioFileRead).with_env(StaticEnv {
            home_dir: Some("/definitely/not/a/home".into()),
            envs,
        })
    }

    #[tokio::test]
    async fn test_env_wins() -> anyhow::Result<()> {
        let ctx = context(HashMap::from([
            (TENCENTCLOUD_SECRET_ID.to_string(), "AKID1".to_string()),
            (TENCENTCLOUD_SECRET_KEY.to_string(), "SECRET1".to_string()),
        ]));
        let cred = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .expect("env credential must be loaded");
        assert_eq!(cred.secret_id, "AKID1");

        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_found() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::new()
            .provide_credential(&context(HashMap::new()))
            .await?;
        assert!(cred.is_none());

        let cred = DefaultCredentialProvider::new()
            .push_back(StaticCredentialProvider::new("AKID2", "SECRET2"))
            .provide_credential(&context(HashMap::new()))
            .await?
            .expect("static credential must be loaded");
        assert_eq!(cred.secret_id, "AKID2");

        Ok(())
    }
}
