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

use crate::Credential;
use async_trait::async_trait;
use tcapi_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static credentials that are provided at initialization time.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with the given credentials.
    pub fn new(secret_id: &str, secret_key: &str) -> Self {
        Self {
            credential: Credential::new(secret_id, secret_key),
        }
    }

    /// Create a new StaticCredentialProvider with a session token.
    pub fn with_token(secret_id: &str, secret_key: &str, token: &str) -> Self {
        Self {
            credential: Credential::with_token(secret_id, secret_key, token),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("AKID1", "SECRET1");
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be provided");
        assert_eq!(cred.secret_id, "AKID1");
        assert_eq!(cred.secret_key, "SECRET1");
        assert!(cred.token.is_none());

        let provider = StaticCredentialProvider::with_token("AKID1", "SECRET1", "TOKEN1");
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be provided");
        assert_eq!(cred.token(), Some("TOKEN1"));

        Ok(())
    }
}
