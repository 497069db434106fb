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

use crate::constants::{PARAM_SECRET_ID, PARAM_TOKEN};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use tcapi_core::utils::Redact;
use tcapi_core::SigningCredential;

/// Credential for Tencent Cloud API.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Secret ID
    pub secret_id: String,
    /// Secret Key
    pub secret_key: String,
    /// Session token for temporary credentials
    pub token: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

impl Credential {
    /// Create a long-term credential.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token: None,
        }
    }

    /// Create a temporary credential carrying a session token.
    pub fn with_token(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token: Some(token.into()),
        }
    }

    /// Returns the session token if it is set and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Parameters the legacy HMAC signature transmits for this credential.
    ///
    /// Always contains `SecretId`; `Token` only when a token is present.
    /// The secret key is never part of it.
    pub fn credential_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(PARAM_SECRET_ID.to_string(), self.secret_id.clone());
        if let Some(token) = self.token() {
            params.insert(PARAM_TOKEN.to_string(), token.to_string());
        }
        params
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.secret_id.is_empty() && !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_params_without_token() {
        let cred = Credential::new("AKID1", "SECRET1");
        let params = cred.credential_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params["SecretId"], "AKID1");
        assert!(!params.values().any(|v| v == "SECRET1"));
    }

    #[test]
    fn test_credential_params_with_token() {
        let cred = Credential::with_token("AKID1", "SECRET1", "TOKEN1");
        let params = cred.credential_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["Token"], "TOKEN1");

        let empty = Credential::with_token("AKID1", "SECRET1", "");
        assert!(!empty.credential_params().contains_key("Token"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::with_token(
            "AKIDz8krbsJ5yKBZQpn74WFkmLPx3",
            "Gu5t9xGARNpq86cd98joQYCN3Cozk1qA",
            "session-token-value",
        );
        let debug = format!("{cred:?}");
        assert!(debug.contains("AKI***Px3"));
        assert!(!debug.contains("Gu5t9xGARNpq86cd98joQYCN3Cozk1qA"));
        assert!(!debug.contains("session-token-value"));
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("id", "key").is_valid());
        assert!(!Credential::new("", "key").is_valid());
        assert!(!Credential::default().is_valid());
    }
}
