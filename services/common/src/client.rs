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
use crate::profile::{ClientProfile, SignMethod};
use crate::response::parse_response;
use crate::sign_v1::SignerV1;
use crate::sign_v3::SignerV3;
use crate::{BaseRequest, Config, Credential, Request, Response};
use log::debug;
use rand::Rng;
use tcapi_core::time::now;
use tcapi_core::{
    Context, Error, HttpSend, OsEnv, ProvideCredential, Result, SigningCredential,
};
use tcapi_file_read_tokio::TokioFileRead;
use tcapi_http_send_reqwest::ReqwestHttpSend;

/// Client signs and sends Tencent Cloud API requests.
///
/// Configure it once with the `with_*` builders, then call [`Client::send`]
/// concurrently; each call mutates only the request passed to it.
///
/// ```no_run
/// use tcapi_common::{ApiResponse, BaseRequest, Client, Empty};
///
/// # async fn example() -> tcapi_core::Result<()> {
/// let client = Client::new_with_secret_id("AKID...", "secret", "ap-guangzhou");
/// let mut req = BaseRequest::new("cvm", "2017-03-12", "DescribeRegions");
/// let resp: ApiResponse<Empty> = client.send(&mut req).await?;
/// println!("request id: {}", resp.request_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    region: String,
    ctx: Context,
    credential: Option<Credential>,
    profile: ClientProfile,
}

impl Client {
    /// Create a client for `region` with the default profile.
    ///
    /// Requests go through `reqwest`; env and files are read from the OS.
    pub fn new(region: impl Into<String>) -> Self {
        let ctx = Context::new()
            .with_file_read(TokioFileRead)
            .with_http_send(ReqwestHttpSend::default())
            .with_env(OsEnv);

        Self {
            region: region.into(),
            ctx,
            credential: None,
            profile: ClientProfile::default(),
        }
    }

    /// Create a client for `region` with a long-term credential.
    pub fn new_with_secret_id(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::new(region).with_secret_id(secret_id, secret_key)
    }

    /// Create a client from `config`.
    ///
    /// A config without region yields an empty region, which omits
    /// `X-TC-Region` from TC3 requests.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.region.clone().unwrap_or_default()).with_config(config)
    }

    /// Apply the fields set in `config`.
    ///
    /// Region and endpoint replace the current ones when present. The
    /// credential is installed only when both secret id and key are present.
    pub fn with_config(mut self, config: &Config) -> Self {
        if let Some(region) = &config.region {
            self.region = region.clone();
        }
        if let Some(endpoint) = config.endpoint.as_ref().filter(|v| !v.is_empty()) {
            self.profile.http_profile.endpoint = Some(endpoint.clone());
        }
        if let (Some(id), Some(key)) = (&config.secret_id, &config.secret_key) {
            let cred = match config.token.as_ref().filter(|v| !v.is_empty()) {
                Some(token) => Credential::with_token(id, key, token),
                None => Credential::new(id, key),
            };
            self.credential = Some(cred);
        }
        self
    }

    /// Region this client sends to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Current profile.
    pub fn profile(&self) -> &ClientProfile {
        &self.profile
    }

    /// Current credential.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Context used for I/O.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Use `credential` to sign requests.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Use a long-term credential to sign requests.
    pub fn with_secret_id(
        self,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.with_credential(Credential::new(secret_id, secret_key))
    }

    /// Load the credential from `provider` through this client's context.
    ///
    /// Fails with a credential error if the provider finds nothing.
    pub async fn with_credential_provider(
        self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let cred = provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found by provider"))?;
        Ok(self.with_credential(cred))
    }

    /// Replace the profile. Signature method, unsigned payload, debug flag,
    /// transport settings and timeout all follow it.
    pub fn with_profile(mut self, profile: ClientProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the signature method.
    pub fn with_signature_method(mut self, method: SignMethod) -> Self {
        self.profile.sign_method = method;
        self
    }

    /// Send requests through `transport` instead of the default one.
    pub fn with_http_transport(mut self, transport: impl HttpSend) -> Self {
        self.ctx = self.ctx.with_http_send(transport);
        self
    }

    /// Toggle dumping outgoing requests at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.profile.debug = debug;
        self
    }

    /// Replace the whole context.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Sign `req`, send it and decode the response.
    ///
    /// An API error inside a successful HTTP response is returned as part of
    /// `Resp`; see [`Response::error`]. `req` gets its common params and, for
    /// the legacy signature, its signature written into its params, so it
    /// should not be sent twice.
    pub async fn send<Req, Resp>(&self, req: &mut Req) -> Result<Resp>
    where
        Req: Request,
        Resp: Response,
    {
        let cred = self
            .credential
            .as_ref()
            .filter(|c| c.is_valid())
            .ok_or_else(|| Error::credential_invalid("client has no valid credential"))?;

        self.fill_defaults(req.base_mut());
        self.complete_common_params(req.base_mut());

        let http_req = if self.profile.sign_method.is_legacy() {
            SignerV1::new(self.profile.sign_method)
                .with_language(&self.profile.language)
                .sign(req, cred)?
        } else {
            SignerV3::new(&self.region)
                .with_language(&self.profile.language)
                .with_unsigned_payload(self.profile.unsigned_payload)
                .sign(req, cred)?
        };

        if self.profile.debug {
            debug!("http request = {http_req:?}");
        }

        let timeout = self.profile.http_profile.timeout();
        let resp = match tokio::time::timeout(timeout, self.ctx.http_send(http_req)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) if err.is_network_error() => return Err(err),
            Ok(Err(err)) => {
                return Err(
                    Error::network(format!("fail to get response because {err}")).with_source(err),
                )
            }
            Err(_) => {
                return Err(Error::network(format!(
                    "fail to get response because request timed out after {}s",
                    timeout.as_secs()
                )))
            }
        };

        let resp: Resp = parse_response(resp)?;
        debug!(
            "{} {} answered with request id {}",
            req.service(),
            req.action(),
            resp.request_id()
        );
        Ok(resp)
    }

    fn fill_defaults(&self, base: &mut BaseRequest) {
        let http_profile = &self.profile.http_profile;

        if base.scheme().is_none() {
            base.set_scheme(http_profile.scheme.as_str());
        }
        if base.root_domain().is_empty() {
            base.set_root_domain(http_profile.root_domain.clone());
        }
        if base.domain().is_empty() {
            let domain = match &http_profile.endpoint {
                Some(endpoint) if !endpoint.is_empty() => endpoint.clone(),
                _ => base.service_domain(),
            };
            base.set_domain(domain);
        }
        if base.http_method().is_none() {
            base.set_http_method(http_profile.method.as_str());
        }
    }

    fn complete_common_params(&self, base: &mut BaseRequest) {
        let version = base.version().to_string();
        let action = base.action().to_string();
        let nonce: u32 = rand::thread_rng().gen();

        let params = base.params_mut();
        params.insert(PARAM_REGION.to_string(), self.region.clone());
        if !version.is_empty() {
            params.insert(PARAM_VERSION.to_string(), version);
        }
        params.insert(PARAM_ACTION.to_string(), action);
        params.insert(PARAM_TIMESTAMP.to_string(), now().timestamp().to_string());
        params.insert(PARAM_NONCE.to_string(), nonce.to_string());
    }
}
