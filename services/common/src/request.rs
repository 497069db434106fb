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

use crate::constants::{DEFAULT_PATH, ROOT_DOMAIN};
use crate::encode::{EncodeParams, Fields};
use crate::profile::{HttpMethod, Scheme};
use serde::Serialize;
use std::collections::BTreeMap;

/// Request is implemented by every API call.
///
/// Implementors compose a [`BaseRequest`] and expose it through
/// [`Request::base`] and [`Request::base_mut`]; everything else is provided.
/// The JSON serialization of the implementor is the TC3 POST payload, so the
/// composed `BaseRequest` should be marked `#[serde(skip)]`.
pub trait Request: EncodeParams + Serialize + Send + Sync {
    /// Shared request state.
    fn base(&self) -> &BaseRequest;

    /// Mutable shared request state.
    fn base_mut(&mut self) -> &mut BaseRequest;

    /// Service name such as `cvm`.
    fn service(&self) -> &str {
        self.base().service()
    }

    /// API version such as `2017-03-12`.
    fn version(&self) -> &str {
        self.base().version()
    }

    /// Action name such as `DescribeZones`.
    fn action(&self) -> &str {
        self.base().action()
    }

    /// Flat parameter map.
    fn params(&self) -> &BTreeMap<String, String> {
        self.base().params()
    }

    /// Mutable flat parameter map.
    fn params_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.base_mut().params_mut()
    }
}

/// State shared by all requests.
///
/// The transport fields stay unset until the client fills them from its
/// profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BaseRequest {
    #[serde(skip)]
    service: String,
    #[serde(skip)]
    version: String,
    #[serde(skip)]
    action: String,

    #[serde(skip)]
    http_method: Option<HttpMethod>,
    #[serde(skip)]
    scheme: Option<Scheme>,
    #[serde(skip)]
    root_domain: String,
    #[serde(skip)]
    domain: String,
    #[serde(skip)]
    path: String,

    #[serde(skip)]
    params: BTreeMap<String, String>,
}

impl BaseRequest {
    /// Create a request for `action` of `service` at `version`.
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            action: action.into(),
            path: DEFAULT_PATH.to_string(),
            ..Default::default()
        }
    }

    /// Service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// API version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// HTTP method, `None` until set.
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.http_method
    }

    /// Set the HTTP method: `POST` in any case selects POST, anything else GET.
    pub fn set_http_method(&mut self, method: &str) {
        self.http_method = Some(HttpMethod::parse(method));
    }

    /// Scheme, `None` until set.
    pub fn scheme(&self) -> Option<Scheme> {
        self.scheme
    }

    /// Set the scheme: `http` in any case selects HTTP, anything else HTTPS.
    pub fn set_scheme(&mut self, scheme: &str) {
        self.scheme = Some(Scheme::parse(scheme));
    }

    /// Root domain, empty until set.
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Set the root domain.
    pub fn set_root_domain(&mut self, root_domain: impl Into<String>) {
        self.root_domain = root_domain.into();
    }

    /// Domain, empty until set.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Set the domain.
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    /// `{service}.{root_domain}`, with `tencentcloudapi.com` for an empty root domain.
    pub fn service_domain(&self) -> String {
        let root = if self.root_domain.is_empty() {
            ROOT_DOMAIN
        } else {
            &self.root_domain
        };
        format!("{}.{}", self.service, root)
    }

    /// Host the request goes to: the domain if set, the service domain otherwise.
    pub fn host(&self) -> String {
        if self.domain.is_empty() {
            self.service_domain()
        } else {
            self.domain.clone()
        }
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set the request path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Flat parameter map.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Mutable flat parameter map.
    pub fn params_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.params
    }

    /// Insert a raw parameter.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// URL in the legacy wire form: GET carries every non-empty parameter in
    /// the query string, POST carries none.
    pub fn url(&self) -> String {
        let base = format!(
            "{}://{}{}",
            self.scheme.unwrap_or_default(),
            self.host(),
            self.path
        );
        match self.http_method.unwrap_or_default() {
            HttpMethod::Get => format!("{base}?{}", encode_query(&self.params)),
            HttpMethod::Post => base,
        }
    }

    /// Body in the legacy wire form: POST carries the URL-encoded parameters,
    /// GET nothing.
    pub fn body(&self) -> String {
        match self.http_method.unwrap_or_default() {
            HttpMethod::Get => String::new(),
            HttpMethod::Post => encode_query(&self.params),
        }
    }
}

impl EncodeParams for BaseRequest {
    fn fields(&self) -> Fields {
        Vec::new()
    }
}

/// A bare `BaseRequest` sends whatever raw params were set on it.
impl Request for BaseRequest {
    fn base(&self) -> &BaseRequest {
        self
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        self
    }
}

/// URL-encode `params` in key order, dropping empty values.
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        if !v.is_empty() {
            serializer.append_pair(k, v);
        }
    }
    serializer.finish()
}
