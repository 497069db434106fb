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

use crate::constants::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS, TC3_ALGORITHM};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;
use tcapi_core::Error;

/// HTTP method used to deliver a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in the body.
    #[default]
    Post,
}

impl HttpMethod {
    /// Normalize a method name: `POST` in any case maps to `Post`, anything
    /// else to `Get`.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("POST") {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
        }
    }
}

/// URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Plain http, mostly for local endpoints.
    Http,
    /// https
    #[default]
    Https,
}

impl Scheme {
    /// Normalize a scheme name: `http` in any case maps to `Http`, anything
    /// else to `Https`.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("http") {
            Scheme::Http
        } else {
            Scheme::Https
        }
    }

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature scheme used to authenticate requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMethod {
    /// Legacy signature with HMAC-SHA1.
    HmacSha1,
    /// Legacy signature with HMAC-SHA256.
    HmacSha256,
    /// TC3-HMAC-SHA256.
    #[default]
    Tc3HmacSha256,
}

impl SignMethod {
    /// Wire name, also used as the `SignatureMethod` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMethod::HmacSha1 => "HmacSHA1",
            SignMethod::HmacSha256 => "HmacSHA256",
            SignMethod::Tc3HmacSha256 => TC3_ALGORITHM,
        }
    }

    /// Returns `true` for the legacy HMAC methods.
    pub fn is_legacy(&self) -> bool {
        matches!(self, SignMethod::HmacSha1 | SignMethod::HmacSha256)
    }
}

impl Display for SignMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignMethod {
    type Err = Error;

    /// Names other than the two legacy ones select TC3-HMAC-SHA256.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "HmacSHA1" => SignMethod::HmacSha1,
            "HmacSHA256" => SignMethod::HmacSha256,
            _ => SignMethod::Tc3HmacSha256,
        })
    }
}

/// Transport level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProfile {
    /// Default method for requests that don't set one.
    pub method: HttpMethod,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Default scheme for requests that don't set one.
    pub scheme: Scheme,
    /// Root domain, `tencentcloudapi.com` when empty.
    pub root_domain: String,
    /// Endpoint overriding `{service}.{root_domain}`.
    pub endpoint: Option<String>,
}

impl Default for HttpProfile {
    fn default() -> Self {
        Self {
            method: HttpMethod::Post,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            scheme: Scheme::Https,
            root_domain: String::new(),
            endpoint: None,
        }
    }
}

impl HttpProfile {
    /// Set the default method.
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the timeout in seconds. Zero falls back to the default.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = if secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            secs
        };
        self
    }

    /// Set the default scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the root domain.
    pub fn with_root_domain(mut self, root_domain: impl Into<String>) -> Self {
        self.root_domain = root_domain.into();
        self
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Timeout as a `Duration`. Zero falls back to the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

/// Client level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    /// Value of `Language` / `X-TC-Language`.
    pub language: String,
    /// Signature scheme.
    pub sign_method: SignMethod,
    /// Skip hashing the body for TC3-HMAC-SHA256.
    pub unsigned_payload: bool,
    /// Transport settings.
    pub http_profile: HttpProfile,
    /// Dump outgoing requests at debug level.
    pub debug: bool,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            sign_method: SignMethod::default(),
            unsigned_payload: false,
            http_profile: HttpProfile::default(),
            debug: false,
        }
    }
}

impl ClientProfile {
    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the signature scheme.
    pub fn with_sign_method(mut self, sign_method: SignMethod) -> Self {
        self.sign_method = sign_method;
        self
    }

    /// Toggle unsigned payload.
    pub fn with_unsigned_payload(mut self, unsigned_payload: bool) -> Self {
        self.unsigned_payload = unsigned_payload;
        self
    }

    /// Set the transport settings.
    pub fn with_http_profile(mut self, http_profile: HttpProfile) -> Self {
        self.http_profile = http_profile;
        self
    }

    /// Toggle debug dumps.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let profile = ClientProfile::default();
        assert_eq!(profile.language, "zh-CN");
        assert_eq!(profile.sign_method, SignMethod::Tc3HmacSha256);
        assert!(!profile.unsigned_payload);
        assert!(!profile.debug);
        assert_eq!(profile.http_profile.method, HttpMethod::Post);
        assert_eq!(profile.http_profile.timeout(), Duration::from_secs(60));
        assert_eq!(profile.http_profile.scheme, Scheme::Https);
        assert!(profile.http_profile.root_domain.is_empty());
        assert!(profile.http_profile.endpoint.is_none());
    }

    #[test_case("POST", HttpMethod::Post; "upper post")]
    #[test_case("post", HttpMethod::Post; "lower post")]
    #[test_case("GET", HttpMethod::Get; "get")]
    #[test_case("PUT", HttpMethod::Get; "unknown")]
    fn test_http_method_parse(input: &str, expected: HttpMethod) {
        assert_eq!(HttpMethod::parse(input), expected);
    }

    #[test_case("http", Scheme::Http; "lower http")]
    #[test_case("HTTP", Scheme::Http; "upper http")]
    #[test_case("https", Scheme::Https; "https")]
    #[test_case("ftp", Scheme::Https; "unknown")]
    fn test_scheme_parse(input: &str, expected: Scheme) {
        assert_eq!(Scheme::parse(input), expected);
    }

    #[test_case("HmacSHA1", SignMethod::HmacSha1; "sha1")]
    #[test_case("HmacSHA256", SignMethod::HmacSha256; "sha256")]
    #[test_case("TC3-HMAC-SHA256", SignMethod::Tc3HmacSha256; "tc3")]
    #[test_case("whatever", SignMethod::Tc3HmacSha256; "unknown")]
    fn test_sign_method_from_str(input: &str, expected: SignMethod) {
        assert_eq!(input.parse::<SignMethod>().unwrap(), expected);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let profile = HttpProfile::default().with_timeout_secs(0);
        assert_eq!(profile.timeout_secs, 60);
        let profile = HttpProfile::default().with_timeout_secs(5);
        assert_eq!(profile.timeout(), Duration::from_secs(5));

        let profile = HttpProfile {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(profile.timeout(), Duration::from_secs(60));
    }
}
