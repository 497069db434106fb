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
use crate::encode::encode_params;
use crate::profile::{HttpMethod, SignMethod};
use crate::{Credential, Request};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use log::debug;
use std::collections::BTreeMap;
use tcapi_core::hash::{base64_hmac_sha1, base64_hmac_sha256};
use tcapi_core::Result;

/// Signer for the legacy HmacSHA1 / HmacSHA256 signature.
///
/// Every parameter, including the credential and the signature itself, is
/// carried in the query string (GET) or the form body (POST).
#[derive(Debug, Clone)]
pub struct SignerV1 {
    method: SignMethod,
    language: String,
}

impl SignerV1 {
    /// Create a signer. Methods other than `HmacSHA256` sign with `HmacSHA1`.
    pub fn new(method: SignMethod) -> Self {
        let method = match method {
            SignMethod::HmacSha256 => SignMethod::HmacSha256,
            _ => SignMethod::HmacSha1,
        };
        Self {
            method,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the `Language` parameter.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sign `req` in place and build the HTTP request carrying it.
    ///
    /// `req` must already have its common params and transport fields set.
    pub fn sign<R: Request>(&self, req: &mut R, cred: &Credential) -> Result<http::Request<Bytes>> {
        let mut encoded = BTreeMap::new();
        encode_params(&*req, &mut encoded)?;

        let params = req.params_mut();
        params.insert(PARAM_LANGUAGE.to_string(), self.language.clone());
        params.extend(encoded);
        params.extend(cred.credential_params());
        params.insert(
            PARAM_SIGNATURE_METHOD.to_string(),
            self.method.as_str().to_string(),
        );
        params.remove(PARAM_SIGNATURE);

        let base = req.base();
        let method = base.http_method().unwrap_or_default();
        let string_to_sign = string_to_sign(method, &base.host(), base.path(), base.params());
        debug!("calculated string to sign: {string_to_sign}");

        let signature = match self.method {
            SignMethod::HmacSha256 => {
                base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes())
            }
            _ => base64_hmac_sha1(cred.secret_key.as_bytes(), string_to_sign.as_bytes()),
        };
        req.params_mut()
            .insert(PARAM_SIGNATURE.to_string(), signature);

        let base = req.base();
        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(base.url());
        if method == HttpMethod::Post {
            builder = builder.header(CONTENT_TYPE, CONTENT_TYPE_FORM);
        }
        Ok(builder.body(Bytes::from(base.body()))?)
    }
}

/// `METHOD + HOST + PATH + "?" + k=v&...` over sorted keys, skipping empty values.
fn string_to_sign(
    method: HttpMethod,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let query = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!("{method}{host}{path}?{query}")
}
