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
use crate::profile::HttpMethod;
use crate::request::encode_query;
use crate::{Credential, Request};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderName, HeaderValue};
use log::debug;
use std::collections::BTreeMap;
use tcapi_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use tcapi_core::time::{format_date, parse_unix};
use tcapi_core::{Error, Result};

/// Signer for TC3-HMAC-SHA256.
///
/// Identity parameters travel as `X-TC-*` headers; the signature goes into
/// the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct SignerV3 {
    region: String,
    language: String,
    unsigned_payload: bool,
}

impl SignerV3 {
    /// Create a signer for `region`. An empty region omits `X-TC-Region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            unsigned_payload: false,
        }
    }

    /// Set the `X-TC-Language` header.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Skip hashing the body.
    pub fn with_unsigned_payload(mut self, unsigned_payload: bool) -> Self {
        self.unsigned_payload = unsigned_payload;
        self
    }

    /// Sign `req` and build the HTTP request carrying it.
    ///
    /// `req` must already carry the `Timestamp` param and its transport fields.
    pub fn sign<R: Request>(&self, req: &mut R, cred: &Credential) -> Result<http::Request<Bytes>> {
        let method = req.base().http_method().unwrap_or_default();

        let timestamp = req
            .params()
            .get(PARAM_TIMESTAMP)
            .cloned()
            .ok_or_else(|| Error::signing("request has no Timestamp param"))?;
        let date = format_date(parse_unix(&timestamp)?);

        let (content_type, query, payload) = match method {
            HttpMethod::Get => {
                let mut encoded = BTreeMap::new();
                encode_params(&*req, &mut encoded)?;
                req.params_mut().extend(encoded);

                let mut params = req.params().clone();
                for key in TC3_HEADER_PARAMS {
                    params.remove(key);
                }
                (CONTENT_TYPE_FORM, encode_query(&params), Vec::new())
            }
            HttpMethod::Post => {
                let payload = serde_json::to_vec(&*req).map_err(|e| {
                    Error::encoding("failed to serialize request payload").with_source(e)
                })?;
                (CONTENT_TYPE_JSON, String::new(), payload)
            }
        };

        let base = req.base();
        let host = base.host();
        let service = base.service();

        let hashed_payload = if self.unsigned_payload {
            hex_sha256(UNSIGNED_PAYLOAD.as_bytes())
        } else {
            hex_sha256(&payload)
        };
        let canonical_request =
            canonical_request(method, &query, content_type, &host, &hashed_payload);
        debug!("calculated canonical request: {canonical_request}");

        let scope = format!("{date}/{service}/{TC3_REQUEST}");
        let string_to_sign = format!(
            "{TC3_ALGORITHM}\n{timestamp}\n{scope}\n{}",
            hex_sha256(canonical_request.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = signing_key(&cred.secret_key, &date, service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());
        let authorization = format!(
            "{TC3_ALGORITHM} Credential={}/{scope}, SignedHeaders={TC3_SIGNED_HEADERS}, Signature={signature}",
            cred.secret_id
        );

        let request_client = base
            .params()
            .get(PARAM_REQUEST_CLIENT)
            .map(String::as_str)
            .unwrap_or(REQUEST_CLIENT);

        let mut headers = vec![
            (HOST, header_value(&host, false)?),
            (CONTENT_TYPE, header_value(content_type, false)?),
            (
                HeaderName::from_static(X_TC_ACTION),
                header_value(base.action(), false)?,
            ),
            (
                HeaderName::from_static(X_TC_VERSION),
                header_value(base.version(), false)?,
            ),
            (
                HeaderName::from_static(X_TC_TIMESTAMP),
                header_value(&timestamp, false)?,
            ),
            (
                HeaderName::from_static(X_TC_REQUEST_CLIENT),
                header_value(request_client, false)?,
            ),
            (
                HeaderName::from_static(X_TC_LANGUAGE),
                header_value(&self.language, false)?,
            ),
            (AUTHORIZATION, header_value(&authorization, true)?),
        ];
        if !self.region.is_empty() {
            headers.push((
                HeaderName::from_static(X_TC_REGION),
                header_value(&self.region, false)?,
            ));
        }
        if let Some(token) = cred.token() {
            headers.push((
                HeaderName::from_static(X_TC_TOKEN),
                header_value(token, true)?,
            ));
        }
        if self.unsigned_payload {
            headers.push((
                HeaderName::from_static(X_TC_CONTENT_SHA256),
                HeaderValue::from_static(UNSIGNED_PAYLOAD),
            ));
        }

        let mut url = format!(
            "{}://{}{}",
            base.scheme().unwrap_or_default(),
            host,
            base.path()
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let mut http_req = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url)
            .body(Bytes::from(payload))?;
        http_req.headers_mut().extend(headers);
        Ok(http_req)
    }
}

fn header_value(value: &str, sensitive: bool) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|e| {
        Error::signing(format!("`{value}` is not a valid header value")).with_source(e)
    })?;
    value.set_sensitive(sensitive);
    Ok(value)
}

fn canonical_request(
    method: HttpMethod,
    query: &str,
    content_type: &str,
    host: &str,
    hashed_payload: &str,
) -> String {
    format!(
        "{method}\n/\n{query}\ncontent-type:{content_type}\nhost:{host}\n\n{TC3_SIGNED_HEADERS}\n{hashed_payload}"
    )
}

fn signing_key(secret_key: &str, date: &str, service: &str) -> Vec<u8> {
    let secret_date = hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, service.as_bytes());
    hmac_sha256(&secret_service, TC3_REQUEST.as_bytes())
}
