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

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tcapi_common::{
    ApiResponse, BaseRequest, Client, ClientProfile, Config, Credential, EncodeParams, Fields,
    HttpMethod, HttpProfile, ParamValue, Request, Response, Scheme, SignMethod,
};
use tcapi_core::{Error, ErrorKind, HttpSend, Result};

const ZONES_BODY: &str = r#"{"Response":{"TotalCount":1,"ZoneSet":[{"Zone":"ap-guangzhou-3","ZoneName":"Guangzhou Zone 3","ZoneId":"100003","ZoneState":"AVAILABLE"}],"RequestId":"req-zones"}}"#;

#[derive(Debug, Serialize)]
struct DescribeZonesRequest {
    #[serde(skip)]
    base: BaseRequest,
    #[serde(rename = "Zones", skip_serializing_if = "Option::is_none")]
    zones: Option<Vec<String>>,
}

impl DescribeZonesRequest {
    fn new(zones: Option<Vec<String>>) -> Self {
        Self {
            base: BaseRequest::new("cvm", "2017-03-12", "DescribeZones"),
            zones,
        }
    }
}

impl EncodeParams for DescribeZonesRequest {
    fn fields(&self) -> Fields {
        vec![("Zones", self.zones.as_ref().map(ParamValue::from))]
    }
}

impl Request for DescribeZonesRequest {
    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Zone {
    zone: String,
    zone_state: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Zones {
    total_count: u64,
    zone_set: Vec<Zone>,
}

/// Records every request and answers with a fixed response.
#[derive(Debug, Clone)]
struct CaptureHttpSend {
    status: u16,
    body: &'static str,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl CaptureHttpSend {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn take(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for CaptureHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

#[derive(Debug)]
struct FailingHttpSend;

#[async_trait]
impl HttpSend for FailingHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected("connection reset by peer"))
    }
}

#[derive(Debug)]
struct StalledHttpSend;

#[async_trait]
impl HttpSend for StalledHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
        Err(Error::network("unreachable"))
    }
}

/// Answers after a short delay.
#[derive(Debug)]
struct SlowHttpSend;

#[async_trait]
impl HttpSend for SlowHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(http::Response::builder()
            .status(200)
            .body(Bytes::from_static(ZONES_BODY.as_bytes()))?)
    }
}

fn init_client() -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    Client::new_with_secret_id("AKID1", "SECRET1", "ap-guangzhou")
}

fn header<'a>(req: &'a http::Request<Bytes>, name: &str) -> &'a str {
    req.headers()[name].to_str().unwrap()
}

#[tokio::test]
async fn test_failing_transport_is_network_error() {
    let client = init_client().with_http_transport(FailingHttpSend);
    let mut req = DescribeZonesRequest::new(None);

    let err = client
        .send::<_, ApiResponse<Zones>>(&mut req)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.to_string().contains("connection reset by peer"));
}

#[tokio::test]
async fn test_api_error_is_returned_as_data() {
    let transport = CaptureHttpSend::new(
        200,
        r#"{"Response":{"Error":{"Code":"AuthFailure.SecretIdNotFound","Message":"secret id not found"},"RequestId":"req-err"}}"#,
    );
    let client = init_client().with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(None);

    let resp: ApiResponse<Zones> = client.send(&mut req).await.unwrap();
    assert_eq!(resp.request_id(), "req-err");
    let err = resp.error().unwrap();
    assert_eq!(err.code, "AuthFailure.SecretIdNotFound");
    assert_eq!(err.message, "secret id not found");
    assert_eq!(transport.take().len(), 1);
}

#[tokio::test]
async fn test_tc3_post() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let client = init_client().with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(Some(vec!["ap-guangzhou-3".to_string()]));

    let resp: ApiResponse<Zones> = client.send(&mut req).await.unwrap();
    let zones = resp.into_result().unwrap();
    assert_eq!(zones.total_count, 1);
    assert_eq!(zones.zone_set[0].zone, "ap-guangzhou-3");
    assert_eq!(zones.zone_set[0].zone_state, "AVAILABLE");

    let sent = transport.take();
    let http_req = &sent[0];
    assert_eq!(http_req.method(), http::Method::POST);
    assert_eq!(http_req.uri().to_string(), "https://cvm.tencentcloudapi.com/");
    assert_eq!(http_req.body().as_ref(), br#"{"Zones":["ap-guangzhou-3"]}"#);
    assert_eq!(header(http_req, "content-type"), "application/json");
    assert_eq!(header(http_req, "host"), "cvm.tencentcloudapi.com");
    assert_eq!(header(http_req, "x-tc-action"), "DescribeZones");
    assert_eq!(header(http_req, "x-tc-version"), "2017-03-12");
    assert_eq!(header(http_req, "x-tc-region"), "ap-guangzhou");
    assert_eq!(header(http_req, "x-tc-language"), "zh-CN");
    assert_eq!(
        header(http_req, "x-tc-timestamp"),
        req.params()["Timestamp"]
    );
    assert!(header(http_req, "authorization").starts_with(
        "TC3-HMAC-SHA256 Credential=AKID1/"
    ));
    assert!(header(http_req, "authorization")
        .contains("/cvm/tc3_request, SignedHeaders=content-type;host, Signature="));
    assert!(http_req.headers()[AUTHORIZATION].is_sensitive());
}

#[tokio::test]
async fn test_tc3_get_with_token_and_unsigned_payload() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let profile = ClientProfile::default()
        .with_unsigned_payload(true)
        .with_http_profile(HttpProfile::default().with_method(HttpMethod::Get));
    let client = init_client()
        .with_credential(Credential::with_token("AKID1", "SECRET1", "TOKEN1"))
        .with_profile(profile)
        .with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(Some(vec![
        "ap-guangzhou-3".to_string(),
        "ap-guangzhou-4".to_string(),
    ]));

    let _: ApiResponse<Zones> = client.send(&mut req).await.unwrap();

    let sent = transport.take();
    let http_req = &sent[0];
    assert_eq!(http_req.method(), http::Method::GET);
    assert_eq!(
        http_req.uri().query(),
        Some("Zones.0=ap-guangzhou-3&Zones.1=ap-guangzhou-4")
    );
    assert!(http_req.body().is_empty());
    assert_eq!(
        header(http_req, "content-type"),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(header(http_req, "x-tc-token"), "TOKEN1");
    assert_eq!(header(http_req, "x-tc-content-sha256"), "UNSIGNED-PAYLOAD");
}

#[tokio::test]
async fn test_legacy_post_form_body() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let client = init_client()
        .with_signature_method(SignMethod::HmacSha256)
        .with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(Some(vec!["ap-guangzhou-3".to_string()]));

    let resp: ApiResponse<Zones> = client.send(&mut req).await.unwrap();
    assert_eq!(resp.request_id, "req-zones");

    let params = req.params();
    assert_eq!(params["Action"], "DescribeZones");
    assert_eq!(params["Region"], "ap-guangzhou");
    assert_eq!(params["SecretId"], "AKID1");
    assert_eq!(params["SignatureMethod"], "HmacSHA256");
    assert_eq!(params["Zones.0"], "ap-guangzhou-3");
    assert!(!params["Signature"].is_empty());

    let sent = transport.take();
    let http_req = &sent[0];
    assert_eq!(http_req.method(), http::Method::POST);
    assert_eq!(
        http_req.headers()[CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    assert!(http_req.headers().get(AUTHORIZATION).is_none());
    let body = std::str::from_utf8(http_req.body()).unwrap();
    let form: Vec<(String, String)> = form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect();
    let keys: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(form.contains(&("Signature".to_string(), params["Signature"].clone())));
    assert!(!body.contains("SECRET1"));
}

#[tokio::test]
async fn test_legacy_get_query() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let profile = ClientProfile::default()
        .with_sign_method(SignMethod::HmacSha1)
        .with_http_profile(HttpProfile::default().with_method(HttpMethod::Get));
    let client = init_client()
        .with_profile(profile)
        .with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(None);

    let _: ApiResponse<Zones> = client.send(&mut req).await.unwrap();

    let sent = transport.take();
    let http_req = &sent[0];
    assert_eq!(http_req.method(), http::Method::GET);
    assert!(http_req.body().is_empty());
    let query = http_req.uri().query().unwrap();
    assert!(query.contains("SignatureMethod=HmacSHA1"));
    assert!(query.contains("Language=zh-CN"));
    assert!(query.contains("Signature="));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_network_error() {
    let profile = ClientProfile::default()
        .with_http_profile(HttpProfile::default().with_timeout_secs(3));
    let client = init_client()
        .with_profile(profile)
        .with_http_transport(StalledHttpSend);
    let mut req = DescribeZonesRequest::new(None);

    let err = client
        .send::<_, ApiResponse<Zones>>(&mut req)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.to_string().contains("timed out after 3s"));
}

#[tokio::test]
async fn test_zero_timeout_uses_default() {
    let mut profile = ClientProfile::default();
    profile.http_profile.timeout_secs = 0;
    let client = init_client()
        .with_profile(profile)
        .with_http_transport(SlowHttpSend);
    let mut req = DescribeZonesRequest::new(None);

    let resp: ApiResponse<Zones> = client.send(&mut req).await.unwrap();
    assert_eq!(resp.request_id(), "req-zones");
}

#[tokio::test]
async fn test_config_endpoint_becomes_host() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let config = Config {
        region: Some("ap-shanghai".to_string()),
        secret_id: Some("AKID1".to_string()),
        secret_key: Some("SECRET1".to_string()),
        token: Some("TOKEN1".to_string()),
        endpoint: Some("cvm.ap-shanghai.tencentcloudapi.com".to_string()),
    };
    let client = Client::from_config(&config).with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(None);
    let _: ApiResponse<Zones> = client.send(&mut req).await.unwrap();

    let sent = transport.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(header(&sent[0], "host"), "cvm.ap-shanghai.tencentcloudapi.com");
    assert_eq!(header(&sent[0], "x-tc-region"), "ap-shanghai");
    assert_eq!(header(&sent[0], "x-tc-token"), "TOKEN1");
    assert_eq!(
        sent[0].uri().to_string(),
        "https://cvm.ap-shanghai.tencentcloudapi.com/"
    );
}

#[tokio::test]
async fn test_missing_credential() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let client = Client::new("ap-guangzhou").with_http_transport(transport.clone());
    let mut req = DescribeZonesRequest::new(None);

    let err = client
        .send::<_, ApiResponse<Zones>>(&mut req)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(transport.take().is_empty());
}

#[tokio::test]
async fn test_bad_status_is_response_invalid() {
    let transport = CaptureHttpSend::new(503, "service unavailable");
    let client = init_client().with_http_transport(transport);
    let mut req = DescribeZonesRequest::new(None);

    let err = client
        .send::<_, ApiResponse<Zones>>(&mut req)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert!(err.to_string().contains("service unavailable"));
}

#[tokio::test]
async fn test_endpoint_and_request_domain() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let profile = ClientProfile::default().with_http_profile(
        HttpProfile::default().with_endpoint("cvm.ap-shanghai.tencentcloudapi.com"),
    );
    let client = init_client()
        .with_profile(profile)
        .with_http_transport(transport.clone());

    let mut req = DescribeZonesRequest::new(None);
    let _: ApiResponse<Zones> = client.send(&mut req).await.unwrap();

    let mut pinned = DescribeZonesRequest::new(None);
    pinned.base_mut().set_domain("cvm.internal.tencentcloudapi.com");
    let _: ApiResponse<Zones> = client.send(&mut pinned).await.unwrap();

    let sent = transport.take();
    assert_eq!(header(&sent[0], "host"), "cvm.ap-shanghai.tencentcloudapi.com");
    assert_eq!(header(&sent[1], "host"), "cvm.internal.tencentcloudapi.com");
}

#[tokio::test]
async fn test_concurrent_sends() {
    let transport = CaptureHttpSend::new(200, ZONES_BODY);
    let client = init_client().with_http_transport(transport.clone());

    let mut a = DescribeZonesRequest::new(None);
    let mut b = DescribeZonesRequest::new(None);
    let (ra, rb) = tokio::join!(
        client.send::<_, ApiResponse<Zones>>(&mut a),
        client.send::<_, ApiResponse<Zones>>(&mut b),
    );
    assert!(ra.is_ok());
    assert!(rb.is_ok());
    assert_eq!(transport.take().len(), 2);
}

#[tokio::test]
async fn test_send_through_reqwest() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("x-tc-action", "DescribeZones")
        .match_header("x-tc-region", "ap-guangzhou")
        .match_header("content-type", "application/json")
        .match_header(
            "authorization",
            mockito::Matcher::Regex("^TC3-HMAC-SHA256 Credential=AKID1/".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ZONES_BODY)
        .create_async()
        .await;

    let profile = ClientProfile::default().with_debug(true).with_http_profile(
        HttpProfile::default()
            .with_scheme(Scheme::Http)
            .with_endpoint(server.host_with_port()),
    );
    let client = Client::new_with_secret_id("AKID1", "SECRET1", "ap-guangzhou").with_profile(profile);

    let mut req = DescribeZonesRequest::new(None);
    let resp: ApiResponse<Zones> = client.send(&mut req).await?;
    assert_eq!(resp.request_id, "req-zones");
    assert_eq!(resp.data.total_count, 1);

    mock.assert_async().await;
    Ok(())
}
