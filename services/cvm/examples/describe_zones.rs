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

use anyhow::Result;
use tcapi_common::{ClientProfile, Config, DefaultCredentialProvider, HttpProfile};
use tcapi_core::{Context, OsEnv, ProvideCredential};
use tcapi_file_read_tokio::TokioFileRead;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for debugging
    let _ = env_logger::builder().is_test(true).try_init();

    // Region, endpoint and credentials from TENCENTCLOUD_* env
    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let config = Config::from_env(&ctx);

    let profile = ClientProfile::default()
        .with_http_profile(HttpProfile::default().with_timeout_secs(10))
        .with_debug(true);
    let mut client = tcapi_common::Client::new("ap-guangzhou")
        .with_profile(profile)
        .with_config(&config);

    // Fall back to ~/.tencentcloud/credentials
    if client.credential().is_none() {
        match DefaultCredentialProvider::new().provide_credential(&ctx).await? {
            Some(cred) => client = client.with_credential(cred),
            None => {
                println!("No Tencent Cloud credentials found in env or ~/.tencentcloud/credentials");
                println!("Set TENCENTCLOUD_SECRET_ID and TENCENTCLOUD_SECRET_KEY to run this example");
                return Ok(());
            }
        }
    }

    println!("querying zones of {}", client.region());
    let cvm = tcapi_cvm::Client::new(client);

    let resp = cvm.describe_zones(None).await?;
    println!("request id: {}", resp.request_id);
    match resp.into_result() {
        Ok(zones) => {
            println!("{} zones:", zones.total_count);
            for zone in zones.zone_set {
                println!("  {} ({}) {}", zone.zone, zone.zone_name, zone.zone_state);
            }
        }
        Err(e) => eprintln!("API error: {e}"),
    }

    Ok(())
}
