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

//! Core components for signing and sending Tencent Cloud API requests.
//!
//! This crate provides the foundational types and traits shared by the tcapi
//! service crates. It knows nothing about a specific signature scheme; it only
//! offers the building blocks those schemes are made of.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Credentials**: The [`ProvideCredential`] trait and [`ProvideCredentialChain`] for loading secrets
//! - **Errors**: A single [`Error`] type whose [`ErrorKind`] tells network, encoding and signing failures apart
//!
//! ## Example
//!
//! ```no_run
//! use tcapi_core::{Context, OsEnv};
//!
//! // Start from no-op components and plug in what the caller needs.
//! let ctx = Context::new().with_env(OsEnv);
//! assert!(ctx.env_var("PATH").is_some());
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: SHA and HMAC helpers used by the signers
//! - [`time`]: Time helpers used to derive signing dates
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};
