//! # relay-headers
//!
//! Normalizes the header comment block at the top of every source file in a
//! Swift package tree.
//!
//! For each `.swift` file inside a module directory under `Sources/` or
//! `Tests/`, the existing standard header (if any) is removed and a freshly
//! rendered one is prepended, carrying the file name, the owning module, the
//! run date and the fixed license text:
//!
//! ```text
//! //
//! //  Clock.swift
//! //  RelayCore
//! //
//! //  Created on March 30, 2025 as part of the Relay open-source observability SDK.
//! //  Copyright © 2025 Relay Contributors. All rights reserved.
//! //
//! //  Licensed under the MIT License.
//! //  See LICENSE.md in the project root for license information.
//! //
//! ```
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use chrono::NaiveDate;
//! use relay_headers::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!   let created = NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date");
//!   let processor = Processor::new(ProcessorConfig {
//!     dry_run: true,
//!     ..ProcessorConfig::new(PathBuf::from("."), created)
//!   })?;
//!
//!   let reports = processor.update_headers()?;
//!   println!("{} files checked", reports.len());
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Directory walk and per-file rewriting
//! * [`templates`] - Header rendering
//! * [`header_detection`] - Recognizing existing headers
//! * [`config`] - Optional `.relay-headers.toml` configuration
//! * [`logging`] - Output modes and tracing setup

pub mod cli;
pub mod config;
pub mod diff;
pub mod header_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
