// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! crl-editor-client CLI entrypoint.
//!
//! Connects to a running editor server, keeps the navigator tree and diagrams in sync, and logs
//! every view change. Stops on Ctrl-C.

use std::error::Error;

use crl_editor_client::channel::run_client;
use crl_editor_client::config::{ClientConfig, DEFAULT_NOTIFICATION_URL, DEFAULT_REQUEST_URL};
use crl_editor_client::view::TracingView;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--notification-url <ws-url>] [--request-url <http-url>] [--automated-test] [--max-reconnects <n>] [--log-level <filter>]\n  {program} --print-schema\n\nDefaults: notification {DEFAULT_NOTIFICATION_URL}, request {DEFAULT_REQUEST_URL}.\nUnset URLs fall back to CRL_NOTIFICATION_URL / CRL_REQUEST_URL; CRL_AUTOMATED_TEST=1 suppresses alerts.\n--log-level takes a tracing filter (default `info`, RUST_LOG wins when set).\n--print-schema writes the JSON schema of the wire envelopes to stdout."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    notification_url: Option<String>,
    request_url: Option<String>,
    automated_test: bool,
    max_reconnects: Option<u32>,
    log_level: Option<String>,
    print_schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--notification-url" => {
                if options.notification_url.is_some() {
                    return Err(());
                }
                options.notification_url = Some(args.next().ok_or(())?);
            }
            "--request-url" => {
                if options.request_url.is_some() {
                    return Err(());
                }
                options.request_url = Some(args.next().ok_or(())?);
            }
            "--automated-test" => {
                if options.automated_test {
                    return Err(());
                }
                options.automated_test = true;
            }
            "--max-reconnects" => {
                if options.max_reconnects.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.max_reconnects = Some(raw.parse().map_err(|_| ())?);
            }
            "--log-level" => {
                if options.log_level.is_some() {
                    return Err(());
                }
                options.log_level = Some(args.next().ok_or(())?);
            }
            "--print-schema" => {
                if options.print_schema {
                    return Err(());
                }
                options.print_schema = true;
            }
            _ => return Err(()),
        }
    }

    let connects = options.notification_url.is_some()
        || options.request_url.is_some()
        || options.automated_test
        || options.max_reconnects.is_some();
    if options.print_schema && connects {
        return Err(());
    }

    Ok(options)
}

fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "crl-editor-client".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.print_schema {
            let schema = serde_json::to_string_pretty(&crl_editor_client::protocol::schemas())?;
            println!("{schema}");
            return Ok(());
        }

        init_tracing(options.log_level.as_deref());

        let mut config = ClientConfig::resolve(
            options.notification_url.as_deref(),
            options.request_url.as_deref(),
            options.automated_test,
            |key| std::env::var(key).ok(),
        )?;
        config.max_reconnects = options.max_reconnects;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let view = runtime.block_on(async {
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %err, "ctrl-c handler unavailable");
                    std::future::pending::<()>().await;
                }
                tracing::info!("shutting down");
            };
            run_client(&config, TracingView::default(), shutdown).await
        })?;
        tracing::info!(changes = view.changes(), "client stopped");

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("crl-editor-client: {err}");
        std::process::exit(1);
    }
}
