//! Tests for CLI option parsing and process exit codes.

mod helpers;

use std::io::Write;
use std::process::{Command, Output};

use clap::Parser;
use flight_scan::config::{Opt, OutputFormat, SessionBackend, BASE_URL_ENV};
use helpers::result_page;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flight_scan"))
        .args(args)
        .env_remove(BASE_URL_ENV)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run flight_scan binary")
}

fn saved_page(html: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(html.as_bytes())
        .expect("Failed to write saved page");
    file
}

const FAST: [&str; 6] = [
    "--poll-initial-delay-ms",
    "2",
    "--poll-max-delay-ms",
    "4",
    "--block-pacing-ms",
    "0",
];

#[test]
fn test_opt_defaults() {
    let opt = Opt::try_parse_from(["flight_scan", "MHD", "THR", "1404-08-14"]).unwrap();
    assert_eq!(opt.backend, SessionBackend::Http);
    assert_eq!(opt.output, OutputFormat::Plain);
    assert_eq!(opt.adults, 1);
    assert!(!opt.headed);
    assert!(!opt.show_stats);
    assert!(opt.html_file.is_none());
}

#[test]
fn test_opt_rejects_malformed_codes() {
    assert!(Opt::try_parse_from(["flight_scan", "MASH", "THR", "1404-08-14"]).is_err());
    assert!(Opt::try_parse_from(["flight_scan", "MHD", "T2R", "1404-08-14"]).is_err());
    assert!(Opt::try_parse_from(["flight_scan", "MHD", "THR"]).is_err());
}

#[test]
fn test_opt_backend_and_output_values() {
    let opt = Opt::try_parse_from([
        "flight_scan",
        "MHD",
        "THR",
        "1404-08-14",
        "--backend",
        "chromium",
        "--output",
        "json",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert_eq!(opt.backend, SessionBackend::Chromium);
    assert_eq!(opt.output, OutputFormat::Json);
}

#[test]
fn test_cli_prints_ranked_listings_from_saved_page() {
    let page = saved_page(&result_page(&[
        (Some("08:30"), Some("1,500,000"), Some("go('/checkout/a')")),
        (Some("09:00"), Some("1,200,000"), Some("go('/checkout/b')")),
    ]));
    let path = page.path().to_str().unwrap();

    let mut args = vec!["MHD", "THR", "1404-08-14", "--html-file", path];
    args.extend_from_slice(&FAST);
    let output = run_cli(&args);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1. 🕒 09:00 | 💰 1,200,000 | 🔗 https://www.alibaba.ir/checkout/b",
            "2. 🕒 08:30 | 💰 1,500,000 | 🔗 https://www.alibaba.ir/checkout/a",
        ]
    );
}

#[test]
fn test_cli_json_output_for_empty_results() {
    let page = saved_page(&result_page(&[]));
    let path = page.path().to_str().unwrap();

    let mut args = vec![
        "MHD",
        "THR",
        "1404-08-14",
        "--html-file",
        path,
        "--output",
        "json",
    ];
    args.extend_from_slice(&FAST);
    let output = run_cli(&args);

    assert_eq!(output.status.code(), Some(0), "no flights is still success");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn test_cli_search_failure_exits_with_one() {
    let page = saved_page("<html><body>Service unavailable</body></html>");
    let path = page.path().to_str().unwrap();

    let mut args = vec![
        "MHD",
        "THR",
        "1404-08-14",
        "--html-file",
        path,
        "--max-readiness-polls",
        "2",
    ];
    args.extend_from_slice(&FAST);
    let output = run_cli(&args);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not ready"), "stderr: {stderr}");
}

#[test]
fn test_cli_setup_failures_exit_with_two() {
    let output = run_cli(&[
        "MHD",
        "THR",
        "1404-08-14",
        "--html-file",
        "/nonexistent/results.html",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_cli(&[
        "MHD",
        "THR",
        "1404-08-14",
        "--block-selector",
        "div >",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_cli(&["MHD", "THR", "1404-08-14", "--max-readiness-polls", "0"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_usage_error_exits_with_two() {
    let output = run_cli(&["MHD", "THR", "1404-08-14", "--adults", "0"]);
    assert_eq!(output.status.code(), Some(2));
}
