#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use zak_gateway::config::{self, Mode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
http:
  listen: "0.0.0.0:8080"
  max_body_byte: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
    assert_eq!(err.code(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.mode, Mode::Http);
    assert_eq!(cfg.http.max_body_bytes, 1_000_000);
    assert_eq!(cfg.http.adapter_id, "http-pilot-v1");
    assert_eq!(cfg.sentry.adapter_id, "zak-ingress-sentry-v1");
    assert!(!cfg.sentry.prefilter_pulses);
    assert_eq!(cfg.kernel.simulated_latency_ms, 10);
}

#[test]
fn sentry_mode() {
    let ok = r#"
version: 1
mode: sentry
sentry:
  listen: "127.0.0.1:9100"
  prefilter_pulses: true
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.mode, Mode::Sentry);
    assert_eq!(cfg.sentry.listen_addr().unwrap().port(), 9100);
    assert!(cfg.sentry.prefilter_pulses);
}

#[test]
fn rejects_out_of_range_values() {
    let cases = [
        "version: 2\n",
        "version: 1\nmode: carrier-pigeon\n",
        "version: 1\nhttp:\n  listen: \"not-an-addr\"\n",
        "version: 1\nhttp:\n  max_body_bytes: 0\n",
        "version: 1\nhttp:\n  adapter_id: \"  \"\n",
        "version: 1\nsentry:\n  listen: \"localhost\"\n",
        "version: 1\nkernel:\n  simulated_latency_ms: 600000\n",
    ];
    for yaml in cases {
        let err = config::load_from_str(yaml).expect_err(yaml);
        assert_eq!(err.code(), "CONFIG", "{yaml}");
    }
}

#[test]
fn shipped_config_is_valid() {
    let cfg = config::load_from_file("../../zak.yaml").expect("zak.yaml must load");
    assert_eq!(cfg.http.listen_addr().unwrap().port(), 8080);
}
