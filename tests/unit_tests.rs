//! Unit tests for the provisioning policy.
//!
//! These exercise the pure resolver across the platform/flag matrix
//! without touching the filesystem.

mod helpers;

use helpers::{server_record, server_services};
use regex::Regex;
use sensu_rabbitmq::policy::credentials::DEFAULT_PERMISSIONS;
use sensu_rabbitmq::policy::packages::{DEBIAN_ERLANG, ESL_ERLANG, RHEL_ERLANG};
use sensu_rabbitmq::policy::{CredentialRecord, RawCredentialRecord, ServiceCredentials};
use sensu_rabbitmq::{
    resolve, resolve_node, FeatureFlags, PlatformDescriptor, PlatformFamily, PolicyError,
};

fn flags(use_ssl: bool, use_esl_erlang: bool) -> FeatureFlags {
    FeatureFlags {
        use_ssl,
        use_esl_erlang,
    }
}

const ALL_FLAGS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

// =============================================================================
// Package selection
// =============================================================================

#[test]
fn test_debian_always_installs_standard_erlang() {
    for version in [7, 10, 12, 24] {
        let platform = PlatformDescriptor::new(PlatformFamily::Debian, version);
        for (ssl, esl) in ALL_FLAGS {
            let result = resolve(&platform, &flags(ssl, esl), &[]).unwrap();
            assert!(result.installs(DEBIAN_ERLANG), "debian {} esl={}", version, esl);
            assert_eq!(result.installs(ESL_ERLANG), esl, "debian {} esl={}", version, esl);
        }
    }
}

#[test]
fn test_rhel5_never_installs_esl_erlang() {
    let platform = PlatformDescriptor::new(PlatformFamily::Rhel, 5);
    for (ssl, esl) in ALL_FLAGS {
        let result = resolve(&platform, &flags(ssl, esl), &[]).unwrap();
        assert!(!result.installs(ESL_ERLANG));
        assert!(result.installs(RHEL_ERLANG));
    }
}

#[test]
fn test_rhel6_and_later_follow_flag() {
    for version in [6, 7, 8, 9] {
        let platform = PlatformDescriptor::new(PlatformFamily::Rhel, version);
        for (ssl, esl) in ALL_FLAGS {
            let result = resolve(&platform, &flags(ssl, esl), &[]).unwrap();
            assert!(result.installs(RHEL_ERLANG));
            assert_eq!(result.installs(ESL_ERLANG), esl, "rhel {}", version);
        }
    }
}

#[test]
fn test_exactly_one_standard_runtime_entry() {
    for family in [PlatformFamily::Debian, PlatformFamily::Rhel] {
        for version in [5, 6, 12] {
            let platform = PlatformDescriptor::new(family, version);
            for (ssl, esl) in ALL_FLAGS {
                let result = resolve(&platform, &flags(ssl, esl), &[]).unwrap();
                let names: Vec<_> = result.packages.iter().map(|p| p.name).collect();
                let mut deduped = names.clone();
                deduped.dedup();
                assert_eq!(names, deduped, "duplicate package entry for {}", platform);
                assert_eq!(names.len(), 2);
            }
        }
    }
}

// =============================================================================
// SSL attributes
// =============================================================================

#[test]
fn test_ssl_attributes_all_or_nothing() {
    let platform = PlatformDescriptor::new(PlatformFamily::Rhel, 6);
    for (ssl, esl) in ALL_FLAGS {
        let result = resolve(&platform, &flags(ssl, esl), &[]).unwrap();
        let entries = result.ssl.entries();
        if ssl {
            assert_eq!(entries.len(), 7);
            for (name, value) in &entries {
                assert!(!value.is_null(), "{} is null", name);
                if let Some(s) = value.as_str() {
                    assert!(!s.is_empty(), "{} is empty", name);
                }
            }
        } else {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].0, "ssl");
            assert_eq!(entries[0].1, serde_json::json!(false));
        }
    }
}

#[test]
fn test_scenario_ssl_enabled_attributes() {
    let result = resolve_node("ubuntu", "12.04", &flags(true, false), &[]).unwrap();
    let settings = result.ssl.settings().expect("ssl settings should be present");
    assert_eq!(settings.port, 5671);
    assert_eq!(settings.verify, "verify_peer");
    assert!(settings.fail_if_no_peer_cert);
    assert_eq!(settings.cacert, "/etc/rabbitmq/ssl/cacert.pem");
    assert_eq!(settings.cert, "/etc/rabbitmq/ssl/cert.pem");
    assert_eq!(settings.key, "/etc/rabbitmq/ssl/key.pem");
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn test_default_record_always_first() {
    for (ssl, esl) in ALL_FLAGS {
        let result = resolve_node("centos", "6.6", &flags(ssl, esl), &server_services()).unwrap();
        assert_eq!(result.credentials[0], CredentialRecord::default_record());
    }
}

#[test]
fn test_service_records_provisioned_once_verbatim() {
    let api = CredentialRecord::new("/api", "api_user", "api_pw", "^api.* .* .*");
    let services = vec![
        ServiceCredentials::new("server", RawCredentialRecord::from(server_record())),
        ServiceCredentials::new("api", RawCredentialRecord::from(api.clone())),
    ];
    let result = resolve_node("debian", "12", &FeatureFlags::default(), &services).unwrap();
    assert_eq!(
        result.credentials,
        vec![CredentialRecord::default_record(), server_record(), api]
    );
}

#[test]
fn test_default_permissions_match_everything() {
    let record = CredentialRecord::default_record();
    assert_eq!(record.permissions, DEFAULT_PERMISSIONS);
    let patterns = record.permission_patterns().unwrap();
    for pattern in patterns {
        let re = Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        for resource in ["", "amq.gen-x", "results", "keepalives"] {
            assert!(re.is_match(resource), "{} should match {:?}", pattern, resource);
        }
    }
}

#[test]
fn test_missing_field_is_invalid_credential_record() {
    let mut raw = RawCredentialRecord::from(server_record());
    raw.user = None;
    let err = resolve_node(
        "ubuntu",
        "12.04",
        &FeatureFlags::default(),
        &[ServiceCredentials::new("server", raw)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        PolicyError::InvalidCredentialRecord {
            source_name: "server".to_string(),
            field: "user",
        }
    );
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_scenario_debian_defaults() {
    let result = resolve_node("debian", "12", &FeatureFlags::default(), &[]).unwrap();
    let installed: Vec<_> = result
        .packages
        .iter()
        .filter(|p| p.install)
        .map(|p| p.name)
        .collect();
    assert_eq!(installed, vec![DEBIAN_ERLANG]);
    assert_eq!(
        serde_json::to_value(&result.ssl).unwrap(),
        serde_json::json!({ "ssl": false })
    );
    assert_eq!(result.credentials, vec![CredentialRecord::default_record()]);
}

#[test]
fn test_scenario_rhel5_downgrades_esl_flag() {
    let result = resolve_node("redhat", "5.10", &flags(false, true), &[]).unwrap();
    assert!(result.installs(RHEL_ERLANG));
    assert!(!result.installs(ESL_ERLANG));
}

#[test]
fn test_scenario_rhel6_installs_both() {
    let result = resolve_node("redhat", "6.6", &flags(false, true), &[]).unwrap();
    assert!(result.installs(RHEL_ERLANG));
    assert!(result.installs(ESL_ERLANG));
}

#[test]
fn test_unsupported_platform_is_reproducible() {
    let first = resolve_node("solaris", "11.4", &FeatureFlags::default(), &[]).unwrap_err();
    let second = resolve_node("solaris", "11.4", &FeatureFlags::default(), &[]).unwrap_err();
    assert!(matches!(first, PolicyError::UnsupportedPlatform { .. }));
    assert_eq!(first, second);
}

#[test]
fn test_resolution_is_deterministic() {
    for (ssl, esl) in ALL_FLAGS {
        let a = resolve_node("ubuntu", "12.04", &flags(ssl, esl), &server_services()).unwrap();
        let b = resolve_node("ubuntu", "12.04", &flags(ssl, esl), &server_services()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
