use core_logic::{
    setup_logger, ConfigError, CoreError, ProxyDescriptor, ProxyProtocol, WalletError,
    REQUEST_TIMEOUT_MS, USER_AGENT,
};

#[test]
fn test_fixed_http_settings() {
    assert_eq!(REQUEST_TIMEOUT_MS, 30_000);
    assert_eq!(
        USER_AGENT,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36"
    );
}

#[test]
fn test_protocol_from_scheme() {
    assert_eq!(ProxyProtocol::from_scheme("HTTPS"), Some(ProxyProtocol::Https));
    assert_eq!(ProxyProtocol::from_scheme("socks"), Some(ProxyProtocol::Socks));
    assert_eq!(ProxyProtocol::from_scheme("socks4"), None);
    assert_eq!(ProxyProtocol::Https.default_port(), 443);
    assert_eq!(ProxyProtocol::Socks5.default_port(), 80);
}

#[test]
fn test_proxy_descriptor_serde() {
    let proxy = ProxyDescriptor {
        protocol: ProxyProtocol::Socks5,
        host: "proxy.example.com".to_string(),
        port: 1080,
        username: None,
        password: None,
    };

    let json = serde_json::to_string(&proxy).unwrap();
    assert!(json.contains(r#""protocol":"socks5""#));

    let back: ProxyDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, proxy);
    assert!(!back.has_credentials());
}

#[test]
fn test_core_error_wraps_families() {
    let err: CoreError = WalletError::EmptyKey.into();
    assert_eq!(err.to_string(), "Private key is empty");

    let err: CoreError = ConfigError::FileNotFound {
        path: "config.toml".to_string(),
    }
    .into();
    assert_eq!(err.to_string(), "File not found: config.toml");
}

#[test]
fn test_setup_logger_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");

    let guard = setup_logger(&log_dir).expect("first install succeeds");
    assert!(log_dir.is_dir());
    tracing::warn!(context = "wallet-0", "Attempt 1/3 failed");
    drop(guard);
}
