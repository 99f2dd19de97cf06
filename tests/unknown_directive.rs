use unitlint::{Severity, Validator, parse};

const NGINX_SERVICE: &str = r#"# /etc/systemd/system/nginx.service
[Unit]
Description=The NGINX HTTP and reverse proxy server
After=syslog.target network-online.target remote-fs.target nss-lookup.target
Wants=network-online.target
WantedBy=multi-user.target

[Service]
Type=forking
PIDFile=/run/nginx.pid
ExecStartPre=/usr/sbin/nginx -t
ExecStart=/usr/sbin/nginx
ExecReload=/usr/sbin/nginx -s reload
ExecStop=/bin/kill -s QUIT $MAINPID
PrivateTmp=true
MemoryMax=512M
KillMode=mixed
Restart=on-failure
RestartSecs=5
X-Managed-By=ansible

[Install]
WantedBy=multi-user.target
"#;

#[test]
fn realistic_unit_file_flags_misplaced_and_misspelled_keys() {
    let diagnostics = Validator::new().validate_str(NGINX_SERVICE);

    let keys: Vec<&str> = diagnostics
        .iter()
        .map(|diagnostic| diagnostic.text(NGINX_SERVICE))
        .collect();
    assert_eq!(keys, vec!["WantedBy", "RestartSecs"]);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn parsed_document_keeps_structure() {
    let document = parse(NGINX_SERVICE);

    let names: Vec<&str> = document.sections().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Unit", "Service", "Install"]);
    assert_eq!(document.sections()[1].directives.len(), 12);

    let exec_stop = document.sections()[1].directive("ExecStop").unwrap();
    assert_eq!(exec_stop.value, "/bin/kill -s QUIT $MAINPID");
}

#[test]
fn document_span_matches_source_offsets() {
    let document = parse(NGINX_SERVICE);
    for section in document.sections() {
        assert_eq!(section.span.slice(NGINX_SERVICE), format!("[{}]", section.name));
        for directive in &section.directives {
            assert_eq!(directive.key_span.slice(NGINX_SERVICE), directive.key);
        }
    }
}
