use super::*;

#[test]
fn text_contains_all_fields() {
    let record = Record::new("sampler", Context::Gpu, 42);

    assert!(record.text().contains("sampler"));
    assert!(record.text().contains("[GPU]"));
    assert!(record.text().contains("[WARN]"));
    assert!(record.text().contains("Payload value is: 42%"));
}

#[test]
fn text_has_canonical_shape() {
    let record = Record::new("app", Context::Cpu, 10);

    // [YYYY-MM-DD HH:MM:SS] [CPU] [app] [INFO] Payload value is: 10%
    let text = record.text();
    assert!(text.starts_with('['));
    assert_eq!(&text[11..12], " ");
    assert!(text.ends_with("[CPU] [app] [INFO] Payload value is: 10%"));

    // Timestamp section is exactly 19 characters between the brackets.
    let close = text.find(']').unwrap();
    assert_eq!(close, 20);
}

#[test]
fn default_severity_buckets() {
    assert_eq!(Record::new("a", Context::Cpu, 0).severity(), Severity::Info);
    assert_eq!(Record::new("a", Context::Cpu, 25).severity(), Severity::Info);
    assert_eq!(Record::new("a", Context::Cpu, 26).severity(), Severity::Warn);
    assert_eq!(Record::new("a", Context::Cpu, 74).severity(), Severity::Warn);
    assert_eq!(
        Record::new("a", Context::Cpu, 75).severity(),
        Severity::Critical
    );
    assert_eq!(
        Record::new("a", Context::Cpu, 100).severity(),
        Severity::Critical
    );
}

#[test]
fn explicit_severity_wins_over_buckets() {
    let record = Record::with_severity("a", Context::Ram, Severity::Info, 99);
    assert_eq!(record.severity(), Severity::Info);
    assert!(record.text().contains("[INFO]"));
}

#[test]
fn payload_is_capped_at_100() {
    let record = Record::new("a", Context::Cpu, 250);
    assert_eq!(record.payload(), 100);
    assert!(record.text().contains("Payload value is: 100%"));

    let record = Record::with_severity("a", Context::Cpu, Severity::Warn, 101);
    assert_eq!(record.payload(), 100);
}

#[test]
fn display_matches_text() {
    let record = Record::new("display", Context::Ram, 55);
    assert_eq!(format!("{record}"), record.text());
}

#[test]
fn severity_ordering() {
    assert!(Severity::Info < Severity::Warn);
    assert!(Severity::Warn < Severity::Critical);
}

#[test]
fn context_and_severity_tags() {
    assert_eq!(Context::Cpu.as_str(), "CPU");
    assert_eq!(Context::Gpu.as_str(), "GPU");
    assert_eq!(Context::Ram.as_str(), "RAM");
    assert_eq!(Severity::Info.as_str(), "INFO");
    assert_eq!(Severity::Warn.as_str(), "WARN");
    assert_eq!(Severity::Critical.as_str(), "CRITICAL");
}
