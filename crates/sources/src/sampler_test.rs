use std::sync::Mutex;
use std::sync::atomic::AtomicU64;

use vitals_pipeline::LogManagerBuilder;
use vitals_protocol::{CpuPolicy, Record, Severity};
use vitals_sinks::{Sink, SinkError};

use super::*;

/// Source that replays a fixed script, then reports unavailability.
struct ScriptedSource {
    samples: Vec<&'static str>,
    next: usize,
}

impl ScriptedSource {
    fn new(samples: Vec<&'static str>) -> Self {
        Self { samples, next: 0 }
    }
}

impl Source for ScriptedSource {
    fn open(&mut self) -> bool {
        true
    }

    fn read(&mut self, out: &mut String) -> bool {
        let Some(sample) = self.samples.get(self.next) else {
            return false;
        };
        self.next += 1;
        out.push_str(sample);
        true
    }
}

/// Source that refuses to open.
struct BrokenSource;

impl Source for BrokenSource {
    fn open(&mut self) -> bool {
        false
    }

    fn read(&mut self, _out: &mut String) -> bool {
        false
    }
}

struct CollectingSink {
    seen: Mutex<Vec<Record>>,
    writes: AtomicU64,
}

impl CollectingSink {
    fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            writes: AtomicU64::new(0),
        }
    }

    fn seen(&self) -> Vec<Record> {
        self.seen.lock().unwrap().clone()
    }
}

impl Sink for CollectingSink {
    fn name(&self) -> &str {
        "collecting"
    }

    fn write(&self, record: &Record) -> Result<(), SinkError> {
        self.seen.lock().unwrap().push(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn classifies_and_logs_each_sample() {
    let sink = Arc::new(CollectingSink::new());
    let manager = Arc::new(
        LogManagerBuilder::new()
            .app_name("sampler-test")
            .sink(sink.clone())
            .buffer_capacity(16)
            .build(),
    );
    manager.start();

    let shutdown = Arc::new(AtomicBool::new(false));
    let classifier = Classifier::<CpuPolicy>::new("sampler-test");
    let sampler = Sampler::new(
        "cpu",
        Box::new(ScriptedSource::new(vec!["10", "80", "95", "garbage"])),
        classifier,
        Duration::from_millis(1),
    );

    let handle = sampler.spawn(Arc::clone(&manager), Arc::clone(&shutdown));

    // Give the sampler time to work through the script.
    thread::sleep(Duration::from_millis(100));
    shutdown.store(true, Ordering::Relaxed);
    handle.join().unwrap();
    manager.stop();

    let seen = sink.seen();
    assert_eq!(seen.len(), 3, "the unparseable sample must be dropped");

    let severities: Vec<Severity> = seen.iter().map(|r| r.severity()).collect();
    assert_eq!(
        severities,
        vec![Severity::Info, Severity::Warn, Severity::Critical]
    );
    assert!(seen.iter().all(|r| r.app_name() == "sampler-test"));
}

#[test]
fn exits_when_the_source_fails_to_open() {
    let manager = Arc::new(
        LogManagerBuilder::new()
            .sink(Arc::new(CollectingSink::new()))
            .buffer_capacity(4)
            .build(),
    );
    manager.start();

    let shutdown = Arc::new(AtomicBool::new(false));
    let classifier = Classifier::<CpuPolicy>::new("t");
    let sampler = Sampler::new(
        "broken",
        Box::new(BrokenSource),
        classifier,
        Duration::from_millis(1),
    );

    // Must return promptly without the shutdown flag ever being set.
    let handle = sampler.spawn(Arc::clone(&manager), shutdown);
    handle.join().unwrap();

    manager.stop();
    assert_eq!(manager.metrics().snapshot().records_enqueued, 0);
}

#[test]
fn stops_when_the_manager_stops() {
    let manager = Arc::new(
        LogManagerBuilder::new()
            .sink(Arc::new(CollectingSink::new()))
            .buffer_capacity(4)
            .build(),
    );
    manager.start();

    let shutdown = Arc::new(AtomicBool::new(false));
    let classifier = Classifier::<CpuPolicy>::new("t");
    let sampler = Sampler::new(
        "cpu",
        Box::new(ScriptedSource::new(vec!["1"; 10_000])),
        classifier,
        Duration::from_millis(1),
    );
    let handle = sampler.spawn(Arc::clone(&manager), shutdown);

    thread::sleep(Duration::from_millis(20));
    manager.stop();

    // The sampler notices the stopped manager without the shutdown flag.
    handle.join().unwrap();
}
