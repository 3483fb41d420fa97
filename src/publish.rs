//! @ai:module:intent Gate persistence and doc regeneration behind a clean validation
//! @ai:module:layer application
//! @ai:module:public_api Publisher, PublishOutcome, SourceStore, DocsGenerator, DiagnosticSource
//! @ai:module:depends_on validator, dialect, diagnostic, error
//! @ai:module:thread_safe true

use crate::diagnostic::Diagnostic;
use crate::dialect::{lookup, Dialect};
use crate::error::Result;
use crate::validator::{validate, validate_dialect};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// @ai:intent Durable storage for validated annotation text
pub trait SourceStore: Send + Sync {
    /// @ai:intent Persist the text as the dialect's annotation source
    fn write(&self, dialect: Dialect, text: &str) -> Result<()>;
}

/// @ai:intent Regenerates the documentation site from stored sources
pub trait DocsGenerator: Send + Sync {
    fn generate(&self) -> Result<()>;
}

/// @ai:intent Additional checker whose findings share the diagnostic shape
/// @ai:context e.g. a remote reviewer run after the grammar checks
pub trait DiagnosticSource: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, text: &str, dialect: Dialect) -> Vec<Diagnostic>;
}

/// @ai:intent Outcome of a publish attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Rejected(Vec<Diagnostic>),
}

/// @ai:intent Validates, then writes and regenerates, one publish at a time
pub struct Publisher<S, G> {
    store: S,
    generator: G,
    sources: Vec<Box<dyn DiagnosticSource>>,
    lock: Mutex<()>,
}

impl<S: SourceStore, G: DocsGenerator> Publisher<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            generator,
            sources: Vec::new(),
            lock: Mutex::new(()),
        }
    }

    /// @ai:intent Append an extra checker run after the grammar checks
    pub fn with_source(mut self, source: Box<dyn DiagnosticSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// @ai:intent Validate text and persist it only when no diagnostics remain
    /// @ai:post store and generator are untouched when the outcome is Rejected
    /// @ai:invariant concurrent publishes on this publisher never interleave
    /// @ai:effects fs:write
    pub fn publish(&self, text: &str, dialect_id: &str) -> Result<PublishOutcome> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let Ok(dialect) = lookup(dialect_id) else {
            return Ok(PublishOutcome::Rejected(validate(text, dialect_id)));
        };

        let mut diagnostics = validate_dialect(text, dialect);
        for source in &self.sources {
            let found = source.check(text, dialect);
            debug!(source = source.name(), findings = found.len(), "extra check");
            diagnostics.extend(found);
        }

        if !diagnostics.is_empty() {
            info!(%dialect, diagnostics = diagnostics.len(), "publish rejected");
            return Ok(PublishOutcome::Rejected(diagnostics));
        }

        self.store.write(dialect, text)?;
        self.generator.generate()?;
        info!(%dialect, file = dialect.file_name(), "published annotation source");

        Ok(PublishOutcome::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct Tracker {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl Tracker {
        fn enter(&self) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        written: Mutex<Vec<(Dialect, String)>>,
        tracker: Arc<Tracker>,
        fail: bool,
    }

    impl SourceStore for RecordingStore {
        fn write(&self, dialect: Dialect, text: &str) -> Result<()> {
            self.tracker.enter();
            if self.fail {
                return Err(Error::Store("disk full".to_string()));
            }
            self.written.lock().unwrap().push((dialect, text.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        tracker: Arc<Tracker>,
        fail: bool,
    }

    impl DocsGenerator for RecordingGenerator {
        fn generate(&self) -> Result<()> {
            self.tracker.enter();
            if self.fail {
                return Err(Error::Generate("apidoc exited with status 1".to_string()));
            }
            Ok(())
        }
    }

    struct AlwaysComplains;

    impl DiagnosticSource for AlwaysComplains {
        fn name(&self) -> &str {
            "always-complains"
        }

        fn check(&self, _text: &str, _dialect: Dialect) -> Vec<Diagnostic> {
            vec![Diagnostic {
                line: 2,
                message: "title should describe the action".to_string(),
            }]
        }
    }

    #[test]
    fn test_publishes_valid_text() {
        let publisher = Publisher::new(RecordingStore::default(), RecordingGenerator::default());

        let outcome = publisher.publish(Dialect::TripleQuote.template(), "python").unwrap();

        assert_eq!(outcome, PublishOutcome::Published);
        let written = publisher.store.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, Dialect::TripleQuote);
        assert_eq!(publisher.generator.tracker.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejects_invalid_text_without_side_effects() {
        let publisher = Publisher::new(RecordingStore::default(), RecordingGenerator::default());

        let outcome = publisher.publish("/**\n * @apiName X\n */", "javascript").unwrap();

        let PublishOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags.len(), 1);
        assert!(publisher.store.written.lock().unwrap().is_empty());
        assert_eq!(publisher.generator.tracker.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rejects_unknown_dialect() {
        let publisher = Publisher::new(RecordingStore::default(), RecordingGenerator::default());

        let outcome = publisher.publish(Dialect::CStyle.template(), "cobol").unwrap();

        let PublishOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags[0].line, 0);
    }

    #[test]
    fn test_extra_source_findings_block_publish() {
        let publisher = Publisher::new(RecordingStore::default(), RecordingGenerator::default())
            .with_source(Box::new(AlwaysComplains));

        let outcome = publisher.publish(Dialect::BeginEnd.template(), "ruby").unwrap();

        assert_eq!(
            outcome,
            PublishOutcome::Rejected(vec![Diagnostic {
                line: 2,
                message: "title should describe the action".to_string(),
            }])
        );
        assert!(publisher.store.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_generator_failure_propagates() {
        let generator = RecordingGenerator {
            fail: true,
            ..Default::default()
        };
        let publisher = Publisher::new(RecordingStore::default(), generator);

        let err = publisher.publish(Dialect::HashBlock.template(), "perl").unwrap_err();
        assert!(matches!(err, Error::Generate(_)));
    }

    #[test]
    fn test_store_failure_skips_generation() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let publisher = Publisher::new(store, RecordingGenerator::default());

        let err = publisher.publish(Dialect::CStyle.template(), "c-style").unwrap_err();

        assert!(matches!(err, Error::Store(_)));
        assert_eq!(publisher.generator.tracker.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_publishes_are_serialized() {
        let tracker = Arc::new(Tracker::default());
        let store = RecordingStore {
            tracker: Arc::clone(&tracker),
            ..Default::default()
        };
        let generator = RecordingGenerator {
            tracker: Arc::clone(&tracker),
            ..Default::default()
        };
        let publisher = Publisher::new(store, generator);

        thread::scope(|scope| {
            for dialect in Dialect::ALL {
                let publisher = &publisher;
                scope.spawn(move || {
                    let outcome = publisher.publish(dialect.template(), dialect.id()).unwrap();
                    assert_eq!(outcome, PublishOutcome::Published);
                });
            }
        });

        assert_eq!(tracker.calls.load(Ordering::SeqCst), 8);
        assert_eq!(tracker.max_in_flight.load(Ordering::SeqCst), 1);
    }
}
