//! The assertion engine.
//!
//! A [`Kit`] owns everything a check needs: the configuration, the console,
//! the trace log and a failure counter. Every assertion goes through
//! [`Kit::check`], which echoes the actual value and, when the predicate
//! fails, writes one error-tagged diagnostic line. Nothing panics and
//! nothing is returned that must be handled; example code keeps running so
//! later checks still produce output.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::{ConfigError, KitConfig};
use crate::console::Console;
use crate::normalize::trim_indent;
use crate::render::Render;
use crate::same::Same;
use crate::trace::TraceLog;

/// How actual and expected were supposed to relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Values should be equal; a failure prints `!=`.
    Equal,
    /// Values should differ; a failure prints `==`.
    NotEqual,
}

impl Relation {
    /// Operator shown in the diagnostic when the check fails.
    pub fn failure_symbol(&self) -> &'static str {
        match self {
            Relation::Equal => "!=",
            Relation::NotEqual => "==",
        }
    }
}

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The predicate held
    Pass,
    /// The predicate failed and a diagnostic was written
    Fail,
}

impl Outcome {
    /// Returns true if the check passed
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Returns true if the check failed
    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail)
    }
}

/// Soft-assertion context.
#[derive(Debug)]
pub struct Kit {
    config: KitConfig,
    console: Console,
    trace: TraceLog,
    failures: AtomicUsize,
}

impl Default for Kit {
    fn default() -> Self {
        Self::with_console(KitConfig::default(), Console::stdout())
    }
}

impl Kit {
    /// Create a kit writing to stdout.
    pub fn new(config: KitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_console(config, Console::stdout()))
    }

    /// Create a kit with default settings that collects its output in
    /// memory; read it back with [`Kit::take_output`].
    pub fn buffered() -> Self {
        Self::with_console(KitConfig::default(), Console::buffer())
    }

    /// Create a kit writing to the given console.
    ///
    /// The config is used as given; call [`KitConfig::validate`] first when
    /// it comes from outside.
    pub fn with_console(config: KitConfig, console: Console) -> Self {
        Self {
            config,
            console,
            trace: TraceLog::default(),
            failures: AtomicUsize::new(0),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    /// The console this kit writes to.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Drain the output of a buffered kit.
    pub fn take_output(&self) -> String {
        self.console.take_output()
    }

    /// Number of failed checks since the kit was created.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub(crate) fn trace_log(&self) -> &TraceLog {
        &self.trace
    }

    /// Compare-and-report primitive shared by every assertion.
    ///
    /// `actual` is always echoed. When `passed` is false a diagnostic
    /// `<tag><actual> <op> <expected>` follows.
    pub fn check(&self, actual: &str, expected: &str, relation: Relation, passed: bool) -> Outcome {
        let mut out = self.console.lock();
        out.line(actual);

        if passed {
            tracing::trace!(actual, expected, ?relation, "check passed");
            return Outcome::Pass;
        }

        out.tagged_line(
            &self.config.error_tag,
            &format!("{} {} {}", actual, relation.failure_symbol(), expected),
        );
        drop(out);
        self.failures.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(actual, expected, ?relation, "check failed");
        Outcome::Fail
    }

    /// Report a failure that does not fit the `actual op expected` shape.
    pub(crate) fn report_failure(&self, lines: &[String]) {
        let mut out = self.console.lock();
        let mut lines = lines.iter();
        if let Some(first) = lines.next() {
            out.tagged_line(&self.config.error_tag, first);
        }
        for line in lines {
            out.line(line);
        }
        drop(out);
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Assert that `actual` equals `expected`.
    ///
    /// Floats, alone or inside containers, are equal when they differ by
    /// less than the configured tolerance.
    pub fn eq<T: Same + Render + ?Sized>(&self, actual: &T, expected: &T) -> Outcome {
        let passed = actual.same(expected, self.config.float_tolerance);
        self.check(&actual.render(), &expected.render(), Relation::Equal, passed)
    }

    /// Assert that `actual` differs from `expected`.
    pub fn neq<T: Same + Render + ?Sized>(&self, actual: &T, expected: &T) -> Outcome {
        let passed = !actual.same(expected, self.config.float_tolerance);
        self.check(&actual.render(), &expected.render(), Relation::NotEqual, passed)
    }

    /// Assert that the rendering of `actual` matches an expected text.
    ///
    /// The rendered actual is trimmed, the expected text has its common
    /// indentation removed. The diagnostic shows the normalized expected.
    pub fn eq_text<T: Render + ?Sized>(&self, actual: &T, expected: &str) -> Outcome {
        let rendered = actual.render();
        let expected = trim_indent(expected);
        let passed = rendered.trim() == expected;
        self.check(&rendered, &expected, Relation::Equal, passed)
    }

    /// [`Kit::eq`] for floats passed by value.
    pub fn eq_float<F: Same + Render>(&self, actual: F, expected: F) -> Outcome {
        self.eq(&actual, &expected)
    }
}
