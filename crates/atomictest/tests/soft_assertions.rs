//! Console behavior of the kit, checked through buffered kits.
//!
//! Tests verify:
//! - passing checks echo the actual value and nothing else
//! - failing checks add exactly one tagged diagnostic line
//! - captured failures render as `Kind: message`
//! - the trace keeps order and is cleared by every comparison

use atomictest::{Console, Kit, KitConfig, impl_render_via_display, impl_same_via_eq};
use std::fmt;

fn diagnostics(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("[Error]: "))
        .collect()
}

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point(x={}, y={})", self.x, self.y)
    }
}

impl_render_via_display!(Point);
impl_same_via_eq!(Point);

#[derive(Debug)]
struct CustomError(String);

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CustomError {}

mod assertion_tests {
    use super::*;

    #[test]
    fn test_equal_values_produce_no_diagnostic() {
        let kit = Kit::buffered();
        kit.eq(&Point { x: 1, y: 2 }, &Point { x: 1, y: 2 });
        let output = kit.take_output();
        assert_eq!(output, "Point(x=1, y=2)\n");
        assert!(diagnostics(&output).is_empty());
    }

    #[test]
    fn test_unequal_values_produce_one_diagnostic() {
        let kit = Kit::buffered();
        kit.eq(&Point { x: 1, y: 2 }, &Point { x: 2, y: 1 });
        let output = kit.take_output();
        let lines = diagnostics(&output);
        assert_eq!(lines, vec!["[Error]: Point(x=1, y=2) != Point(x=2, y=1)"]);
    }

    #[test]
    fn test_neq_on_unequal_values_is_silent() {
        let kit = Kit::buffered();
        kit.neq(&"red", &"blue");
        assert_eq!(kit.take_output(), "red\n");
        assert_eq!(kit.failures(), 0);
    }

    #[test]
    fn test_execution_continues_after_failure() {
        let kit = Kit::buffered();
        kit.eq(&1, &2);
        kit.eq(&3, &3);
        kit.neq(&4, &4);
        assert_eq!(
            kit.take_output(),
            "1\n[Error]: 1 != 2\n3\n4\n[Error]: 4 == 4\n"
        );
        assert_eq!(kit.failures(), 2);
    }

    #[test]
    fn test_repeated_calls_repeat_output() {
        let kit = Kit::buffered();
        kit.eq(&"x", &"y");
        kit.eq(&"x", &"y");
        let output = kit.take_output();
        assert_eq!(output, "x\n[Error]: x != y\nx\n[Error]: x != y\n");
        assert_eq!(kit.failures(), 2);
    }

    #[test]
    fn test_text_against_collection() {
        let kit = Kit::buffered();
        let words: Vec<String> = "the quick fox".split(' ').map(String::from).collect();
        assert!(kit.eq_text(&words, "[the, quick, fox]").is_pass());
        assert!(kit.eq_text(&None::<u8>, "null").is_pass());
    }

    #[test]
    fn test_multiline_text_block() {
        let kit = Kit::buffered();
        let table = "a | b\n--+--\n1 | 2\n";
        let outcome = kit.eq_text(
            &table,
            "
            a | b
            --+--
            1 | 2
            ",
        );
        assert!(outcome.is_pass());
    }

    #[test]
    fn test_float_tolerance() {
        let kit = Kit::buffered();
        assert!(kit.eq(&(0.1 + 0.2), &0.3).is_pass());
        assert!(kit.eq_float(0.1 + 0.2, 0.3).is_pass());
        assert!(kit.eq(&(1.0, "m"), &(1.0 + 1e-9, "m")).is_pass());
        assert_eq!(kit.take_output(), "0.30000000000000004\n0.30000000000000004\n(1.0, m)\n");

        assert!(kit.eq(&1.0, &(1.0 + 1e-6)).is_fail());
        assert!(kit.neq(&(0.1 + 0.2), &0.3).is_fail());
        assert_eq!(kit.failures(), 2);
    }

    #[test]
    fn test_custom_console_and_tag() {
        let sink = atomictest::SharedBuffer::default();
        let config = KitConfig::default().with_error_tag("FAIL ");
        let kit = Kit::with_console(config, Console::with_writer(Box::new(sink.clone())));
        kit.eq(&true, &false);
        assert_eq!(sink.contents(), "true\nFAIL true != false\n");
    }
}

mod capture_tests {
    use super::*;

    #[test]
    fn test_custom_error_descriptor() {
        let kit = Kit::buffered();
        let captured = kit.capture(|| Err::<(), _>(CustomError("x".into())));
        assert_eq!(captured.kind(), Some("CustomError"));
        assert_eq!(captured.detail_message(), ": x");
        assert!(captured.eq("CustomError: x").is_pass());
        assert_eq!(kit.take_output(), "CustomError: x\n");
    }

    #[test]
    fn test_boxed_custom_error_keeps_its_kind() {
        let kit = Kit::buffered();
        let captured = kit.capture(|| -> Result<(), Box<dyn std::error::Error>> {
            Err(Box::new(CustomError("x".into())))
        });
        assert_eq!(captured.kind(), Some("CustomError"));
        assert!(captured.contains(&["Custom", "x"]).is_pass());
        assert!(captured.eq("CustomError: x").is_pass());
        assert_eq!(kit.failures(), 0);
    }

    #[test]
    fn test_empty_string_error_keeps_separator() {
        let kit = Kit::buffered();
        let captured = kit.capture(|| Err::<(), _>(String::new()));
        assert_eq!(captured.to_string(), "String: ");
        assert_eq!(captured.detail_message(), ": ");
    }

    #[test]
    fn test_panic_descriptor() {
        let kit = Kit::buffered();
        assert!(kit.capture_panic(|| panic!("boom")).eq("Panic: boom").is_pass());

        let v: Vec<i32> = Vec::new();
        let captured = kit.capture_panic(|| v[3]);
        assert!(captured.contains(&["Panic", "index out of bounds"]).is_pass());
        assert_eq!(kit.failures(), 0);
    }

    #[test]
    fn test_no_exception_sentinel_fails_comparison() {
        let kit = Kit::buffered();
        let captured = kit.capture(|| Ok::<i32, CustomError>(7));
        assert_eq!(captured.to_string(), "[Error]: Expected an exception");
        assert!(captured.eq("CustomError: x").is_fail());
        let output = kit.take_output();
        assert_eq!(diagnostics(&output).len(), 2);
        assert!(output.ends_with("[Error]: [Error]: Expected an exception != CustomError: x\n"));
    }

    #[test]
    fn test_contains_requires_every_part() {
        let kit = Kit::buffered();
        let captured = kit.capture(|| Err::<(), _>(CustomError("x".into())));
        assert!(captured.contains(&["Custom", "x"]).is_pass());
        assert_eq!(kit.take_output(), "");

        assert!(captured.contains(&["Custom", "y"]).is_fail());
        let output = kit.take_output();
        assert!(output.contains("Actual message: CustomError: x"));
        assert!(output.contains("Expected parts: [Custom, y]"));
    }

    #[test]
    fn test_descriptor_is_plain_data() {
        let kit = Kit::buffered();
        let descriptor = kit
            .capture(|| Err::<(), _>(CustomError("gone".into())))
            .into_descriptor();
        let copy = descriptor.clone();
        assert_eq!(descriptor, copy);
        assert!(copy.is_failure());
        assert_eq!(copy.to_string(), "CustomError: gone");
    }
}

mod trace_tests {
    use super::*;

    #[test]
    fn test_order_matters() {
        let kit = Kit::buffered();
        let trace = kit.trace();
        trace.push(&"a");
        trace.push(&1);
        trace.push(&"b");
        assert!(trace.eq("a\n1\nb").is_pass());

        trace.push(&1);
        trace.push(&"a");
        trace.push(&"b");
        assert!(trace.eq("a\n1\nb").is_fail());
    }

    #[test]
    fn test_indented_expected_block() {
        let kit = Kit::buffered();
        let trace = kit.trace();
        for step in ["open", "read", "close"] {
            trace.push(&step);
        }
        let outcome = trace.eq(
            "
            open
            read
            close
            ",
        );
        assert!(outcome.is_pass());
        assert_eq!(kit.take_output(), "open\nread\nclose\n");
    }

    #[test]
    fn test_cleared_after_pass_and_fail() {
        let kit = Kit::buffered();
        let trace = kit.trace();

        trace.push(&"kept");
        assert!(trace.eq("kept").is_pass());
        assert!(trace.eq("").is_pass());

        trace.push(&"wrong");
        assert!(trace.eq("right").is_fail());
        assert!(trace.eq("").is_pass());
        assert_eq!(kit.failures(), 1);
    }

    #[test]
    fn test_separate_kits_have_separate_traces() {
        let first = Kit::buffered();
        let second = Kit::buffered();
        first.trace().push(&1);
        assert!(second.trace().is_empty());
        assert_eq!(first.trace().len(), 1);
    }
}
