//! Hook input handling for Claude Code integration.
//!
//! Claude Code writes a JSON payload to the hook's stdin and closes it.
//! Neither reading nor decoding that payload can fail a hook: an
//! unreadable stream is empty text, invalid UTF-8 is replaced, and
//! undecodable text is a [`ParsedPayload::Fallback`].

use std::io::{self, Read};

use serde_json::{Map, Value};

/// Read all of `reader` as text.
///
/// Invalid UTF-8 sequences become U+FFFD. Returns an empty string when the
/// stream is empty, closed, or unreadable.
pub fn read_all<R: Read>(mut reader: R) -> String {
    let mut bytes = Vec::new();
    match reader.read_to_end(&mut bytes) {
        Ok(_) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!(error = %e, "could not read hook input, treating as empty");
            String::new()
        }
    }
}

/// Read the hook payload from stdin.
pub fn read_stdin() -> String {
    read_all(io::stdin().lock())
}

/// The decoded hook payload.
///
/// Only a couple of fields are inspected; everything else the host sends
/// is kept but ignored. Accessors return `None` for missing or wrongly
/// typed fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookPayload {
    fields: Map<String, Value>,
}

impl HookPayload {
    /// Wrap an already-decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The host tool identifier (`tool_name`).
    pub fn tool_name(&self) -> Option<&str> {
        self.fields.get("tool_name").and_then(Value::as_str)
    }

    /// The shell command about to run (`tool_input.command`).
    pub fn command(&self) -> Option<&str> {
        self.fields
            .get("tool_input")
            .and_then(|input| input.get("command"))
            .and_then(Value::as_str)
    }

    /// The submitted prompt (`prompt`), when the host sends one.
    pub fn prompt(&self) -> Option<&str> {
        self.fields.get("prompt").and_then(Value::as_str)
    }
}

/// Result of decoding the raw hook input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    /// The input was a JSON object.
    Parsed(HookPayload),
    /// The input was empty, malformed, or not an object.
    Fallback,
}

impl ParsedPayload {
    /// The payload, if one was decoded.
    pub fn payload(&self) -> Option<&HookPayload> {
        match self {
            Self::Parsed(payload) => Some(payload),
            Self::Fallback => None,
        }
    }

    /// Summary of how decoding went.
    pub fn status(&self) -> PayloadStatus {
        match self {
            Self::Parsed(_) => PayloadStatus::Parsed,
            Self::Fallback => PayloadStatus::Fallback,
        }
    }
}

/// How the raw input was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadStatus {
    /// Decoded into a payload.
    Parsed,
    /// Decoding failed and was recovered.
    Fallback,
    /// The hook never looked at its input.
    Ignored,
}

/// Decode raw hook input into a payload.
pub fn parse_payload(input: &str) -> ParsedPayload {
    if input.trim().is_empty() {
        return ParsedPayload::Fallback;
    }

    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(fields)) => ParsedPayload::Parsed(HookPayload::new(fields)),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "hook input is not a JSON object");
            ParsedPayload::Fallback
        }
        Err(e) => {
            tracing::debug!(error = %e, "hook input is not valid JSON");
            ParsedPayload::Fallback
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(json: &str) -> HookPayload {
        match parse_payload(json) {
            ParsedPayload::Parsed(payload) => payload,
            ParsedPayload::Fallback => panic!("expected payload for {json}"),
        }
    }

    // read_all tests

    #[test]
    fn test_read_all_text() {
        assert_eq!(read_all(&b"{\"a\":1}"[..]), "{\"a\":1}");
    }

    #[test]
    fn test_read_all_empty() {
        assert_eq!(read_all(io::empty()), "");
    }

    #[test]
    fn test_read_all_invalid_utf8_is_replaced() {
        let input = read_all(&b"remember \xff this"[..]);
        assert_eq!(input, "remember \u{fffd} this");
    }

    #[test]
    fn test_read_all_unreadable_is_empty() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "closed"))
            }
        }
        assert_eq!(read_all(Broken), "");
    }

    // parse_payload tests

    #[test]
    fn test_parse_bash_payload() {
        let payload = parsed(
            r#"{
                "session_id": "abc",
                "tool_name": "Bash",
                "tool_input": {"command": "rm -rf /tmp/x", "description": "cleanup"}
            }"#,
        );

        assert_eq!(payload.tool_name(), Some("Bash"));
        assert_eq!(payload.command(), Some("rm -rf /tmp/x"));
    }

    #[test]
    fn test_parse_task_payload_without_command() {
        let payload = parsed(r#"{"tool_name":"TaskCreate"}"#);

        assert_eq!(payload.tool_name(), Some("TaskCreate"));
        assert_eq!(payload.command(), None);
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let payload = parsed(r#"{"tool_name": 7, "tool_input": {"command": ["ls"]}}"#);

        assert_eq!(payload.tool_name(), None);
        assert_eq!(payload.command(), None);
    }

    #[test]
    fn test_tool_input_not_an_object() {
        let payload = parsed(r#"{"tool_input": "rm -rf /"}"#);
        assert_eq!(payload.command(), None);
    }

    #[test]
    fn test_prompt_accessor() {
        let payload = parsed(r#"{"prompt": "how did we do this?"}"#);
        assert_eq!(payload.prompt(), Some("how did we do this?"));
    }

    #[test]
    fn test_parse_empty_is_fallback() {
        assert_eq!(parse_payload(""), ParsedPayload::Fallback);
        assert_eq!(parse_payload("  \n"), ParsedPayload::Fallback);
    }

    #[test]
    fn test_parse_malformed_is_fallback() {
        assert_eq!(parse_payload("not valid json"), ParsedPayload::Fallback);
        assert_eq!(parse_payload("{\"tool_name\":"), ParsedPayload::Fallback);
    }

    #[test]
    fn test_parse_non_object_is_fallback() {
        for input in ["null", "42", "\"TaskCreate\"", "[1,2]", "true"] {
            assert_eq!(parse_payload(input), ParsedPayload::Fallback, "{input}");
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(parse_payload("{}").status(), PayloadStatus::Parsed);
        assert_eq!(parse_payload("nope").status(), PayloadStatus::Fallback);
        assert!(parse_payload("nope").payload().is_none());
    }
}
