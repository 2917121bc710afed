//! Naming policy for everything the Go target emits.
//!
//! Generated code from different plugin versions has to interoperate, so these
//! names are part of the wire-visible contract: the registration key, the
//! method keys and the exported type names must not drift.

/// Which end of a streaming call a generated type serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Server,
    Client,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::Server => "Server",
            Side::Client => "Client",
        }
    }
}

/// The two stream types emitted per streaming method and side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    /// Exported interface, e.g. `Chat_TalkServer`.
    Interface,
    /// Unexported struct implementing it, e.g. `chatTalkServer`.
    Wrapper,
}

/// Name of a per-method stream interface or wrapper struct.
///
/// Method names are unique within a service, so these never collide.
pub fn stream_type_name(service: &str, method: &str, side: Side, kind: StreamType) -> String {
    match kind {
        StreamType::Interface => format!("{service}_{method}{}", side.suffix()),
        StreamType::Wrapper => format!("{}{method}{}", service.to_lowercase(), side.suffix()),
    }
}

/// `EchoService`: the interface servers implement.
pub fn service_interface_name(service: &str) -> String {
    format!("{service}Service")
}

/// `RegisterEchoService`
pub fn register_fn_name(service: &str) -> String {
    format!("Register{}", service_interface_name(service))
}

/// `EchoClient`: the client interface, when it differs from the service one.
pub fn client_interface_name(service: &str) -> String {
    format!("{service}Client")
}

/// `echoClient`: the unexported struct behind `New<Service>Client`.
pub fn client_struct_name(service: &str) -> String {
    lower_first(&client_interface_name(service))
}

/// `NewEchoClient`
pub fn client_constructor_name(service: &str) -> String {
    format!("New{}", client_interface_name(service))
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a protobuf identifier into an exported Go identifier.
///
/// Words are delimited by `_` or an upper case letter, and each word starts
/// upper case. `.` separators (nested messages) become `_`, except before a
/// lower case letter where they vanish. A leading `_` turns into `X`.
pub fn go_camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let next = bytes.get(i + 1).copied();
        match c {
            b'.' if next.is_some_and(|n| n.is_ascii_lowercase()) => {}
            b'.' => out.push(b'_'),
            b'_' if i == 0 || bytes[i - 1] == b'.' => out.push(b'X'),
            b'_' if next.is_some_and(|n| n.is_ascii_lowercase()) => {}
            c if c.is_ascii_digit() => out.push(c),
            c => {
                out.push(c.to_ascii_uppercase());
                while let Some(n) = bytes.get(i + 1).copied().filter(u8::is_ascii_lowercase) {
                    out.push(n);
                    i += 1;
                }
            }
        }
        i += 1;
    }
    // Only ASCII bytes were rewritten, so any UTF-8 in the input is intact.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Turn an arbitrary string into a valid Go identifier.
///
/// Characters other than letters and digits become `_`; the result gets a `_`
/// prefix if it is a keyword or does not start with a letter.
pub fn go_sanitized(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let starts_with_letter = mapped.chars().next().is_some_and(char::is_alphabetic);
    if GO_KEYWORDS.contains(&mapped.as_str()) || !starts_with_letter {
        format!("_{mapped}")
    } else {
        mapped
    }
}

/// Last element of a slash-separated path, like Go's `path.Base`.
pub fn path_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Default Go package name for an import path.
pub fn package_name_for(import_path: &str) -> String {
    go_sanitized(path_base(import_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_and_interface_names() {
        assert_eq!(
            stream_type_name("Chat", "Talk", Side::Server, StreamType::Interface),
            "Chat_TalkServer"
        );
        assert_eq!(
            stream_type_name("Chat", "Talk", Side::Client, StreamType::Interface),
            "Chat_TalkClient"
        );
        assert_eq!(
            stream_type_name("Chat", "Talk", Side::Server, StreamType::Wrapper),
            "chatTalkServer"
        );
        assert_eq!(
            stream_type_name("UploadV2", "Put", Side::Client, StreamType::Wrapper),
            "uploadv2PutClient"
        );
    }

    #[test]
    fn service_level_names() {
        assert_eq!(service_interface_name("Echo"), "EchoService");
        assert_eq!(register_fn_name("Echo"), "RegisterEchoService");
        assert_eq!(client_interface_name("Echo"), "EchoClient");
        assert_eq!(client_struct_name("Echo"), "echoClient");
        assert_eq!(client_struct_name("HTTPProxy"), "hTTPProxyClient");
        assert_eq!(client_constructor_name("Echo"), "NewEchoClient");
    }

    #[test]
    fn camel_case_words() {
        assert_eq!(go_camel_case("say_hello"), "SayHello");
        assert_eq!(go_camel_case("SayHello"), "SayHello");
        assert_eq!(go_camel_case("sayHello"), "SayHello");
        assert_eq!(go_camel_case("HTTPGet"), "HTTPGet");
        assert_eq!(go_camel_case("get_v2_data"), "GetV2Data");
        assert_eq!(go_camel_case("foo__bar"), "Foo_Bar");
    }

    #[test]
    fn camel_case_separators() {
        assert_eq!(go_camel_case("_private"), "XPrivate");
        assert_eq!(go_camel_case("Outer.Inner"), "Outer_Inner");
        assert_eq!(go_camel_case("outer.inner"), "OuterInner");
        assert_eq!(go_camel_case("Outer._x"), "Outer_XX");
        assert_eq!(go_camel_case(""), "");
    }

    #[test]
    fn sanitized_identifiers() {
        assert_eq!(go_sanitized("ttrpc"), "ttrpc");
        assert_eq!(go_sanitized("go-ttrpc"), "go_ttrpc");
        assert_eq!(go_sanitized("type"), "_type");
        assert_eq!(go_sanitized("v1.2"), "v1_2");
        assert_eq!(go_sanitized("2fa"), "_2fa");
    }

    #[test]
    fn package_names_from_import_paths() {
        assert_eq!(package_name_for("github.com/containerd/ttrpc"), "ttrpc");
        assert_eq!(package_name_for("context"), "context");
        assert_eq!(package_name_for("example.com/api/v1/"), "v1");
        assert_eq!(path_base(""), ".");
        assert_eq!(path_base("/"), "/");
    }
}
