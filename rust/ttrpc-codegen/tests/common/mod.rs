#![allow(dead_code)]

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileOptions, MethodDescriptorProto,
    ServiceDescriptorProto,
};

pub fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.into()),
        ..Default::default()
    }
}

pub fn method(name: &str, input: &str, output: &str, client: bool, server: bool) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.into()),
        input_type: Some(input.into()),
        output_type: Some(output.into()),
        client_streaming: Some(client),
        server_streaming: Some(server),
        ..Default::default()
    }
}

pub fn service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.into()),
        method: methods,
        ..Default::default()
    }
}

pub fn file(
    name: &str,
    package: &str,
    go_package: Option<&str>,
    messages: Vec<DescriptorProto>,
    services: Vec<ServiceDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.into()),
        package: Some(package.into()),
        options: go_package.map(|p| FileOptions {
            go_package: Some(p.into()),
            ..Default::default()
        }),
        message_type: messages,
        service: services,
        ..Default::default()
    }
}

/// `echo/v1/echo.proto`: unary `Say(EchoRequest) returns (EchoResponse)`.
pub fn echo_file() -> FileDescriptorProto {
    file(
        "echo/v1/echo.proto",
        "echo.v1",
        Some("example.com/echo/v1;echov1"),
        vec![message("EchoRequest"), message("EchoResponse")],
        vec![service(
            "Echo",
            vec![method(
                "Say",
                ".echo.v1.EchoRequest",
                ".echo.v1.EchoResponse",
                false,
                false,
            )],
        )],
    )
}

/// `chat.proto`: bidi `Talk(stream Msg) returns (stream Msg)`.
pub fn chat_file() -> FileDescriptorProto {
    file(
        "chat.proto",
        "chat",
        Some("example.com/chat"),
        vec![message("Msg")],
        vec![service(
            "Chat",
            vec![method("Talk", ".chat.Msg", ".chat.Msg", true, true)],
        )],
    )
}

/// `upload.proto`: client-streaming `Put(stream Chunk) returns (Ack)` and
/// server-streaming `Watch(Chunk) returns (stream Ack)`.
pub fn upload_file() -> FileDescriptorProto {
    file(
        "upload.proto",
        "upload",
        Some("example.com/upload"),
        vec![message("Chunk"), message("Ack")],
        vec![service(
            "Upload",
            vec![
                method("Put", ".upload.Chunk", ".upload.Ack", true, false),
                method("Watch", ".upload.Chunk", ".upload.Ack", false, true),
            ],
        )],
    )
}

pub fn request(files: Vec<FileDescriptorProto>, generate: &[&str], parameter: &str) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: generate.iter().map(|s| s.to_string()).collect(),
        parameter: (!parameter.is_empty()).then(|| parameter.to_string()),
        proto_file: files,
        ..Default::default()
    }
}

/// Generate a single file and return its Go source.
pub fn generate_one(file: FileDescriptorProto) -> String {
    let name = file.name().to_string();
    let files = ttrpc_codegen::driver::generate(&request(vec![file], &[&name], ""))
        .expect("generation should succeed");
    assert_eq!(files.len(), 1);
    files[0].content().to_string()
}
