#![deny(unsafe_code)]

//! Go [ttrpc] bindings from protobuf service definitions.
//!
//! This is the library behind the `protoc-gen-go-ttrpc` plugin. protoc hands
//! the plugin a `CodeGeneratorRequest`; for every file it asks for, we emit a
//! `<name>_ttrpc.pb.go` holding, per service:
//!
//! - a `<Service>Service` interface for servers to implement
//! - `Register<Service>Service`, which wires that implementation into a
//!   `*ttrpc.Server`
//! - a client constructor plus typed client methods
//! - typed stream handles for every streaming method, on both sides
//!
//! Message types are not generated here; they come from `protoc-gen-go` and
//! are only referenced.
//!
//! # The Pipeline
//!
//! ```text
//! CodeGeneratorRequest → descriptor model → MethodShape per method → Go text → CodeGeneratorResponse
//!   (protoc, stdin)       (descriptor)         (shape)        (targets::go)        (driver, stdout)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use prost::Message;
//!
//! let request = ttrpc_codegen::driver::decode_request(&stdin_bytes)?;
//! let response = ttrpc_codegen::driver::generate_response(&request);
//! std::io::stdout().write_all(&response.encode_to_vec())?;
//! ```
//!
//! [ttrpc]: https://github.com/containerd/ttrpc

pub mod code_writer;
pub mod descriptor;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod go_file;
pub mod naming;
pub mod options;
pub mod shape;
pub mod targets;

pub use descriptor::{FileDescriptor, GoIdent, GoPackage, MethodDescriptor, ServiceDescriptor};
pub use error::{GenerateError, Result};
pub use options::{Options, PathsMode};
pub use shape::MethodShape;
