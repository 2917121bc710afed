//! Read-only descriptor model the Go target generates from.
//!
//! protoc hands us `FileDescriptorProto`s. Those are converted once into the
//! types below, which carry exactly what code generation needs: Go names,
//! message identities with their import paths, and the two streaming flags.

use std::collections::HashMap;

use prost_types::FileDescriptorProto;

use crate::error::{GenerateError, Result};
use crate::naming::{go_camel_case, package_name_for};
use crate::options::Options;
use crate::shape::MethodShape;

/// A Go identifier together with the package that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoIdent {
    pub go_name: String,
    pub import_path: String,
}

impl GoIdent {
    pub fn new(import_path: impl Into<String>, go_name: impl Into<String>) -> Self {
        Self {
            go_name: go_name.into(),
            import_path: import_path.into(),
        }
    }
}

/// Where a proto file's Go code lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackage {
    pub import_path: String,
    pub name: String,
}

impl GoPackage {
    /// Parse `path` or `path;name`, as used by both `go_package` and `M`
    /// parameters.
    pub fn parse(value: &str) -> Option<Self> {
        let (import_path, name) = match value.split_once(';') {
            Some((path, name)) => (path, Some(name)),
            None => (value, None),
        };
        if import_path.is_empty() {
            return None;
        }
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => package_name_for(import_path),
        };
        Some(Self {
            import_path: import_path.to_string(),
            name,
        })
    }

    /// `M` parameters win over the `go_package` option.
    pub fn resolve(file: &FileDescriptorProto, options: &Options) -> Option<Self> {
        if let Some(mapped) = options.import_mappings.get(file.name()) {
            return Self::parse(mapped);
        }
        file.options
            .as_ref()
            .and_then(|o| o.go_package.as_deref())
            .and_then(Self::parse)
    }
}

/// One `.proto` file, ready for generation.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    /// Path as protoc knows it, e.g. `api/echo/v1/echo.proto`.
    pub proto_path: String,
    pub go_package: GoPackage,
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Fully-qualified proto name, e.g. `echo.v1.Echo`. Used as the
    /// registration key.
    pub full_name: String,
    pub go_name: String,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Name as written in the proto file.
    pub name: String,
    pub go_name: String,
    pub input: GoIdent,
    pub output: GoIdent,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

impl MethodDescriptor {
    pub fn shape(&self) -> MethodShape {
        MethodShape::classify(self.client_streaming, self.server_streaming)
    }
}

/// Every message in the request, keyed by fully-qualified name with a
/// leading dot (`.echo.v1.EchoRequest`), the form method descriptors use.
#[derive(Debug, Default)]
pub struct MessageIndex {
    messages: HashMap<String, IndexedMessage>,
}

#[derive(Debug)]
struct IndexedMessage {
    go_name: String,
    file: String,
}

impl MessageIndex {
    pub fn build(files: &[FileDescriptorProto]) -> Self {
        let mut index = Self::default();
        for file in files {
            let package = file.package();
            for message in &file.message_type {
                index.insert_message(file.name(), package, "", message);
            }
        }
        index
    }

    fn insert_message(
        &mut self,
        file: &str,
        package: &str,
        parent: &str,
        message: &prost_types::DescriptorProto,
    ) {
        let local = if parent.is_empty() {
            message.name().to_string()
        } else {
            format!("{parent}.{}", message.name())
        };
        let full = if package.is_empty() {
            format!(".{local}")
        } else {
            format!(".{package}.{local}")
        };
        for nested in &message.nested_type {
            self.insert_message(file, package, &local, nested);
        }
        self.messages.insert(
            full,
            IndexedMessage {
                go_name: go_camel_case(&local),
                file: file.to_string(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Resolve a method's input or output type to its Go identity.
    ///
    /// `packages` maps proto file names to their Go package.
    fn resolve(
        &self,
        method: &str,
        type_name: &str,
        packages: &HashMap<String, GoPackage>,
    ) -> Result<GoIdent> {
        let unknown = || GenerateError::UnknownMessageType {
            method: method.to_string(),
            type_name: type_name.to_string(),
        };
        let message = self.messages.get(type_name).ok_or_else(unknown)?;
        let package = packages
            .get(&message.file)
            .ok_or_else(|| GenerateError::MissingGoPackage {
                file: message.file.clone(),
            })?;
        Ok(GoIdent::new(&package.import_path, &message.go_name))
    }
}

impl FileDescriptor {
    /// Convert `proto` into the generation model.
    ///
    /// `packages` must hold the Go package of `proto` itself and of every file
    /// whose messages its methods mention.
    pub fn from_proto(
        proto: &FileDescriptorProto,
        index: &MessageIndex,
        packages: &HashMap<String, GoPackage>,
    ) -> Result<Self> {
        let go_package = packages
            .get(proto.name())
            .cloned()
            .ok_or_else(|| GenerateError::MissingGoPackage {
                file: proto.name().to_string(),
            })?;

        let package = proto.package();
        let mut services = Vec::with_capacity(proto.service.len());
        for service in &proto.service {
            let full_name = if package.is_empty() {
                service.name().to_string()
            } else {
                format!("{package}.{}", service.name())
            };

            let mut methods = Vec::with_capacity(service.method.len());
            for method in &service.method {
                let qualified = format!("{full_name}.{}", method.name());
                methods.push(MethodDescriptor {
                    name: method.name().to_string(),
                    go_name: go_camel_case(method.name()),
                    input: index.resolve(&qualified, method.input_type(), packages)?,
                    output: index.resolve(&qualified, method.output_type(), packages)?,
                    client_streaming: method.client_streaming(),
                    server_streaming: method.server_streaming(),
                });
            }

            services.push(ServiceDescriptor {
                go_name: go_camel_case(service.name()),
                full_name,
                methods,
            });
        }

        Ok(Self {
            proto_path: proto.name().to_string(),
            go_package,
            services,
        })
    }
}
