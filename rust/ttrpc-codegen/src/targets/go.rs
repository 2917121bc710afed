//! Go bindings for `github.com/containerd/ttrpc`.
//!
//! For each service the output is, in order: the service interface, the
//! server-side stream types, the registration function, then the client
//! interface, struct and methods (with client-side stream types emitted right
//! after the method that returns them).

mod client;
mod server;

use std::fmt;

use crate::descriptor::{GoIdent, MethodDescriptor, ServiceDescriptor};
use crate::go_file::Imports;
use crate::shape::MethodShape;

pub const TTRPC_IMPORT_PATH: &str = "github.com/containerd/ttrpc";

/// Runtime identifiers, spelled the way the current file imports them.
#[derive(Debug, Clone)]
pub(crate) struct Runtime {
    pub context: String,
    pub server: String,
    pub client: String,
    pub method: String,
    pub stream: String,
    pub service_desc: String,
    pub stream_desc: String,
    pub stream_server: String,
    pub client_stream: String,
}

impl Runtime {
    fn resolve(imports: &mut Imports) -> Self {
        let context = imports.qualified_ident(&GoIdent::new("context", "Context"));
        let mut ttrpc = |name: &str| imports.qualified_ident(&GoIdent::new(TTRPC_IMPORT_PATH, name));
        let server = ttrpc("Server");
        let client = ttrpc("Client");
        let method = ttrpc("Method");
        let stream = ttrpc("Stream");
        let service_desc = ttrpc("ServiceDesc");
        let stream_desc = ttrpc("StreamDesc");
        let stream_server = ttrpc("StreamServer");
        let client_stream = ttrpc("ClientStream");
        Self {
            context,
            server,
            client,
            method,
            stream,
            service_desc,
            stream_desc,
            stream_server,
            client_stream,
        }
    }
}

/// A method with its shape decided.
///
/// Message types are not qualified here: aliases are handed out in the
/// order the file text mentions them, so emitters qualify at the point of
/// writing.
#[derive(Debug, Clone)]
pub(crate) struct MethodPlan<'a> {
    pub desc: &'a MethodDescriptor,
    pub shape: MethodShape,
}

impl MethodPlan<'_> {
    pub fn input(&self, imports: &mut Imports) -> String {
        imports.qualified_ident(&self.desc.input)
    }

    pub fn output(&self, imports: &mut Imports) -> String {
        imports.qualified_ident(&self.desc.output)
    }
}

/// Everything the server and client emitters need for one service.
#[derive(Debug, Clone)]
pub(crate) struct ServicePlan<'a> {
    pub service: &'a ServiceDescriptor,
    pub rt: Runtime,
    pub methods: Vec<MethodPlan<'a>>,
}

impl<'a> ServicePlan<'a> {
    /// The context and ttrpc packages are qualified before any message type,
    /// which keeps their aliases stable regardless of what the messages
    /// import.
    pub fn new(service: &'a ServiceDescriptor, imports: &mut Imports) -> Self {
        Self {
            service,
            rt: Runtime::resolve(imports),
            methods: service
                .methods
                .iter()
                .map(|desc| MethodPlan {
                    desc,
                    shape: desc.shape(),
                })
                .collect(),
        }
    }

    pub fn has_streams(&self) -> bool {
        self.methods.iter().any(|m| m.shape.is_streaming())
    }
}

/// Generate server and client bindings for one service.
pub fn generate_service(service: &ServiceDescriptor, imports: &mut Imports) -> Result<String, fmt::Error> {
    let plan = ServicePlan::new(service, imports);
    let mut out = server::generate_server(&plan, imports)?;
    out.push_str(&client::generate_client(&plan, imports)?);
    Ok(out)
}

fn bool_literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
