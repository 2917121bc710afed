//! The per-service dispatch table registered with a ttrpc server.
//!
//! ttrpc looks up incoming calls by service name and then by method name in
//! one of two maps: `Methods` for unary calls and `Streams` for everything
//! else. This module decides which method goes where and under which key;
//! the Go target only renders the result.
//!
//! The table is generic over what it carries per method so the renderer can
//! store whatever it already holds (a descriptor, a plan) and get it back
//! without a second lookup.

use crate::shape::MethodShape;

/// How the server invokes one method.
#[derive(Debug, Clone, Copy)]
pub enum DispatchEntry<M> {
    /// Decode one request, call the handler, return its response.
    Unary { method: M },
    /// Hand the handler a typed stream. Requests are decoded up front only
    /// when the client does not stream.
    Stream {
        method: M,
        client_streaming: bool,
        server_streaming: bool,
    },
}

impl<M> DispatchEntry<M> {
    fn new(method: M, shape: MethodShape) -> Self {
        match shape {
            MethodShape::Unary => DispatchEntry::Unary { method },
            MethodShape::ClientStream | MethodShape::ServerStream | MethodShape::BidiStream => {
                DispatchEntry::Stream {
                    method,
                    client_streaming: shape.client_streaming(),
                    server_streaming: shape.server_streaming(),
                }
            }
        }
    }
}

/// One row of the `Streams` map.
#[derive(Debug, Clone, Copy)]
pub struct StreamRoute<'a, M> {
    pub key: &'a str,
    pub method: M,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

#[derive(Debug, Clone)]
pub struct DispatchTable<'a, M> {
    /// Registry key: the fully-qualified service name.
    pub service_key: &'a str,
    /// Method key (Go method name) to entry, in declaration order.
    pub entries: Vec<(&'a str, DispatchEntry<M>)>,
}

impl<'a, M: Copy> DispatchTable<'a, M> {
    /// `methods` yields `(go_name, shape, method)` in declaration order; every
    /// item becomes exactly one entry.
    pub fn build(
        service_key: &'a str,
        methods: impl IntoIterator<Item = (&'a str, MethodShape, M)>,
    ) -> Self {
        Self {
            service_key,
            entries: methods
                .into_iter()
                .map(|(key, shape, method)| (key, DispatchEntry::new(method, shape)))
                .collect(),
        }
    }

    /// Entries for the `Methods` map.
    pub fn unary(&self) -> impl Iterator<Item = (&'a str, M)> + '_ {
        self.entries.iter().filter_map(|(key, entry)| match *entry {
            DispatchEntry::Unary { method } => Some((*key, method)),
            DispatchEntry::Stream { .. } => None,
        })
    }

    /// Entries for the `Streams` map.
    pub fn streams(&self) -> impl Iterator<Item = StreamRoute<'a, M>> + '_ {
        self.entries.iter().filter_map(|(key, entry)| match *entry {
            DispatchEntry::Unary { .. } => None,
            DispatchEntry::Stream {
                method,
                client_streaming,
                server_streaming,
            } => Some(StreamRoute {
                key: *key,
                method,
                client_streaming,
                server_streaming,
            }),
        })
    }
}
