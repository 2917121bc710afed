//! Classification of RPC methods into their streaming shape.
//!
//! Every emitter matches on [`MethodShape`] instead of re-reading the two
//! streaming flags, so a method is classified exactly once per pass.

/// The four RPC shapes ttrpc supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodShape {
    /// One request, one response.
    Unary,
    /// Many requests, one response.
    ClientStream,
    /// One request, many responses.
    ServerStream,
    /// Many requests, many responses.
    BidiStream,
}

impl MethodShape {
    /// Classify a method from its descriptor flags. Total and pure.
    pub fn classify(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => MethodShape::Unary,
            (true, false) => MethodShape::ClientStream,
            (false, true) => MethodShape::ServerStream,
            (true, true) => MethodShape::BidiStream,
        }
    }

    pub fn is_streaming(self) -> bool {
        !matches!(self, MethodShape::Unary)
    }

    /// Whether the caller sends a stream of requests.
    pub fn client_streaming(self) -> bool {
        matches!(self, MethodShape::ClientStream | MethodShape::BidiStream)
    }

    /// Whether the callee sends a stream of responses.
    pub fn server_streaming(self) -> bool {
        matches!(self, MethodShape::ServerStream | MethodShape::BidiStream)
    }

    /// Methods on the server-side stream wrapper, or `None` for unary calls.
    pub fn server_capabilities(self) -> Option<ServerCapabilities> {
        self.is_streaming().then(|| ServerCapabilities {
            send: self.server_streaming(),
            recv: self.client_streaming(),
        })
    }

    /// Methods on the client-side stream wrapper, or `None` for unary calls.
    pub fn client_capabilities(self) -> Option<ClientCapabilities> {
        self.is_streaming().then(|| ClientCapabilities {
            send: self.client_streaming(),
            recv: self.server_streaming(),
            close_and_recv: !self.server_streaming(),
        })
    }
}

/// What a `<Service>_<Method>Server` handle can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerCapabilities {
    /// `Send(*Output) error`
    pub send: bool,
    /// `Recv() (*Input, error)`
    pub recv: bool,
}

/// What a `<Service>_<Method>Client` handle can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCapabilities {
    /// `Send(*Input) error`
    pub send: bool,
    /// `Recv() (*Output, error)`
    pub recv: bool,
    /// `CloseAndRecv() (*Output, error)`; ends the send side and reads the
    /// single response.
    pub close_and_recv: bool,
}
