use std::fmt;

/// Everything that can stop a generation run.
///
/// None of these are recoverable: the driver reports the first one back to
/// protoc through `CodeGeneratorResponse.error`.
#[derive(Debug)]
pub enum GenerateError {
    /// The request bytes on stdin were not a valid `CodeGeneratorRequest`.
    Decode(prost::DecodeError),
    /// A file to generate has neither a `go_package` option nor an `M` mapping.
    MissingGoPackage { file: String },
    /// A method references a message that no file in the request declares.
    UnknownMessageType { method: String, type_name: String },
    /// `file_to_generate` names a file that is not in `proto_file`.
    UnknownFile { file: String },
    /// A plugin parameter has a value we cannot interpret.
    InvalidParameter { param: String },
    /// `module=` was given but an output path does not live under it.
    OutsideModule { file: String, module: String },
    /// Writing into the output buffer failed.
    Format(fmt::Error),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Decode(e) => write!(f, "invalid CodeGeneratorRequest: {e}"),
            GenerateError::MissingGoPackage { file } => write!(
                f,
                "unable to determine Go import path for {file:?}: \
                 add a go_package option or pass M{file}=<import path>"
            ),
            GenerateError::UnknownMessageType { method, type_name } => {
                write!(f, "method {method} references unknown message {type_name}")
            }
            GenerateError::UnknownFile { file } => {
                write!(f, "no descriptor for file to generate {file:?}")
            }
            GenerateError::InvalidParameter { param } => {
                write!(f, "invalid plugin parameter {param:?}")
            }
            GenerateError::OutsideModule { file, module } => {
                write!(f, "output path for {file:?} is not inside module {module:?}")
            }
            GenerateError::Format(e) => write!(f, "failed to write generated code: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Decode(e) => Some(e),
            GenerateError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<prost::DecodeError> for GenerateError {
    fn from(value: prost::DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<fmt::Error> for GenerateError {
    fn from(value: fmt::Error) -> Self {
        Self::Format(value)
    }
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
