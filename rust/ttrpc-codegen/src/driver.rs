//! Turns a `CodeGeneratorRequest` into generated files.

use std::collections::HashMap;

use prost::Message;
use prost_types::FileDescriptorProto;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::descriptor::{FileDescriptor, GoPackage, MessageIndex};
use crate::error::{GenerateError, Result};
use crate::go_file::GeneratedFile;
use crate::naming::path_base;
use crate::options::{Options, PathsMode};
use crate::targets::go;

/// Suffix appended to the proto path prefix of every output file.
pub const OUTPUT_SUFFIX: &str = "_ttrpc.pb.go";

pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Run generation and package the outcome the way protoc expects: failures
/// travel in `error`, not as a process exit status.
pub fn generate_response(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };
    match generate(request) {
        Ok(files) => response.file = files,
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            response.error = Some(e.to_string());
        }
    }
    response
}

/// Generate one Go file per entry of `file_to_generate`, in request order.
pub fn generate(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let options = Options::parse(request.parameter())?;
    let index = MessageIndex::build(&request.proto_file);
    tracing::debug!(
        files = request.proto_file.len(),
        messages = index.len(),
        "indexed request"
    );

    let packages: HashMap<String, GoPackage> = request
        .proto_file
        .iter()
        .filter_map(|f| Some((f.name().to_string(), GoPackage::resolve(f, &options)?)))
        .collect();

    let mut out = Vec::with_capacity(request.file_to_generate.len());
    for name in &request.file_to_generate {
        let proto = find_file(&request.proto_file, name)?;
        let file = FileDescriptor::from_proto(proto, &index, &packages)?;
        let generated = generate_file(&file, &options)?;
        out.push(File {
            name: Some(generated.name().to_string()),
            content: Some(generated.content()),
            ..Default::default()
        });
    }
    Ok(out)
}

/// Render every service of `file` into its output file.
pub fn generate_file(file: &FileDescriptor, options: &Options) -> Result<GeneratedFile> {
    let name = output_name(file, options)?;
    tracing::debug!(
        proto = %file.proto_path,
        output = %name,
        services = file.services.len(),
        "generating file"
    );

    let mut generated = GeneratedFile::new(name, &file.proto_path, &file.go_package);
    for service in &file.services {
        tracing::debug!(
            service = %service.full_name,
            methods = service.methods.len(),
            "generating service"
        );
        let code = go::generate_service(service, generated.imports_mut())?;
        generated.push(&code);
    }
    Ok(generated)
}

/// The output path protoc should write `file` to.
pub fn output_name(file: &FileDescriptor, options: &Options) -> Result<String> {
    let proto = file.proto_path.as_str();
    let prefix = proto.strip_suffix(".proto").unwrap_or(proto);

    let prefix = match options.paths {
        PathsMode::SourceRelative => prefix.to_string(),
        PathsMode::Import => {
            let full = format!("{}/{}", file.go_package.import_path, path_base(prefix));
            match &options.module {
                Some(module) => full
                    .strip_prefix(module.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
                    .map(str::to_string)
                    .ok_or_else(|| GenerateError::OutsideModule {
                        file: proto.to_string(),
                        module: module.clone(),
                    })?,
                None => full,
            }
        }
    };
    Ok(format!("{prefix}{OUTPUT_SUFFIX}"))
}

fn find_file<'a>(files: &'a [FileDescriptorProto], name: &str) -> Result<&'a FileDescriptorProto> {
    files
        .iter()
        .find(|f| f.name() == name)
        .ok_or_else(|| GenerateError::UnknownFile {
            file: name.to_string(),
        })
}
