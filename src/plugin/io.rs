use std::io::{Read, Write};

use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::error::Result;
use crate::generator::OutputFile;

/// Read the whole request from `reader` and decode it
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode_request(&buf)
}

/// Decode a request from an in-memory buffer
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Build the response carrying every generated file
pub fn build_response(files: Vec<OutputFile>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file: files
            .into_iter()
            .map(|f| File {
                name: Some(f.path),
                content: Some(f.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Encode the response and write it to `writer` in a single call
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    let buf = response.encode_to_vec();
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}
