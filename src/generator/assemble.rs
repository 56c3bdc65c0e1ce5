use tracing::{info, warn};

/// A generated file: path relative to the protoc output directory, and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: String,
    pub content: String,
}

impl OutputFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Collects generated files in stage-emission order
///
/// Rust sources are run through a best-effort formatting pass as they arrive.
/// Nothing is sorted or deduplicated here; stages decide what they emit.
#[derive(Debug, Default)]
pub struct Assembler {
    files: Vec<OutputFile>,
    skip_format: bool,
}

impl Assembler {
    pub fn new(skip_format: bool) -> Self {
        Self {
            files: Vec::new(),
            skip_format,
        }
    }

    pub fn push(&mut self, mut file: OutputFile) {
        if !self.skip_format {
            file.content = format_source(&file.path, file.content);
        }
        info!(path = %file.path, "Generated: {}", file.path);
        self.files.push(file);
    }

    pub fn extend(&mut self, files: impl IntoIterator<Item = OutputFile>) {
        for file in files {
            self.push(file);
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn finish(self) -> Vec<OutputFile> {
        self.files
    }
}

/// Format `content` when `path` names a Rust source; keep it unchanged otherwise.
///
/// Formatting failures are logged and the unformatted text is returned.
pub fn format_source(path: &str, content: String) -> String {
    if !path.ends_with(".rs") {
        return content;
    }
    match format_rust(&content) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(path = %path, error = %err, "keeping unformatted output");
            content
        }
    }
}

/// Parse and pretty-print a Rust source file
pub fn format_rust(content: &str) -> Result<String, syn::Error> {
    let syntax_tree = syn::parse_file(content)?;
    Ok(prettyplease::unparse(&syntax_tree))
}
