//! Per-unit pipeline configuration.

use ember_codegen::GeneratorOptions;
use ember_diagnostic::CodeFrameOptions;
use ember_ir::SourceType;
use ember_traverse::TransformSpec;

/// Everything one compilation unit needs besides its source text.
///
/// ```
/// use emberc::CompileOptions;
/// use ember_ir::SourceType;
///
/// let options = CompileOptions::default()
///     .with_source_type(SourceType::Module)
///     .with_plugins(["flow", "jsx"]);
/// assert_eq!(options.plugins, ["flow", "jsx"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompileOptions {
    pub source_type: SourceType,
    /// Syntax plugin names, resolved against the compiler's registry.
    pub plugins: Vec<String>,
    /// Transforms to run, in order.
    pub transforms: Vec<TransformSpec>,
    /// Context shown around errors by [`render_error`](crate::render_error).
    pub code_frame: CodeFrameOptions,
    pub generator: GeneratorOptions,
}

impl CompileOptions {
    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins = plugins.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_transforms(mut self, transforms: Vec<TransformSpec>) -> Self {
        self.transforms = transforms;
        self
    }

    #[must_use]
    pub fn with_code_frame(mut self, code_frame: CodeFrameOptions) -> Self {
        self.code_frame = code_frame;
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorOptions) -> Self {
        self.generator = generator;
        self
    }
}
