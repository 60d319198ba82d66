//! `<Pipeline>.js` controller module.

use std::path::{Path, PathBuf};

use rewire_codegen::{
    builder::{CodeFragment, Indent},
    generation::{RequireCollector, SymbolTable},
};
use rewire_core::{GeneratedFile, Overwrite};
use rewire_ir::{AnalysisResult, AnalyzedFunction, PipelineIR};

use crate::{
    ast::{Export, Function, Require},
    code_file::CodeFile,
    emit::Emitter,
    naming::function_name,
};

/// Reads the triggered form action into `action` at the top of form handlers.
const ACTION_DISPATCH: &str =
    "var action = request.triggeredFormAction ? request.triggeredFormAction.formId : null;";

/// The controller module generated for one pipeline.
pub struct ControllerJs<'a> {
    ir: &'a PipelineIR,
    analysis: &'a AnalysisResult,
    symbols: &'a SymbolTable,
    indent: Indent,
    overwrite: Overwrite,
}

impl<'a> ControllerJs<'a> {
    pub fn new(ir: &'a PipelineIR, analysis: &'a AnalysisResult, symbols: &'a SymbolTable) -> Self {
        Self {
            ir,
            analysis,
            symbols,
            indent: Indent::CONTROLLER,
            overwrite: Overwrite::Always,
        }
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// File name relative to the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.js", self.ir.name)
    }

    fn module(&self) -> String {
        format!("module:controllers/{}", self.ir.name)
    }

    fn requires(&self) -> Vec<Require> {
        let mut requires = RequireCollector::new();
        requires.extend(self.symbols, self.analysis.required_symbols());
        requires
            .iter()
            .map(|(name, path)| Require::new(name, path))
            .collect()
    }

    fn function(&self, emitter: &Emitter<'_>, f: &AnalyzedFunction) -> Function {
        let kind = if f.is_form_handler {
            "Form handler"
        } else if f.is_public {
            "Entry point"
        } else {
            "Private entry point"
        };
        let returns = if f.ends_with_interaction {
            "Renders a template."
        } else {
            "@returns {string|undefined} name of the end node reached, if any"
        };

        let mut function = Function::new(function_name(&f.name))
            .doc(format!("{} {}-{}.", kind, self.ir.name, f.name))
            .doc("")
            .doc(returns)
            .line("var pdict = {};");
        if f.is_form_handler {
            function = function.line(ACTION_DISPATCH);
        }
        function.body(emitter.block(&f.body))
    }

    fn export(&self, f: &AnalyzedFunction) -> Export {
        let local = function_name(&f.name);
        let see = format!("{}~{}", self.module(), local);
        if !f.is_public {
            return Export::direct(&f.name, local).see(see);
        }
        let mut filters = vec![if f.is_form_handler { "post" } else { "get" }];
        if f.is_secure {
            filters.push("https");
        }
        Export::guarded(&f.name, local, filters).see(see)
    }
}

impl GeneratedFile for ControllerJs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn overwrite(&self) -> Overwrite {
        self.overwrite
    }

    fn render(&self) -> String {
        let emitter = Emitter::new(self.ir);
        let doc = CodeFragment::doc_block([
            format!("Controller converted from the {} pipeline.", self.ir.name),
            String::new(),
            format!("@module controllers/{}", self.ir.name),
        ]);

        CodeFile::new()
            .prologue(CodeFragment::line("'use strict';"))
            .prologue(doc)
            .requires(self.requires())
            .add_all(
                self.analysis
                    .functions
                    .iter()
                    .map(|f| self.function(&emitter, f)),
            )
            .exports(self.analysis.functions.iter().map(|f| self.export(f)))
            .render_with_indent(self.indent)
    }
}
