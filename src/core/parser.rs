//! Source parsing.
//!
//! The engine treats parsing as an external collaborator: it hands swc a
//! string and receives a tree, a source map, and the comment store. Parse
//! failures skip the file; the engine never tries to recover source text.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: SingleThreadedComments,
}

/// Parse one source file into an AST.
///
/// `.ts` parses with JSX off so generic arrows like `<T>(x) => x` keep their
/// meaning; `.tsx`, `.jsx` and plain `.js` allow JSX.
///
/// Each call builds its own `SourceMap`, so parallel callers never share
/// mutable state.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: !file_path.ends_with(".ts"),
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource {
            module,
            source_map,
            comments,
        })
    })
}
