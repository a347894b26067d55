//! Rendering the mutated tree back to source text.
//!
//! The counterpart of `parser`: also an external collaborator from the
//! engine's point of view. Comments captured at parse time are handed back
//! to the emitter so they survive the round trip.

use std::sync::Arc;

use anyhow::{Context, Result};
use swc_common::{SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_codegen::{Config, Emitter, text_writer::JsWriter};

pub fn print_module(
    module: &Module,
    source_map: Arc<SourceMap>,
    comments: &SingleThreadedComments,
) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: source_map,
            comments: Some(comments),
            wr: writer,
        };
        emitter
            .emit_module(module)
            .context("Failed to emit rewritten module")?;
    }

    String::from_utf8(buf).context("Emitted source is not valid UTF-8")
}
