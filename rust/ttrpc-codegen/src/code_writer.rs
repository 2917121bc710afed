//! Indentation-tracking writer for emitting Go source.
//!
//! Emitters never count tabs themselves. They open a block, write the body
//! through the same writer, and the guard returned by [`CodeWriter::indent`]
//! pops the level again when it goes out of scope.
//!
//! ```
//! use ttrpc_codegen::code_writer::CodeWriter;
//! use ttrpc_codegen::cw_writeln;
//!
//! let mut out = String::new();
//! let mut w = CodeWriter::with_tabs(&mut out);
//!
//! w.block("type EchoService interface", |w| {
//!     cw_writeln!(w, "Say({}, *{}) (*{}, error)", "context.Context", "EchoRequest", "EchoResponse")
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     out,
//!     "type EchoService interface {\n\tSay(context.Context, *EchoRequest) (*EchoResponse, error)\n}\n"
//! );
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A writer that prefixes every non-empty line with the current indentation.
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W, indent_string: impl Into<String>) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string: indent_string.into(),
            at_line_start: true,
        }
    }

    /// Tab indentation, which is what gofmt produces.
    pub fn with_tabs(writer: W) -> Self {
        Self::new(writer, "\t")
    }

    /// Write text without a trailing newline.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.at_line_start = false;
        }
        self.writer.write_str(text)
    }

    /// Write text followed by a newline.
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.newline()
    }

    /// Write an empty line. Blank lines never carry indentation.
    pub fn blank_line(&mut self) -> fmt::Result {
        self.newline()
    }

    fn newline(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Increase indentation until the returned guard is dropped.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Write `header {`, the indented body, then `}`.
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.write(header)?;
        self.writeln(" {")?;
        self.indented(body)?;
        self.writeln("}")
    }

    /// Like [`block`](Self::block), but with caller-chosen opening and closing
    /// lines. Composite literals need closers such as `},` or `})`.
    pub fn block_with<F>(&mut self, open: &str, close: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(open)?;
        self.indented(body)?;
        self.writeln(close)
    }

    /// Run `body` one indentation level deeper.
    pub fn indented<F>(&mut self, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        let _indent = self.indent();
        body(self)
    }

    /// Use [`cw_writeln!`](crate::cw_writeln) instead of calling this directly.
    #[doc(hidden)]
    pub fn writeln_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        match args.as_str() {
            Some(s) => self.write(s)?,
            None => self.write(&args.to_string())?,
        }
        self.newline()
    }
}

/// Restores the previous indentation level on drop.
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

/// `writeln!` for a [`CodeWriter`].
#[macro_export]
macro_rules! cw_writeln {
    ($writer:expr, $($arg:tt)*) => {
        $writer.writeln_fmt(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks_use_tabs() {
        let mut out = String::new();
        let mut w = CodeWriter::with_tabs(&mut out);

        w.block("func (x *echoSayServer) Recv() (*EchoRequest, error)", |w| {
            w.writeln("m := new(EchoRequest)")?;
            w.block("if err := x.StreamServer.RecvMsg(m); err != nil", |w| {
                w.writeln("return nil, err")
            })?;
            w.writeln("return m, nil")
        })
        .unwrap();

        assert_eq!(
            out,
            "func (x *echoSayServer) Recv() (*EchoRequest, error) {\n\
             \tm := new(EchoRequest)\n\
             \tif err := x.StreamServer.RecvMsg(m); err != nil {\n\
             \t\treturn nil, err\n\
             \t}\n\
             \treturn m, nil\n\
             }\n"
        );
    }

    #[test]
    fn block_with_custom_closer() {
        let mut out = String::new();
        let mut w = CodeWriter::with_tabs(&mut out);

        w.block_with("Methods: map[string]ttrpc.Method{", "},", |w| {
            w.writeln("\"Say\": nil,")
        })
        .unwrap();

        assert_eq!(out, "Methods: map[string]ttrpc.Method{\n\t\"Say\": nil,\n},\n");
    }

    #[test]
    fn blank_lines_are_not_indented() {
        let mut out = String::new();
        let mut w = CodeWriter::with_tabs(&mut out);

        {
            let _indent = w.indent();
            w.writeln("a").unwrap();
            w.blank_line().unwrap();
            w.writeln("b").unwrap();
        }
        w.writeln("c").unwrap();

        assert_eq!(out, "\ta\n\n\tb\nc\n");
    }

    #[test]
    fn writeln_macro_indents_formatted_lines() {
        let mut out = String::new();
        let mut w = CodeWriter::with_tabs(&mut out);

        let name = "Say";
        w.indented(|w| {
            cw_writeln!(w, "\"{name}\": {{")?;
            cw_writeln!(w, "}},")
        })
        .unwrap();

        assert_eq!(out, "\t\"Say\": {\n\t},\n");
    }
}
