//! Deterministic text rendering of an [`OutputTypeDescriptor`].
//!
//! Layout, in order:
//!   header (`// <auto-generated/>`, `#nullable enable`), blank line
//!   `using X;` lines in source order, blank line
//!   `namespace X` block, contents indented one level
//!   `/// <summary>` block, one `/// ` line per summary line
//!   `{access} [abstract ]partial {kind} {Name}[<T>][ : Base]`
//!   one indented `where T : ...` line per constrained parameter
//!   braces on their own lines, members separated by one blank line
//!   attributes one per line above `{access} [required ]{Type} {Name} { accessors }[ = init;]`
//! Attributes and initializers are verbatim text; when one spans several
//! lines, its continuation lines are trimmed and indented one level deeper
//! than the member. Output always ends with a single newline.

mod emitter;

use crate::output::{OutputMember, OutputTypeDescriptor};
use emitter::Emitter;
use partialgen_schema::node::Token;

/// Default indentation width, in spaces.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

///
/// RenderOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    pub indent_width: usize,

    /// Emit the auto-generated banner and `#nullable enable`.
    pub header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            header: true,
        }
    }
}

/// Render with default options.
#[must_use]
pub fn render(output: &OutputTypeDescriptor) -> String {
    render_with(output, &RenderOptions::default())
}

#[must_use]
pub fn render_with(output: &OutputTypeDescriptor, options: &RenderOptions) -> String {
    let mut e = Emitter::new(options.indent_width);

    if options.header {
        e.println("// <auto-generated/>");
        e.println("#nullable enable");
        e.blank_line();
    }

    if !output.usings.is_empty() {
        for using in &output.usings {
            e.println(format!("using {using};"));
        }
        e.blank_line();
    }

    match &output.namespace {
        Some(ns) => {
            e.println(format!("namespace {ns}"));
            e.println("{");
            e.inc_indent();
            render_type(&mut e, output);
            e.dec_indent();
            e.println("}");
        }
        None => render_type(&mut e, output),
    }

    e.into_source()
}

fn render_type(e: &mut Emitter, output: &OutputTypeDescriptor) {
    if let Some(summary) = &output.summary {
        render_summary(e, summary);
    }

    // declaration
    e.print(format!("{} ", output.accessibility));
    if output.is_abstract {
        e.print("abstract ");
    }
    e.print(format!("partial {} {}", output.kind, output.name));
    if !output.generic_params.is_empty() {
        let params: Vec<&str> = output
            .generic_params
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        e.print(format!("<{}>", params.join(", ")));
    }
    if let Some(base) = &output.base {
        e.print(format!(" : {base}"));
    }
    e.println("");

    // constraints
    e.inc_indent();
    for param in output.generic_params.iter().filter(|p| !p.constraints.is_empty()) {
        let constraints: Vec<&str> = param.constraints.iter().map(|c| c.as_str()).collect();
        e.println(format!("where {} : {}", param.name, constraints.join(", ")));
    }
    e.dec_indent();

    // body
    e.println("{");
    e.inc_indent();
    for (i, member) in output.members.iter().enumerate() {
        if i > 0 {
            e.blank_line();
        }
        render_member(e, member);
    }
    e.dec_indent();
    e.println("}");
}

fn render_summary(e: &mut Emitter, summary: &str) {
    e.println("/// <summary>");
    for line in summary.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            e.println("///");
        } else {
            e.println(format!("/// {line}"));
        }
    }
    e.println("/// </summary>");
}

fn render_member(e: &mut Emitter, member: &OutputMember) {
    for attribute in &member.attributes {
        render_token(e, attribute);
        e.println("");
    }

    e.print(format!("{} ", member.accessibility));
    if member.required {
        e.print("required ");
    }
    e.print(format!("{} {} {{ {} }}", member.ty, member.name, member.accessors));
    if let Some(initializer) = &member.initializer {
        e.print(" = ");
        render_token(e, initializer);
        e.print(";");
    }
    e.println("");
}

// continuation lines sit one level under the line they started on
fn render_token(e: &mut Emitter, token: &Token) {
    let mut lines = token.as_str().lines();
    if let Some(first) = lines.next() {
        e.print(first.trim_end());
    }

    e.inc_indent();
    for line in lines {
        e.println("");
        e.print(line.trim());
    }
    e.dec_indent();
}
