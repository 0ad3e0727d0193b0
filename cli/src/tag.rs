#![deny(missing_docs)]

//! # Tag Command
//!
//! Rewrites Go files on disk.
//!
//! 1. **Resolve**: positional paths plus `$GOFILE` become a list of files.
//! 2. **Rewrite**: each file goes through the core rewriter with the policy
//!    built from the flags.
//! 3. **Emit**: results are printed (dry run) or written back with `--write`.
//!
//! A failing file does not stop the others; the command fails at the end.

use crate::error::{CliError, CliResult};
use crate::files::collect_go_files;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use structtag_core::config::split_list;
use structtag_core::{
    Aligner, Case, Gofmt, Mode, RewritePolicy, SourceFormatter, StructRewriter, Verbatim,
    DEFAULT_TAG,
};

/// Output formatter choice.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatterKind {
    /// Built-in column alignment.
    #[default]
    Aligner,
    /// The external `gofmt` binary.
    Gofmt,
    /// No layout changes.
    Verbatim,
}

impl FormatterKind {
    fn build(self) -> Box<dyn SourceFormatter> {
        match self {
            FormatterKind::Aligner => Box::new(Aligner),
            FormatterKind::Gofmt => Box::new(Gofmt::default()),
            FormatterKind::Verbatim => Box::new(Verbatim),
        }
    }
}

/// Arguments for tagging files.
#[derive(clap::Args, Debug, Clone)]
pub struct TagArgs {
    /// Go files, or directories with --recursive.
    pub paths: Vec<PathBuf>,

    /// File set by `go generate`; appended to the paths.
    #[clap(long = "gofile", env = "GOFILE", hide = true)]
    pub gofile: Option<PathBuf>,

    /// Tag key to write.
    #[clap(short = 't', long, default_value = DEFAULT_TAG)]
    pub tag_name: String,

    /// camelCase values.
    #[clap(short = 'c', long, conflicts_with_all = ["snake", "no_case"])]
    pub camel: bool,

    /// snake_case values (default).
    #[clap(short = 's', long, conflicts_with = "no_case")]
    pub snake: bool,

    /// Use field names unchanged.
    #[clap(long)]
    pub no_case: bool,

    /// Add the tag in front of existing tags that lack it.
    #[clap(short = 'a', long, conflicts_with = "overwrite")]
    pub append: bool,

    /// Replace existing tags completely.
    #[clap(short = 'o', long)]
    pub overwrite: bool,

    /// Comma separated fields that get the value `-`.
    #[clap(short = 'i', long)]
    pub ignored_fields: Option<String>,

    /// Comma separated struct types left untouched.
    #[clap(long, visible_alias = "is")]
    pub ignored_structs: Option<String>,

    /// Report skipped fields.
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Write results back instead of printing them.
    #[clap(short = 'w', long)]
    pub write: bool,

    /// Descend into directories.
    #[clap(short = 'r', long)]
    pub recursive: bool,

    /// Layout applied after tagging.
    #[clap(long, value_enum, default_value_t = FormatterKind::Aligner)]
    pub formatter: FormatterKind,
}

impl TagArgs {
    /// Builds the rewrite policy from the flags.
    pub fn policy(&self) -> RewritePolicy {
        let case = if self.camel {
            Case::Camel
        } else if self.no_case {
            Case::None
        } else {
            Case::Snake
        };
        let mode = if self.overwrite {
            Mode::Overwrite
        } else if self.append {
            Mode::Append
        } else {
            Mode::SkipExisting
        };

        RewritePolicy::for_tag(&self.tag_name)
            .with_case(case)
            .with_mode(mode)
            .ignore_fields(self.ignored_fields.as_deref().map(split_list).into_iter().flatten())
            .ignore_types(self.ignored_structs.as_deref().map(split_list).into_iter().flatten())
            .with_verbose(self.verbose)
    }

    fn inputs(&self) -> Vec<PathBuf> {
        let mut paths = self.paths.clone();
        if let Some(gofile) = &self.gofile {
            paths.push(gofile.clone());
        }
        paths
    }
}

/// Executes the tag command, printing dry-run output to stdout.
pub fn execute(args: &TagArgs) -> CliResult<()> {
    let stdout = std::io::stdout();
    execute_to(args, &mut stdout.lock())
}

/// Executes the tag command, printing dry-run output to `out`.
pub fn execute_to(args: &TagArgs, out: &mut impl Write) -> CliResult<()> {
    let inputs = args.inputs();
    if inputs.is_empty() {
        return Err(CliError::General(
            "no input files (pass paths or set GOFILE)".into(),
        ));
    }

    let files = collect_go_files(&inputs, args.recursive)?;
    let policy = args.policy();
    let formatter = args.formatter.build();
    let rewriter = StructRewriter::new(&policy).with_formatter(formatter.as_ref());

    let mut failed = 0;
    for path in &files {
        tracing::debug!(path = %path.display(), "rewriting");
        let label = path.to_string_lossy();

        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", label, e);
                failed += 1;
                continue;
            }
        };

        let rewritten = match rewriter.rewrite(&source, &label) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                failed += 1;
                continue;
            }
        };

        if args.write {
            if rewritten.source != source {
                fs::write(path, &rewritten.source)?;
                tracing::info!(path = %path.display(), edits = rewritten.edits, "wrote");
            }
        } else {
            out.write_all(rewritten.source.as_bytes())?;
        }
    }

    if failed > 0 {
        return Err(CliError::Partial {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}
