use std::{fs::File, io::Write};

use serde_json::Value;

use crate::{
    parser::{self, parse, InputFormat},
    reason::JsonReasonFormatter,
    render::render,
    reporter::{Formatter, Reporter},
    result_tree::{batch, labeled, ResultTree},
    verdict::{is_ok, Tally},
};

#[derive(Debug, PartialEq, Clone)]
pub enum Input {
    File(String),
    Stdin,
}

impl Input {
    pub fn name(&self) -> &str {
        match self {
            Input::File(filename) => filename,
            Input::Stdin => "<stdin>",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ReportError {
    TestFailed,
    InvalidInput,
    InternalError,
}

impl ReportError {
    pub fn to_exit_status(&self) -> i32 {
        match self {
            ReportError::TestFailed => 1,
            ReportError::InvalidInput => 2,
            ReportError::InternalError => 3,
        }
    }
}

pub fn run<W: Write>(
    inputs: Vec<Input>,
    input_format: InputFormat,
    w: &mut W,
    use_color: bool,
    formatter: Box<dyn Formatter>,
) -> Result<(), ReportError> {
    let (trees, errs) = partition_results(inputs.iter().map(|input| {
        let tree = match input {
            Input::File(filename) => File::open(filename)
                .map_err(|err| parser::Error::new(filename, format!("cannot open: {}", err)))
                .and_then(|file| parse(filename, file, input_format)),
            Input::Stdin => parse(input.name(), std::io::stdin(), input_format),
        };
        tree.map(|tree| (input.name().to_string(), tree))
    }));

    if !errs.is_empty() {
        errs.iter().for_each(|err| {
            eprintln!("{}: {}", err.filename, err.message);
        });
        return Err(ReportError::InvalidInput);
    }

    let tree = merge(trees);
    let (verdict, lines) = render(0, true, &tree, &JsonReasonFormatter {});
    let tally = Tally::of(&tree);

    tracing::debug!(
        verdict,
        lines = lines.len(),
        checks = tally.len(),
        "rendered result tree"
    );
    debug_assert_eq!(verdict, is_ok(true, &tree));

    let mut r = Reporter::new(w, use_color, formatter);
    if let Err(err) = r.report(verdict, &lines, tally) {
        eprintln!("internal error: {}", err);
        return Err(ReportError::InternalError);
    }

    if !verdict {
        return Err(ReportError::TestFailed);
    }

    Ok(())
}

/// Combines the trees of several inputs into one batch labeled by input name.
fn merge(mut trees: Vec<(String, ResultTree<Value>)>) -> ResultTree<Value> {
    if trees.len() == 1 {
        if let Some((_, tree)) = trees.pop() {
            return tree;
        }
    }

    batch(
        trees
            .into_iter()
            .map(|(name, tree)| labeled(name, tree))
            .collect(),
    )
}

fn partition_results<T, E>(results: impl Iterator<Item = Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut oks = vec![];
    let mut errs = vec![];

    results.into_iter().for_each(|result| match result {
        Ok(ok) => oks.push(ok),
        Err(err) => errs.push(err),
    });

    (oks, errs)
}
