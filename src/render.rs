use serde::Serialize;

use crate::{reason::ReasonFormatter, result_tree::ResultTree};

const INDENT_UNIT: &str = "  ";

const PASSED_MARKER: &str = "✅";
const FAILURE_MARKER: &str = "❗️";
const FAILED_LABEL_MARKER: &str = "⛔️";
const NEUTRAL_LABEL_MARKER: &str = "⚪️";
const SKIPPED_MARKER: &str = "✖️";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Neutral,
    Passed,
    Failed,
    Skipped,
}

impl Style {
    /// CSS class for this style. Neutral lines are unstyled.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Style::Neutral => None,
            Style::Passed => Some("passed"),
            Style::Failed => Some("failed"),
            Style::Skipped => Some("skipped"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DisplayLine {
    pub text: String,
    pub style: Style,
}

/// Renders `node` depth-first into display lines, starting at `indent` and
/// folding the verdict from `prior` the same way as [`crate::verdict::is_ok`].
pub fn render<R, F: ReasonFormatter<R>>(
    indent: usize,
    prior: bool,
    node: &ResultTree<R>,
    formatter: &F,
) -> (bool, Vec<DisplayLine>) {
    let mut lines = vec![];
    let verdict = render_into(&mut lines, indent, prior, node, formatter);
    (verdict, lines)
}

fn render_into<R, F: ReasonFormatter<R>>(
    lines: &mut Vec<DisplayLine>,
    indent: usize,
    prior: bool,
    node: &ResultTree<R>,
    formatter: &F,
) -> bool {
    let emit = |lines: &mut Vec<DisplayLine>, text: String, style: Style| {
        lines.push(DisplayLine {
            text: format!("{}{}", INDENT_UNIT.repeat(indent), text),
            style,
        })
    };

    match node {
        ResultTree::Passed => {
            emit(lines, PASSED_MARKER.to_string(), Style::Passed);
            prior
        }
        ResultTree::Failed { failures } => {
            failures.iter().for_each(|entry| {
                let reason = formatter.format_reason(&entry.reason).unwrap_or_else(|err| {
                    tracing::warn!(
                        failure = %entry.message,
                        "cannot format failure reason: {}",
                        err
                    );
                    format!("<unprintable reason: {}>", err)
                });
                emit(
                    lines,
                    format!("{}{} {}", FAILURE_MARKER, entry.message, reason),
                    Style::Failed,
                );
            });
            false
        }
        ResultTree::Labeled { label, inner } => match inner.as_ref() {
            ResultTree::Passed => {
                emit(lines, format!("{} {}", PASSED_MARKER, label), Style::Passed);
                prior
            }
            ResultTree::Failed { .. } => {
                emit(lines, format!("{} {}", FAILED_LABEL_MARKER, label), Style::Failed);
                render_into(lines, indent + 1, prior, inner, formatter);
                false
            }
            ResultTree::Labeled { .. } | ResultTree::Batch { .. } | ResultTree::Skipped => {
                emit(lines, format!("{} {}", NEUTRAL_LABEL_MARKER, label), Style::Neutral);
                render_into(lines, indent + 1, prior, inner, formatter)
            }
        },
        ResultTree::Batch { children } => children.iter().fold(prior, |verdict, child| {
            render_into(lines, indent + 1, verdict, child, formatter)
        }),
        ResultTree::Skipped => {
            emit(lines, format!("{} Skipped", SKIPPED_MARKER), Style::Skipped);
            prior
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        result_tree::{
            batch, labeled,
            testutil::{arb_tree, failed, failure, passed, skipped},
        },
        verdict::is_ok,
    };
    use pretty_assertions::assert_eq;

    fn upper(reason: &String) -> Result<String, String> {
        Ok(reason.to_uppercase())
    }

    fn line(text: &str, style: Style) -> DisplayLine {
        DisplayLine {
            text: text.to_string(),
            style,
        }
    }

    fn render_str(prior: bool, tree: &ResultTree<String>) -> (bool, Vec<DisplayLine>) {
        render(0, prior, tree, &upper)
    }

    #[test]
    fn render_passed() {
        assert_eq!((true, vec![line("✅", Style::Passed)]), render_str(true, &passed()));
        assert_eq!((false, vec![line("✅", Style::Passed)]), render_str(false, &passed()));
    }

    #[test]
    fn render_skipped() {
        assert_eq!(
            (true, vec![line("✖️ Skipped", Style::Skipped)]),
            render_str(true, &skipped())
        );
    }

    #[test]
    fn render_failed() {
        let tree = failed(vec![
            failure("m", "r".to_string()),
            failure("second", "why".to_string()),
        ]);

        assert_eq!(
            (
                false,
                vec![
                    line("❗️m R", Style::Failed),
                    line("❗️second WHY", Style::Failed),
                ]
            ),
            render_str(true, &tree)
        );
    }

    #[test]
    fn render_failed_without_entries() {
        assert_eq!((false, vec![]), render_str(true, &failed(vec![])));
    }

    #[test]
    fn render_unprintable_reason() {
        let tree = batch(vec![
            failed(vec![failure("bad", 0u8), failure("good", 1u8)]),
            passed(),
        ]);
        let f = |reason: &u8| {
            if *reason == 0 {
                Err("corrupt".to_string())
            } else {
                Ok(reason.to_string())
            }
        };

        assert_eq!(
            (
                false,
                vec![
                    line("  ❗️bad <unprintable reason: corrupt>", Style::Failed),
                    line("  ❗️good 1", Style::Failed),
                    line("  ✅", Style::Passed),
                ]
            ),
            render(0, true, &tree, &f)
        );
    }

    #[test]
    fn render_labeled_passed_has_no_child_line() {
        assert_eq!(
            (true, vec![line("✅ L", Style::Passed)]),
            render_str(true, &labeled("L", passed()))
        );
    }

    #[test]
    fn render_labeled_failed_shows_details() {
        let tree = labeled("L", failed(vec![failure("f", "r".to_string())]));

        assert_eq!(
            (
                false,
                vec![line("⛔️ L", Style::Failed), line("  ❗️f R", Style::Failed)]
            ),
            render_str(true, &tree)
        );
    }

    #[test]
    fn render_labeled_group() {
        let tree = labeled(
            "suite",
            batch(vec![
                labeled("first", passed()),
                labeled("second", skipped()),
                labeled("nested", labeled("deep", passed())),
            ]),
        );

        assert_eq!(
            (
                true,
                vec![
                    line("⚪️ suite", Style::Neutral),
                    line("    ✅ first", Style::Passed),
                    line("    ⚪️ second", Style::Neutral),
                    line("      ✖️ Skipped", Style::Skipped),
                    line("    ⚪️ nested", Style::Neutral),
                    line("      ✅ deep", Style::Passed),
                ]
            ),
            render_str(true, &tree)
        );
    }

    #[test]
    fn render_empty_batch() {
        assert_eq!((true, vec![]), render_str(true, &batch(vec![])));
        assert_eq!((false, vec![]), render_str(false, &batch(vec![])));
    }

    #[test]
    fn render_mixed_batch() {
        let tree = batch(vec![
            passed(),
            failed(vec![failure("f", "r".to_string())]),
            skipped(),
        ]);

        assert_eq!(
            (
                false,
                vec![
                    line("  ✅", Style::Passed),
                    line("  ❗️f R", Style::Failed),
                    line("  ✖️ Skipped", Style::Skipped),
                ]
            ),
            render_str(true, &tree)
        );
    }

    #[test]
    fn render_failure_before_passing_label_stays_failed() {
        let tree = batch(vec![
            failed(vec![failure("f", "r".to_string())]),
            labeled("after", passed()),
            labeled("group", batch(vec![passed()])),
        ]);

        let (verdict, lines) = render_str(true, &tree);

        assert!(!verdict);
        assert_eq!(4, lines.len());
    }

    #[test]
    fn render_starts_at_given_indent() {
        let (_, lines) = render(2, true, &labeled("L", skipped()), &upper);

        assert_eq!(
            vec![
                line("    ⚪️ L", Style::Neutral),
                line("      ✖️ Skipped", Style::Skipped),
            ],
            lines
        );
    }

    #[test]
    fn style_class_names() {
        assert_eq!(None, Style::Neutral.class_name());
        assert_eq!(Some("passed"), Style::Passed.class_name());
        assert_eq!(Some("failed"), Style::Failed.class_name());
        assert_eq!(Some("skipped"), Style::Skipped.class_name());
    }

    /// Indentation expected for each line, computed independently of `render`.
    fn expected_depths(depth: usize, tree: &ResultTree<String>, out: &mut Vec<usize>) {
        match tree {
            ResultTree::Passed | ResultTree::Skipped => out.push(depth),
            ResultTree::Failed { failures } => failures.iter().for_each(|_| out.push(depth)),
            ResultTree::Labeled { inner, .. } => {
                out.push(depth);
                if !matches!(inner.as_ref(), ResultTree::Passed) {
                    expected_depths(depth + 1, inner, out);
                }
            }
            ResultTree::Batch { children } => children
                .iter()
                .for_each(|child| expected_depths(depth + 1, child, out)),
        }
    }

    proptest! {
        #[test]
        fn render_agrees_with_is_ok(tree in arb_tree(), prior in any::<bool>()) {
            let (verdict, _) = render(0, prior, &tree, &upper);
            prop_assert_eq!(is_ok(prior, &tree), verdict);
        }

        #[test]
        fn render_is_idempotent(tree in arb_tree()) {
            prop_assert_eq!(render_str(true, &tree), render_str(true, &tree));
        }

        #[test]
        fn lines_are_indented_by_depth(tree in arb_tree()) {
            let (_, lines) = render_str(true, &tree);
            let mut depths = vec![];
            expected_depths(0, &tree, &mut depths);

            prop_assert_eq!(depths.len(), lines.len());
            for (depth, line) in depths.iter().zip(lines.iter()) {
                let leading = line.text.len() - line.text.trim_start_matches(' ').len();
                prop_assert_eq!(2 * depth, leading);
            }
        }
    }
}
