use serde::Deserialize;

#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct FailureEntry<R> {
    pub message: String,
    pub reason: R,
}

/// Outcome of a test run, as handed over by the test engine.
///
/// `R` is the engine's failure reason. It is only ever passed through to a
/// [`crate::reason::ReasonFormatter`].
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultTree<R> {
    #[serde(alias = "TestPassed")]
    Passed,
    #[serde(alias = "TestFailed")]
    Failed {
        #[serde(default = "Vec::new")]
        failures: Vec<FailureEntry<R>>,
    },
    #[serde(alias = "LabeledResult")]
    Labeled {
        label: String,
        inner: Box<ResultTree<R>>,
    },
    #[serde(alias = "BatchResult")]
    Batch {
        #[serde(default = "Vec::new")]
        children: Vec<ResultTree<R>>,
    },
    #[serde(alias = "TestSkipped")]
    Skipped,
}

pub fn labeled<R, S: AsRef<str>>(label: S, inner: ResultTree<R>) -> ResultTree<R> {
    ResultTree::Labeled {
        label: label.as_ref().to_string(),
        inner: Box::new(inner),
    }
}

pub fn batch<R>(children: Vec<ResultTree<R>>) -> ResultTree<R> {
    ResultTree::Batch { children }
}
