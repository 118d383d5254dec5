use anyhow::ensure;
use anyhow::Context;

/// Which issues to download, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSelection {
    /// A single issue, passed through as typed.
    Single(String),

    /// An inclusive range with `start <= end`.
    Range { start: u32, end: u32 },
}

impl IssueSelection {
    /// Resolves the positional arguments.
    ///
    /// Returns `Ok(None)` when the argument count is neither one nor two, in
    /// which case the caller should show usage. Both bounds of a range must be
    /// numbers; their order does not matter.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Option<Self>> {
        match args {
            [issue] => Ok(Some(Self::Single(issue.as_ref().to_owned()))),
            [a, b] => {
                let a = parse_issue(a.as_ref())?;
                let b = parse_issue(b.as_ref())?;
                Ok(Some(Self::Range {
                    start: a.min(b),
                    end: a.max(b),
                }))
            }
            _ => Ok(None),
        }
    }

    /// Issue identifiers in download order.
    pub fn issues(&self) -> Vec<String> {
        match self {
            Self::Single(issue) => vec![issue.clone()],
            Self::Range { start, end } => (*start..=*end).map(|n| n.to_string()).collect(),
        }
    }
}

fn parse_issue(s: &str) -> anyhow::Result<u32> {
    let n: u32 = s
        .parse()
        .with_context(|| format!("invalid issue number {s:?}"))?;
    ensure!(n > 0, "invalid issue number {s:?}: issues start at 1");
    Ok(n)
}
