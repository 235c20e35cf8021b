//! Project selection
//!
//! The exporter asks an injected [`ProjectSelector`] which project to export,
//! so the pipeline runs the same whether the choice comes from a terminal
//! prompt, a command-line flag or a test.

use crate::client::ExperimentTracker;
use crate::error::{Error, Result};
use crate::types::Project;
use std::io::{BufRead, Write};
use tracing::info;

/// Chooses one project out of a non-empty list
pub trait ProjectSelector {
    /// Return the 0-based index of the chosen project
    ///
    /// `projects` is never empty. Returning an index past the end is treated
    /// as an invalid selection by [`select_project`].
    fn select(&mut self, projects: &[Project]) -> Result<usize>;
}

impl<F> ProjectSelector for F
where
    F: FnMut(&[Project]) -> Result<usize>,
{
    fn select(&mut self, projects: &[Project]) -> Result<usize> {
        self(projects)
    }
}

/// List projects and let `selector` pick one
///
/// # Errors
/// - [`Error::NoProjects`] if the listing is empty
/// - [`Error::InvalidSelection`] if the selector returns an out-of-range index
/// - any error from the listing or the selector
pub async fn select_project<T, S>(tracker: &T, selector: &mut S) -> Result<Project>
where
    T: ExperimentTracker + ?Sized,
    S: ProjectSelector + ?Sized,
{
    let mut projects = tracker.list_projects().await?;
    if projects.is_empty() {
        return Err(Error::NoProjects);
    }

    let index = selector.select(&projects)?;
    if index >= projects.len() {
        return Err(Error::invalid_selection(
            index.saturating_add(1).to_string(),
            format!("choose a number between 1 and {}", projects.len()),
        ));
    }

    let project = projects.swap_remove(index);
    info!("Selected project: {}", project);
    Ok(project)
}

/// Interactive selector: prints an enumerated list and reads a 1-based index
///
/// Input is read once. A non-numeric answer, zero or a number past the end
/// of the list is an error; the prompt is not repeated.
pub struct ConsoleSelector<R, W> {
    input: R,
    output: W,
}

impl ConsoleSelector<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Selector bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleSelector<R, W> {
    /// Selector reading from `input` and prompting on `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the selector, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> ProjectSelector for ConsoleSelector<R, W> {
    fn select(&mut self, projects: &[Project]) -> Result<usize> {
        for (number, project) in projects.iter().enumerate() {
            writeln!(self.output, "{}: {}", number + 1, project)?;
        }
        write!(self.output, "Choose project: ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim();

        let number: usize = answer
            .parse()
            .map_err(|_| Error::invalid_selection(answer, "not a number"))?;
        if number == 0 || number > projects.len() {
            return Err(Error::invalid_selection(
                answer,
                format!("choose a number between 1 and {}", projects.len()),
            ));
        }
        Ok(number - 1)
    }
}

/// Non-interactive selector matching a project id or name
///
/// Ids are compared first so a project named like another project's id
/// cannot shadow it.
#[derive(Clone, Debug)]
pub struct NamedSelector {
    wanted: String,
}

impl NamedSelector {
    /// Selector looking for `wanted` among project ids and names
    pub fn new(wanted: impl Into<String>) -> Self {
        Self {
            wanted: wanted.into(),
        }
    }
}

impl ProjectSelector for NamedSelector {
    fn select(&mut self, projects: &[Project]) -> Result<usize> {
        projects
            .iter()
            .position(|p| p.id == self.wanted)
            .or_else(|| projects.iter().position(|p| p.name == self.wanted))
            .ok_or_else(|| Error::invalid_selection(&self.wanted, "no project with that id or name"))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn projects() -> Vec<Project> {
        vec![Project::new("p1", "Demo"), Project::new("p2", "Evals")]
    }

    fn console(input: &str) -> ConsoleSelector<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleSelector::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn console_prints_enumerated_list_and_returns_zero_based_index() {
        let mut selector = console("2\n");
        let index = selector.select(&projects()).unwrap();
        assert_eq!(index, 1);

        let printed = String::from_utf8(selector.into_output()).unwrap();
        assert_eq!(printed, "1: Demo (p1)\n2: Evals (p2)\nChoose project: ");
    }

    #[test]
    fn console_single_project_choice() {
        let mut selector = console("1\n");
        let only = vec![Project::new("p1", "Demo")];
        assert_eq!(selector.select(&only).unwrap(), 0);
    }

    #[test]
    fn console_rejects_non_numeric_input() {
        let err = console("demo\n").select(&projects()).unwrap_err();
        match err {
            Error::InvalidSelection { input, reason } => {
                assert_eq!(input, "demo");
                assert_eq!(reason, "not a number");
            }
            other => panic!("expected InvalidSelection, got {other:?}"),
        }
    }

    #[test]
    fn console_rejects_zero_and_out_of_range() {
        assert!(matches!(
            console("0\n").select(&projects()),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            console("3\n").select(&projects()),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            console("").select(&projects()),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn named_selector_prefers_id_over_name() {
        let list = vec![Project::new("p1", "p2"), Project::new("p2", "Evals")];
        assert_eq!(NamedSelector::new("p2").select(&list).unwrap(), 1);
        assert_eq!(NamedSelector::new("Evals").select(&list).unwrap(), 1);
        assert!(matches!(
            NamedSelector::new("nope").select(&list),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn closures_are_selectors() {
        let mut pick_last = |projects: &[Project]| -> Result<usize> { Ok(projects.len() - 1) };
        assert_eq!(pick_last.select(&projects()).unwrap(), 1);
    }
}
