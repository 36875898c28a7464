//! Line-oriented explore shell over an in-memory history.
//!
//! Each line is one user event. Search text goes through the controller's
//! debounce; the shell waits out the quiet period on the wall clock before
//! rendering, so typed searches land as a single replace-mode history write.

use crate::render::{format_course_detail, render_view};
use coursefinder_core::models::{Category, FacetKind, FacetToken, FacetValue};
use coursefinder_core::{ExploreController, MemoryHistory, Transition};
use std::io::{BufRead, Write};
use std::time::Instant;

pub(crate) const HELP: &str = "\
Commands:
  search <text>                          Set the search text (empty clears it)
  category <name|all>                    Select a category
  toggle <levels|types|prices> <value>   Flip a facet value
  page <n>                               Go to page n
  clear [levels|types|prices]            Reset one facet, or every filter
  back | forward                         Walk the history
  open <query>                           Load a query string as a direct link
  show [slug]                            Re-render the view, or show one course
  help                                   Show this help
  quit                                   Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Search(String),
    Category(Option<Category>),
    Toggle(FacetValue),
    Page(u32),
    /// `None` clears every filter.
    Clear(Option<FacetKind>),
    Back,
    Forward,
    Open(String),
    Show(Option<String>),
    Help,
    Quit,
}

fn split_head(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

/// Parse one input line.
///
/// # Returns
/// `Ok(None)` for blank lines.
///
/// # Errors
/// Returns a message describing why the line was rejected.
pub(crate) fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = split_head(line);
    let command = match head.to_ascii_lowercase().as_str() {
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "category" | "c" => {
            if rest.is_empty() {
                return Err(String::from("Usage: category <name|all>"));
            }
            if rest.eq_ignore_ascii_case("all") {
                ShellCommand::Category(None)
            } else {
                match Category::parse_token(rest) {
                    Some(category) => ShellCommand::Category(Some(category)),
                    None if rest.eq_ignore_ascii_case(coursefinder_core::constants::ALL_TOPICS) => {
                        ShellCommand::Category(None)
                    }
                    None => return Err(format!("Unknown category '{}'", rest)),
                }
            }
        }
        "toggle" | "t" => {
            let (facet, value) = split_head(rest);
            let kind = FacetKind::parse(facet).ok_or_else(|| {
                String::from("Usage: toggle <levels|types|prices> <value>")
            })?;
            let value = kind.value(value).ok_or_else(|| {
                format!(
                    "Unknown {} value '{}' (expected one of: {})",
                    kind,
                    value,
                    kind.tokens().join(", ")
                )
            })?;
            ShellCommand::Toggle(value)
        }
        "page" | "p" => {
            let page = rest
                .parse::<u32>()
                .map_err(|_| format!("Invalid page number '{}'", rest))?;
            ShellCommand::Page(page)
        }
        "clear" if rest.is_empty() => ShellCommand::Clear(None),
        "clear" => {
            let kind = FacetKind::parse(rest)
                .ok_or_else(|| String::from("Usage: clear [levels|types|prices]"))?;
            ShellCommand::Clear(Some(kind))
        }
        "back" | "b" => ShellCommand::Back,
        "forward" | "f" => ShellCommand::Forward,
        "open" | "o" => ShellCommand::Open(rest.to_string()),
        "show" => ShellCommand::Show((!rest.is_empty()).then(|| rest.to_string())),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(command))
}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Explore shell state: the controller plus output mode.
pub(crate) struct Shell {
    controller: ExploreController<MemoryHistory>,
    json: bool,
}

impl Shell {
    pub(crate) fn new(controller: ExploreController<MemoryHistory>, json: bool) -> Self {
        Self { controller, json }
    }

    pub(crate) fn controller(&self) -> &ExploreController<MemoryHistory> {
        &self.controller
    }

    fn render(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let rendered = render_view(&self.controller, self.json).map_err(anyhow::Error::msg)?;
        writeln!(out, "{}", rendered)?;
        Ok(())
    }

    /// Block until the pending search commit (if any) has fired.
    fn settle_search(&mut self) -> Option<Transition> {
        let mut committed = None;
        while let Some(deadline) = self.controller.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            if let Some(transition) = self.controller.poll(Instant::now()) {
                committed = Some(transition);
            }
        }
        committed
    }

    fn apply_inbound(&mut self, query: Option<String>, out: &mut impl Write) -> anyhow::Result<()> {
        match query {
            Some(query) => {
                self.controller.on_navigation(&query);
                self.render(out)
            }
            None => {
                writeln!(out, "No history entry in that direction.")?;
                Ok(())
            }
        }
    }

    /// Apply one command and render its result.
    pub(crate) fn execute(
        &mut self,
        command: ShellCommand,
        out: &mut impl Write,
    ) -> anyhow::Result<Flow> {
        match command {
            ShellCommand::Search(text) => {
                self.controller.set_search_input(text, Instant::now());
                if let Some(transition) = self.settle_search() {
                    tracing::debug!(?transition, "search committed");
                }
                self.render(out)?;
            }
            ShellCommand::Category(category) => {
                self.controller.set_category(category);
                self.render(out)?;
            }
            ShellCommand::Toggle(value) => {
                self.controller.toggle_facet(value);
                self.render(out)?;
            }
            ShellCommand::Page(page) => {
                let transition = self.controller.set_page(page);
                if transition.should_scroll_to_top() {
                    writeln!(out)?;
                }
                self.render(out)?;
            }
            ShellCommand::Clear(None) => {
                self.controller.clear_all();
                self.render(out)?;
            }
            ShellCommand::Clear(Some(kind)) => {
                self.controller.clear_facet(kind);
                self.render(out)?;
            }
            ShellCommand::Back => {
                let query = self.controller.navigator_mut().back();
                self.apply_inbound(query, out)?;
            }
            ShellCommand::Forward => {
                let query = self.controller.navigator_mut().forward();
                self.apply_inbound(query, out)?;
            }
            ShellCommand::Open(query) => {
                let query = self.controller.navigator_mut().open(&query);
                self.apply_inbound(Some(query), out)?;
            }
            ShellCommand::Show(None) => self.render(out)?,
            ShellCommand::Show(Some(slug)) => {
                let course = self
                    .controller
                    .catalog()
                    .and_then(|catalog| catalog.get(&slug));
                match course {
                    Some(course) => {
                        let detail =
                            format_course_detail(course, self.json).map_err(anyhow::Error::msg)?;
                        writeln!(out, "{}", detail)?;
                    }
                    None => writeln!(out, "No course with slug '{}'.", slug)?,
                }
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => {
                self.controller.teardown();
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Read commands until `quit` or end of input.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        self.render(&mut out)?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    if self.execute(command, &mut out)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(message) => writeln!(out, "{}", message)?,
            }
            out.flush()?;
        }
        self.controller.teardown();
        Ok(())
    }
}
