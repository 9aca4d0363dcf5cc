//! Colored terminal output for run results.

use std::io::Write;

use console::{Style, Term};
use snipsync_core::SnippetRegistry;
use snipsync_docs::SyncReport;

/// Output formatter, writing to stderr unless built with another sink.
pub(crate) struct Output<W = Term> {
    out: W,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::with_writer(Term::stderr())
    }
}

impl<W: Write> Output<W> {
    /// Create an output formatter writing to `out`.
    pub(crate) fn with_writer(out: W) -> Self {
        Self {
            out,
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// List discovered snippet identifiers in discovery order.
    pub(crate) fn snippets(&mut self, registry: &SnippetRegistry) {
        let header = self
            .cyan_bold
            .apply_to(format!("Discovered {} snippet(s):", registry.len()))
            .to_string();
        self.line(&header);
        for id in registry.ids() {
            let line = format!("  {}", self.dim.apply_to(id));
            self.line(&line);
        }
    }

    /// Print updated documents and unresolved references of a run.
    pub(crate) fn report(&mut self, report: &SyncReport) {
        for path in &report.updated {
            let line = format!("{} {}", self.green.apply_to("updated"), path.display());
            self.line(&line);
        }
        for unresolved in &report.unresolved {
            let line = self
                .yellow
                .apply_to(format!(
                    "warning: {} references unknown snippet '{}'",
                    unresolved.path.display(),
                    unresolved.id
                ))
                .to_string();
            self.line(&line);
        }
        self.line(&format!(
            "{} document(s) scanned, {} updated",
            report.scanned,
            report.updated.len()
        ));
    }

    /// Print an error message (red).
    pub(crate) fn error(&mut self, msg: &str) {
        let line = self.red.apply_to(msg).to_string();
        self.line(&line);
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{msg}");
    }
}
