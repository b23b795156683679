use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use tracing::warn;

use crate::ui::{NoticeKind, Ui};

/// `Ui` over stdin/stdout. Navigation requests are recorded so the caller can
/// render the destination once the current command finishes.
#[derive(Debug, Default)]
pub struct TerminalUi {
    assume_yes: bool,
    navigation: RefCell<Option<String>>,
    refresh_requested: Cell<bool>,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            ..Self::default()
        }
    }

    /// The pending navigation target, if the destination was asked to reload.
    pub fn take_navigation(&self) -> Option<String> {
        let path = self.navigation.borrow_mut().take()?;
        if self.refresh_requested.replace(false) {
            Some(path)
        } else {
            None
        }
    }

    fn prompt(message: &str) -> io::Result<bool> {
        print!("{} [y/N] ", message);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}

impl Ui for TerminalUi {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::prompt(message).unwrap_or_else(|err| {
            warn!(error = %err, "could not read confirmation, treating as no");
            false
        })
    }

    fn navigate(&self, path: &str) {
        *self.navigation.borrow_mut() = Some(path.to_string());
    }

    fn refresh(&self) {
        self.refresh_requested.set(true);
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Error => eprintln!("{}", message),
            NoticeKind::Success | NoticeKind::Info => println!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_confirms_without_prompting() {
        let ui = TerminalUi::new(true);
        assert!(ui.confirm("Are you sure you want to delete \"A\"?"));
    }

    #[test]
    fn test_navigation_requires_refresh() {
        let ui = TerminalUi::new(false);
        ui.navigate("/projects");
        assert_eq!(ui.take_navigation(), None);

        ui.navigate("/projects/2");
        ui.refresh();
        assert_eq!(ui.take_navigation(), Some("/projects/2".to_string()));
        assert_eq!(ui.take_navigation(), None);
    }
}
