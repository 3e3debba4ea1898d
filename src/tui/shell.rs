use log::{debug, info};

use crate::io::backend::Backend;
use crate::model::{ASSIGNEE_SIGIL, Context, Keymap, ShellAction};
use crate::ops::edit;
use crate::ops::filter::Filter;
use crate::ops::store::{self, UpdateOutcome};

use super::console::{Console, ENTER, KeyHints, Screen, View};
use super::review::{ReviewError, Reviewer};
use super::session::Session;

/// Top-level loop: build up a filter, then review what it selects
pub struct Shell<'a> {
    pub console: &'a mut dyn Console,
    pub backend: &'a mut dyn Backend,
    pub keymap: &'a Keymap,
    pub session: &'a mut Session,
}

impl Shell<'_> {
    /// Run until the user quits. Returns the filter as it was left.
    pub fn run(&mut self, mut filter: Filter) -> Result<Filter, ReviewError> {
        let mut status = None;
        loop {
            self.console.show(Screen {
                view: View::Shell {
                    filter: filter.to_string(),
                },
                hints: KeyHints::for_context(self.keymap, Context::Shell, None),
                status: status.take(),
            })?;

            let key = self.console.read_key()?;
            if key == ENTER {
                self.review(&filter)?;
                continue;
            }
            let action = self
                .keymap
                .maps_to(key, Context::Shell)
                .and_then(ShellAction::from_name);
            debug!("shell key {:?} -> {:?}", key, action);

            match action {
                Some(ShellAction::Quit) => return Ok(filter),
                Some(ShellAction::Clear) => filter.clear(),
                Some(ShellAction::Completed) => filter.push(&self.session.review.completed_token),
                Some(ShellAction::Search) => {
                    let terms = self.console.read_line("Enter search terms: ")?;
                    filter.push(&terms);
                }
                Some(ShellAction::Assignee) => {
                    if let Some(name) = self.pick(Context::Assignee, "Assign To")? {
                        filter.push(&format!("+{}{}", ASSIGNEE_SIGIL, name));
                    }
                }
                Some(ShellAction::Project) => {
                    if let Some(project) = self.pick(Context::Project, "Project")? {
                        filter.push(&format!("project:{}", project));
                    }
                }
                Some(ShellAction::Tag) => {
                    if let Some(tag) = self.pick(Context::Tag, "Tag")? {
                        filter.push(&format!("+{}", tag));
                    }
                }
                Some(ShellAction::New) => status = self.create(&filter)?,
                None => {}
            }
        }
    }

    fn review(&mut self, filter: &Filter) -> Result<(), ReviewError> {
        let items = store::fetch(
            self.backend,
            filter,
            &self.session.review.completed_token,
            self.session.sort,
            self.session.now(),
        )?;
        let mut reviewer = Reviewer {
            console: &mut *self.console,
            backend: &mut *self.backend,
            keymap: self.keymap,
            session: &mut *self.session,
        };
        reviewer.run(items, filter)
    }

    /// Create an item in the filter's project for the filter's assignee,
    /// asking for whichever of the two the filter does not name
    fn create(&mut self, filter: &Filter) -> Result<Option<String>, ReviewError> {
        let project = match filter.project() {
            Some(project) => project.to_string(),
            None => match self.pick(Context::Project, "Project")? {
                Some(project) => project,
                None => return Ok(None),
            },
        };
        let assignee = match filter.assignee() {
            Some(name) => name.to_string(),
            None => match self.pick(Context::Assignee, "Assign To")? {
                Some(name) => name,
                None => return Ok(None),
            },
        };
        let description = self.console.read_line("Enter description: ")?;
        let color = self.session.review.default_color();
        let Some(item) = edit::new_item(&project, &assignee, &description, color) else {
            return Ok(None);
        };
        match store::update(self.backend, &item)? {
            UpdateOutcome::Written => {
                info!("created item in {} for {}", project, assignee);
                Ok(Some(format!("Created \"{}\".", item.description)))
            }
            UpdateOutcome::Conflict(conflict) => {
                self.console.acknowledge(&conflict)?;
                Ok(None)
            }
        }
    }

    fn pick(&mut self, context: Context, title: &str) -> Result<Option<String>, ReviewError> {
        let hints = KeyHints::for_context(self.keymap, context, Some(title));
        let key = self.console.choose(hints)?;
        Ok(self.keymap.maps_to(key, context).map(str::to_string))
    }
}
