use crate::model::{
    ASSIGNEE_SIGIL, Color, Context, DISPUTED_LABEL, EditorAction, Item, Keymap, ListingAction,
    ShellAction, Status,
};

/// Whether a label is a free-form tag (not a color, assignee, dispute
/// marker, negation or backend virtual tag)
pub fn is_free_form_tag(tag: &str) -> bool {
    let Some(first) = tag.chars().next() else {
        return false;
    };
    if first.is_ascii_uppercase() || first == ASSIGNEE_SIGIL || first == '-' {
        return false;
    }
    Color::from_label(tag).is_none() && tag != DISPUTED_LABEL
}

/// Auto-assign keys for the categories, assignees and tags seen on open
/// items, in the order they first appear.
pub fn learn_vocabulary(keymap: &mut Keymap, items: &[Item]) {
    let open = items
        .iter()
        .filter(|i| i.end.is_none() && i.status == Status::Pending);
    for item in open {
        if let Some(project) = item.project.as_deref() {
            keymap.auto_assign(project, Context::Project);
        }
        for tag in &item.tags {
            if is_free_form_tag(tag) {
                keymap.auto_assign(tag, Context::Tag);
            } else if let Some(name) = tag.strip_prefix(ASSIGNEE_SIGIL) {
                keymap.auto_assign(name, Context::Assignee);
            }
        }
    }
}

/// Best-effort bindings for colors and every built-in action
pub fn assign_builtin(keymap: &mut Keymap) {
    for (key, color) in [('r', Color::Red), ('b', Color::Blue), ('g', Color::Green)] {
        keymap.best_effort_assign(key, color.as_str(), Context::Color);
    }
    for action in ShellAction::ALL {
        keymap.best_effort_assign(action.preferred_key(), action.name(), Context::Shell);
    }
    for action in EditorAction::ALL {
        keymap.best_effort_assign(action.preferred_key(), action.name(), Context::Editor);
    }
    for action in ListingAction::ALL {
        keymap.best_effort_assign(action.preferred_key(), action.name(), Context::Listing);
    }
}

/// Build this run's bindings on top of whatever was persisted
pub fn generate(keymap: &mut Keymap, items: &[Item]) {
    learn_vocabulary(keymap, items);
    assign_builtin(keymap);
}
