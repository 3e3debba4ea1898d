/// Keybinding contexts. Each is an independent namespace of shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Top-level filter shell
    Shell,
    /// Working-set listing
    Listing,
    /// Single item detail / editor
    Editor,
    /// Value pickers fed from the backend vocabulary
    Color,
    Assignee,
    Project,
    Tag,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::Shell => "shell",
            Context::Listing => "listing",
            Context::Editor => "item-editor",
            Context::Color => "color",
            Context::Assignee => "assignee",
            Context::Project => "project",
            Context::Tag => "tag",
        }
    }
}

impl AsRef<str> for Context {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Actions available from the filter shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellAction {
    Quit,
    Clear,
    Completed,
    Assignee,
    Project,
    New,
    Tag,
    Search,
}

impl ShellAction {
    pub const ALL: &'static [ShellAction] = &[
        ShellAction::Quit,
        ShellAction::Clear,
        ShellAction::Completed,
        ShellAction::Assignee,
        ShellAction::Project,
        ShellAction::New,
        ShellAction::Tag,
        ShellAction::Search,
    ];

    /// Name stored in the keymap
    pub fn name(self) -> &'static str {
        match self {
            ShellAction::Quit => "quit",
            ShellAction::Clear => "clear",
            ShellAction::Completed => "completed",
            ShellAction::Assignee => "assigned",
            ShellAction::Project => "project",
            ShellAction::New => "new",
            ShellAction::Tag => "tag",
            ShellAction::Search => "search",
        }
    }

    /// Key tried first when assigning a binding
    pub fn preferred_key(self) -> char {
        match self {
            ShellAction::Quit => 'q',
            ShellAction::Clear => 'c',
            ShellAction::Completed => 'd',
            ShellAction::Assignee => 'a',
            ShellAction::Project => 'p',
            ShellAction::New => 'n',
            ShellAction::Tag => 't',
            ShellAction::Search => 's',
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }
}

/// Actions available while a working set is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingAction {
    Fix,
    ToggleShowAll,
    Review,
    SortUrgency,
    SortDate,
    SortColor,
    Goto,
    Quit,
}

impl ListingAction {
    pub const ALL: &'static [ListingAction] = &[
        ListingAction::Fix,
        ListingAction::ToggleShowAll,
        ListingAction::Review,
        ListingAction::SortUrgency,
        ListingAction::SortDate,
        ListingAction::SortColor,
        ListingAction::Goto,
        ListingAction::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ListingAction::Fix => "fix",
            ListingAction::ToggleShowAll => "toggle show all",
            ListingAction::Review => "review",
            ListingAction::SortUrgency => "sort by urgency",
            ListingAction::SortDate => "sort by date",
            ListingAction::SortColor => "sort by color",
            ListingAction::Goto => "goto",
            ListingAction::Quit => "quit",
        }
    }

    pub fn preferred_key(self) -> char {
        match self {
            ListingAction::Fix => 'f',
            ListingAction::ToggleShowAll => 'a',
            ListingAction::Review => 'r',
            ListingAction::SortUrgency => 'u',
            ListingAction::SortDate => 'd',
            ListingAction::SortColor => 'c',
            ListingAction::Goto => 'g',
            ListingAction::Quit => 'q',
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }
}

/// Actions available while one item is shown in full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    Description,
    Assignee,
    Project,
    Color,
    Tags,
    Reviewed,
    Back,
    Quit,
    Delete,
    Done,
    Disputed,
}

impl EditorAction {
    pub const ALL: &'static [EditorAction] = &[
        EditorAction::Description,
        EditorAction::Assignee,
        EditorAction::Project,
        EditorAction::Color,
        EditorAction::Tags,
        EditorAction::Reviewed,
        EditorAction::Back,
        EditorAction::Quit,
        EditorAction::Delete,
        EditorAction::Done,
        EditorAction::Disputed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditorAction::Description => "description",
            EditorAction::Assignee => "assigned",
            EditorAction::Project => "project",
            EditorAction::Color => "color",
            EditorAction::Tags => "tags",
            EditorAction::Reviewed => "reviewed",
            EditorAction::Back => "back",
            EditorAction::Quit => "quit",
            EditorAction::Delete => "delete",
            EditorAction::Done => "done",
            EditorAction::Disputed => "disputed",
        }
    }

    pub fn preferred_key(self) -> char {
        match self {
            EditorAction::Description => 'e',
            EditorAction::Assignee => 'a',
            EditorAction::Project => 'p',
            EditorAction::Color => 'c',
            EditorAction::Tags => 't',
            EditorAction::Reviewed => 'r',
            EditorAction::Back => 'b',
            EditorAction::Quit => 'q',
            EditorAction::Delete => 'x',
            EditorAction::Done => 'd',
            EditorAction::Disputed => 'i',
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }
}
