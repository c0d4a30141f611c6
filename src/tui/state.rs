use crate::catalogue;
use crate::log_sink::LogSink;
use crate::model::Category;
use crate::orchestrator::choose_one;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tools,
    Install,
    Monitor,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Tools, Tab::Install, Tab::Monitor];

    pub fn index(self) -> usize {
        match self {
            Tab::Tools => 0,
            Tab::Install => 1,
            Tab::Monitor => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Tools => "Tools",
            Tab::Install => "Install",
            Tab::Monitor => "System monitor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    Select(Tab),
    Next,
    Previous,
}

/// Tab switching; Next/Previous wrap around.
pub fn next_tab(current: Tab, event: TabEvent) -> Tab {
    let n = Tab::ALL.len();
    match event {
        TabEvent::Select(t) => t,
        TabEvent::Next => Tab::ALL[(current.index() + 1) % n],
        TabEvent::Previous => Tab::ALL[(current.index() + n - 1) % n],
    }
}

/// What activating a menu item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Run(Category, &'static str),
    Choose(Category),
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: ItemAction,
}

const fn item(label: &'static str, action: ItemAction) -> MenuItem {
    MenuItem { label, action }
}

static TOOLS_MENU: [MenuItem; 6] = [
    item("Update system (APT)", ItemAction::Run(Category::System, "update")),
    item("Clean up system", ItemAction::Run(Category::System, "clean")),
    item(
        "Update Flatpak applications",
        ItemAction::Run(Category::System, "flatpak-update"),
    ),
    item(
        "System information (basic)",
        ItemAction::Run(Category::System, "info-basic"),
    ),
    item(
        "System information (extended)",
        ItemAction::Choose(Category::Status),
    ),
    item("System repair", ItemAction::Choose(Category::Fix)),
];

static INSTALL_MENU: [MenuItem; 4] = [
    item("Browsers", ItemAction::Choose(Category::Browsers)),
    item("Multimedia", ItemAction::Choose(Category::Multimedia)),
    item("Graphics", ItemAction::Choose(Category::Graphics)),
    item("Tools", ItemAction::Choose(Category::Tools)),
];

static MONITOR_MENU: [MenuItem; 1] = [item(
    "Open extended system report in a terminal",
    ItemAction::Run(Category::Status, "sysinfo"),
)];

pub fn menu(tab: Tab) -> &'static [MenuItem] {
    match tab {
        Tab::Tools => &TOOLS_MENU,
        Tab::Install => &INSTALL_MENU,
        Tab::Monitor => &MONITOR_MENU,
    }
}

/// An open choose-one dialog.
#[derive(Debug, Clone)]
pub struct Chooser {
    pub category: Category,
    pub options: Vec<(&'static str, &'static str)>,
    pub selected: usize,
}

impl Chooser {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            options: catalogue::choices(category),
            selected: 0,
        }
    }
}

/// Work the event loop must carry out after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Dispatch { category: Category, key: String },
    CopyLastCommand,
    ExportLog,
}

pub struct UiState {
    pub tab: Tab,
    /// Highlighted menu row, per tab.
    pub selected: [usize; 3],
    pub chooser: Option<Chooser>,
    pub show_help: bool,
    pub info: String,
    pub log: LogSink,
    pub last_command: Option<&'static str>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: Tab::Tools,
            selected: [0; 3],
            chooser: None,
            show_help: false,
            info: String::new(),
            log: LogSink::new(),
            last_command: None,
        }
    }
}

impl UiState {
    pub fn selected_row(&self) -> usize {
        self.selected[self.tab.index()]
    }

    fn move_selection(&mut self, down: bool) {
        let len = menu(self.tab).len();
        let row = &mut self.selected[self.tab.index()];
        if down {
            *row = (*row + 1).min(len.saturating_sub(1));
        } else {
            *row = row.saturating_sub(1);
        }
    }

    fn switch_tab(&mut self, event: TabEvent) {
        self.tab = next_tab(self.tab, event);
    }

    fn activate(&mut self) -> Option<UiAction> {
        let entry = menu(self.tab).get(self.selected_row())?;
        match entry.action {
            ItemAction::Run(category, key) => Some(UiAction::Dispatch {
                category,
                key: key.to_string(),
            }),
            ItemAction::Choose(category) => {
                self.chooser = Some(Chooser::new(category));
                None
            }
        }
    }

    fn chooser_key(&mut self, code: KeyCode) -> Option<UiAction> {
        let chooser = self.chooser.as_mut()?;
        let response = match code {
            KeyCode::Up | KeyCode::Char('k') => {
                chooser.selected = chooser.selected.saturating_sub(1);
                return None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                chooser.selected = (chooser.selected + 1).min(chooser.options.len() - 1);
                return None;
            }
            KeyCode::Enter => Some(chooser.selected),
            KeyCode::Esc | KeyCode::Char('q') => None,
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(n) if n >= 1 && (n as usize) <= chooser.options.len() => Some(n as usize - 1),
                _ => return None,
            },
            _ => return None,
        };
        let key = choose_one(&chooser.options, response).to_string();
        let category = chooser.category;
        self.chooser = None;
        Some(UiAction::Dispatch { category, key })
    }

    /// Apply a key press; returns the side effect the event loop should run.
    pub fn handle_key(&mut self, k: KeyEvent) -> Option<UiAction> {
        if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
            return Some(UiAction::Quit);
        }
        if self.chooser.is_some() {
            return self.chooser_key(k.code);
        }
        if self.show_help {
            match k.code {
                KeyCode::Char('q') => return Some(UiAction::Quit),
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => self.show_help = false,
                _ => {}
            }
            return None;
        }
        match k.code {
            KeyCode::Char('q') => return Some(UiAction::Quit),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.switch_tab(TabEvent::Next),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.switch_tab(TabEvent::Previous)
            }
            KeyCode::Char('1') => self.switch_tab(TabEvent::Select(Tab::Tools)),
            KeyCode::Char('2') => self.switch_tab(TabEvent::Select(Tab::Install)),
            KeyCode::Char('3') => self.switch_tab(TabEvent::Select(Tab::Monitor)),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => return self.activate(),
            KeyCode::Char('y') => return Some(UiAction::CopyLastCommand),
            KeyCode::Char('s') => return Some(UiAction::ExportLog),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        None
    }
}
