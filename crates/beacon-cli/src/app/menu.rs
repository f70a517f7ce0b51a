use beacon_types::{Config, Profile};

const RECENT_PROFILES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    GenerateReport,
    ManageProfiles,
    ActivateProfile(String),
    Setup,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub title: String,
    pub description: String,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Spacer,
    Item(MenuItem),
}

impl MenuEntry {
    pub fn is_selectable(&self) -> bool {
        matches!(self, MenuEntry::Item(_))
    }

    pub fn item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Spacer => None,
        }
    }
}

fn item(action: MenuAction, title: impl Into<String>, description: &str) -> MenuEntry {
    MenuEntry::Item(MenuItem {
        action,
        title: title.into(),
        description: description.to_string(),
        warning: None,
    })
}

/// Main menu entries for the current config and stored profiles.
pub fn derive_menu(config: &Config, profiles: &[Profile]) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Spacer];

    entries.push(MenuEntry::Item(MenuItem {
        action: MenuAction::GenerateReport,
        title: "Generate Activity Report".to_string(),
        description: "Summarise file activity for a profile".to_string(),
        warning: (!config.has_token()).then(|| "setup required".to_string()),
    }));
    entries.push(item(
        MenuAction::ManageProfiles,
        "Manage Profiles",
        "Create, preview, edit or delete profiles",
    ));

    let mut recent: Vec<&Profile> = profiles.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    for profile in recent.into_iter().take(RECENT_PROFILES) {
        let suffix = if profile.is_default { " (default)" } else { "" };
        entries.push(item(
            MenuAction::ActivateProfile(profile.name.clone()),
            format!("  - {}{}", profile.name, suffix),
            "Make this the active profile",
        ));
    }

    entries.push(MenuEntry::Spacer);
    entries.push(item(MenuAction::Setup, "Setup", "Figma token, user and team"));
    entries.push(item(MenuAction::Exit, "Exit", "Quit figma-beacon"));
    entries.push(MenuEntry::Spacer);
    entries
}

pub fn first_selectable(entries: &[MenuEntry]) -> usize {
    entries
        .iter()
        .position(MenuEntry::is_selectable)
        .unwrap_or(0)
}

/// Nearest selectable entry above `cursor`, or `cursor` itself.
pub fn previous_selectable(entries: &[MenuEntry], cursor: usize) -> usize {
    entries[..cursor.min(entries.len())]
        .iter()
        .rposition(MenuEntry::is_selectable)
        .unwrap_or(cursor)
}

/// Nearest selectable entry below `cursor`, or `cursor` itself.
pub fn next_selectable(entries: &[MenuEntry], cursor: usize) -> usize {
    entries
        .iter()
        .enumerate()
        .skip(cursor + 1)
        .find(|(_, entry)| entry.is_selectable())
        .map(|(index, _)| index)
        .unwrap_or(cursor)
}

/// Keep `cursor` on a selectable row after the entries were re-derived.
pub fn settle(entries: &[MenuEntry], cursor: usize) -> usize {
    match entries.get(cursor) {
        Some(entry) if entry.is_selectable() => cursor,
        _ => {
            let previous = previous_selectable(entries, cursor);
            if entries.get(previous).is_some_and(MenuEntry::is_selectable) {
                previous
            } else {
                first_selectable(entries)
            }
        }
    }
}
