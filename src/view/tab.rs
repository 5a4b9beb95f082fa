//! Dashboard tabs

use std::fmt;
use std::str::FromStr;

/// One of the mutually exclusive dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Watch,
    Food,
    Goals,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Watch, Tab::Food, Tab::Goals];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Watch => "watch",
            Tab::Food => "food",
            Tab::Goals => "goals",
        }
    }

    /// Id of the content region holding this tab
    pub fn region(&self) -> &'static str {
        match self {
            Tab::Dashboard => "tab-dashboard",
            Tab::Watch => "tab-watch",
            Tab::Food => "tab-food",
            Tab::Goals => "tab-goals",
        }
    }

    /// Id of the notice region inside this tab
    pub fn notice_region(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashAlert",
            Tab::Watch => "syncAlert",
            Tab::Food => "foodAlert",
            Tab::Goals => "goalsAlert",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Watch => "Apple Watch",
            Tab::Food => "Food",
            Tab::Goals => "Goals",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == s)
            .ok_or_else(|| format!("unknown tab '{}', expected dashboard, watch, food or goals", s))
    }
}
