use serde::{Deserialize, Serialize};

/// Which comparator orders a working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Urgency,
    Recency,
    Color,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Urgency => "Urgency",
            SortMode::Recency => "Date",
            SortMode::Color => "Color",
        }
    }
}
