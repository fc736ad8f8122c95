use serde::{Deserialize, Serialize};

/// Cosmetic tag used to tell series apart on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Teal,
    Red,
    Yellow,
}

impl ColorTag {
    pub const PALETTE: [ColorTag; 8] = [
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Purple,
        ColorTag::Orange,
        ColorTag::Pink,
        ColorTag::Teal,
        ColorTag::Red,
        ColorTag::Yellow,
    ];

    /// Color for the `index`-th series when the user did not choose one.
    pub fn round_robin(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ColorTag::Blue => "#3b82f6",
            ColorTag::Green => "#22c55e",
            ColorTag::Purple => "#a855f7",
            ColorTag::Orange => "#f97316",
            ColorTag::Pink => "#ec4899",
            ColorTag::Teal => "#14b8a6",
            ColorTag::Red => "#ef4444",
            ColorTag::Yellow => "#eab308",
        }
    }
}
