use std::str::FromStr;

use crate::error::IconError;

/// 画面に表示するアイコン。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Plus,
    TrashBin,
    Edit,
    Calendar,
    Time,
    Back,
    Undo,
    Check,
}

/// アイコン名とアイコンの対応表。
const ICONS: [(&str, Icon); 8] = [
    ("plus", Icon::Plus),
    ("trashBin", Icon::TrashBin),
    ("edit", Icon::Edit),
    ("calendar", Icon::Calendar),
    ("time", Icon::Time),
    ("back", Icon::Back),
    ("undo", Icon::Undo),
    ("check", Icon::Check),
];

impl Icon {
    /// 名前からアイコンを探す。見つからない場合は`IconError::Unknown`を返す。
    pub fn from_name(name: &str) -> Result<Self, IconError> {
        ICONS
            .iter()
            .find(|(icon_name, _)| *icon_name == name)
            .map(|(_, icon)| *icon)
            .ok_or_else(|| IconError::Unknown(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        ICONS
            .iter()
            .find(|(_, icon)| icon == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    /// 端末に表示する文字。
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Plus => "+",
            Icon::TrashBin => "🗑",
            Icon::Edit => "✎",
            Icon::Calendar => "📅",
            Icon::Time => "🕑",
            Icon::Back => "←",
            Icon::Undo => "↶",
            Icon::Check => "✓",
        }
    }
}

impl FromStr for Icon {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
