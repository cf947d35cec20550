use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datetime;
use crate::error::TimeItemError;

/// 新しいtime itemに付けるデフォルトのタイトル。
pub const DEFAULT_TITLE: &str = "New Event";

/// 経過時間を追跡する対象のイベント。
///
/// 一度作成した値は変更しない。更新は`update_time_item`で新しい値を作成する。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeItem {
    id: Uuid,
    title: String,
    start_time: DateTime<Utc>,
}

impl TimeItem {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// 保存されていた値を検証し直す。
    pub(crate) fn revalidate(self) -> Result<Self, TimeItemError> {
        let fields = TimeItemFields::new(self.title, Some(self.start_time));
        validate(&fields)?;

        Ok(Self {
            id: self.id,
            title: fields.title,
            start_time: self.start_time,
        })
    }
}

/// time itemを作成するための未検証の入力値。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeItemFields {
    pub title: String,
    pub start_time: Option<DateTime<Utc>>,
}

impl TimeItemFields {
    pub fn new(title: impl Into<String>, start_time: Option<DateTime<Utc>>) -> Self {
        Self {
            title: title.into(),
            start_time,
        }
    }
}

/// 新しい`TimeItem`を返す。
///
/// タイトルが空、または開始日時が指定されていない場合は`TimeItemError::Validation`を返す。
///
/// # Arguments
///
/// * `fields` - 作成するtime itemの値
///
/// # Examples
///
/// ```ignore
/// let item = new_time_item(TimeItemFields::new("Moved house", Some(start))).unwrap();
/// ```
pub fn new_time_item(fields: TimeItemFields) -> Result<TimeItem, TimeItemError> {
    let start_time = validate(&fields)?;

    Ok(TimeItem {
        id: Uuid::new_v4(),
        title: fields.title,
        start_time,
    })
}

/// タイトルが`New Event`で、開始日時が現在時刻の`TimeItem`を返す。
pub fn new_default_time_item() -> TimeItem {
    TimeItem {
        id: Uuid::new_v4(),
        title: DEFAULT_TITLE.to_string(),
        start_time: datetime::now(),
    }
}

/// `previous`のidを引き継いだ、新しい値の`TimeItem`を返す。
///
/// # Arguments
///
/// * `previous` - 更新前のtime item
/// * `fields` - 更新後の値
pub fn update_time_item(
    previous: &TimeItem,
    fields: TimeItemFields,
) -> Result<TimeItem, TimeItemError> {
    let start_time = validate(&fields)?;

    Ok(TimeItem {
        id: previous.id,
        title: fields.title,
        start_time,
    })
}

fn validate(fields: &TimeItemFields) -> Result<DateTime<Utc>, TimeItemError> {
    if fields.title.is_empty() {
        return Err(TimeItemError::Validation(
            "Time item requires a title".to_string(),
        ));
    }

    fields.start_time.ok_or_else(|| {
        TimeItemError::Validation("Time item requires a start time".to_string())
    })
}
