use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::collection::TimeItemCollection;
use crate::datetime;
use crate::error::TimeItemError;
use crate::repository::TimeItemRepository;
use crate::time_item::{
    new_default_time_item, new_time_item, update_time_item, TimeItem, TimeItemFields,
};

/// タイトルが空のまま確定、プレビューする時に使うタイトル。
pub const UNNAMED_TITLE: &str = "Unnamed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// 1つのtime itemを作成、編集する間の入力状態。
///
/// タイトルと開始日時はそれぞれ元の値に戻せる。元の値は作成時は画面を開いた時点の
/// デフォルト値、編集時は編集対象のtime itemになる。
#[derive(Clone, Debug)]
pub struct TimeItemFormState {
    mode: FormMode,
    base_item: TimeItem,
    title: String,
    start_time: DateTime<Utc>,
}

impl TimeItemFormState {
    /// 新しいtime itemを作成するための入力状態を返す。
    ///
    /// 開始日時の元の値は、この時点の現在時刻で固定する。
    pub fn for_new_item() -> Self {
        Self::with_base(FormMode::Create, new_default_time_item())
    }

    /// 既存のtime itemを編集するための入力状態を返す。
    pub fn for_existing_item(item: &TimeItem) -> Self {
        Self::with_base(FormMode::Edit, item.clone())
    }

    fn with_base(mode: FormMode, base_item: TimeItem) -> Self {
        Self {
            mode,
            title: base_item.title().to_string(),
            start_time: base_item.start_time(),
            base_item,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn base_item(&self) -> &TimeItem {
        &self.base_item
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// 選択された日付(年月日)を開始日時に反映する。時刻はそのまま保つ。
    ///
    /// `None`は選択がキャンセルされたことを表し、何もしない。
    pub fn set_date(&mut self, picked: Option<DateTime<Utc>>) {
        let Some(picked) = picked else {
            debug!("Date selection cancelled");
            return;
        };

        match datetime::merge_date(&self.start_time, &picked) {
            Some(start_time) => self.start_time = start_time,
            None => warn!("Ignoring a date that does not exist in the local timezone: {}", picked),
        }
    }

    /// 選択された時刻(時分秒)を開始日時に反映する。日付はそのまま保つ。
    ///
    /// `None`は選択がキャンセルされたことを表し、何もしない。
    pub fn set_time(&mut self, picked: Option<DateTime<Utc>>) {
        let Some(picked) = picked else {
            debug!("Time selection cancelled");
            return;
        };

        match datetime::merge_time(&self.start_time, &picked) {
            Some(start_time) => self.start_time = start_time,
            None => warn!("Ignoring a time that does not exist in the local timezone: {}", picked),
        }
    }

    /// 開始日時を現在時刻にする。
    pub fn set_start_time_to_now(&mut self) {
        self.start_time = datetime::now();
    }

    pub fn reset_title(&mut self) {
        self.title = self.base_item.title().to_string();
    }

    pub fn reset_start_time(&mut self) {
        self.start_time = self.base_item.start_time();
    }

    /// タイトルと開始日時を両方とも元の値に戻す。
    pub fn reset(&mut self) {
        self.reset_title();
        self.reset_start_time();
    }

    pub fn is_title_dirty(&self) -> bool {
        self.title != self.base_item.title()
    }

    pub fn is_start_time_dirty(&self) -> bool {
        self.start_time != self.base_item.start_time()
    }

    /// 元の値に戻せる項目が1つでもあれば`true`を返す。
    pub fn can_reset(&self) -> bool {
        self.is_title_dirty() || self.is_start_time_dirty()
    }

    /// 入力中の値で作成したプレビュー用のtime itemを返す。
    ///
    /// タイトルが空の場合は`Unnamed`を使う。
    pub fn preview_item(&self) -> Result<TimeItem, TimeItemError> {
        update_time_item(&self.base_item, self.staged_fields())
    }

    /// 入力中の値を確定し、`collection`に反映した一覧と確定したtime itemを返す。
    ///
    /// 作成時は末尾に追加し、編集時は同じidのtime itemを置き換える。
    /// 検証に失敗した場合は何も反映しない。
    ///
    /// # Arguments
    ///
    /// * `collection` - 反映先の一覧
    pub fn submit<R: TimeItemRepository>(
        &self,
        collection: &TimeItemCollection<R>,
    ) -> Result<(TimeItemCollection<R>, TimeItem), TimeItemError> {
        match self.mode {
            FormMode::Create => {
                let item = new_time_item(self.staged_fields())?;
                Ok((collection.append(item.clone()), item))
            }
            FormMode::Edit => {
                let item = update_time_item(&self.base_item, self.staged_fields())?;
                let collection = collection.replace(item.clone())?;
                Ok((collection, item))
            }
        }
    }

    /// 入力中の値を破棄する。
    pub fn cancel(self) {
        debug!("Discarded edits of {}", self.base_item.id());
    }

    fn staged_fields(&self) -> TimeItemFields {
        let title = if self.title.is_empty() {
            UNNAMED_TITLE.to_string()
        } else {
            self.title.clone()
        };

        TimeItemFields::new(title, Some(self.start_time))
    }
}
