use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use uuid::Uuid;

use crate::error::TimeItemError;
use crate::repository::TimeItemRepository;
use crate::time_item::{new_time_item, update_time_item, TimeItem, TimeItemFields};

/// 追加順に並んだtime itemの一覧。
///
/// 変更操作は元の値を変えずに新しい一覧を返し、変更後の一覧全体をリポジトリに保存する。
/// 以前の一覧を参照している側からは変更前のスナップショットがそのまま見える。
pub struct TimeItemCollection<R: TimeItemRepository> {
    items: Arc<[TimeItem]>,
    repository: Arc<R>,
}

impl<R: TimeItemRepository> Clone for TimeItemCollection<R> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TimeItemRepository> TimeItemCollection<R> {
    /// リポジトリに保存されている一覧を読み込む。
    ///
    /// 何も保存されていない場合は空の一覧を返す。
    /// 保存されていた値は検証し直し、重複したidは最初のものだけを残す。
    pub fn load(repository: Arc<R>) -> Result<Self> {
        let stored = repository
            .load()
            .context("Failed to load stored time items")?
            .unwrap_or_default();

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(stored.len());
        for item in stored {
            if !seen.insert(item.id()) {
                warn!("Skipping duplicated time item: {}", item.id());
                continue;
            }
            let item = item
                .revalidate()
                .context("Stored time item is invalid")?;
            items.push(item);
        }
        info!("Loaded {} time items", items.len());

        Ok(Self {
            items: items.into(),
            repository,
        })
    }

    pub fn items(&self) -> &[TimeItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// idが一致するtime itemを返す。
    pub fn get(&self, id: Uuid) -> Option<&TimeItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// 検証したtime itemを末尾に追加した一覧を返す。
    pub fn add(&self, fields: TimeItemFields) -> Result<Self, TimeItemError> {
        let item = new_time_item(fields)?;

        Ok(self.append(item))
    }

    /// idが一致するtime itemを更新した一覧を返す。
    ///
    /// 一致するものがない場合は`TimeItemError::NotFound`を返す。
    pub fn update(&self, id: Uuid, fields: TimeItemFields) -> Result<Self, TimeItemError> {
        let previous = self.get(id).ok_or(TimeItemError::NotFound(id))?;
        let updated = update_time_item(previous, fields)?;

        self.replace(updated)
    }

    /// 作成済みのtime itemを末尾に追加した一覧を返す。
    pub(crate) fn append(&self, item: TimeItem) -> Self {
        info!("Adding time item: {} ({})", item.title(), item.id());

        let mut items = self.items.to_vec();
        items.push(item);

        self.replaced(items)
    }

    /// 同じidのtime itemを`item`に置き換えた一覧を返す。
    pub(crate) fn replace(&self, item: TimeItem) -> Result<Self, TimeItemError> {
        let id = item.id();
        let index = self
            .items
            .iter()
            .position(|current| current.id() == id)
            .ok_or(TimeItemError::NotFound(id))?;
        info!("Updating time item: {} ({})", item.title(), id);

        let mut items = self.items.to_vec();
        items[index] = item;

        Ok(self.replaced(items))
    }

    /// idが一致するtime itemを取り除いた一覧を返す。
    ///
    /// 一致するものがない場合は何もせず、保存も行わない。
    pub fn remove(&self, id: Uuid) -> Self {
        if self.get(id).is_none() {
            warn!("Time item to remove was not found: {}", id);
            return self.clone();
        }
        info!("Removing time item: {}", id);

        let items = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();

        self.replaced(items)
    }

    /// 空の一覧を返し、保存されている一覧も削除する。
    pub fn clear(&self) -> Self {
        info!("Clearing {} time items", self.items.len());
        if let Err(err) = self.repository.clear() {
            warn!("Failed to clear stored time items: {:#}", err);
        }

        Self {
            items: Vec::new().into(),
            repository: Arc::clone(&self.repository),
        }
    }

    fn replaced(&self, items: Vec<TimeItem>) -> Self {
        let next = Self {
            items: items.into(),
            repository: Arc::clone(&self.repository),
        };
        next.persist();
        next
    }

    /// 一覧全体を保存する。保存の失敗はログに残すだけで、呼び出し側には返さない。
    fn persist(&self) {
        if let Err(err) = self.repository.save(&self.items) {
            warn!("Failed to save time items: {:#}", err);
        }
    }
}
