use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::collection::TimeItemCollection;
use crate::console::ConsolePresenter;
use crate::error::{NavigationError, RenderError, TimeItemError};
use crate::form::TimeItemFormState;
use crate::navigation::{ViewNavigation, ViewState};
use crate::repository::TimeItemRepository;
use crate::time_item::TimeItem;

/// 実行中のセッションの状態。
///
/// time itemの一覧と表示中の画面、作成、編集中の入力状態を持つ。
pub struct App<R: TimeItemRepository> {
    collection: TimeItemCollection<R>,
    navigation: ViewNavigation,
    form: Option<TimeItemFormState>,
}

impl<R: TimeItemRepository> App<R> {
    /// リポジトリから一覧を読み込み、ホーム画面から始まる`App`を返す。
    pub fn load(repository: Arc<R>) -> Result<Self> {
        let collection = TimeItemCollection::load(repository)?;

        Ok(Self {
            collection,
            navigation: ViewNavigation::new(),
            form: None,
        })
    }

    pub fn collection(&self) -> &TimeItemCollection<R> {
        &self.collection
    }

    pub fn active_view(&self) -> ViewState {
        self.navigation.active_view()
    }

    pub fn form(&self) -> Option<&TimeItemFormState> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TimeItemFormState> {
        self.form.as_mut()
    }

    /// 新しいtime itemの作成を始める。
    pub fn open_new_item(&mut self) -> Result<&mut TimeItemFormState, NavigationError> {
        self.navigation.to_new_time_item_view()?;

        Ok(self.form.insert(TimeItemFormState::for_new_item()))
    }

    /// 既存のtime itemの編集を始める。
    ///
    /// idが一致するtime itemがない場合は`TimeItemError::NotFound`を返す。
    pub fn open_edit_item(&mut self, id: Uuid) -> Result<&mut TimeItemFormState> {
        let item = self
            .collection
            .get(id)
            .ok_or(TimeItemError::NotFound(id))?;
        let form = TimeItemFormState::for_existing_item(item);
        self.navigation.to_edit_time_item_view(id)?;

        Ok(self.form.insert(form))
    }

    /// 入力中の値を確定して一覧に反映し、ホーム画面に戻る。
    ///
    /// 検証に失敗した場合は入力状態をそのまま残す。
    pub fn submit(&mut self) -> Result<TimeItem> {
        let form = self
            .form
            .as_ref()
            .with_context(|| format!("Nothing to submit on the {}", self.active_view()))?;
        let (collection, item) = form
            .submit(&self.collection)
            .context("Failed to submit the time item")?;

        self.collection = collection;
        self.form = None;
        self.navigation.to_home_view();

        Ok(item)
    }

    /// 入力中の値を破棄してホーム画面に戻る。
    pub fn cancel(&mut self) {
        if let Some(form) = self.form.take() {
            form.cancel();
        }
        self.navigation.to_home_view();
    }

    /// time itemを削除する。
    ///
    /// idが一致するtime itemがない場合は`TimeItemError::NotFound`を返す。
    pub fn remove_item(&mut self, id: Uuid) -> Result<(), TimeItemError> {
        if self.collection.get(id).is_none() {
            return Err(TimeItemError::NotFound(id));
        }
        self.collection = self.collection.remove(id);

        Ok(())
    }

    /// すべてのtime itemを削除する。
    pub fn clear(&mut self) {
        self.collection = self.collection.clear();
    }

    /// 描画に失敗した後、入力状態を破棄して初期状態のホーム画面に戻す。
    pub fn reset_to_home(&mut self) {
        info!("Returning to the home view from {}", self.active_view());
        self.form = None;
        self.navigation.to_home_view();
    }

    /// 表示中の画面を描画する。
    pub fn render<P: ConsolePresenter>(
        &self,
        presenter: &mut P,
        now: &DateTime<Utc>,
    ) -> Result<(), RenderError> {
        let view = self.active_view();
        debug!("Rendering the {}", view);
        match view {
            ViewState::Home => presenter.show_home_view(self.collection.items(), now),
            ViewState::CreatingItem | ViewState::EditingItem(_) => {
                let form = self.form.as_ref().ok_or(RenderError::MissingForm(view))?;
                presenter.show_form_view(form, now)
            }
        }
    }
}
