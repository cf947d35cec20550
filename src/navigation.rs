use std::fmt;

use log::debug;
use uuid::Uuid;

use crate::error::NavigationError;

/// 表示中の画面。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Home,
    CreatingItem,
    EditingItem(Uuid),
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Home => write!(f, "home view"),
            ViewState::CreatingItem => write!(f, "new time item view"),
            ViewState::EditingItem(id) => write!(f, "edit time item view ({})", id),
        }
    }
}

/// 画面遷移の状態。
///
/// 作成、編集の画面へはホーム画面からのみ遷移でき、終了時は必ずホーム画面に戻る。
#[derive(Debug, Default)]
pub struct ViewNavigation {
    active: ViewState,
}

impl ViewNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> ViewState {
        self.active
    }

    /// ホーム画面に戻る。既にホーム画面の場合は何もしない。
    pub fn to_home_view(&mut self) {
        self.active = ViewState::Home;
        debug!("Moved to {}", ViewState::Home);
    }

    /// 新しいtime itemの作成画面に遷移する。
    pub fn to_new_time_item_view(&mut self) -> Result<(), NavigationError> {
        self.move_from_home(ViewState::CreatingItem)
    }

    /// 指定したtime itemの編集画面に遷移する。
    pub fn to_edit_time_item_view(&mut self, id: Uuid) -> Result<(), NavigationError> {
        self.move_from_home(ViewState::EditingItem(id))
    }

    fn move_from_home(&mut self, to: ViewState) -> Result<(), NavigationError> {
        let from = self.active_view();
        if from != ViewState::Home {
            return Err(NavigationError::InvalidTransition { from, to });
        }

        self.active = to;
        debug!("Moved to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{ViewNavigation, ViewState};
    use crate::error::NavigationError;

    #[test]
    fn test_initial_view_is_home() {
        assert_eq!(ViewNavigation::new().active_view(), ViewState::Home);
    }

    #[test]
    fn test_create_and_return_home() {
        let mut navigation = ViewNavigation::new();

        navigation.to_new_time_item_view().unwrap();
        assert_eq!(navigation.active_view(), ViewState::CreatingItem);

        navigation.to_home_view();
        assert_eq!(navigation.active_view(), ViewState::Home);
    }

    #[test]
    fn test_edit_and_return_home() {
        let mut navigation = ViewNavigation::new();
        let id = Uuid::new_v4();

        navigation.to_edit_time_item_view(id).unwrap();
        assert_eq!(navigation.active_view(), ViewState::EditingItem(id));

        navigation.to_home_view();
        assert_eq!(navigation.active_view(), ViewState::Home);
    }

    /// ホーム画面を経由しない遷移はできないことを確認する。
    #[test]
    fn test_cannot_skip_home() {
        let mut navigation = ViewNavigation::new();
        let id = Uuid::new_v4();
        navigation.to_new_time_item_view().unwrap();

        let result = navigation.to_edit_time_item_view(id);

        assert_eq!(
            result,
            Err(NavigationError::InvalidTransition {
                from: ViewState::CreatingItem,
                to: ViewState::EditingItem(id),
            })
        );
        assert_eq!(navigation.active_view(), ViewState::CreatingItem);
    }

    #[test]
    fn test_cannot_create_while_creating() {
        let mut navigation = ViewNavigation::new();
        navigation.to_new_time_item_view().unwrap();

        assert!(navigation.to_new_time_item_view().is_err());
    }
}
