use thiserror::Error;
use uuid::Uuid;

use crate::navigation::ViewState;

/// time itemの作成、更新に関するエラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeItemError {
    #[error("Invalid time item: {0}")]
    Validation(String),
    #[error("Time item not found: {0}")]
    NotFound(Uuid),
}

/// 画面遷移に関するエラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Cannot move from {from} to {to}, return to the home view first")]
    InvalidTransition { from: ViewState, to: ViewState },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconError {
    #[error("Unable to find an icon by the name {0}")]
    Unknown(String),
}

/// 画面の描画中に発生した回復不能なエラー。
///
/// 呼び出し側はエラー画面を表示し、一定時間後にホーム画面へ戻す。
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to build the time item to display: {0}")]
    TimeItem(#[from] TimeItemError),
    #[error("Failed to write the view: {0}")]
    Io(#[from] std::io::Error),
    #[error("No form is open for the {0}")]
    MissingForm(ViewState),
}
