//! イベントごとに、開始日時からの経過時間を日、時、分、秒で表示する。
//!
//! - `elapsed`: 経過時間の計算
//! - `time_item`, `collection`: time itemの作成、検証と一覧の管理
//! - `form`, `navigation`: 作成、編集中の入力状態と画面遷移
//! - `*_command`: サブコマンドの処理

pub mod add_command;
pub mod app;
pub mod collection;
pub mod console;
pub mod datetime;
pub mod edit_command;
pub mod elapsed;
pub mod error;
pub mod form;
pub mod form_session;
pub mod icon;
pub mod list_command;
pub mod navigation;
pub mod remove_command;
pub mod repository;
pub mod ticker;
pub mod time_item;
pub mod watch_command;
