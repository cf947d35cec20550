use std::io::Write;

use anyhow::{Context, Result};

use crate::app::App;
use crate::console::ConsoleTimeItemList;
use crate::datetime;
use crate::repository::TimeItemRepository;

/// `list`サブコマンドの処理を行う。
///
/// 現在時刻までの経過時間とともにtime itemの一覧を1回だけ表示する。
pub fn list_command<R: TimeItemRepository, W: Write>(app: &App<R>, output: &mut W) -> Result<()> {
    let mut presenter = ConsoleTimeItemList::new(output);
    app.render(&mut presenter, &datetime::now())
        .context("Failed to show time items")?;

    Ok(())
}
