use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;

use crate::app::App;
use crate::form_session::{complete_form, FormArgs};
use crate::repository::TimeItemRepository;
use crate::time_item::TimeItem;

/// `add`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[clap(flatten)]
    form: FormArgs,
}

/// `add`サブコマンドの処理を行う。
///
/// タイトルが`New Event`、開始日時が現在時刻の入力状態から始め、引数の値を反映して追加する。
///
/// # Arguments
///
/// * `app` - ホーム画面を表示している`App`
/// * `add` - `add`サブコマンドの引数
/// * `input` - 対話的に操作する場合の入力
/// * `output` - 画面を表示する出力
pub fn add_command<R, B, W>(
    app: &mut App<R>,
    add: AddArgs,
    input: &mut B,
    output: &mut W,
) -> Result<Option<TimeItem>>
where
    R: TimeItemRepository,
    B: BufRead,
    W: Write,
{
    app.open_new_item()
        .context("Failed to open the new time item view")?;
    let item = complete_form(app, &add.form, input, output)?;
    info!("Add command finished.");

    Ok(item)
}
