use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

use crate::app::App;
use crate::form_session::{complete_form, FormArgs};
use crate::repository::TimeItemRepository;
use crate::time_item::TimeItem;

/// `edit`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct EditArgs {
    #[clap(help = "Id of the time item to edit")]
    id: Uuid,

    #[clap(flatten)]
    form: FormArgs,
}

/// `edit`サブコマンドの処理を行う。
///
/// 指定したtime itemの値から始め、引数で指定されなかった値はそのまま残す。
pub fn edit_command<R, B, W>(
    app: &mut App<R>,
    edit: EditArgs,
    input: &mut B,
    output: &mut W,
) -> Result<Option<TimeItem>>
where
    R: TimeItemRepository,
    B: BufRead,
    W: Write,
{
    app.open_edit_item(edit.id)
        .with_context(|| format!("Failed to open the time item {}", edit.id))?;
    let item = complete_form(app, &edit.form, input, output)?;
    info!("Edit command finished.");

    Ok(item)
}
